use crate::domain::TimeUnit;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

pub const MS_PER_MINUTE: u64 = 60_000;
pub const MS_PER_HOUR: u64 = 3_600_000;

/// Same instant with the time of day zeroed
pub fn normalize_date(moment: NaiveDateTime) -> NaiveDateTime {
    moment.date().and_time(NaiveTime::MIN)
}

/// Most recent Sunday at midnight (weeks run Sunday through Saturday)
pub fn start_of_week(moment: NaiveDateTime) -> NaiveDateTime {
    let midnight = normalize_date(moment);
    let days_since_sunday = midnight.weekday().num_days_from_sunday() as i64;
    midnight - Duration::days(days_since_sunday)
}

pub fn duration_to_ms(amount: u32, unit: TimeUnit) -> u64 {
    let amount = amount as u64;
    match unit {
        TimeUnit::Minutes => amount * MS_PER_MINUTE,
        TimeUnit::Hours => amount * MS_PER_HOUR,
    }
}

/// Format milliseconds as "Xh Ym" (omits zero parts); under a minute shows seconds
pub fn format_duration(ms: u64) -> String {
    if ms == 0 {
        return "0m".to_string();
    }
    if ms < MS_PER_MINUTE {
        return format!("{}s", ms / 1000);
    }

    let total_minutes = ms / MS_PER_MINUTE;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 42)
            .unwrap()
    }

    #[test]
    fn test_normalize_date_zeroes_time() {
        let normalized = normalize_date(at(2024, 6, 12, 17, 45));
        assert_eq!(normalized.date(), NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        assert_eq!(normalized.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_start_of_week_is_previous_sunday() {
        // 2024-06-12 is a Wednesday
        let start = start_of_week(at(2024, 6, 12, 10, 0));
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
        assert_eq!(start.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_start_of_week_on_sunday_and_saturday() {
        let sunday = start_of_week(at(2024, 6, 9, 23, 59));
        assert_eq!(sunday.date(), NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());

        let saturday = start_of_week(at(2024, 6, 15, 8, 0));
        assert_eq!(saturday.date(), NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
    }

    #[test]
    fn test_start_of_week_crosses_month() {
        // 2024-07-02 is a Tuesday; its week starts on 2024-06-30
        let start = start_of_week(at(2024, 7, 2, 9, 0));
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_duration_to_ms() {
        assert_eq!(duration_to_ms(1, TimeUnit::Hours), 3_600_000);
        assert_eq!(duration_to_ms(90, TimeUnit::Minutes), 5_400_000);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(30_000), "30s");
        assert_eq!(format_duration(45 * MS_PER_MINUTE), "45m");
        assert_eq!(format_duration(2 * MS_PER_HOUR), "2h");
        assert_eq!(format_duration(2 * MS_PER_HOUR + 30 * MS_PER_MINUTE), "2h 30m");
    }

    #[test]
    fn test_format_duration_monotonic_in_minutes() {
        // Larger amounts never render as fewer hours or minutes
        let mut previous = (0, 0);
        for minutes in (0..600).step_by(7) {
            let label = format_duration(minutes * MS_PER_MINUTE);
            let hours = label
                .split('h')
                .next()
                .filter(|_| label.contains('h'))
                .and_then(|h| h.trim().parse::<u64>().ok())
                .unwrap_or(0);
            let total = hours * 60
                + label
                    .rsplit(' ')
                    .next()
                    .filter(|part| part.ends_with('m'))
                    .and_then(|part| part.trim_end_matches('m').parse::<u64>().ok())
                    .unwrap_or(0);
            assert!((hours, total) >= previous, "{} regressed", label);
            assert_eq!(total, minutes);
            previous = (hours, total);
        }
    }
}
