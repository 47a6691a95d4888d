use crate::domain::{Priority, Task};
use crate::report::weekly::{tasks_in_week, WeeklyTotals};
use chrono::{Duration, NaiveDate};

/// Totals for one day of the week window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStats {
    pub date: NaiveDate,
    pub task_count: usize,
    pub estimated_ms: u64,
    pub actual_ms: u64,
}

/// Totals for one priority within the week window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityStats {
    pub priority: Priority,
    pub task_count: usize,
    pub estimated_ms: u64,
    pub actual_ms: u64,
}

/// Estimation accuracy over the week's tasks that have both an estimate and logged time
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationStats {
    pub over_estimate_count: usize,
    pub over_estimate_ms: u64,
    pub under_estimate_count: usize,
    pub under_estimate_ms: u64,
    pub avg_accuracy_percent: f64,
}

/// One entry per day from the week start through today, including empty days
pub fn calculate_daily_stats(tasks: &[Task], totals: &WeeklyTotals) -> Vec<DayStats> {
    let days = (totals.today - totals.week_start).num_days();
    let mut stats: Vec<DayStats> = (0..=days)
        .map(|offset| DayStats {
            date: totals.week_start + Duration::days(offset),
            task_count: 0,
            estimated_ms: 0,
            actual_ms: 0,
        })
        .collect();

    for task in tasks_in_week(tasks, totals.week_start, totals.today) {
        let Some(date) = task.date else { continue };
        let offset = (date - totals.week_start).num_days() as usize;
        if let Some(day) = stats.get_mut(offset) {
            day.task_count += 1;
            day.estimated_ms = day.estimated_ms.saturating_add(task.estimated_ms());
            day.actual_ms = day.actual_ms.saturating_add(task.time_spent);
        }
    }

    stats
}

/// One entry per priority (high first); priorities with no tasks are omitted
pub fn calculate_priority_stats(tasks: &[Task], totals: &WeeklyTotals) -> Vec<PriorityStats> {
    Priority::all()
        .iter()
        .filter_map(|priority| {
            let mut entry = PriorityStats {
                priority: *priority,
                task_count: 0,
                estimated_ms: 0,
                actual_ms: 0,
            };
            for task in tasks_in_week(tasks, totals.week_start, totals.today)
                .filter(|t| t.priority == *priority)
            {
                entry.task_count += 1;
                entry.estimated_ms = entry.estimated_ms.saturating_add(task.estimated_ms());
                entry.actual_ms = entry.actual_ms.saturating_add(task.time_spent);
            }
            (entry.task_count > 0).then_some(entry)
        })
        .collect()
}

pub fn calculate_estimation_stats(tasks: &[Task], totals: &WeeklyTotals) -> EstimationStats {
    let mut stats = EstimationStats {
        over_estimate_count: 0,
        over_estimate_ms: 0,
        under_estimate_count: 0,
        under_estimate_ms: 0,
        avg_accuracy_percent: 0.0,
    };
    let mut accuracy_sum = 0.0;
    let mut accuracy_count = 0;

    for task in tasks_in_week(tasks, totals.week_start, totals.today) {
        let estimate = task.estimated_ms();
        let actual = task.time_spent;
        if estimate == 0 || actual == 0 {
            continue;
        }

        if actual > estimate {
            stats.over_estimate_count += 1;
            stats.over_estimate_ms = stats.over_estimate_ms.saturating_add(actual - estimate);
        } else if actual < estimate {
            stats.under_estimate_count += 1;
            stats.under_estimate_ms = stats.under_estimate_ms.saturating_add(estimate - actual);
        }

        // 100% = spot on; overruns are penalised symmetrically
        let ratio = actual as f64 / estimate as f64;
        accuracy_sum += if ratio > 1.0 { 100.0 / ratio } else { ratio * 100.0 };
        accuracy_count += 1;
    }

    if accuracy_count > 0 {
        stats.avg_accuracy_percent = accuracy_sum / accuracy_count as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Meridiem, TimeUnit};
    use crate::report::weekly::aggregate;
    use uuid::Uuid;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn task(day: u32, priority: Priority, hours: &str, spent_min: u64) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: format!("{:?} on {}", priority, day),
            body: "b".to_string(),
            priority,
            status: String::new(),
            date: Some(june(day)),
            time_start: Some(10),
            ante_meridiem: Meridiem::Am,
            estimated_time: hours.to_string(),
            time_unit: TimeUnit::Hours,
            time_spent: spent_min * 60_000,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(9, Priority::High, "2", 90),
            task(11, Priority::High, "1", 90),
            task(11, Priority::Low, "1", 0),
            task(2, Priority::Medium, "4", 240),
        ]
    }

    #[test]
    fn test_daily_stats_cover_every_day_through_today() {
        let tasks = sample();
        let totals = aggregate(&tasks, june(12).and_hms_opt(9, 0, 0).unwrap());
        let days = calculate_daily_stats(&tasks, &totals);

        assert_eq!(days.len(), 4);
        assert_eq!(days[0].date, june(9));
        assert_eq!(days[0].estimated_ms, 7_200_000);
        assert_eq!(days[1].task_count, 0);
        assert_eq!(days[2].task_count, 2);
        assert_eq!(days[2].actual_ms, 90 * 60_000);
        assert_eq!(days[3].date, june(12));
    }

    #[test]
    fn test_priority_stats_skip_empty_priorities() {
        let tasks = sample();
        let totals = aggregate(&tasks, june(12).and_hms_opt(9, 0, 0).unwrap());
        let by_priority = calculate_priority_stats(&tasks, &totals);

        // Medium only appears in the prior week
        assert_eq!(by_priority.len(), 2);
        assert_eq!(by_priority[0].priority, Priority::High);
        assert_eq!(by_priority[0].task_count, 2);
        assert_eq!(by_priority[0].actual_ms, 180 * 60_000);
        assert_eq!(by_priority[1].priority, Priority::Low);
    }

    #[test]
    fn test_huge_logged_time_saturates() {
        let mut tasks = sample();
        tasks[0].time_spent = u64::MAX;
        let totals = aggregate(&tasks, june(12).and_hms_opt(9, 0, 0).unwrap());

        let days = calculate_daily_stats(&tasks, &totals);
        assert_eq!(days[0].actual_ms, u64::MAX);

        tasks[1].time_spent = u64::MAX;
        let by_priority = calculate_priority_stats(&tasks, &totals);
        assert_eq!(by_priority[0].actual_ms, u64::MAX);

        let stats = calculate_estimation_stats(&tasks, &totals);
        assert_eq!(stats.over_estimate_count, 2);
        assert_eq!(stats.over_estimate_ms, u64::MAX);
    }

    #[test]
    fn test_estimation_stats() {
        let tasks = sample();
        let totals = aggregate(&tasks, june(12).and_hms_opt(9, 0, 0).unwrap());
        let stats = calculate_estimation_stats(&tasks, &totals);

        // 90m of 2h is under; 90m of 1h is over; the untracked low task is skipped
        assert_eq!(stats.under_estimate_count, 1);
        assert_eq!(stats.under_estimate_ms, 30 * 60_000);
        assert_eq!(stats.over_estimate_count, 1);
        assert_eq!(stats.over_estimate_ms, 30 * 60_000);
        assert!((stats.avg_accuracy_percent - 70.833).abs() < 0.01);
    }
}
