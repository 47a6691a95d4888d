use crate::domain::Task;
use crate::persistence::atomic_write;
use crate::report::stats::{calculate_daily_stats, calculate_estimation_stats, calculate_priority_stats};
use crate::report::weekly::{aggregate, tasks_in_week};
use crate::schedule::format_duration;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::info;

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Render the Markdown weekly report for the week containing `as_of`
pub fn render_weekly_report(tasks: &[Task], as_of: NaiveDateTime) -> String {
    let totals = aggregate(tasks, as_of);
    let daily = calculate_daily_stats(tasks, &totals);
    let by_priority = calculate_priority_stats(tasks, &totals);
    let estimation = calculate_estimation_stats(tasks, &totals);

    let mut report = String::new();

    report.push_str(&format!("# Weekly Overview - Week of {}\n\n", totals.week_start));
    report.push_str(&format!("_{} through {}_\n\n", totals.week_start, totals.today));

    // Summary
    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Tasks This Week:** {}\n", totals.task_count));
    report.push_str(&format!(
        "- **Total Estimated Time:** {}\n",
        format_duration(totals.total_estimated_ms)
    ));
    report.push_str(&format!(
        "- **Total Actual Time:** {} ({} of estimate)\n\n",
        format_duration(totals.total_actual_ms),
        format_percent(percent_of(totals.total_actual_ms, totals.total_estimated_ms))
    ));

    // Per day
    report.push_str("## By Day\n\n");
    report.push_str("| Day | Tasks | Estimated | Actual |\n");
    report.push_str("|-----|-------|-----------|--------|\n");
    for day in &daily {
        report.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            day.date.format("%a %b %d"),
            day.task_count,
            format_duration(day.estimated_ms),
            format_duration(day.actual_ms)
        ));
    }
    report.push('\n');

    // Per priority
    if !by_priority.is_empty() {
        report.push_str("## By Priority\n\n");
        for entry in &by_priority {
            report.push_str(&format!(
                "- **{}:** {} tasks, {} / {} estimated\n",
                entry.priority.label(),
                entry.task_count,
                format_duration(entry.actual_ms),
                format_duration(entry.estimated_ms)
            ));
        }
        report.push('\n');
    }

    // Estimation accuracy
    report.push_str("## Estimation Accuracy\n\n");
    report.push_str(&format!(
        "- **Tasks Over Estimate:** {} ({} over)\n",
        estimation.over_estimate_count,
        format_duration(estimation.over_estimate_ms)
    ));
    report.push_str(&format!(
        "- **Tasks Under Estimate:** {} ({} under)\n",
        estimation.under_estimate_count,
        format_duration(estimation.under_estimate_ms)
    ));
    report.push_str(&format!(
        "- **Average Accuracy:** {}\n\n",
        format_percent(estimation.avg_accuracy_percent)
    ));

    // Task list
    let mut week_tasks: Vec<&Task> = tasks_in_week(tasks, totals.week_start, totals.today).collect();
    if !week_tasks.is_empty() {
        week_tasks.sort_by_key(|t| (t.date, t.slot().map(|s| s.hour_of_day())));
        report.push_str("## Tasks\n\n");
        for task in week_tasks {
            let when = task
                .slot()
                .map(|s| format!("{} {}", s.date, s.clock_label()))
                .or_else(|| task.date.map(|d| d.to_string()))
                .unwrap_or_default();
            let status = if task.status.is_empty() {
                String::new()
            } else {
                format!(" [{}]", task.status)
            };
            report.push_str(&format!("- **{}**{} ({}, {})\n", task.title, status, when, task.priority));
            report.push_str(&format!(
                "  - Time: {} / {} estimated\n",
                format_duration(task.time_spent),
                format_duration(task.estimated_ms())
            ));
        }
        report.push('\n');
    }

    report
}

/// Write the weekly report; defaults to `<data dir>/report-week-<week start>.md`
pub fn generate_report(
    tasks: &[Task],
    as_of: NaiveDateTime,
    data_dir: &Path,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let report = render_weekly_report(tasks, as_of);

    let output = match output_path {
        Some(path) => path,
        None => {
            let week_start = aggregate(tasks, as_of).week_start;
            data_dir.join(format!("report-week-{}.md", week_start))
        }
    };

    atomic_write(&output, &report)?;
    info!(path = %output.display(), "weekly report written");

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Meridiem, Priority, TimeUnit};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn task(title: &str, day: u32, hour: u8, meridiem: Meridiem, spent: u64) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            body: "b".to_string(),
            priority: Priority::High,
            status: "in progress".to_string(),
            date: Some(june(day)),
            time_start: Some(hour),
            ante_meridiem: meridiem,
            estimated_time: "2".to_string(),
            time_unit: TimeUnit::Hours,
            time_spent: spent,
        }
    }

    #[test]
    fn test_render_weekly_report_sections() {
        let tasks = vec![
            task("Afternoon review", 10, 1, Meridiem::Pm, 1_800_000),
            task("Morning standup", 10, 9, Meridiem::Am, 0),
            task("Last week", 3, 9, Meridiem::Am, 0),
        ];
        let report = render_weekly_report(&tasks, june(12).and_hms_opt(8, 0, 0).unwrap());

        assert!(report.contains("# Weekly Overview - Week of 2024-06-09"));
        assert!(report.contains("**Tasks This Week:** 2"));
        assert!(report.contains("**Total Estimated Time:** 4h"));
        assert!(report.contains("**Total Actual Time:** 30m"));
        assert!(report.contains("## By Priority"));
        assert!(!report.contains("Last week"));

        // Morning slot sorts before the afternoon one on the same day
        let morning = report.find("Morning standup").unwrap();
        let afternoon = report.find("Afternoon review").unwrap();
        assert!(morning < afternoon);
    }

    #[test]
    fn test_twelve_am_sorts_first() {
        let tasks = vec![
            task("One AM", 10, 1, Meridiem::Am, 0),
            task("Midnight", 10, 12, Meridiem::Am, 0),
        ];
        let report = render_weekly_report(&tasks, june(12).and_hms_opt(8, 0, 0).unwrap());
        assert!(report.find("Midnight").unwrap() < report.find("One AM").unwrap());
    }

    #[test]
    fn test_generate_report_default_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tasks = vec![task("Only", 11, 10, Meridiem::Am, 0)];
        let path = generate_report(&tasks, june(12).and_hms_opt(8, 0, 0).unwrap(), temp_dir.path(), None).unwrap();

        assert_eq!(path, temp_dir.path().join("report-week-2024-06-09.md"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Only"));
    }
}
