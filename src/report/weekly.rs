use crate::domain::Task;
use crate::schedule::{normalize_date, start_of_week};
use chrono::{NaiveDate, NaiveDateTime};

/// Estimated vs. actual time for the current week (Sunday through today)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyTotals {
    pub week_start: NaiveDate,
    pub today: NaiveDate,
    pub total_estimated_ms: u64,
    pub total_actual_ms: u64,
    /// Number of tasks that fell inside the window
    pub task_count: usize,
}

/// Tasks dated within the current week, never after today
pub fn tasks_in_week(tasks: &[Task], week_start: NaiveDate, today: NaiveDate) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(move |task| match task.date {
        Some(date) => week_start <= date && date <= today,
        None => false,
    })
}

/// Sum estimated and logged time for tasks dated between the week start and `as_of`
pub fn aggregate(tasks: &[Task], as_of: NaiveDateTime) -> WeeklyTotals {
    let today = normalize_date(as_of).date();
    let week_start = start_of_week(as_of).date();

    let mut totals = WeeklyTotals {
        week_start,
        today,
        total_estimated_ms: 0,
        total_actual_ms: 0,
        task_count: 0,
    };

    for task in tasks_in_week(tasks, week_start, today) {
        totals.total_estimated_ms = totals.total_estimated_ms.saturating_add(task.estimated_ms());
        totals.total_actual_ms = totals.total_actual_ms.saturating_add(task.time_spent);
        totals.task_count += 1;
    }

    totals
}
