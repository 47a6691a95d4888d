use super::enums::PriorityFilter;
use super::task::{Task, TaskId};

/// A task as shown in the filtered list, carrying its position in the backing list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Position in the authoritative list when this view was built
    pub original_index: usize,
    pub id: TaskId,
    pub task: Task,
}

/// Search box + priority dropdown; both apply together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub search: String,
    pub priority: PriorityFilter,
}

impl ViewFilter {
    pub fn matches(&self, task: &Task) -> bool {
        task.matches_title(self.search.trim()) && self.priority.matches(task.priority)
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.priority != PriorityFilter::All
    }
}

/// Build the visible rows from the current list; must be rebuilt after every mutation
pub fn build_rows(tasks: &[Task], filter: &ViewFilter) -> Vec<TaskRow> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .map(|(original_index, task)| TaskRow {
            original_index,
            id: task.id,
            task: task.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Meridiem, Priority, TimeUnit};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn task(title: &str, priority: Priority) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            body: "b".to_string(),
            priority,
            status: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10),
            time_start: Some(9),
            ante_meridiem: Meridiem::Am,
            estimated_time: "1".to_string(),
            time_unit: TimeUnit::Hours,
            time_spent: 0,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("Write report", Priority::High),
            task("Groceries", Priority::Low),
            task("Report review", Priority::Medium),
            task("Quarterly REPORT", Priority::High),
        ]
    }

    #[test]
    fn test_unfiltered_rows_keep_positions() {
        let tasks = sample();
        let rows = build_rows(&tasks, &ViewFilter::default());
        let indices: Vec<usize> = rows.iter().map(|r| r.original_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(rows[1].id, tasks[1].id);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = ViewFilter {
            search: "report".to_string(),
            ..ViewFilter::default()
        };
        let rows = build_rows(&sample(), &filter);
        let indices: Vec<usize> = rows.iter().map(|r| r.original_index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
    }

    #[test]
    fn test_search_and_priority_combine() {
        let filter = ViewFilter {
            search: "report".to_string(),
            priority: PriorityFilter::Only(Priority::High),
        };
        let rows = build_rows(&sample(), &filter);
        let indices: Vec<usize> = rows.iter().map(|r| r.original_index).collect();
        assert_eq!(indices, vec![0, 3]);
        assert!(filter.is_active());
    }

    #[test]
    fn test_rows_rebuilt_after_delete() {
        let mut tasks = sample();
        let before = build_rows(&tasks, &ViewFilter::default());
        let removed = tasks.remove(1);
        let after = build_rows(&tasks, &ViewFilter::default());

        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|r| r.id != removed.id));
        // The task formerly at 2 now sits at 1
        assert_eq!(after[1].id, before[2].id);
        assert_eq!(after[1].original_index, 1);
    }
}
