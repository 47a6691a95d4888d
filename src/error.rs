use crate::domain::TaskId;
use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by task mutations and queries
#[derive(Debug, Error)]
pub enum TaskError {
    /// A required field is missing or a numeric field does not parse
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Every hourly slot on the date is taken
    #[error("no free hour left on {date}; pick a different date")]
    ScheduleExhausted { date: NaiveDate },

    /// The backing store could not be read or written
    #[error("storage unavailable: {0:#}")]
    StorageUnavailable(#[source] anyhow::Error),

    /// No task carries this id (it was deleted since the view was built)
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// A positional address no longer points into the list
    #[error("no task at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl TaskError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type TaskResult<T> = std::result::Result<T, TaskError>;
