//! Short-lived status messages shown under the task table

use crate::error::TaskError;
use std::time::{Duration, Instant};

pub const ADDED: &str = "Successfully added a new task.";
pub const ADDED_ADJUSTED: &str =
    "Successfully added a new task but adjusted to hour that is available due to conflict.";
pub const UPDATED: &str = "Task updated successfully.";
pub const UPDATED_ADJUSTED: &str =
    "Task updated successfully but adjusted to hour that is available due to conflict.";
pub const DELETED: &str = "Successfully deleted a task.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    /// Saved, but the slot moved
    Adjusted,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
    pub ttl: Duration,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn task_added(conflicted: bool, ttl: Duration) -> Self {
        if conflicted {
            Self::new(ToastKind::Adjusted, ADDED_ADJUSTED, ttl)
        } else {
            Self::new(ToastKind::Success, ADDED, ttl)
        }
    }

    pub fn task_updated(conflicted: bool, ttl: Duration) -> Self {
        if conflicted {
            Self::new(ToastKind::Adjusted, UPDATED_ADJUSTED, ttl)
        } else {
            Self::new(ToastKind::Success, UPDATED, ttl)
        }
    }

    pub fn task_deleted(ttl: Duration) -> Self {
        Self::new(ToastKind::Success, DELETED, ttl)
    }

    pub fn failure(error: &TaskError, ttl: Duration) -> Self {
        Self::new(ToastKind::Error, error.to_string(), ttl)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.ttl
    }
}
