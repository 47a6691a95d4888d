//! Hourly slot conflict resolution.
//!
//! A requested slot that is already taken on the same date moves to the
//! nearest free hour: first forward through the same meridiem (12 wraps to 1),
//! then through the opposite meridiem starting at the same clock hour.

use crate::domain::{Meridiem, Slot, Task, TaskId};
use crate::error::{TaskError, TaskResult};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of resolving a requested slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub hour: u8,
    pub meridiem: Meridiem,
    /// True when the requested hour was taken and a different one was picked
    pub conflicted: bool,
}

impl Resolution {
    pub fn slot_on(&self, date: chrono::NaiveDate) -> Slot {
        Slot::new(date, self.hour, self.meridiem)
    }
}

/// Next clock hour on a 12-hour dial
fn next_hour(hour: u8) -> u8 {
    hour % 12 + 1
}

/// Candidate (hour, meridiem) pairs in search order, starting with the request itself
fn search_order(hour: u8, meridiem: Meridiem) -> impl Iterator<Item = (u8, Meridiem)> {
    [meridiem, meridiem.opposite()].into_iter().flat_map(move |m| {
        std::iter::successors(Some(hour), |h| Some(next_hour(*h)))
            .take(12)
            .map(move |h| (h, m))
    })
}

/// Occupied (hour, meridiem) pairs on `date`, ignoring the task being edited
fn occupied_on(
    tasks: &[Task],
    date: chrono::NaiveDate,
    exclude: Option<TaskId>,
) -> HashSet<(u8, Meridiem)> {
    tasks
        .iter()
        .filter(|t| Some(t.id) != exclude)
        .filter_map(Task::slot)
        .filter(|slot| slot.date == date)
        .map(|slot| (slot.hour, slot.meridiem))
        .collect()
}

/// Accept the requested slot or reassign it to the nearest free hour on the same date
pub fn resolve(tasks: &[Task], requested: Slot) -> TaskResult<Resolution> {
    resolve_excluding(tasks, requested, None)
}

/// Like [`resolve`], but the task with id `exclude` does not occupy its slot
pub fn resolve_excluding(
    tasks: &[Task],
    requested: Slot,
    exclude: Option<TaskId>,
) -> TaskResult<Resolution> {
    let occupied = occupied_on(tasks, requested.date, exclude);

    let (hour, meridiem) = search_order(requested.hour, requested.meridiem)
        .find(|pair| !occupied.contains(pair))
        .ok_or(TaskError::ScheduleExhausted {
            date: requested.date,
        })?;

    let conflicted = (hour, meridiem) != (requested.hour, requested.meridiem);
    if conflicted {
        debug!(
            date = %requested.date,
            requested = %requested.clock_label(),
            assigned_hour = hour,
            assigned_meridiem = %meridiem,
            "slot taken, reassigned"
        );
    }

    Ok(Resolution {
        hour,
        meridiem,
        conflicted,
    })
}
