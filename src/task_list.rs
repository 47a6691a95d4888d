use crate::domain::{build_rows, Slot, Task, TaskDraft, TaskId, TaskRow, ViewFilter};
use crate::error::{TaskError, TaskResult};
use crate::persistence::TaskStore;
use crate::report::{aggregate, WeeklyTotals};
use crate::schedule::{resolve, resolve_excluding};
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of a successful create or update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub id: TaskId,
    /// Slot the task ended up in
    pub slot: Slot,
    /// The requested hour was taken and the task moved
    pub conflicted: bool,
}

/// Owns the authoritative task list and is the only writer to the store.
///
/// Every mutation is saved immediately; when the save fails the in-memory
/// list is put back the way it was, so a rejected mutation leaves no trace.
pub struct TaskList<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: TaskStore> TaskList<S> {
    /// Read the stored list once
    pub fn load(store: S) -> TaskResult<Self> {
        let tasks = store.load()?;
        info!(count = tasks.len(), "task list loaded");
        Ok(Self { store, tasks })
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Id of the task currently at `index`
    pub fn id_at(&self, index: usize) -> TaskResult<TaskId> {
        self.tasks
            .get(index)
            .map(|t| t.id)
            .ok_or(TaskError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
    }

    /// Save the current list, or restore `previous` if the store refuses
    fn persist(&mut self, previous: Vec<Task>) -> TaskResult<()> {
        if let Err(e) = self.store.save(&self.tasks) {
            warn!(error = %e, "save failed, rolling back");
            self.tasks = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Validate, place into a free slot, append and save
    pub fn create_task(&mut self, draft: &TaskDraft) -> TaskResult<Outcome> {
        let valid = draft.validate()?;
        let resolution = resolve(&self.tasks, valid.slot)?;
        let slot = resolution.slot_on(valid.slot.date);

        let id = Uuid::new_v4();
        let task = valid.into_task(id, slot, 0);

        let previous = self.tasks.clone();
        self.tasks.push(task);
        self.persist(previous)?;

        info!(
            %id,
            slot = %format!("{} {}", slot.date, slot.clock_label()),
            conflicted = resolution.conflicted,
            "task created"
        );
        Ok(Outcome {
            id,
            slot,
            conflicted: resolution.conflicted,
        })
    }

    /// Replace the editable fields of a task; `id` and `timeSpent` are kept.
    /// A changed slot is resolved against every other task.
    pub fn update_task(&mut self, id: TaskId, draft: &TaskDraft) -> TaskResult<Outcome> {
        let index = self.position_of(id).ok_or(TaskError::NotFound(id))?;
        let valid = draft.validate()?;
        let existing = &self.tasks[index];

        let (slot, conflicted) = if existing.slot() == Some(valid.slot) {
            (valid.slot, false)
        } else {
            let resolution = resolve_excluding(&self.tasks, valid.slot, Some(id))?;
            (resolution.slot_on(valid.slot.date), resolution.conflicted)
        };

        let updated = valid.into_task(id, slot, existing.time_spent);

        let previous = self.tasks.clone();
        self.tasks[index] = updated;
        self.persist(previous)?;

        info!(%id, index, conflicted, "task updated");
        Ok(Outcome { id, slot, conflicted })
    }

    pub fn remove_task(&mut self, id: TaskId) -> TaskResult<Task> {
        let index = self.position_of(id).ok_or(TaskError::NotFound(id))?;

        let previous = self.tasks.clone();
        let removed = self.tasks.remove(index);
        self.persist(previous)?;

        info!(%id, index, remaining = self.tasks.len(), "task deleted");
        Ok(removed)
    }

    /// Add logged work to a task; returns the new total
    pub fn log_time(&mut self, id: TaskId, ms: u64) -> TaskResult<u64> {
        let index = self.position_of(id).ok_or(TaskError::NotFound(id))?;
        if ms == 0 {
            return Ok(self.tasks[index].time_spent);
        }

        let previous = self.tasks.clone();
        let task = &mut self.tasks[index];
        task.time_spent = task.time_spent.saturating_add(ms);
        let total = task.time_spent;
        self.persist(previous)?;

        debug!(%id, added_ms = ms, total_ms = total, "time logged");
        Ok(total)
    }

    pub fn add_task(&mut self, draft: &TaskDraft) -> TaskResult<Outcome> {
        self.create_task(draft)
    }

    /// Positional edit: `index` is an original index from the current view
    pub fn edit_task(&mut self, index: usize, draft: &TaskDraft) -> TaskResult<Outcome> {
        let id = self.id_at(index)?;
        self.update_task(id, draft)
    }

    pub fn delete_task(&mut self, index: usize) -> TaskResult<Task> {
        let id = self.id_at(index)?;
        self.remove_task(id)
    }

    /// Filtered rows with original indices, built from the list as it is now
    pub fn rows(&self, filter: &ViewFilter) -> Vec<TaskRow> {
        build_rows(&self.tasks, filter)
    }

    pub fn weekly_overview(&self, as_of: NaiveDateTime) -> WeeklyTotals {
        aggregate(&self.tasks, as_of)
    }
}
