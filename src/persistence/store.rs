use super::files::{atomic_write, read_file};
use crate::domain::Task;
use crate::error::{TaskError, TaskResult};
use anyhow::Context;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Durable home of the ordered task list: read once at startup, rewritten on every mutation
pub trait TaskStore {
    fn load(&self) -> TaskResult<Vec<Task>>;
    fn save(&mut self, tasks: &[Task]) -> TaskResult<()>;
}

impl<T: TaskStore + ?Sized> TaskStore for Box<T> {
    fn load(&self) -> TaskResult<Vec<Task>> {
        (**self).load()
    }

    fn save(&mut self, tasks: &[Task]) -> TaskResult<()> {
        (**self).save(tasks)
    }
}

/// Tasks serialized as a JSON array in one file, replaced atomically on save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskStore for JsonFileStore {
    fn load(&self) -> TaskResult<Vec<Task>> {
        let content = read_file(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "task store read failed");
            TaskError::StorageUnavailable(e)
        })?;

        let Some(content) = content.filter(|c| !c.trim().is_empty()) else {
            debug!(path = %self.path.display(), "no task store yet, starting empty");
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse tasks from {}", self.path.display()))
            .map_err(TaskError::StorageUnavailable)?;

        debug!(path = %self.path.display(), count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    fn save(&mut self, tasks: &[Task]) -> TaskResult<()> {
        let json = serde_json::to_string_pretty(tasks)
            .context("Failed to serialize tasks")
            .map_err(TaskError::StorageUnavailable)?;

        atomic_write(&self.path, &json).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "task store write failed");
            TaskError::StorageUnavailable(e)
        })?;

        debug!(path = %self.path.display(), count = tasks.len(), "tasks saved");
        Ok(())
    }
}

/// In-process store for controller and UI tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub tasks: Vec<Task>,
    pub save_count: usize,
    /// When set, every save fails with this message
    pub fail_saves: Option<String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl TaskStore for MemoryStore {
    fn load(&self) -> TaskResult<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn save(&mut self, tasks: &[Task]) -> TaskResult<()> {
        if let Some(reason) = &self.fail_saves {
            return Err(TaskError::StorageUnavailable(anyhow::anyhow!(reason.clone())));
        }
        self.tasks = tasks.to_vec();
        self.save_count += 1;
        Ok(())
    }
}
