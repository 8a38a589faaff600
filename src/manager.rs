use crate::store::TodoStore;
use crate::task::{DueDateUpdate, Priority, Task};
use chrono::Utc;
use std::path::PathBuf;

/// Command layer over the store. Every successful mutation persists the
/// whole store to the backing file before returning; "not found" is
/// reported as `false`, never as an error. The `Result` carries only
/// write failures.
pub struct TodoManager {
    store: TodoStore,
    path: PathBuf,
}

impl TodoManager {
    /// Opens a manager against `path`, loading whatever state is there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let store = TodoStore::load(&path);
        Self { store, path }
    }

    /// Adds a new task and returns its id. Priority text outside
    /// low/medium/high silently falls back to medium.
    #[tracing::instrument(skip(self))]
    pub fn add(
        &mut self,
        description: String,
        priority: &str,
        due_date: Option<String>,
    ) -> anyhow::Result<u32> {
        let priority = Priority::parse(priority).unwrap_or_default();
        let id = self.store.allocate_id();
        self.store.push(Task::new(id, description, priority, due_date));
        self.store.save(&self.path)?;
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: u32) -> anyhow::Result<bool> {
        if !self.store.remove(id) {
            return Ok(false);
        }
        self.store.save(&self.path)?;
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub fn complete(&mut self, id: u32) -> anyhow::Result<bool> {
        match self.store.find_mut(id) {
            Some(task) => {
                task.completed = true;
                task.completed_at = Some(Utc::now());
            }
            None => return Ok(false),
        }
        self.store.save(&self.path)?;
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub fn uncomplete(&mut self, id: u32) -> anyhow::Result<bool> {
        match self.store.find_mut(id) {
            Some(task) => {
                task.completed = false;
                task.completed_at = None;
            }
            None => return Ok(false),
        }
        self.store.save(&self.path)?;
        Ok(true)
    }

    /// Applies only the supplied fields. An unrecognized priority string
    /// is ignored while the other supplied fields still apply. An update
    /// with no fields supplied leaves the task unchanged but persists.
    #[tracing::instrument(skip(self))]
    pub fn update(
        &mut self,
        id: u32,
        description: Option<String>,
        priority: Option<&str>,
        due_date: DueDateUpdate,
    ) -> anyhow::Result<bool> {
        match self.store.find_mut(id) {
            Some(task) => {
                if let Some(description) = description {
                    task.description = description;
                }
                if let Some(priority) = priority.and_then(Priority::parse) {
                    task.priority = priority;
                }
                match due_date {
                    DueDateUpdate::Keep => {}
                    DueDateUpdate::Set(date) => task.due_date = Some(date),
                    DueDateUpdate::Clear => task.due_date = None,
                }
            }
            None => return Ok(false),
        }
        self.store.save(&self.path)?;
        Ok(true)
    }

    /// Filtered, sorted snapshot of the tasks, recomputed on every call.
    /// Incomplete tasks sort before completed ones, then high priority
    /// before medium before low; the sort is stable, so insertion order
    /// breaks ties.
    pub fn list(&self, show_completed: bool, priority_filter: Option<Priority>) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .store
            .tasks()
            .iter()
            .filter(|task| show_completed || !task.completed)
            .filter(|task| priority_filter.is_none_or(|priority| task.priority == priority))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.completed, task.priority));
        tasks
    }

    pub fn find(&self, id: u32) -> Option<&Task> {
        self.store.find(id)
    }
}
