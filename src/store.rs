use crate::task::Task;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Durable holder of all task records: the ordered collection plus the
/// monotonically increasing id counter, both persisted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoStore {
    todos: Vec<Task>,
    next_id: u32,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }

    /// Loads the store from `path`. A missing, unreadable, or malformed
    /// file yields an empty store with `next_id = 1`; stored state is
    /// never a fatal condition on load.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), %err, "cannot read todo file, starting empty");
                }
                return Self::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "discarding malformed todo file");
                Self::new()
            }
        }
    }

    /// Serializes the full collection plus `next_id` and overwrites `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("cannot serialize todo store")?;
        fs::write(path, json)
            .with_context(|| format!("cannot write todo file {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = self.todos.len(), "todo store saved");
        Ok(())
    }

    /// Returns the next id and advances the counter. Ids are never
    /// reused, even after removals.
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn push(&mut self, task: Task) {
        self.todos.push(task);
    }

    pub fn find(&self, id: u32) -> Option<&Task> {
        self.todos.iter().find(|task| task.id == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.todos.iter_mut().find(|task| task.id == id)
    }

    /// Removes the task with `id`, reporting whether it was present.
    pub fn remove(&mut self, id: u32) -> bool {
        match self.todos.iter().position(|task| task.id == id) {
            Some(index) => {
                self.todos.remove(index);
                true
            }
            None => false,
        }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.todos
    }
}
