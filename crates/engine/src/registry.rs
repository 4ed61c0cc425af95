//! Task record ownership and id allocation.

use crate::task::{Status, Task};
use crate::{Error, Result};
use chrono::Utc;
use deptrack_graph::TaskId;
use std::collections::HashMap;
use tracing::debug;

/// Owns the task records and is the source of truth for task existence
/// and caller-set status values.
///
/// The registry enforces no graph invariants; the delete gate against
/// incident edges lives in the façade, which consults the graph first.
pub struct TaskRegistry {
    tasks: HashMap<TaskId, Task>,
    next_id: TaskId,
}

impl TaskRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a task with a fresh id and status `Pending`.
    pub fn create(&mut self, title: impl Into<String>, description: impl Into<String>) -> &Task {
        let id = self.next_id;
        self.next_id += 1;
        let task = Task::new(id, title, description);
        debug!("created task {id}");
        self.tasks.entry(id).or_insert(task)
    }

    /// Look up a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if no record exists.
    pub fn get(&self, id: TaskId) -> Result<&Task> {
        self.tasks.get(&id).ok_or(Error::TaskNotFound { id })
    }

    /// Write a task's caller-set status, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if no record exists.
    pub fn set_status(&mut self, id: TaskId, status: Status) -> Result<&Task> {
        let task = self.tasks.get_mut(&id).ok_or(Error::TaskNotFound { id })?;
        task.status = status;
        task.updated_at = Utc::now();
        debug!("task {id} status set to {status:?}");
        Ok(task)
    }

    /// Write a task's derived blocking overlay. Does not touch
    /// `updated_at`: the overlay is engine-owned, not a caller write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if no record exists.
    pub fn set_blocked_overlay(&mut self, id: TaskId, blocked: bool) -> Result<()> {
        let task = self.tasks.get_mut(&id).ok_or(Error::TaskNotFound { id })?;
        task.blocked_by_dependency = blocked;
        Ok(())
    }

    /// Remove a task record, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if no record exists.
    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        let task = self.tasks.remove(&id).ok_or(Error::TaskNotFound { id })?;
        debug!("removed task {id}");
        Ok(task)
    }

    /// Number of task records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the registry holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterate over all task records, unordered.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_allocates_increasing_ids() {
        let mut registry = TaskRegistry::new();
        let a = registry.create("a", "").id;
        let b = registry.create("b", "").id;
        assert!(b > a);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_get_missing_task() {
        let registry = TaskRegistry::new();
        assert_eq!(registry.get(9), Err(Error::TaskNotFound { id: 9 }));
    }

    #[test]
    fn test_set_status_refreshes_updated_at() {
        let mut registry = TaskRegistry::new();
        let id = registry.create("a", "").id;
        let created = registry.get(id).unwrap().created_at;

        let task = registry.set_status(id, Status::InProgress).unwrap();
        assert_eq!(task.status, Status::InProgress);
        assert!(task.updated_at >= created);
    }

    #[test]
    fn test_overlay_write_preserves_updated_at() {
        let mut registry = TaskRegistry::new();
        let id = registry.create("a", "").id;
        let before = registry.get(id).unwrap().updated_at;

        registry.set_blocked_overlay(id, true).unwrap();
        let task = registry.get(id).unwrap();
        assert!(task.blocked_by_dependency);
        assert_eq!(task.updated_at, before);
    }

    #[test]
    fn test_remove_round_trip() {
        let mut registry = TaskRegistry::new();
        let id = registry.create("a", "").id;
        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(registry.is_empty());
        assert_eq!(registry.remove(id), Err(Error::TaskNotFound { id }));
    }
}
