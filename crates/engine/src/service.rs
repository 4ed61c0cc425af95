//! The locked engine façade.
//!
//! [`GraphService`] is the single entry point an API layer calls. It holds
//! the registry and the graph behind one `parking_lot::RwLock`: writers
//! take the write lock for the whole validate-commit-recompute sequence,
//! so a commit is atomic from any reader's perspective; readers take the
//! read lock and observe a consistent snapshot. Failures are terminal for
//! the call and never retried internally.

use crate::registry::TaskRegistry;
use crate::task::Status;
use crate::wire::{DependencyView, TaskView};
use crate::{Error, Result, resolver};
use chrono::{DateTime, Utc};
use deptrack_graph::{Dependency, DependencyGraph, DependencyId, TaskId};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Registry, graph, and edge metadata guarded together by one lock.
struct EngineState {
    registry: TaskRegistry,
    graph: DependencyGraph,
    /// Creation times of committed edges, keyed by edge id.
    edge_created: HashMap<DependencyId, DateTime<Utc>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            registry: TaskRegistry::new(),
            graph: DependencyGraph::new(),
            edge_created: HashMap::new(),
        }
    }

    /// Recompute the blocking overlay for one task from its direct
    /// prerequisites' caller-set statuses. Touches nothing else.
    fn recompute_overlay(&mut self, id: TaskId) -> Result<()> {
        let mut statuses = Vec::new();
        for edge in self.graph.dependencies_of(id)? {
            statuses.push(self.registry.get(edge.depends_on)?.status);
        }
        let blocked = resolver::blocked_by_unmet_prerequisite(statuses);
        self.registry.set_blocked_overlay(id, blocked)
    }

    fn task_view(&self, id: TaskId) -> Result<TaskView> {
        let task = self.registry.get(id)?;
        Ok(TaskView::from_task(
            task,
            self.graph.dependency_count(id)?,
            self.graph.dependent_count(id)?,
        ))
    }

    fn dependency_view(&self, edge: &Dependency) -> Result<DependencyView> {
        Ok(DependencyView {
            id: edge.id,
            task: edge.task,
            depends_on: edge.depends_on,
            task_title: self.registry.get(edge.task)?.title.clone(),
            depends_on_title: self.registry.get(edge.depends_on)?.title.clone(),
            created_at: self
                .edge_created
                .get(&edge.id)
                .copied()
                .unwrap_or_default(),
        })
    }
}

/// Thread-safe façade over the task registry and the dependency graph.
///
/// Exposes exactly the operations the API layer consumes. Every failure
/// from the underlying components is surfaced unchanged in kind; the
/// façade adds no failure modes of its own.
pub struct GraphService {
    state: RwLock<EngineState>,
}

impl GraphService {
    /// Create an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(EngineState::new()),
        }
    }

    /// Create a task with status `Pending` and register its graph node.
    pub fn create_task(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> TaskView {
        let mut state = self.state.write();
        let task = state.registry.create(title, description);
        let view = TaskView::from_task(task, 0, 0);
        state.graph.add_node(view.id);
        debug!("created task {}", view.id);
        view
    }

    /// Fetch one task with its derived counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if the task does not exist.
    pub fn get_task(&self, id: TaskId) -> Result<TaskView> {
        self.state.read().task_view(id)
    }

    /// List all tasks, newest first.
    pub fn list_tasks(&self) -> Vec<TaskView> {
        let state = self.state.read();
        let mut ids: Vec<(DateTime<Utc>, TaskId)> = state
            .registry
            .iter()
            .map(|task| (task.created_at, task.id))
            .collect();
        ids.sort_by(|a, b| b.cmp(a));
        ids.into_iter()
            .filter_map(|(_, id)| state.task_view(id).ok())
            .collect()
    }

    /// Write a task's caller-set status.
    ///
    /// Recomputes the blocking overlay for the task itself and for its
    /// direct dependents, whose overlays read this task's status. Nothing
    /// is walked transitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if the task does not exist.
    pub fn update_task_status(&self, id: TaskId, status: Status) -> Result<TaskView> {
        let mut state = self.state.write();
        state.registry.set_status(id, status)?;
        state.recompute_overlay(id)?;
        for edge in state.graph.dependents_of(id)? {
            state.recompute_overlay(edge.task)?;
        }
        debug!("task {id} status updated to {status:?}");
        state.task_view(id)
    }

    /// Delete a task that has no incident dependency edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if the task does not exist, or
    /// [`Error::HasDependents`] while any edge in either direction still
    /// touches it (dependencies or dependents must be removed first).
    pub fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut state = self.state.write();
        state.registry.get(id)?;
        if state.graph.has_incident_edges(id) {
            return Err(Error::HasDependents { id });
        }
        state.graph.remove_node(id)?;
        state.registry.remove(id)?;
        debug!("deleted task {id}");
        Ok(())
    }

    /// Declare that `task` depends on `depends_on`.
    ///
    /// Validation order: both tasks must exist, the endpoints must differ,
    /// and the edge must not close a cycle. A duplicate pair returns the
    /// existing edge unchanged. On success the dependent's blocking
    /// overlay is recomputed; no other task is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`], [`Error::SelfDependency`], or
    /// [`Error::CircularDependency`] carrying the cycle path
    /// `[task, depends_on, .., task]`.
    pub fn add_dependency(&self, task: TaskId, depends_on: TaskId) -> Result<DependencyView> {
        let mut state = self.state.write();
        let edge = state.graph.add_edge(task, depends_on)?;
        state.edge_created.entry(edge.id).or_insert_with(Utc::now);
        state.recompute_overlay(task)?;
        debug!("dependency {}: task {task} depends on {depends_on}", edge.id);
        state.dependency_view(&edge)
    }

    /// Remove a dependency edge by id and recompute the dependent's
    /// blocking overlay.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DependencyNotFound`] if no edge has that id.
    pub fn remove_dependency(&self, id: DependencyId) -> Result<()> {
        let mut state = self.state.write();
        let edge = state.graph.remove_edge(id)?;
        state.edge_created.remove(&id);
        state.recompute_overlay(edge.task)?;
        debug!("removed dependency {id}");
        Ok(())
    }

    /// List a task's direct dependencies (the tasks it depends on).
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if the task does not exist.
    pub fn list_dependencies(&self, id: TaskId) -> Result<Vec<DependencyView>> {
        let state = self.state.read();
        state
            .graph
            .dependencies_of(id)?
            .iter()
            .map(|edge| state.dependency_view(edge))
            .collect()
    }

    /// List a task's direct dependents (the tasks that depend on it).
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if the task does not exist.
    pub fn list_dependents(&self, id: TaskId) -> Result<Vec<DependencyView>> {
        let state = self.state.read();
        state
            .graph
            .dependents_of(id)?
            .iter()
            .map(|edge| state.dependency_view(edge))
            .collect()
    }

    /// Number of direct dependencies of a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if the task does not exist.
    pub fn dependency_count(&self, id: TaskId) -> Result<usize> {
        Ok(self.state.read().graph.dependency_count(id)?)
    }

    /// Number of direct dependents of a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if the task does not exist.
    pub fn dependent_count(&self, id: TaskId) -> Result<usize> {
        Ok(self.state.read().graph.dependent_count(id)?)
    }
}

impl Default for GraphService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tasks(service: &GraphService) -> (TaskId, TaskId, TaskId) {
        (
            service.create_task("A", "").id,
            service.create_task("B", "").id,
            service.create_task("C", "").id,
        )
    }

    #[test]
    fn test_create_and_get() {
        let service = GraphService::new();
        let view = service.create_task("write", "the spec");
        let fetched = service.get_task(view.id).unwrap();
        assert_eq!(fetched.title, "write");
        assert_eq!(fetched.status, Status::Pending);
        assert_eq!(fetched.dependency_count, 0);
        assert_eq!(fetched.dependent_count, 0);
    }

    #[test]
    fn test_new_dependency_blocks_dependent() {
        let service = GraphService::new();
        let (a, b, _) = three_tasks(&service);

        service.add_dependency(a, b).unwrap();
        assert_eq!(service.get_task(a).unwrap().status, Status::Blocked);
        assert_eq!(service.get_task(b).unwrap().status, Status::Pending);
    }

    #[test]
    fn test_completing_prerequisite_unblocks_dependent() {
        let service = GraphService::new();
        let (a, b, _) = three_tasks(&service);
        service.add_dependency(a, b).unwrap();

        service.update_task_status(b, Status::Completed).unwrap();
        assert_eq!(service.get_task(a).unwrap().status, Status::Pending);
    }

    #[test]
    fn test_status_write_touches_direct_dependents_only() {
        let service = GraphService::new();
        let (a, b, c) = three_tasks(&service);
        // a depends on b, b depends on c
        service.add_dependency(a, b).unwrap();
        service.add_dependency(b, c).unwrap();

        service.update_task_status(c, Status::Completed).unwrap();
        // b's overlay clears (its only prerequisite completed); a stays
        // blocked because b itself is still not completed
        assert_eq!(service.get_task(b).unwrap().status, Status::Pending);
        assert_eq!(service.get_task(a).unwrap().status, Status::Blocked);
    }

    #[test]
    fn test_explicit_progress_overrides_overlay() {
        let service = GraphService::new();
        let (a, b, _) = three_tasks(&service);
        service.add_dependency(a, b).unwrap();

        service.update_task_status(a, Status::InProgress).unwrap();
        assert_eq!(service.get_task(a).unwrap().status, Status::InProgress);
    }

    #[test]
    fn test_completing_task_never_needs_prerequisites() {
        let service = GraphService::new();
        let (a, b, _) = three_tasks(&service);
        service.add_dependency(a, b).unwrap();

        // b is still pending; completing a must succeed regardless
        let view = service.update_task_status(a, Status::Completed).unwrap();
        assert_eq!(view.status, Status::Completed);
        assert_eq!(service.get_task(b).unwrap().status, Status::Pending);
    }

    #[test]
    fn test_removing_edge_unblocks() {
        let service = GraphService::new();
        let (a, b, _) = three_tasks(&service);
        let edge = service.add_dependency(a, b).unwrap();

        service.remove_dependency(edge.id).unwrap();
        assert_eq!(service.get_task(a).unwrap().status, Status::Pending);
        assert_eq!(service.get_task(a).unwrap().dependency_count, 0);
    }

    #[test]
    fn test_delete_gate() {
        let service = GraphService::new();
        let (a, b, _) = three_tasks(&service);
        let edge = service.add_dependency(a, b).unwrap();

        assert_eq!(service.delete_task(a), Err(Error::HasDependents { id: a }));
        assert_eq!(service.delete_task(b), Err(Error::HasDependents { id: b }));

        service.remove_dependency(edge.id).unwrap();
        service.delete_task(a).unwrap();
        assert_eq!(service.get_task(a), Err(Error::TaskNotFound { id: a }));
    }

    #[test]
    fn test_list_tasks_newest_first() {
        let service = GraphService::new();
        let (a, b, c) = three_tasks(&service);
        let listed: Vec<TaskId> = service.list_tasks().iter().map(|t| t.id).collect();
        assert_eq!(listed, vec![c, b, a]);
    }

    #[test]
    fn test_dependency_view_resolves_titles() {
        let service = GraphService::new();
        let (a, b, _) = three_tasks(&service);
        let view = service.add_dependency(a, b).unwrap();
        assert_eq!(view.task_title, "A");
        assert_eq!(view.depends_on_title, "B");
    }
}
