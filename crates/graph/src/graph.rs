//! The mutable dependency graph.
//!
//! Edges point from a dependent task to its prerequisite, so following
//! outgoing edges walks prerequisite chains. Both adjacency directions are
//! queryable in O(degree) through petgraph's directed edge lists. Storage
//! is a [`StableDiGraph`] so node and edge indices survive removals.

use crate::{DependencyId, Error, Result, TaskId, detect};
use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::debug;

/// A committed directed dependency edge.
///
/// `task` is the dependent endpoint, `depends_on` the prerequisite. The
/// edge has its own identity, distinct from the endpoint task ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// Unique id of the edge itself.
    pub id: DependencyId,
    /// The task that has the dependency.
    pub task: TaskId,
    /// The prerequisite task.
    pub depends_on: TaskId,
}

/// Directed graph of tasks and their depends-on edges.
///
/// The graph exclusively owns the edge set and enforces its invariants on
/// every insertion: no self-loops, no duplicate `(task, depends_on)`
/// pairs, and acyclicity at every committed state. A rejected insertion
/// has no effect.
pub struct DependencyGraph {
    /// Node weight is the task id, edge weight the dependency id.
    graph: StableDiGraph<TaskId, DependencyId>,
    /// Map from task ids to node indices.
    nodes: HashMap<TaskId, NodeIndex>,
    /// Map from dependency ids to edge indices.
    edges: HashMap<DependencyId, EdgeIndex>,
    /// Next edge id to allocate.
    next_edge_id: DependencyId,
}

impl DependencyGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            nodes: HashMap::new(),
            edges: HashMap::new(),
            next_edge_id: 1,
        }
    }

    /// Add a node for a task id. A no-op if the node already exists.
    pub fn add_node(&mut self, id: TaskId) {
        if !self.nodes.contains_key(&id) {
            let index = self.graph.add_node(id);
            self.nodes.insert(id, index);
            debug!("added graph node for task {id}");
        }
    }

    /// Remove a task's node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if no node exists for `id`, or
    /// [`Error::HasIncidentEdges`] while any edge in either direction
    /// still touches it.
    pub fn remove_node(&mut self, id: TaskId) -> Result<()> {
        let index = self.node_index(id)?;
        if self.graph.edges_directed(index, Direction::Outgoing).count() > 0
            || self.graph.edges_directed(index, Direction::Incoming).count() > 0
        {
            return Err(Error::HasIncidentEdges { id });
        }

        self.graph
            .remove_node(index)
            .ok_or(Error::UnknownTask { id })?;
        self.nodes.remove(&id);
        debug!("removed graph node for task {id}");
        Ok(())
    }

    /// Whether a node exists for the task id.
    #[must_use]
    pub fn contains_node(&self, id: TaskId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Add the edge "`task` depends on `depends_on`".
    ///
    /// Validation order: both endpoints must exist, the endpoints must
    /// differ, and `depends_on` must not already reach `task`. A duplicate
    /// `(task, depends_on)` pair is an idempotent success returning the
    /// existing edge; a second record is never created. On success the
    /// commit is atomic: both adjacency directions reflect the edge before
    /// this method returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`], [`Error::SelfDependency`], or
    /// [`Error::CircularDependency`] carrying the closed cycle path
    /// `[task, depends_on, .., task]` (rejected edge first, closing node
    /// at both ends).
    pub fn add_edge(&mut self, task: TaskId, depends_on: TaskId) -> Result<Dependency> {
        let task_index = self.node_index(task)?;
        let depends_on_index = self.node_index(depends_on)?;

        if task == depends_on {
            return Err(Error::SelfDependency { id: task });
        }

        if let Some(existing) = self.graph.find_edge(task_index, depends_on_index) {
            let id = self.graph[existing];
            debug!("dependency {task} -> {depends_on} already exists as edge {id}");
            return Ok(Dependency {
                id,
                task,
                depends_on,
            });
        }

        if let Some(existing_path) = detect::path_between(&self.graph, depends_on_index, task_index)
        {
            let mut path = Vec::with_capacity(existing_path.len() + 1);
            path.push(task);
            path.extend(existing_path);
            debug!("rejected dependency {task} -> {depends_on}: would close cycle {path:?}");
            return Err(Error::CircularDependency { path });
        }

        let id = self.next_edge_id;
        self.next_edge_id += 1;
        let edge_index = self.graph.add_edge(task_index, depends_on_index, id);
        self.edges.insert(id, edge_index);
        debug!("added dependency edge {id}: {task} -> {depends_on}");

        Ok(Dependency {
            id,
            task,
            depends_on,
        })
    }

    /// Remove an edge by its dependency id, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDependency`] if no edge has that id.
    pub fn remove_edge(&mut self, id: DependencyId) -> Result<Dependency> {
        let edge_index = self
            .edges
            .remove(&id)
            .ok_or(Error::UnknownDependency { id })?;
        let (task_index, depends_on_index) = self
            .graph
            .edge_endpoints(edge_index)
            .ok_or(Error::UnknownDependency { id })?;
        let dependency = Dependency {
            id,
            task: self.graph[task_index],
            depends_on: self.graph[depends_on_index],
        };

        self.graph
            .remove_edge(edge_index)
            .ok_or(Error::UnknownDependency { id })?;
        debug!(
            "removed dependency edge {id}: {} -> {}",
            dependency.task, dependency.depends_on
        );
        Ok(dependency)
    }

    /// Direct dependencies of a task (edges where it is the dependent).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if no node exists for `id`.
    pub fn dependencies_of(&self, id: TaskId) -> Result<Vec<Dependency>> {
        let index = self.node_index(id)?;
        let mut result: Vec<Dependency> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| Dependency {
                id: *edge.weight(),
                task: id,
                depends_on: self.graph[edge.target()],
            })
            .collect();
        result.sort_by_key(|dep| dep.id);
        Ok(result)
    }

    /// Direct dependents of a task (edges where it is the prerequisite).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if no node exists for `id`.
    pub fn dependents_of(&self, id: TaskId) -> Result<Vec<Dependency>> {
        let index = self.node_index(id)?;
        let mut result: Vec<Dependency> = self
            .graph
            .edges_directed(index, Direction::Incoming)
            .map(|edge| Dependency {
                id: *edge.weight(),
                task: self.graph[edge.source()],
                depends_on: id,
            })
            .collect();
        result.sort_by_key(|dep| dep.id);
        Ok(result)
    }

    /// Number of direct dependencies of a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if no node exists for `id`.
    pub fn dependency_count(&self, id: TaskId) -> Result<usize> {
        let index = self.node_index(id)?;
        Ok(self.graph.edges_directed(index, Direction::Outgoing).count())
    }

    /// Number of direct dependents of a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if no node exists for `id`.
    pub fn dependent_count(&self, id: TaskId) -> Result<usize> {
        let index = self.node_index(id)?;
        Ok(self.graph.edges_directed(index, Direction::Incoming).count())
    }

    /// Whether any edge, in either direction, touches the task.
    ///
    /// Unknown ids report `false`; callers gate on existence separately.
    #[must_use]
    pub fn has_incident_edges(&self, id: TaskId) -> bool {
        self.nodes.get(&id).is_some_and(|&index| {
            self.graph.edges_directed(index, Direction::Outgoing).count() > 0
                || self.graph.edges_directed(index, Direction::Incoming).count() > 0
        })
    }

    /// Find a path of depends-on edges from `from` to `to`, if one exists.
    ///
    /// Returns `None` when either id is unknown or no path exists.
    #[must_use]
    pub fn path_between(&self, from: TaskId, to: TaskId) -> Option<Vec<TaskId>> {
        let from_index = *self.nodes.get(&from)?;
        let to_index = *self.nodes.get(&to)?;
        detect::path_between(&self.graph, from_index, to_index)
    }

    /// Find any committed cycle as a closed loop `[n, .., n]`.
    ///
    /// Every mutation path rejects cycles before commit, so this returns
    /// `None` at any observable state; it backs the [`validate`] audit.
    ///
    /// [`validate`]: DependencyGraph::validate
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<TaskId>> {
        for start in self.graph.node_indices() {
            for next in self.graph.neighbors_directed(start, Direction::Outgoing) {
                if let Some(path) = detect::path_between(&self.graph, next, start) {
                    let mut cycle = Vec::with_capacity(path.len() + 1);
                    cycle.push(self.graph[start]);
                    cycle.extend(path);
                    return Some(cycle);
                }
            }
        }
        None
    }

    /// Whether the committed edge set is free of cycles.
    ///
    /// Always true after any sequence of successful mutations; exposed so
    /// callers and tests can audit the invariant over the full graph.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// Number of task nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of committed dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node_index(&self, id: TaskId) -> Result<NodeIndex> {
        self.nodes
            .get(&id)
            .copied()
            .ok_or(Error::UnknownTask { id })
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
