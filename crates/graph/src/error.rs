//! Error types for dependency graph operations.

use crate::{DependencyId, TaskId};
use miette::Diagnostic;
use thiserror::Error;

/// Result type for dependency graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mutating or querying the dependency graph.
///
/// All variants are expected, recoverable-by-caller conditions; none is
/// fatal to the engine. A failed mutation leaves the graph untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum Error {
    /// An endpoint task id has no node in the graph.
    #[error("task {id} does not exist in the dependency graph")]
    #[diagnostic(
        code(deptrack::graph::unknown_task),
        help("Register the task before wiring dependencies to it")
    )]
    UnknownTask {
        /// The task id that was not found.
        id: TaskId,
    },

    /// A task was asked to depend on itself.
    #[error("task {id} cannot depend on itself")]
    #[diagnostic(code(deptrack::graph::self_dependency))]
    SelfDependency {
        /// The task id used as both endpoints.
        id: TaskId,
    },

    /// Adding the edge would close a dependency cycle.
    #[error("adding this dependency would create a cycle: {}", render_path(path))]
    #[diagnostic(
        code(deptrack::graph::circular_dependency),
        help("Remove one of the dependencies along the reported path first")
    )]
    CircularDependency {
        /// The closed loop, rejected edge first: `[task, depends_on, .., task]`.
        /// Every consecutive pair `(a, b)` is a real "a depends on b" edge,
        /// and the closing node appears at both ends.
        path: Vec<TaskId>,
    },

    /// No edge with the given id exists.
    #[error("dependency {id} does not exist")]
    #[diagnostic(code(deptrack::graph::unknown_dependency))]
    UnknownDependency {
        /// The edge id that was not found.
        id: DependencyId,
    },

    /// A node removal was refused because edges still touch it.
    #[error("task {id} still has incident dependency edges")]
    #[diagnostic(
        code(deptrack::graph::has_incident_edges),
        help("Remove the task's dependencies and dependents before deleting it")
    )]
    HasIncidentEdges {
        /// The task id with remaining edges.
        id: TaskId,
    },
}

fn render_path(path: &[TaskId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
