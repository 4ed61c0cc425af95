//! Error types for the engine façade.

use deptrack_graph::{DependencyId, TaskId};
use miette::Diagnostic;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`GraphService`](crate::GraphService) operations.
///
/// The façade adds no failure modes of its own; every variant corresponds
/// to a condition raised by the registry, the graph, or the delete gate,
/// surfaced unchanged in kind. All are recoverable by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum Error {
    /// A referenced task does not exist.
    #[error("task {id} not found")]
    #[diagnostic(code(deptrack::engine::task_not_found))]
    TaskNotFound {
        /// The missing task id.
        id: TaskId,
    },

    /// A task was asked to depend on itself.
    #[error("a task cannot depend on itself (task {id})")]
    #[diagnostic(code(deptrack::engine::self_dependency))]
    SelfDependency {
        /// The task id used as both endpoints.
        id: TaskId,
    },

    /// Adding the dependency would close a cycle.
    #[error("circular dependency detected")]
    #[diagnostic(
        code(deptrack::engine::circular_dependency),
        help("Remove one of the dependencies along the reported path first")
    )]
    CircularDependency {
        /// The closed loop, rejected edge first: `[task, depends_on, .., task]`.
        path: Vec<TaskId>,
    },

    /// A referenced dependency edge does not exist.
    #[error("dependency {id} not found")]
    #[diagnostic(code(deptrack::engine::dependency_not_found))]
    DependencyNotFound {
        /// The missing edge id.
        id: DependencyId,
    },

    /// A task deletion was refused while edges still touch the task.
    #[error("task {id} still has dependencies or dependents")]
    #[diagnostic(
        code(deptrack::engine::has_dependents),
        help("Remove the task's dependency edges before deleting it")
    )]
    HasDependents {
        /// The task id with remaining edges.
        id: TaskId,
    },
}

impl From<deptrack_graph::Error> for Error {
    fn from(err: deptrack_graph::Error) -> Self {
        match err {
            deptrack_graph::Error::UnknownTask { id } => Self::TaskNotFound { id },
            deptrack_graph::Error::SelfDependency { id } => Self::SelfDependency { id },
            deptrack_graph::Error::CircularDependency { path } => Self::CircularDependency { path },
            deptrack_graph::Error::UnknownDependency { id } => Self::DependencyNotFound { id },
            deptrack_graph::Error::HasIncidentEdges { id } => Self::HasDependents { id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_errors_translate_in_kind() {
        let err: Error = deptrack_graph::Error::CircularDependency {
            path: vec![2, 1, 2],
        }
        .into();
        assert_eq!(
            err,
            Error::CircularDependency {
                path: vec![2, 1, 2]
            }
        );

        let err: Error = deptrack_graph::Error::HasIncidentEdges { id: 4 }.into();
        assert_eq!(err, Error::HasDependents { id: 4 });
    }
}
