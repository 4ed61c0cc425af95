//! Wire payload shapes handed to the API layer.
//!
//! The `{error, path?}` failure shape is the one contract the legacy
//! client observes: it keys its error-rendering branch on the presence of
//! `path` and on substring matches against `error` ("itself", "Circular").
//! The engine discriminates on [`Error`] kinds everywhere; the message
//! strings exist only at this boundary.

use crate::task::{Status, Task};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use deptrack_graph::{DependencyId, TaskId};
use serde::Serialize;

/// A task as exposed to clients, with derived counts and the effective
/// status (caller-set status overlaid with derived blocking).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// Task id.
    pub id: TaskId,
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// The effective status.
    pub status: Status,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last status write time.
    pub updated_at: DateTime<Utc>,
    /// Number of direct dependencies (edges where this task is the dependent).
    pub dependency_count: usize,
    /// Number of direct dependents (edges where this task is the prerequisite).
    pub dependent_count: usize,
}

impl TaskView {
    pub(crate) fn from_task(task: &Task, dependency_count: usize, dependent_count: usize) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.effective_status(),
            created_at: task.created_at,
            updated_at: task.updated_at,
            dependency_count,
            dependent_count,
        }
    }
}

/// A dependency edge as exposed to clients, with endpoint titles resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyView {
    /// Edge id.
    pub id: DependencyId,
    /// The dependent task.
    pub task: TaskId,
    /// The prerequisite task.
    pub depends_on: TaskId,
    /// Title of the dependent task.
    pub task_title: String,
    /// Title of the prerequisite task.
    pub depends_on_title: String,
    /// Creation time of the edge.
    pub created_at: DateTime<Utc>,
}

/// The structured failure shape forwarded to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// For cycle rejections, the ordered task ids forming the loop; for a
    /// self-dependency, `[id, id]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<TaskId>>,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        match err {
            Error::TaskNotFound { id } => Self {
                error: format!("Task {id} not found"),
                path: None,
            },
            Error::SelfDependency { id } => Self {
                error: "A task cannot depend on itself".to_string(),
                path: Some(vec![*id, *id]),
            },
            Error::CircularDependency { path } => Self {
                error: "Circular dependency detected".to_string(),
                path: Some(path.clone()),
            },
            Error::DependencyNotFound { id } => Self {
                error: format!("Dependency {id} not found"),
                path: None,
            },
            Error::HasDependents { id } => Self {
                error: format!("Task {id} still has dependencies or dependents"),
                path: None,
            },
        }
    }
}

impl ErrorBody {
    /// Convenience for API layers working with `Result` values.
    pub fn from_result<T>(result: Result<T>) -> std::result::Result<T, Self> {
        result.map_err(|err| Self::from(&err))
    }
}
