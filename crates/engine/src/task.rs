//! Task records and status values.

use chrono::{DateTime, Utc};
use deptrack_graph::TaskId;
use serde::{Deserialize, Serialize};

/// Status of a task.
///
/// `Blocked` is normally derived from unmet prerequisites, but a caller
/// may also set it explicitly; the engine keeps the caller-set value and
/// the derived overlay apart (see [`Task::effective_status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Done; satisfies dependents' prerequisites.
    Completed,
    /// Cannot proceed.
    Blocked,
}

/// A task record owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique, immutable id assigned at creation.
    pub id: TaskId,
    /// Opaque title text, no graph semantics.
    pub title: String,
    /// Opaque description text.
    pub description: String,
    /// The caller-set status. Authoritative input to status derivation.
    pub status: Status,
    /// Derived overlay: at least one direct prerequisite is not completed.
    /// Owned by the engine, recomputed on edge and status mutations.
    pub blocked_by_dependency: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last status write time.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub(crate) fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: Status::Pending,
            blocked_by_dependency: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The status exposed to callers: the more severe of the caller-set
    /// status and the derived blocking overlay.
    ///
    /// The overlay wins only while the caller-set status is neither
    /// `Completed` nor `InProgress` - an explicit write of either is an
    /// override, so completing a task never requires its prerequisites'
    /// statuses to change first.
    #[must_use]
    pub fn effective_status(&self) -> Status {
        crate::resolver::effective_status(self.status, self.blocked_by_dependency)
    }
}
