//! Status derivation policy.
//!
//! Prerequisite tasks must complete before a dependent can proceed. The
//! policy lives here as pure functions over status values; the façade
//! feeds it the direct prerequisite statuses after each relevant mutation.
//! Recomputation never walks the graph transitively: an edge mutation
//! touches only the edge's `task` endpoint, and a status write touches
//! the written task plus its direct dependents (whose overlays read the
//! written status).

use crate::task::Status;

/// Whether a task with the given direct prerequisite statuses carries the
/// blocked overlay: true when at least one prerequisite is not completed.
///
/// A task with no prerequisites is never overlaid.
pub fn blocked_by_unmet_prerequisite<I>(prerequisites: I) -> bool
where
    I: IntoIterator<Item = Status>,
{
    prerequisites
        .into_iter()
        .any(|status| status != Status::Completed)
}

/// The status exposed for a task, given its caller-set status and the
/// derived overlay.
///
/// The overlay is reported as `Blocked` only while the caller-set status
/// is neither `Completed` nor `InProgress`; an explicit write of either
/// overrides the overlay. The caller-set status is otherwise returned
/// untouched, so it is never silently rewritten.
#[must_use]
pub fn effective_status(explicit: Status, blocked_overlay: bool) -> Status {
    match explicit {
        Status::Completed | Status::InProgress => explicit,
        Status::Pending | Status::Blocked if blocked_overlay => Status::Blocked,
        other => other,
    }
}
