//! Task dependency engine for deptrack.
//!
//! This crate coordinates the task registry, the dependency graph from
//! [`deptrack_graph`], and the blocked-status policy behind a single
//! thread-safe façade, [`GraphService`]. The façade is what an API layer
//! calls: it validates, serializes writes, and assembles the wire payload
//! views with derived dependency/dependent counts.
//!
//! # Key Types
//!
//! - [`GraphService`]: the locked façade exposing every engine operation
//! - [`Task`] / [`Status`]: task records and their status values
//! - [`TaskView`] / [`DependencyView`] / [`ErrorBody`]: wire payloads
//! - [`Error`]: the engine-level failure taxonomy
//!
//! # Example
//!
//! ```
//! use deptrack_engine::{GraphService, Status};
//!
//! let service = GraphService::new();
//! let a = service.create_task("write spec", "");
//! let b = service.create_task("review spec", "");
//!
//! // reviewing depends on writing
//! service.add_dependency(b.id, a.id)?;
//! assert_eq!(service.get_task(b.id)?.status, Status::Blocked);
//!
//! service.update_task_status(a.id, Status::Completed)?;
//! assert_eq!(service.get_task(b.id)?.status, Status::Pending);
//! # Ok::<(), deptrack_engine::Error>(())
//! ```

mod error;
mod registry;
mod resolver;
mod service;
mod task;
mod wire;

pub use deptrack_graph::{DependencyId, TaskId};
pub use error::{Error, Result};
pub use registry::TaskRegistry;
pub use resolver::{blocked_by_unmet_prerequisite, effective_status};
pub use service::GraphService;
pub use task::{Status, Task};
pub use wire::{DependencyView, ErrorBody, TaskView};
