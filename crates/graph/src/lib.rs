//! Directed task dependency graph for deptrack.
//!
//! This crate owns the edge set of the task dependency graph and enforces
//! its structural invariants: no self-loops, no duplicate edges, and no
//! cycles at any committed state. Edge insertions that would close a cycle
//! are rejected with the concrete cycle path so callers can report the
//! offending chain.
//!
//! # Key Types
//!
//! - [`DependencyGraph`]: the mutable graph of tasks and depends-on edges
//! - [`Dependency`]: a committed directed edge record
//! - [`Error`]: the graph-level failure taxonomy
//!
//! # Example
//!
//! ```
//! use deptrack_graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_node(1);
//! graph.add_node(2);
//!
//! // 1 depends on 2
//! let edge = graph.add_edge(1, 2)?;
//! assert_eq!(edge.depends_on, 2);
//!
//! // 2 depending on 1 would close a cycle
//! assert!(graph.add_edge(2, 1).is_err());
//! # Ok::<(), deptrack_graph::Error>(())
//! ```

mod detect;
mod error;
mod graph;
mod validation;

pub use detect::path_between;
pub use error::{Error, Result};
pub use graph::{Dependency, DependencyGraph};
pub use validation::ValidationResult;

/// Identifier of a task node. Allocated by the task registry, opaque here.
pub type TaskId = u64;

/// Identifier of a dependency edge, distinct from its endpoint task ids.
pub type DependencyId = u64;
