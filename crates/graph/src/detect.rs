//! Reachability search with path reconstruction.
//!
//! This is the pure algorithm behind cycle rejection: before committing an
//! edge `task -> depends_on`, the graph asks whether `depends_on` can
//! already reach `task` through existing edges. If it can, the new edge
//! would close a cycle and the traversed path is the diagnostic.

use crate::{DependencyId, TaskId};
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashSet;

/// Find a directed path from `from` to `to` following outgoing edges.
///
/// Returns the node path `[from, .., to]` as task ids the moment `to` is
/// reached, or `None` once the reachable set is exhausted. Iterative DFS
/// with the path carried per stack frame, O(V+E) per call. This runs only
/// on edge insertion, never on queries.
///
/// A path of length 1 (direct edge `from -> to`) is detected like any
/// other; `from == to` trivially yields `[from]` but callers reject that
/// case upstream as a self-dependency, which is a distinct error kind.
#[must_use]
pub fn path_between(
    graph: &StableDiGraph<TaskId, DependencyId>,
    from: NodeIndex,
    to: NodeIndex,
) -> Option<Vec<TaskId>> {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>)> = vec![(from, vec![from])];

    while let Some((node, path)) = stack.pop() {
        if node == to {
            return Some(path.into_iter().map(|idx| graph[idx]).collect());
        }

        if !visited.insert(node) {
            continue;
        }

        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&next) {
                let mut extended = path.clone();
                extended.push(next);
                stack.push((next, extended));
            }
        }
    }

    None
}
