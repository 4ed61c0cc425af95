//! Validation utilities for the dependency graph.

use crate::{DependencyGraph, Error};

/// Result of a structural graph audit.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the graph upholds its invariants.
    pub is_valid: bool,
    /// List of validation errors, if any.
    pub errors: Vec<Error>,
}

impl ValidationResult {
    /// Create a valid result.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    /// Create an invalid result with errors.
    #[must_use]
    pub fn invalid(errors: Vec<Error>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

impl DependencyGraph {
    /// Audit the committed edge set.
    ///
    /// Every mutation path already rejects cycles before commit, so this
    /// check over the full graph is expected to pass at any observable
    /// point; it exists so tests and callers can verify that.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        match self.find_cycle() {
            None => ValidationResult::valid(),
            Some(path) => ValidationResult::invalid(vec![Error::CircularDependency { path }]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_graph() {
        let graph = DependencyGraph::new();
        let result = graph.validate();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_validate_after_mutations() {
        let mut graph = DependencyGraph::new();
        graph.add_node(1);
        graph.add_node(2);
        graph.add_node(3);
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(2, 3).unwrap();
        let _ = graph.add_edge(3, 1);

        assert!(graph.validate().is_valid);
    }
}
