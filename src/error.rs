//! Typed errors for graph composition and the execution model
//!
//! Hot-path accessors never return these; they communicate misses through
//! `Option`. Errors are raised at construction and lifecycle boundaries only.

use crate::graph::{Capability, Representation};
use crate::enactor::ProblemState;
use thiserror::Error;

/// Graph construction and execution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Vertex id outside `[0, number_of_vertices)`
    #[error("Vertex {vertex} out of bounds (number_of_vertices = {number_of_vertices})")]
    VertexOutOfBounds {
        /// Offending vertex id
        vertex: u64,
        /// Vertex count of the graph
        number_of_vertices: usize,
    },

    /// The graph was built without a representation an operation needs
    #[error("Graph has no {0} representation")]
    MissingRepresentation(Representation),

    /// No supplied representation natively answers this query
    #[error("Graph does not support {0}")]
    Unsupported(Capability),

    /// Replacement value array does not match the edge count
    #[error("Value array has {actual} entries, graph has {expected} edges")]
    ValueLengthMismatch {
        /// Edge count of the graph
        expected: usize,
        /// Length of the supplied array
        actual: usize,
    },

    /// Caller-owned output buffer does not match the vertex count
    #[error("Output buffer has {actual} entries, graph has {expected} vertices")]
    OutputLengthMismatch {
        /// Vertex count of the graph
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Id range does not fit in `u32` vertex/edge ids
    #[error("Ids {start}..{start}+{count} exceed the u32 id space")]
    IdOverflow {
        /// First id of the range
        start: u32,
        /// Number of ids requested
        count: usize,
    },

    /// Lifecycle hook called out of order
    #[error("Problem is {actual}, expected {expected}")]
    InvalidState {
        /// State the operation requires
        expected: ProblemState,
        /// Current state
        actual: ProblemState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_display() {
        let err = GraphError::MissingRepresentation(Representation::Csr);
        assert_eq!(err.to_string(), "Graph has no CSR representation");

        let err = GraphError::VertexOutOfBounds {
            vertex: 7,
            number_of_vertices: 5,
        };
        assert_eq!(
            err.to_string(),
            "Vertex 7 out of bounds (number_of_vertices = 5)"
        );

        let err = GraphError::InvalidState {
            expected: ProblemState::Ready,
            actual: ProblemState::Initialized,
        };
        assert_eq!(err.to_string(), "Problem is initialized, expected ready");

        let err = GraphError::IdOverflow { start: 5, count: 3 };
        assert_eq!(err.to_string(), "Ids 5..5+3 exceed the u32 id space");
    }
}
