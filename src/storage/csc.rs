//! CSC (Compressed Sparse Column) format
//!
//! The transpose layout of CSR: edges grouped by destination.
//!
//! ```text
//! Graph: 0 → 1, 0 → 2, 1 → 2
//!
//! CSC:
//!   column_offsets: [0, 0, 1, 3]  // Vertex 2 has in-edges [1..3)
//!   row_indices:    [0, 0, 1]     // In-neighbors (edge sources)
//! ```

use super::csr::compress;
use super::{Coo, EdgeId, VertexId};
use anyhow::Result;
use std::sync::Arc;

/// CSC graph storage (incoming edges grouped by destination)
#[derive(Debug, Clone)]
pub struct Csc<W = f32> {
    pub(crate) number_of_rows: usize,
    pub(crate) number_of_columns: usize,
    pub(crate) column_offsets: Arc<[EdgeId]>,
    pub(crate) row_indices: Arc<[VertexId]>,
    pub(crate) nonzero_values: Arc<[W]>,
}

impl<W: Copy> Csc<W> {
    /// Build CSC from COO (grouped by column, sources sorted within a column)
    ///
    /// # Errors
    ///
    /// Returns error if the edge count does not fit in `u32`
    pub fn from_coo(coo: &Coo<W>) -> Result<Self> {
        let (rows, cols, vals) = coo.components();
        let (column_offsets, row_indices, nonzero_values) =
            compress(coo.number_of_columns(), cols, rows, vals)?;

        Ok(Self {
            number_of_rows: coo.number_of_rows(),
            number_of_columns: coo.number_of_columns(),
            column_offsets,
            row_indices,
            nonzero_values,
        })
    }

    /// Create CSC from edge list
    ///
    /// # Errors
    ///
    /// Returns error if the edge list cannot be indexed with `u32` edge ids
    pub fn from_edge_list(edges: &[(VertexId, VertexId, W)]) -> Result<Self> {
        Self::from_coo(&Coo::from_edge_list(edges)?)
    }
}

impl<W> Csc<W> {
    /// Number of vertices (rows)
    #[must_use]
    pub const fn number_of_rows(&self) -> usize {
        self.number_of_rows
    }

    /// Number of edges
    #[must_use]
    pub fn number_of_nonzeros(&self) -> usize {
        self.row_indices.len()
    }

    /// Get CSC components (offsets, indices, values)
    #[must_use]
    pub fn components(&self) -> (&[EdgeId], &[VertexId], &[W]) {
        (&self.column_offsets, &self.row_indices, &self.nonzero_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csc_structure() {
        let csc = Csc::from_edge_list(&[(0, 1, 1.0_f32), (0, 2, 2.0), (1, 2, 3.0)]).unwrap();

        let (offsets, indices, values) = csc.components();
        assert_eq!(offsets, &[0, 0, 1, 3]);
        assert_eq!(indices, &[0, 0, 1]);
        assert_eq!(values, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_csc_sources_sorted() {
        let csc = Csc::from_edge_list(&[(3, 0, 3.0_f32), (1, 0, 1.0), (2, 0, 2.0)]).unwrap();

        let (offsets, indices, values) = csc.components();
        assert_eq!(offsets, &[0, 3, 3, 3, 3]);
        assert_eq!(indices, &[1, 2, 3]);
        assert_eq!(values, &[1.0, 2.0, 3.0]);
    }
}
