//! CSR (Compressed Sparse Row) format
//!
//! Based on `GraphBLAST` (Yang et al., ACM `ToMS` 2022) for GPU-optimized sparse matrix operations.
//!
//! # CSR Format
//!
//! ```text
//! Graph: 0 → 1, 0 → 2, 1 → 2
//!
//! CSR:
//!   row_offsets:    [0, 2, 3, 3]  // Vertex 0: edges [0..2), vertex 1: [2..3), vertex 2: [3..3)
//!   column_indices: [1, 2, 2]     // Edge 0 → vertex 1, edge 1 → vertex 2, edge 2 → vertex 2
//!   nonzero_values: [1.0, 1.0, 1.0]
//! ```

use super::{Coo, EdgeId, VertexId};
use anyhow::Result;
use std::sync::Arc;

/// CSR graph storage (outgoing edges grouped by source)
///
/// Neighbor lists are sorted by vertex id so edge lookups can binary search.
#[derive(Debug, Clone)]
pub struct Csr<W = f32> {
    pub(crate) number_of_rows: usize,
    pub(crate) number_of_columns: usize,

    /// vertex v's edges are `row_offsets[v]..row_offsets[v + 1]`
    /// Length: `number_of_rows` + 1
    pub(crate) row_offsets: Arc<[EdgeId]>,

    /// Edge destinations. Length: `number_of_nonzeros`
    pub(crate) column_indices: Arc<[VertexId]>,

    /// Edge weights. Length: `number_of_nonzeros`
    pub(crate) nonzero_values: Arc<[W]>,
}

impl<W: Copy> Csr<W> {
    /// Build CSR from COO (counting sort by row, then by column within a row)
    ///
    /// # Errors
    ///
    /// Returns error if the edge count does not fit in `u32`
    pub fn from_coo(coo: &Coo<W>) -> Result<Self> {
        let (rows, cols, vals) = coo.components();
        let (row_offsets, column_indices, nonzero_values) =
            compress(coo.number_of_rows(), rows, cols, vals)?;

        Ok(Self {
            number_of_rows: coo.number_of_rows(),
            number_of_columns: coo.number_of_columns(),
            row_offsets,
            column_indices,
            nonzero_values,
        })
    }

    /// Create CSR from edge list
    ///
    /// # Errors
    ///
    /// Returns error if the edge list cannot be indexed with `u32` edge ids
    pub fn from_edge_list(edges: &[(VertexId, VertexId, W)]) -> Result<Self> {
        Self::from_coo(&Coo::from_edge_list(edges)?)
    }
}

impl<W> Csr<W> {
    /// Number of vertices (rows)
    #[must_use]
    pub const fn number_of_rows(&self) -> usize {
        self.number_of_rows
    }

    /// Number of columns
    #[must_use]
    pub const fn number_of_columns(&self) -> usize {
        self.number_of_columns
    }

    /// Number of edges
    #[must_use]
    pub fn number_of_nonzeros(&self) -> usize {
        self.column_indices.len()
    }

    /// Get CSR components (offsets, indices, values)
    #[must_use]
    pub fn components(&self) -> (&[EdgeId], &[VertexId], &[W]) {
        (&self.row_offsets, &self.column_indices, &self.nonzero_values)
    }
}

/// Group `(major, minor, value)` triples by `major`, sorting each group by `minor`
///
/// Shared by CSR (major = row) and CSC (major = column).
pub(super) fn compress<W: Copy>(
    number_of_majors: usize,
    majors: &[VertexId],
    minors: &[VertexId],
    values: &[W],
) -> Result<(Arc<[EdgeId]>, Arc<[VertexId]>, Arc<[W]>)> {
    EdgeId::try_from(majors.len())?;

    let mut offsets = vec![0 as EdgeId; number_of_majors + 1];
    for &major in majors {
        offsets[major as usize + 1] += 1;
    }
    for i in 0..number_of_majors {
        offsets[i + 1] += offsets[i];
    }

    let mut cursor: Vec<usize> = offsets[..number_of_majors]
        .iter()
        .map(|&o| o as usize)
        .collect();
    let mut slots: Vec<Option<(VertexId, W)>> = vec![None; majors.len()];

    for ((&major, &minor), &value) in majors.iter().zip(minors).zip(values) {
        let slot = &mut cursor[major as usize];
        slots[*slot] = Some((minor, value));
        *slot += 1;
    }

    let mut pairs: Vec<(VertexId, W)> = slots.into_iter().flatten().collect();
    for window in offsets.windows(2) {
        pairs[window[0] as usize..window[1] as usize].sort_by_key(|&(minor, _)| minor);
    }

    let indices: Arc<[VertexId]> = pairs.iter().map(|(minor, _)| *minor).collect();
    let weights: Arc<[W]> = pairs.iter().map(|(_, w)| *w).collect();

    Ok((offsets.into(), indices, weights))
}
