//! COO (coordinate list) format
//!
//! Raw `(row, column, value)` triples. This is the interchange format: Matrix
//! Market and Parquet both load into it, and CSR/CSC are derived from it.
//!
//! ```text
//! Graph: 0 → 1, 0 → 2, 1 → 2
//!
//! COO:
//!   row_indices:    [0, 0, 1]
//!   column_indices: [1, 2, 2]
//!   nonzero_values: [1.0, 1.0, 1.0]
//! ```

use super::{EdgeId, VertexId};
use crate::error::GraphError;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// Coordinate-list graph storage
///
/// Arrays are reference counted so graph views can share them without copying.
#[derive(Debug, Clone)]
pub struct Coo<W = f32> {
    pub(crate) number_of_rows: usize,
    pub(crate) number_of_columns: usize,
    pub(crate) row_indices: Arc<[VertexId]>,
    pub(crate) column_indices: Arc<[VertexId]>,
    pub(crate) nonzero_values: Arc<[W]>,
}

impl<W: Copy> Coo<W> {
    /// Create COO from an edge list, sizing the graph to the largest endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the edge list cannot be indexed with `u32` edge ids
    pub fn from_edge_list(edges: &[(VertexId, VertexId, W)]) -> Result<Self> {
        let number_of_vertices = edges
            .iter()
            .flat_map(|(src, dst, _)| [*src, *dst])
            .max()
            .map_or(0, |max| max as usize + 1);

        Self::from_edges(number_of_vertices, edges)
    }

    /// Create COO with an explicit vertex count (allows isolated vertices)
    ///
    /// # Errors
    ///
    /// Returns error if an endpoint is `>= number_of_vertices`, or the vertex
    /// or edge count does not fit in `u32`
    pub fn from_edges(number_of_vertices: usize, edges: &[(VertexId, VertexId, W)]) -> Result<Self> {
        if VertexId::try_from(number_of_vertices).is_err() {
            return Err(GraphError::IdOverflow {
                start: 0,
                count: number_of_vertices,
            }
            .into());
        }
        EdgeId::try_from(edges.len())?;

        for &(src, dst, _) in edges {
            for vertex in [src, dst] {
                if vertex as usize >= number_of_vertices {
                    return Err(GraphError::VertexOutOfBounds {
                        vertex: u64::from(vertex),
                        number_of_vertices,
                    }
                    .into());
                }
            }
        }

        let row_indices: Vec<VertexId> = edges.iter().map(|(src, _, _)| *src).collect();
        let column_indices: Vec<VertexId> = edges.iter().map(|(_, dst, _)| *dst).collect();
        let nonzero_values: Vec<W> = edges.iter().map(|(_, _, w)| *w).collect();

        Ok(Self {
            number_of_rows: number_of_vertices,
            number_of_columns: number_of_vertices,
            row_indices: row_indices.into(),
            column_indices: column_indices.into(),
            nonzero_values: nonzero_values.into(),
        })
    }

    /// Undirected copy of this graph
    ///
    /// Every edge `u - v` appears exactly once in each direction with a single
    /// weight (the first one seen for the pair); self-loops appear once.
    /// Output is sorted by `(row, column)`.
    #[must_use]
    pub fn symmetrize(&self) -> Self {
        let mut seen = HashSet::new();
        let mut edges = Vec::with_capacity(self.row_indices.len() * 2);

        for ((&src, &dst), &weight) in self
            .row_indices
            .iter()
            .zip(self.column_indices.iter())
            .zip(self.nonzero_values.iter())
        {
            let key = (src.min(dst), src.max(dst));
            if !seen.insert(key) {
                continue;
            }
            edges.push((src, dst, weight));
            if src != dst {
                edges.push((dst, src, weight));
            }
        }

        edges.sort_by_key(|&(src, dst, _)| (src, dst));

        Self {
            number_of_rows: self.number_of_rows,
            number_of_columns: self.number_of_columns,
            row_indices: edges.iter().map(|(src, _, _)| *src).collect(),
            column_indices: edges.iter().map(|(_, dst, _)| *dst).collect(),
            nonzero_values: edges.iter().map(|(_, _, w)| *w).collect(),
        }
    }

    /// Iterate `(row, column, value)` triples in storage order
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId, W)> + '_ {
        self.row_indices
            .iter()
            .zip(self.column_indices.iter())
            .zip(self.nonzero_values.iter())
            .map(|((&src, &dst), &w)| (src, dst, w))
    }
}

impl<W> Coo<W> {
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

    /// Number of stored edges
    #[must_use]
    pub fn number_of_nonzeros(&self) -> usize {
        self.row_indices.len()
    }

    /// Get COO components (rows, columns, values)
    #[must_use]
    pub fn components(&self) -> (&[VertexId], &[VertexId], &[W]) {
        (&self.row_indices, &self.column_indices, &self.nonzero_values)
    }
}
