//! COO-backed graph view
//!
//! Endpoints and weights are direct lookups. Neighbor counts and edge lookups
//! have no index to work from and fall back to a linear scan.

use crate::storage::{Coo, EdgeId, VertexId};
use std::sync::Arc;

/// Read-only COO view (shares the arrays of the [`Coo`] it was built from)
#[derive(Debug, Clone)]
pub struct CooView<W = f32> {
    number_of_vertices: usize,
    rows: Arc<[VertexId]>,
    columns: Arc<[VertexId]>,
    values: Arc<[W]>,
}

impl<W> CooView<W> {
    pub(crate) fn new(coo: &Coo<W>) -> Self {
        Self {
            number_of_vertices: coo.number_of_rows,
            rows: Arc::clone(&coo.row_indices),
            columns: Arc::clone(&coo.column_indices),
            values: Arc::clone(&coo.nonzero_values),
        }
    }

    /// Number of vertices
    #[inline]
    #[must_use]
    pub const fn get_number_of_vertices(&self) -> usize {
        self.number_of_vertices
    }

    /// Number of edges
    #[inline]
    #[must_use]
    pub fn get_number_of_edges(&self) -> usize {
        self.rows.len()
    }

    /// Out-degree of `v` (linear scan)
    #[must_use]
    pub fn get_number_of_neighbors(&self, v: VertexId) -> usize {
        self.rows.iter().filter(|&&row| row == v).count()
    }

    /// Source of edge `e`
    #[inline]
    #[must_use]
    pub fn get_source_vertex(&self, e: EdgeId) -> VertexId {
        self.rows[e as usize]
    }

    /// Destination of edge `e`
    #[inline]
    #[must_use]
    pub fn get_destination_vertex(&self, e: EdgeId) -> VertexId {
        self.columns[e as usize]
    }

    /// First edge `source → destination` in storage order (linear scan)
    #[must_use]
    pub fn get_edge(&self, source: VertexId, destination: VertexId) -> Option<EdgeId> {
        self.rows
            .iter()
            .zip(self.columns.iter())
            .position(|(&row, &col)| row == source && col == destination)
            .and_then(|pos| EdgeId::try_from(pos).ok())
    }

    /// Rows, columns and values
    #[must_use]
    pub fn components(&self) -> (&[VertexId], &[VertexId], &[W]) {
        (&self.rows, &self.columns, &self.values)
    }
}

impl<W: Copy> CooView<W> {
    /// Weight of edge `e`
    #[inline]
    #[must_use]
    pub fn get_edge_weight(&self, e: EdgeId) -> W {
        self.values[e as usize]
    }
}
