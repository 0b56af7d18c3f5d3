//! CSR-backed graph view
//!
//! Native O(1): neighbor count, destination, weight. Source of an edge is
//! recovered by a monotonic search over the row offsets (O(log V)).

use crate::storage::{Csr, EdgeId, VertexId};
use std::ops::Range;
use std::sync::Arc;

/// Read-only CSR view (shares the arrays of the [`Csr`] it was built from)
#[derive(Debug, Clone)]
pub struct CsrView<W = f32> {
    number_of_vertices: usize,
    offsets: Arc<[EdgeId]>,
    indices: Arc<[VertexId]>,
    values: Arc<[W]>,
}

impl<W> CsrView<W> {
    pub(crate) fn new(csr: &Csr<W>) -> Self {
        Self {
            number_of_vertices: csr.number_of_rows,
            offsets: Arc::clone(&csr.row_offsets),
            indices: Arc::clone(&csr.column_indices),
            values: Arc::clone(&csr.nonzero_values),
        }
    }

    /// Same topology, different weight array
    pub(crate) fn with_values<V>(&self, values: Arc<[V]>) -> CsrView<V> {
        CsrView {
            number_of_vertices: self.number_of_vertices,
            offsets: Arc::clone(&self.offsets),
            indices: Arc::clone(&self.indices),
            values,
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
        self.indices.len()
    }

    /// Out-degree of `v`
    #[inline]
    #[must_use]
    pub fn get_number_of_neighbors(&self, v: VertexId) -> usize {
        let v = v as usize;
        (self.offsets[v + 1] - self.offsets[v]) as usize
    }

    /// First edge id of `v`
    #[inline]
    #[must_use]
    pub fn get_starting_edge(&self, v: VertexId) -> EdgeId {
        self.offsets[v as usize]
    }

    /// Edge id range of `v`
    #[inline]
    #[must_use]
    pub fn edge_range(&self, v: VertexId) -> Range<usize> {
        let v = v as usize;
        self.offsets[v] as usize..self.offsets[v + 1] as usize
    }

    /// Out-neighbors of `v`, sorted by id
    #[inline]
    #[must_use]
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        &self.indices[self.edge_range(v)]
    }

    /// Row owning edge `e`: one less than the first offset strictly greater than `e`
    #[inline]
    #[must_use]
    pub fn get_source_vertex(&self, e: EdgeId) -> VertexId {
        let first_greater = self.offsets.partition_point(|&offset| offset <= e);
        #[allow(clippy::cast_possible_truncation)] // offsets.len() == V + 1 <= u32::MAX + 1
        let source = first_greater.saturating_sub(1) as VertexId;
        source
    }

    /// Destination of edge `e`
    #[inline]
    #[must_use]
    pub fn get_destination_vertex(&self, e: EdgeId) -> VertexId {
        self.indices[e as usize]
    }

    /// First edge `source → destination` (lower bound over the sorted out-neighbors)
    ///
    /// Parallel edges keep insertion order, so this is the first one inserted.
    #[inline]
    #[must_use]
    pub fn get_edge(&self, source: VertexId, destination: VertexId) -> Option<EdgeId> {
        let start = self.offsets[source as usize];
        let neighbors = self.neighbors(source);
        let pos = neighbors.partition_point(|&n| n < destination);
        (neighbors.get(pos) == Some(&destination))
            .then(|| EdgeId::try_from(pos).ok())
            .flatten()
            .map(|pos| start + pos)
    }

    /// Offsets, indices and values
    #[must_use]
    pub fn components(&self) -> (&[EdgeId], &[VertexId], &[W]) {
        (&self.offsets, &self.indices, &self.values)
    }
}

impl<W: Copy> CsrView<W> {
    /// Weight of edge `e`
    #[inline]
    #[must_use]
    pub fn get_edge_weight(&self, e: EdgeId) -> W {
        self.values[e as usize]
    }
}
