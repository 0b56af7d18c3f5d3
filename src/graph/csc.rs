//! CSC-backed graph view
//!
//! `indices` holds in-neighbors, so `indices[e]` is the source of edge `e`.
//! CSC does not store destinations; they are recovered by a monotonic
//! boundary search over the column offsets.

use crate::storage::{Csc, EdgeId, VertexId};
use std::sync::Arc;

/// Read-only CSC view (shares the arrays of the [`Csc`] it was built from)
#[derive(Debug, Clone)]
pub struct CscView<W = f32> {
    number_of_vertices: usize,
    offsets: Arc<[EdgeId]>,
    indices: Arc<[VertexId]>,
    values: Arc<[W]>,
}

impl<W> CscView<W> {
    pub(crate) fn new(csc: &Csc<W>) -> Self {
        Self {
            number_of_vertices: csc.number_of_rows,
            offsets: Arc::clone(&csc.column_offsets),
            indices: Arc::clone(&csc.row_indices),
            values: Arc::clone(&csc.nonzero_values),
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

    /// In-degree of `v`
    #[inline]
    #[must_use]
    pub fn get_number_of_neighbors(&self, v: VertexId) -> usize {
        let v = v as usize;
        (self.offsets[v + 1] - self.offsets[v]) as usize
    }

    /// First edge id of column `v`
    #[inline]
    #[must_use]
    pub fn get_starting_edge(&self, v: VertexId) -> EdgeId {
        self.offsets[v as usize]
    }

    /// In-neighbors of `v`, sorted by id
    #[inline]
    #[must_use]
    pub fn in_neighbors(&self, v: VertexId) -> &[VertexId] {
        let v = v as usize;
        &self.indices[self.offsets[v] as usize..self.offsets[v + 1] as usize]
    }

    /// Source of edge `e`
    #[inline]
    #[must_use]
    pub fn get_source_vertex(&self, e: EdgeId) -> VertexId {
        self.indices[e as usize]
    }

    /// Unique `v` with `offsets[v] <= e < offsets[v + 1]` (O(log V))
    #[inline]
    #[must_use]
    pub fn get_destination_vertex(&self, e: EdgeId) -> VertexId {
        let first_greater = self.offsets.partition_point(|&offset| offset <= e);
        #[allow(clippy::cast_possible_truncation)] // offsets.len() == V + 1 <= u32::MAX + 1
        let destination = first_greater.saturating_sub(1) as VertexId;
        destination
    }

    /// First edge `source → destination` (lower bound over the sorted in-neighbors)
    #[inline]
    #[must_use]
    pub fn get_edge(&self, source: VertexId, destination: VertexId) -> Option<EdgeId> {
        let start = self.offsets[destination as usize];
        let in_neighbors = self.in_neighbors(destination);
        let pos = in_neighbors.partition_point(|&n| n < source);
        (in_neighbors.get(pos) == Some(&source))
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

impl<W: Copy> CscView<W> {
    /// Weight of edge `e`
    #[inline]
    #[must_use]
    pub fn get_edge_weight(&self, e: EdgeId) -> W {
        self.values[e as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> CscView<f32> {
        // 0 → 2, 1 → 2, 2 → 0 (vertex 1 has no in-edges)
        let csc = Csc::from_edge_list(&[(0, 2, 1.0), (1, 2, 2.0), (2, 0, 3.0)]).unwrap();
        CscView::new(&csc)
    }

    #[test]
    fn test_in_degree() {
        let g = view();
        assert_eq!(g.get_number_of_neighbors(0), 1);
        assert_eq!(g.get_number_of_neighbors(1), 0);
        assert_eq!(g.get_number_of_neighbors(2), 2);
    }

    #[test]
    fn test_destination_via_offset_search() {
        // offsets = [0, 1, 1, 3]: edge 0 is in column 0, edges 1..3 in column 2
        let g = view();
        assert_eq!(g.components().0, &[0, 1, 1, 3]);
        assert_eq!(g.get_destination_vertex(0), 0);
        assert_eq!(g.get_destination_vertex(1), 2);
        assert_eq!(g.get_destination_vertex(2), 2);
    }

    #[test]
    fn test_source_is_stored_index() {
        let g = view();
        assert_eq!(g.get_source_vertex(0), 2);
        assert_eq!(g.get_source_vertex(1), 0);
        assert_eq!(g.get_source_vertex(2), 1);
    }

    #[test]
    fn test_get_edge_searches_in_neighbors() {
        let g = view();
        assert_eq!(g.get_edge(1, 2), Some(2));
        assert_eq!(g.get_edge_weight(2), 2.0);
        assert_eq!(g.get_edge(2, 1), None);
    }

    #[test]
    fn test_get_edge_returns_first_parallel_edge() {
        let csc = Csc::from_edge_list(&[(1, 0, 9.0_f32), (0, 1, 1.0), (0, 1, 2.0), (0, 1, 3.0)])
            .unwrap();
        let g = CscView::new(&csc);
        // column 0 holds edge 0, column 1 holds the three parallel edges
        assert_eq!(g.get_edge(0, 1), Some(1));
        assert_eq!(g.get_edge_weight(1), 1.0);
    }
}
