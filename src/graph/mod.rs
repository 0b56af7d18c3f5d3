//! Unified graph representation
//!
//! A [`Graph`] carries any nonempty subset of {CSR, CSC, COO} views that
//! describe the same logical edge set. Every query dispatches to the first
//! supplied view in CSR → CSC → COO order, so answers do not depend on which
//! representation services the call as long as the inputs agree.
//!
//! Accessors are lock-free and allocation-free; they are called from inside
//! parallel per-element operator work. Lookup misses are `None`, never errors.
//!
//! # Example
//!
//! ```
//! use trueno_frontier::graph::{build, Capability, GraphProperties};
//! use trueno_frontier::storage::{Coo, Csc, Csr};
//!
//! let coo = Coo::from_edge_list(&[(0, 1, 1.0), (1, 0, 1.0), (1, 2, 2.0), (2, 1, 2.0)]).unwrap();
//! let csr = Csr::from_coo(&coo).unwrap();
//! let csc = Csc::from_coo(&coo).unwrap();
//!
//! let graph = build::from_csc_csr(GraphProperties::undirected(), &csc, &csr);
//! assert!(graph.supports(Capability::Advance));
//! assert_eq!(graph.get_number_of_neighbors(1), 2);
//! assert_eq!(graph.get_edge(1, 2), Some(2));
//! assert_eq!(graph.get_edge(0, 2), None);
//! ```

pub mod build;
pub mod coo;
pub mod csc;
pub mod csr;

pub use coo::CooView;
pub use csc::CscView;
pub use csr::CsrView;

use crate::error::GraphError;
use crate::storage::{EdgeId, VertexId};
use std::fmt;

/// Graph-level properties shared by every representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphProperties {
    /// Edges are one-way
    pub directed: bool,
    /// Edge weights carry meaning (otherwise all 1)
    pub weighted: bool,
}

impl GraphProperties {
    /// Undirected, unweighted
    #[must_use]
    pub const fn undirected() -> Self {
        Self {
            directed: false,
            weighted: false,
        }
    }

    /// Directed, unweighted
    #[must_use]
    pub const fn directed() -> Self {
        Self {
            directed: true,
            weighted: false,
        }
    }
}

/// Storage representation backing a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Compressed sparse row
    Csr,
    /// Compressed sparse column
    Csc,
    /// Coordinate list
    Coo,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csr => "CSR",
            Self::Csc => "CSC",
            Self::Coo => "COO",
        };
        f.write_str(name)
    }
}

/// Query a graph can answer natively (without a linear scan)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `get_number_of_neighbors` from offsets (CSR or CSC)
    NeighborCount,
    /// `get_edge` by lower-bound search (CSR or CSC)
    EdgeLookup,
    /// `get_source_vertex` / `get_destination_vertex`
    Endpoints,
    /// `get_edge_weight`
    EdgeWeight,
    /// Contiguous out-neighbor slices for the advance operator (CSR)
    Advance,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NeighborCount => "neighbor count",
            Self::EdgeLookup => "edge lookup",
            Self::Endpoints => "edge endpoints",
            Self::EdgeWeight => "edge weights",
            Self::Advance => "advance (out-neighbor slices)",
        };
        f.write_str(name)
    }
}

/// Supplied views, keyed by the one that answers queries (CSR, CSC, COO order)
#[derive(Debug, Clone)]
enum Views<W> {
    Csr {
        csr: CsrView<W>,
        csc: Option<CscView<W>>,
        coo: Option<CooView<W>>,
    },
    Csc {
        csc: CscView<W>,
        coo: Option<CooView<W>>,
    },
    Coo {
        coo: CooView<W>,
    },
}

/// Graph composed of one or more representation views
///
/// Built by the functions in [`build`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Graph<W = f32> {
    properties: GraphProperties,
    views: Views<W>,
}

impl<W> Graph<W> {
    const fn compose(properties: GraphProperties, views: Views<W>) -> Self {
        Self { properties, views }
    }

    /// Graph-level properties
    #[must_use]
    pub const fn properties(&self) -> GraphProperties {
        self.properties
    }

    /// Representations supplied at build time (CSR, CSC, COO order)
    #[must_use]
    pub fn representations(&self) -> Vec<Representation> {
        [Representation::Csr, Representation::Csc, Representation::Coo]
            .into_iter()
            .filter(|&rep| self.has(rep))
            .collect()
    }

    /// Check whether a representation was supplied
    #[must_use]
    pub const fn has(&self, rep: Representation) -> bool {
        match rep {
            Representation::Csr => self.csr().is_some(),
            Representation::Csc => self.csc().is_some(),
            Representation::Coo => self.coo().is_some(),
        }
    }

    /// Check whether a query is natively backed by a supplied representation
    #[must_use]
    pub const fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::NeighborCount | Capability::EdgeLookup => {
                !matches!(self.views, Views::Coo { .. })
            }
            Capability::Endpoints | Capability::EdgeWeight => true,
            Capability::Advance => matches!(self.views, Views::Csr { .. }),
        }
    }

    /// Fail fast unless every capability is natively backed
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Unsupported`] naming the first missing capability
    pub fn require(&self, capabilities: &[Capability]) -> Result<(), GraphError> {
        capabilities
            .iter()
            .find(|&&cap| !self.supports(cap))
            .map_or(Ok(()), |&cap| Err(GraphError::Unsupported(cap)))
    }

    /// CSR view, if supplied
    #[must_use]
    pub const fn csr(&self) -> Option<&CsrView<W>> {
        match &self.views {
            Views::Csr { csr, .. } => Some(csr),
            Views::Csc { .. } | Views::Coo { .. } => None,
        }
    }

    /// CSC view, if supplied
    #[must_use]
    pub const fn csc(&self) -> Option<&CscView<W>> {
        match &self.views {
            Views::Csr { csc, .. } => csc.as_ref(),
            Views::Csc { csc, .. } => Some(csc),
            Views::Coo { .. } => None,
        }
    }

    /// COO view, if supplied
    #[must_use]
    pub const fn coo(&self) -> Option<&CooView<W>> {
        match &self.views {
            Views::Csr { coo, .. } | Views::Csc { coo, .. } => coo.as_ref(),
            Views::Coo { coo } => Some(coo),
        }
    }

    /// Number of vertices (representation independent)
    #[inline]
    #[must_use]
    pub fn get_number_of_vertices(&self) -> usize {
        match &self.views {
            Views::Csr { csr, .. } => csr.get_number_of_vertices(),
            Views::Csc { csc, .. } => csc.get_number_of_vertices(),
            Views::Coo { coo } => coo.get_number_of_vertices(),
        }
    }

    /// Number of edges (representation independent)
    #[inline]
    #[must_use]
    pub fn get_number_of_edges(&self) -> usize {
        match &self.views {
            Views::Csr { csr, .. } => csr.get_number_of_edges(),
            Views::Csc { csc, .. } => csc.get_number_of_edges(),
            Views::Coo { coo } => coo.get_number_of_edges(),
        }
    }

    /// Degree of `v` (out-degree via CSR, in-degree via CSC)
    #[inline]
    #[must_use]
    pub fn get_number_of_neighbors(&self, v: VertexId) -> usize {
        match &self.views {
            Views::Csr { csr, .. } => csr.get_number_of_neighbors(v),
            Views::Csc { csc, .. } => csc.get_number_of_neighbors(v),
            Views::Coo { coo } => coo.get_number_of_neighbors(v),
        }
    }

    /// Source endpoint of edge `e`
    #[inline]
    #[must_use]
    pub fn get_source_vertex(&self, e: EdgeId) -> VertexId {
        match &self.views {
            Views::Csr { csr, .. } => csr.get_source_vertex(e),
            Views::Csc { csc, .. } => csc.get_source_vertex(e),
            Views::Coo { coo } => coo.get_source_vertex(e),
        }
    }

    /// Destination endpoint of edge `e`
    #[inline]
    #[must_use]
    pub fn get_destination_vertex(&self, e: EdgeId) -> VertexId {
        match &self.views {
            Views::Csr { csr, .. } => csr.get_destination_vertex(e),
            Views::Csc { csc, .. } => csc.get_destination_vertex(e),
            Views::Coo { coo } => coo.get_destination_vertex(e),
        }
    }

    /// Both endpoints of edge `e`
    #[inline]
    #[must_use]
    pub fn get_source_and_destination_vertices(&self, e: EdgeId) -> (VertexId, VertexId) {
        (self.get_source_vertex(e), self.get_destination_vertex(e))
    }

    /// First edge id of `source → destination`, `None` if not adjacent
    ///
    /// With parallel edges every representation resolves to the one inserted
    /// first.
    #[inline]
    #[must_use]
    pub fn get_edge(&self, source: VertexId, destination: VertexId) -> Option<EdgeId> {
        match &self.views {
            Views::Csr { csr, .. } => csr.get_edge(source, destination),
            Views::Csc { csc, .. } => csc.get_edge(source, destination),
            Views::Coo { coo } => coo.get_edge(source, destination),
        }
    }

    /// Out-neighbors of `v` and the id of its first edge (CSR only)
    ///
    /// Empty when the graph has no CSR view; callers check
    /// [`Capability::Advance`] up front.
    #[inline]
    #[must_use]
    pub fn out_edges(&self, v: VertexId) -> (EdgeId, &[VertexId]) {
        self.csr()
            .map_or((0, &[][..]), |csr| (csr.get_starting_edge(v), csr.neighbors(v)))
    }
}

impl<W: Copy> Graph<W> {
    /// Weight of edge `e`
    ///
    /// # Panics
    ///
    /// Panics if `e` is out of range
    #[inline]
    #[must_use]
    pub fn get_edge_weight(&self, e: EdgeId) -> W {
        match &self.views {
            Views::Csr { csr, .. } => csr.get_edge_weight(e),
            Views::Csc { csc, .. } => csc.get_edge_weight(e),
            Views::Coo { coo } => coo.get_edge_weight(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Coo, Csc, Csr};

    fn triangle() -> Coo<f32> {
        Coo::from_edge_list(&[(0, 1, 1.0), (1, 2, 2.0), (2, 0, 3.0)])
            .unwrap()
            .symmetrize()
    }

    #[test]
    fn test_supports_by_representation() {
        let coo = triangle();
        let coo_only = build::from_coo(GraphProperties::undirected(), &coo);
        assert!(coo_only.supports(Capability::Endpoints));
        assert!(!coo_only.supports(Capability::NeighborCount));
        assert!(!coo_only.supports(Capability::Advance));
        assert_eq!(
            coo_only.require(&[Capability::Endpoints, Capability::Advance]),
            Err(GraphError::Unsupported(Capability::Advance))
        );

        let csc = Csc::from_coo(&coo).unwrap();
        let csc_only = build::from_csc(GraphProperties::undirected(), &csc);
        assert!(csc_only.supports(Capability::NeighborCount));
        assert!(!csc_only.supports(Capability::Advance));
    }

    #[test]
    fn test_representations_listed_in_dispatch_order() {
        let coo = triangle();
        let csr = Csr::from_coo(&coo).unwrap();
        let csc = Csc::from_coo(&coo).unwrap();
        let g = build::from_coo_csc_csr(GraphProperties::undirected(), &coo, &csc, &csr);

        assert_eq!(
            g.representations(),
            vec![Representation::Csr, Representation::Csc, Representation::Coo]
        );
        assert!(g.has(Representation::Coo));
    }

    #[test]
    fn test_coo_only_falls_back_to_scan() {
        let coo = triangle();
        let g = build::from_coo(GraphProperties::undirected(), &coo);
        assert_eq!(g.get_number_of_neighbors(0), 2);
        assert_eq!(g.get_edge(0, 2), Some(1));
        assert_eq!(g.out_edges(0).1.len(), 0);
    }

    #[test]
    fn test_parallel_edges_resolve_to_first_inserted() {
        let coo = Coo::from_edge_list(&[(0, 1, 1.0), (0, 1, 2.0), (0, 1, 3.0)]).unwrap();
        let csr = Csr::from_coo(&coo).unwrap();
        let csc = Csc::from_coo(&coo).unwrap();
        let props = GraphProperties::directed();

        let weights: Vec<f32> = [
            build::from_coo(props, &coo),
            build::from_csr(props, &csr),
            build::from_csc(props, &csc),
        ]
        .iter()
        .map(|g| g.get_edge_weight(g.get_edge(0, 1).unwrap()))
        .collect();
        assert_eq!(weights, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_out_edges_from_csr() {
        let coo = triangle();
        let csr = Csr::from_coo(&coo).unwrap();
        let g = build::from_csr(GraphProperties::undirected(), &csr);

        let (start, neighbors) = g.out_edges(1);
        assert_eq!(start, 2);
        assert_eq!(neighbors, &[0, 2]);
        assert_eq!(g.get_source_and_destination_vertices(3), (1, 2));
    }
}
