//! Graph builders
//!
//! One builder per nonempty subset of {CSR, COO, CSC}. Builders only compose
//! capabilities: each input's arrays are shared into the matching view
//! (reference-count bump, no copy, no reformatting).
//!
//! Inputs must describe the same logical graph. That is the caller's
//! obligation; a mismatch in vertex/edge counts is logged at `debug` level but
//! not rejected.

use super::{CooView, CscView, CsrView, Graph, GraphProperties, Representation, Views};
use crate::error::GraphError;
use crate::storage::{Coo, Csc, Csr};
use std::sync::Arc;
use tracing::debug;

/// Graph backed by CSR only
#[must_use]
pub fn from_csr<W>(properties: GraphProperties, csr: &Csr<W>) -> Graph<W> {
    Graph::compose(
        properties,
        Views::Csr {
            csr: CsrView::new(csr),
            csc: None,
            coo: None,
        },
    )
}

/// Graph backed by COO only
#[must_use]
pub fn from_coo<W>(properties: GraphProperties, coo: &Coo<W>) -> Graph<W> {
    Graph::compose(properties, Views::Coo { coo: CooView::new(coo) })
}

/// Graph backed by CSC only
#[must_use]
pub fn from_csc<W>(properties: GraphProperties, csc: &Csc<W>) -> Graph<W> {
    Graph::compose(
        properties,
        Views::Csc {
            csc: CscView::new(csc),
            coo: None,
        },
    )
}

/// Graph backed by COO and CSR
#[must_use]
pub fn from_coo_csr<W>(properties: GraphProperties, coo: &Coo<W>, csr: &Csr<W>) -> Graph<W> {
    check_counts(&[
        (Representation::Coo, coo.number_of_rows(), coo.number_of_nonzeros()),
        (Representation::Csr, csr.number_of_rows(), csr.number_of_nonzeros()),
    ]);
    Graph::compose(
        properties,
        Views::Csr {
            csr: CsrView::new(csr),
            csc: None,
            coo: Some(CooView::new(coo)),
        },
    )
}

/// Graph backed by CSC and CSR
#[must_use]
pub fn from_csc_csr<W>(properties: GraphProperties, csc: &Csc<W>, csr: &Csr<W>) -> Graph<W> {
    check_counts(&[
        (Representation::Csc, csc.number_of_rows(), csc.number_of_nonzeros()),
        (Representation::Csr, csr.number_of_rows(), csr.number_of_nonzeros()),
    ]);
    Graph::compose(
        properties,
        Views::Csr {
            csr: CsrView::new(csr),
            csc: Some(CscView::new(csc)),
            coo: None,
        },
    )
}

/// Graph backed by COO and CSC
#[must_use]
pub fn from_coo_csc<W>(properties: GraphProperties, coo: &Coo<W>, csc: &Csc<W>) -> Graph<W> {
    check_counts(&[
        (Representation::Coo, coo.number_of_rows(), coo.number_of_nonzeros()),
        (Representation::Csc, csc.number_of_rows(), csc.number_of_nonzeros()),
    ]);
    Graph::compose(
        properties,
        Views::Csc {
            csc: CscView::new(csc),
            coo: Some(CooView::new(coo)),
        },
    )
}

/// Graph backed by all three representations
#[must_use]
pub fn from_coo_csc_csr<W>(
    properties: GraphProperties,
    coo: &Coo<W>,
    csc: &Csc<W>,
    csr: &Csr<W>,
) -> Graph<W> {
    check_counts(&[
        (Representation::Coo, coo.number_of_rows(), coo.number_of_nonzeros()),
        (Representation::Csc, csc.number_of_rows(), csc.number_of_nonzeros()),
        (Representation::Csr, csr.number_of_rows(), csr.number_of_nonzeros()),
    ]);
    Graph::compose(
        properties,
        Views::Csr {
            csr: CsrView::new(csr),
            csc: Some(CscView::new(csc)),
            coo: Some(CooView::new(coo)),
        },
    )
}

/// New CSR graph sharing `graph`'s topology with a different weight array
///
/// Offsets and indices are shared, not recomputed. The weight type may change.
///
/// # Errors
///
/// Returns error if `graph` has no CSR view, or `values` does not have one
/// entry per edge
pub fn rebuild_with_values<W, V>(graph: &Graph<W>, values: Arc<[V]>) -> Result<Graph<V>, GraphError> {
    let csr = graph
        .csr()
        .ok_or(GraphError::MissingRepresentation(Representation::Csr))?;

    if values.len() != csr.get_number_of_edges() {
        return Err(GraphError::ValueLengthMismatch {
            expected: csr.get_number_of_edges(),
            actual: values.len(),
        });
    }

    Ok(Graph::compose(
        graph.properties(),
        Views::Csr {
            csr: csr.with_values(values),
            csc: None,
            coo: None,
        },
    ))
}

fn check_counts(counts: &[(Representation, usize, usize)]) {
    let Some(&(first_rep, vertices, edges)) = counts.first() else {
        return;
    };
    for &(rep, v, e) in &counts[1..] {
        if v != vertices || e != edges {
            debug!(
                %first_rep, vertices, edges, %rep, other_vertices = v, other_edges = e,
                "Composed representations disagree on vertex/edge counts"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EdgeId;

    fn inputs() -> (Coo<f32>, Csc<f32>, Csr<f32>) {
        let coo = Coo::from_edge_list(&[(0, 1, 1.0), (1, 2, 2.0), (2, 3, 3.0)])
            .unwrap()
            .symmetrize();
        let csc = Csc::from_coo(&coo).unwrap();
        let csr = Csr::from_coo(&coo).unwrap();
        (coo, csc, csr)
    }

    #[test]
    fn test_all_seven_builders_agree() {
        let (coo, csc, csr) = inputs();
        let props = GraphProperties::undirected();

        let graphs = vec![
            from_csr(props, &csr),
            from_coo(props, &coo),
            from_csc(props, &csc),
            from_coo_csr(props, &coo, &csr),
            from_csc_csr(props, &csc, &csr),
            from_coo_csc(props, &coo, &csc),
            from_coo_csc_csr(props, &coo, &csc, &csr),
        ];

        for g in &graphs {
            assert_eq!(g.get_number_of_vertices(), 4);
            assert_eq!(g.get_number_of_edges(), 6);
            assert_eq!(g.get_number_of_neighbors(1), 2);
            assert_eq!(g.get_edge(0, 3), None);

            for (src, dst, weight) in coo.iter() {
                let e = g.get_edge(src, dst).unwrap();
                assert_eq!(g.get_source_and_destination_vertices(e), (src, dst));
                assert_eq!(g.get_edge_weight(e), weight);
            }
        }
    }

    #[test]
    fn test_csr_backed_builders_share_edge_ids() {
        // Row-major COO and CSR number edges identically
        let (coo, csc, csr) = inputs();
        let props = GraphProperties::undirected();

        let reference = from_coo(props, &coo);
        for g in [
            from_csr(props, &csr),
            from_coo_csr(props, &coo, &csr),
            from_csc_csr(props, &csc, &csr),
            from_coo_csc_csr(props, &coo, &csc, &csr),
        ] {
            for e in 0..6 {
                assert_eq!(
                    g.get_source_and_destination_vertices(e),
                    reference.get_source_and_destination_vertices(e)
                );
                assert_eq!(g.get_edge_weight(e), reference.get_edge_weight(e));
            }
            assert_eq!(g.get_edge(2, 1), Some(3));
        }
    }

    #[test]
    fn test_builder_shares_arrays() {
        let (_, _, csr) = inputs();
        let g = from_csr(GraphProperties::undirected(), &csr);

        let (offsets, indices, _) = g.csr().unwrap().components();
        assert!(std::ptr::eq(offsets, csr.components().0));
        assert!(std::ptr::eq(indices, csr.components().1));
    }

    #[test]
    fn test_rebuild_with_values_keeps_topology() {
        let (_, _, csr) = inputs();
        let g = from_csr(GraphProperties::undirected(), &csr);

        let ids: Arc<[EdgeId]> = (0..6).collect();
        let rebuilt = rebuild_with_values(&g, ids).unwrap();

        assert_eq!(rebuilt.get_edge(2, 3), g.get_edge(2, 3));
        assert_eq!(rebuilt.get_edge_weight(4), 4_u32);
        assert!(std::ptr::eq(
            rebuilt.csr().unwrap().components().0,
            g.csr().unwrap().components().0
        ));
    }

    #[test]
    fn test_rebuild_requires_csr_and_matching_length() {
        let (coo, _, csr) = inputs();

        let coo_graph = from_coo(GraphProperties::undirected(), &coo);
        let err = rebuild_with_values(&coo_graph, Arc::from(vec![0.0_f64; 6])).unwrap_err();
        assert_eq!(err, GraphError::MissingRepresentation(Representation::Csr));

        let g = from_csr(GraphProperties::undirected(), &csr);
        let err = rebuild_with_values(&g, Arc::from(vec![0.0_f64; 2])).unwrap_err();
        assert_eq!(
            err,
            GraphError::ValueLengthMismatch {
                expected: 6,
                actual: 2
            }
        );
    }
}
