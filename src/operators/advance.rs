//! Advance: visit every edge leaving the input frontier
//!
//! For each `(source, neighbor, edge, weight)` reachable from the input
//! frontier, evaluate `op`; the neighbor is emitted into the output frontier
//! iff `op` returns true. Output order is deterministic (frontier order, then
//! edge order). The pair is swapped afterwards.

use super::{exclusive_scan, LoadBalance};
use crate::context::Context;
use crate::error::GraphError;
use crate::frontier::FrontierPair;
use crate::graph::{Capability, CsrView, Graph};
use crate::storage::{EdgeId, VertexId};
use rayon::prelude::*;
use tracing::trace;

/// Run advance over the input frontier
///
/// # Errors
///
/// Returns [`GraphError::Unsupported`] if the graph has no CSR view
pub fn execute<W, F>(
    graph: &Graph<W>,
    frontiers: &mut FrontierPair,
    op: F,
    load_balance: LoadBalance,
    context: &Context,
) -> Result<(), GraphError>
where
    W: Copy + Send + Sync,
    F: Fn(VertexId, VertexId, EdgeId, W) -> bool + Sync,
{
    let csr = graph
        .csr()
        .ok_or(GraphError::Unsupported(Capability::Advance))?;

    let (input, output) = frontiers.split();
    let sources = input.as_slice();

    let emitted = context.install(|| match load_balance {
        LoadBalance::ThreadMapped => thread_mapped(csr, sources, &op),
        LoadBalance::BlockMapped { block_size } => {
            block_mapped(csr, sources, &op, block_size.max(1))
        }
    });

    trace!(
        input = sources.len(),
        output = emitted.len(),
        ?load_balance,
        "advance"
    );

    output.replace(emitted);
    frontiers.swap();
    Ok(())
}

fn thread_mapped<W, F>(csr: &CsrView<W>, sources: &[VertexId], op: &F) -> Vec<VertexId>
where
    W: Copy + Send + Sync,
    F: Fn(VertexId, VertexId, EdgeId, W) -> bool + Sync,
{
    sources
        .par_iter()
        .flat_map_iter(|&source| {
            let start = csr.get_starting_edge(source);
            csr.neighbors(source)
                .iter()
                .zip(start..)
                .filter_map(move |(&neighbor, edge)| {
                    op(source, neighbor, edge, csr.get_edge_weight(edge)).then_some(neighbor)
                })
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)] // edge positions are bounded by the u32 edge count
fn block_mapped<W, F>(
    csr: &CsrView<W>,
    sources: &[VertexId],
    op: &F,
    block_size: usize,
) -> Vec<VertexId>
where
    W: Copy + Send + Sync,
    F: Fn(VertexId, VertexId, EdgeId, W) -> bool + Sync,
{
    let degrees: Vec<usize> = sources
        .par_iter()
        .map(|&v| csr.get_number_of_neighbors(v))
        .collect();
    let scan = exclusive_scan(&degrees);
    let total = scan[sources.len()];
    let scan = scan.as_slice();

    (0..total.div_ceil(block_size))
        .into_par_iter()
        .flat_map_iter(|block| {
            let begin = block * block_size;
            let end = (begin + block_size).min(total);
            // Frontier slot owning the first edge of the block
            let mut slot = scan.partition_point(|&offset| offset <= begin).saturating_sub(1);

            (begin..end).filter_map(move |position| {
                while scan[slot + 1] <= position {
                    slot += 1;
                }
                let source = sources[slot];
                let edge = csr.get_starting_edge(source) + (position - scan[slot]) as EdgeId;
                let neighbor = csr.get_destination_vertex(edge);
                op(source, neighbor, edge, csr.get_edge_weight(edge)).then_some(neighbor)
            })
        })
        .collect()
}
