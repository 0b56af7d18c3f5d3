//! Filter: keep the input frontier elements a predicate accepts
//!
//! The predicate is evaluated exactly once per input element (it may carry
//! side effects such as atomic decrements). Survivors keep their relative
//! order. The pair is swapped afterwards.

use super::{exclusive_scan, FilterAlgorithm};
use crate::context::Context;
use crate::frontier::FrontierPair;
use crate::storage::VertexId;
use rayon::prelude::*;
use tracing::trace;

/// Elements per scatter chunk for [`FilterAlgorithm::Compact`]
const COMPACT_CHUNK: usize = 1024;

/// Run filter over the input frontier
pub fn execute<F>(frontiers: &mut FrontierPair, op: F, algorithm: FilterAlgorithm, context: &Context)
where
    F: Fn(VertexId) -> bool + Sync,
{
    let (input, output) = frontiers.split();
    let ids = input.as_slice();

    let kept = context.install(|| match algorithm {
        FilterAlgorithm::Predicated => predicated(ids, &op),
        FilterAlgorithm::Compact => compact(ids, &op),
    });

    trace!(input = ids.len(), output = kept.len(), ?algorithm, "filter");

    output.replace(kept);
    frontiers.swap();
}

fn predicated<F>(ids: &[VertexId], op: &F) -> Vec<VertexId>
where
    F: Fn(VertexId) -> bool + Sync,
{
    ids.par_iter().copied().filter(|&v| op(v)).collect()
}

fn compact<F>(ids: &[VertexId], op: &F) -> Vec<VertexId>
where
    F: Fn(VertexId) -> bool + Sync,
{
    let flags: Vec<bool> = ids.par_iter().map(|&v| op(v)).collect();
    let counts: Vec<usize> = flags
        .par_chunks(COMPACT_CHUNK)
        .map(|chunk| chunk.iter().filter(|&&keep| keep).count())
        .collect();
    let scan = exclusive_scan(&counts);

    let mut kept = vec![0; scan[counts.len()]];
    let mut rest = kept.as_mut_slice();
    let mut slots = Vec::with_capacity(counts.len());
    for &count in &counts {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(count);
        slots.push(head);
        rest = tail;
    }

    slots
        .into_par_iter()
        .zip(ids.par_chunks(COMPACT_CHUNK).zip(flags.par_chunks(COMPACT_CHUNK)))
        .for_each(|(slot, (chunk, keep))| {
            let survivors = chunk
                .iter()
                .zip(keep)
                .filter_map(|(&v, &k)| k.then_some(v));
            for (dst, v) in slot.iter_mut().zip(survivors) {
                *dst = v;
            }
        });

    kept
}
