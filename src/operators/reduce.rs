//! Blocking transform-reduce over vertices or edges

use super::ParallelForEach;
use crate::context::Context;
use crate::graph::Graph;
use rayon::prelude::*;

/// Map every id through `transform` and fold the results with `combine`
///
/// `combine` must be associative and `identity` its neutral element.
/// Returns `identity` for an empty iteration space.
pub fn execute<W, T, F, C>(
    graph: &Graph<W>,
    each: ParallelForEach,
    transform: F,
    identity: T,
    combine: C,
    context: &Context,
) -> T
where
    T: Copy + Send + Sync,
    F: Fn(u32) -> T + Sync,
    C: Fn(T, T) -> T + Sync,
{
    let n = super::id_space(graph, each);

    context.install(|| {
        (0..n)
            .into_par_iter()
            .map(&transform)
            .reduce(|| identity, &combine)
    })
}
