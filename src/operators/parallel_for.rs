//! Parallel-for: apply a function to every vertex or every edge

use super::ParallelForEach;
use crate::context::Context;
use crate::graph::Graph;
use rayon::prelude::*;
use tracing::trace;

/// Apply `op` to every id in the iteration space named by `each`
pub fn execute<W, F>(graph: &Graph<W>, op: F, each: ParallelForEach, context: &Context)
where
    F: Fn(u32) + Sync,
{
    let n = super::id_space(graph, each);

    trace!(n, ?each, "parallel_for");

    context.install(|| (0..n).into_par_iter().for_each(&op));
}
