//! Bulk operators: advance, filter, parallel-for (and reductions)
//!
//! Each operator takes a per-element function (what every element does) and a
//! strategy (how the work is spread over the context's workers). Operators
//! are barriers: all per-element work of one call finishes before it returns.
//!
//! Per-element functions run concurrently. State that several elements may
//! touch must go through atomics; [`atomic::add`] returns the value before
//! the update, which is the value of record under contention.

pub mod advance;
pub mod filter;
pub mod parallel_for;
pub mod reduce;

use crate::graph::Graph;

/// Default number of edges per block for [`LoadBalance::BlockMapped`]
pub const DEFAULT_BLOCK_SIZE: usize = 256;

/// How advance maps edge work onto workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBalance {
    /// One task per frontier vertex (all of its edges)
    ThreadMapped,
    /// Edges of the whole frontier split into fixed-size blocks; tolerant of
    /// skewed degree distributions
    BlockMapped {
        /// Edges per block
        block_size: usize,
    },
}

impl LoadBalance {
    /// Block-mapped with [`DEFAULT_BLOCK_SIZE`]
    #[must_use]
    pub const fn block_mapped() -> Self {
        Self::BlockMapped {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl Default for LoadBalance {
    fn default() -> Self {
        Self::block_mapped()
    }
}

/// How filter compacts the surviving elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterAlgorithm {
    /// Single pass: evaluate and keep in one go
    #[default]
    Predicated,
    /// Flag pass, per-chunk count and exclusive scan, then scatter
    Compact,
}

/// What parallel-for iterates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelForEach {
    /// Every vertex of the graph
    #[default]
    Vertex,
    /// Every edge of the graph
    Edge,
}

/// Atomic helpers for per-element functions
pub mod atomic {
    use std::sync::atomic::{AtomicI32, Ordering};

    /// Add `value` to `target`; returns the value before the add
    #[inline]
    pub fn add(target: &AtomicI32, value: i32) -> i32 {
        target.fetch_add(value, Ordering::AcqRel)
    }
}

/// Number of ids in the iteration space named by `each`
///
/// Storage construction rejects vertex and edge counts above `u32::MAX`, so
/// the conversion cannot fail for a built graph.
pub(crate) fn id_space<W>(graph: &Graph<W>, each: ParallelForEach) -> u32 {
    let n = match each {
        ParallelForEach::Vertex => graph.get_number_of_vertices(),
        ParallelForEach::Edge => graph.get_number_of_edges(),
    };
    debug_assert!(u32::try_from(n).is_ok(), "{n} ids exceed the u32 id space");
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Exclusive prefix sum; `result[i]` = sum of `counts[..i]`, length `n + 1`
pub(crate) fn exclusive_scan(counts: &[usize]) -> Vec<usize> {
    let mut scan = Vec::with_capacity(counts.len() + 1);
    let mut running = 0;
    scan.push(running);
    for &count in counts {
        running += count;
        scan.push(running);
    }
    scan
}
