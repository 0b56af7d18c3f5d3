//! K-core decomposition
//!
//! Based on the bulk-synchronous peeling scheme of Gunrock (Wang et al., ACM
//! `ToPC` 2017): for increasing thresholds `k`, vertices whose remaining
//! degree is at most `k` are removed in cascading rounds of advance, mark and
//! filter until no vertex crosses the threshold, then `k` is raised to the
//! minimum remaining degree.
//!
//! The core number of a vertex is the largest `k` such that the vertex belongs
//! to a subgraph in which every vertex has degree at least `k`.
//!
//! # Example
//!
//! ```
//! use trueno_frontier::algorithms::kcore;
//! use trueno_frontier::graph::{build, GraphProperties};
//! use trueno_frontier::storage::{Coo, Csr};
//!
//! // Triangle 0-1-2 with a pendant vertex 3 hanging off 2
//! let coo = Coo::from_edge_list(&[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (2, 3, 1.0)])
//!     .unwrap()
//!     .symmetrize();
//! let csr = Csr::from_coo(&coo).unwrap();
//! let graph = build::from_csr(GraphProperties::undirected(), &csr);
//!
//! let mut k_cores = vec![0; 4];
//! kcore::run(&graph, &mut k_cores, None).unwrap();
//! assert_eq!(k_cores, vec![2, 2, 2, 1]);
//! ```

use crate::context::{device, MultiContext};
use crate::enactor::{EnactStats, Enactor, EnactorConfig, EnactorState, Problem, ProblemState};
use crate::error::GraphError;
use crate::graph::{Capability, Graph};
use crate::operators::{advance, atomic, filter, parallel_for, reduce, ParallelForEach};
use anyhow::{bail, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use tracing::{debug, warn};

/// Summary of a k-core run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KCoreStats {
    /// Wall-clock time in milliseconds
    pub elapsed_ms: f32,
    /// Outer iterations (distinct thresholds `k` processed)
    pub iterations: usize,
    /// Largest core number (graph degeneracy)
    pub degeneracy: i32,
}

/// Per-vertex k-core state
pub struct KCoreProblem<'g, W = f32> {
    graph: &'g Graph<W>,
    context: &'g MultiContext,
    state: ProblemState,
    degrees: Vec<AtomicI32>,
    deleted: Vec<AtomicBool>,
    to_be_deleted: Vec<AtomicBool>,
    k_cores: Vec<AtomicI32>,
    current_k: i32,
}

impl<'g, W> KCoreProblem<'g, W> {
    /// Create a problem over `graph`; nothing is allocated until `init`
    #[must_use]
    pub const fn new(graph: &'g Graph<W>, context: &'g MultiContext) -> Self {
        Self {
            graph,
            context,
            state: ProblemState::Created,
            degrees: Vec::new(),
            deleted: Vec::new(),
            to_be_deleted: Vec::new(),
            k_cores: Vec::new(),
            current_k: 0,
        }
    }

    /// Threshold currently being peeled
    #[must_use]
    pub const fn current_k(&self) -> i32 {
        self.current_k
    }

    /// Whether vertex `v` has been removed; `None` if `v` is out of range or
    /// the problem is not initialized
    #[must_use]
    pub fn is_deleted(&self, v: usize) -> Option<bool> {
        self.deleted.get(v).map(|flag| flag.load(Ordering::Relaxed))
    }

    /// Copy core numbers into `output`
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutputLengthMismatch`] if `output` is not sized to
    /// the vertex count
    pub fn write_core_numbers(&self, output: &mut [i32]) -> Result<(), GraphError> {
        if output.len() != self.k_cores.len() {
            return Err(GraphError::OutputLengthMismatch {
                expected: self.k_cores.len(),
                actual: output.len(),
            });
        }
        for (out, k) in output.iter_mut().zip(&self.k_cores) {
            *out = k.load(Ordering::Relaxed);
        }
        Ok(())
    }
}

impl<W: Copy + Send + Sync> Problem for KCoreProblem<'_, W> {
    type Weight = W;

    fn graph(&self) -> &Graph<W> {
        self.graph
    }

    fn state(&self) -> ProblemState {
        self.state
    }

    fn state_mut(&mut self) -> &mut ProblemState {
        &mut self.state
    }

    fn init(&mut self) -> Result<()> {
        if i32::try_from(self.graph.get_number_of_edges()).is_err() {
            bail!(
                "Graph has {} edges; degrees must fit in i32",
                self.graph.get_number_of_edges()
            );
        }
        self.state.transition(ProblemState::Initialized)?;

        let n = self.graph.get_number_of_vertices();
        self.degrees = (0..n).map(|_| AtomicI32::new(0)).collect();
        self.deleted = (0..n).map(|_| AtomicBool::new(false)).collect();
        self.to_be_deleted = (0..n).map(|_| AtomicBool::new(false)).collect();
        self.k_cores = (0..n).map(|_| AtomicI32::new(0)).collect();
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // edge count checked in init
    fn reset(&mut self) -> Result<()> {
        self.state.transition(ProblemState::Ready)?;

        let graph = self.graph;
        let (degrees, deleted) = (&self.degrees, &self.deleted);
        let (to_be_deleted, k_cores) = (&self.to_be_deleted, &self.k_cores);
        parallel_for::execute(
            graph,
            |v| {
                let i = v as usize;
                let degree = graph.get_number_of_neighbors(v) as i32;
                k_cores[i].store(0, Ordering::Relaxed);
                to_be_deleted[i].store(false, Ordering::Relaxed);
                degrees[i].store(degree, Ordering::Relaxed);
                deleted[i].store(degree == 0, Ordering::Relaxed);
            },
            ParallelForEach::Vertex,
            self.context.primary(),
        );

        self.current_k = 0;
        Ok(())
    }
}

/// Loop hooks for k-core
pub struct KCoreEnactor<'g, W = f32> {
    _problem: PhantomData<fn(&'g W)>,
}

impl<W> KCoreEnactor<'_, W> {
    /// Create an enactor
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _problem: PhantomData,
        }
    }
}

impl<W> Default for KCoreEnactor<'_, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'g, W: Copy + Send + Sync> Enactor for KCoreEnactor<'g, W> {
    type Problem = KCoreProblem<'g, W>;

    fn prepare_frontier(&mut self, problem: &mut Self::Problem, state: &mut EnactorState<'_>) -> Result<()> {
        state
            .frontiers_mut()
            .input_mut()
            .sequence(0, problem.graph.get_number_of_vertices())?;
        Ok(())
    }

    fn iterate(&mut self, problem: &mut Self::Problem, state: &mut EnactorState<'_>) -> Result<()> {
        let graph = problem.graph;
        let k = problem.current_k;
        let context = state.context();
        let config = state.config().clone();
        let degrees = &problem.degrees;
        let deleted = &problem.deleted;
        let to_be_deleted = &problem.to_be_deleted;
        let k_cores = &problem.k_cores;

        let mut rounds = 0_usize;
        while !state.frontiers().input().is_empty() {
            // Remove frontier vertices at or below k; wake their live neighbors
            advance::execute(
                graph,
                state.frontiers_mut(),
                |source, neighbor, _, _| {
                    let s = source as usize;
                    if deleted[s].load(Ordering::Relaxed) || degrees[s].load(Ordering::Relaxed) > k {
                        return false;
                    }
                    k_cores[s].store(k, Ordering::Relaxed);
                    to_be_deleted[s].store(true, Ordering::Relaxed);
                    !deleted[neighbor as usize].load(Ordering::Relaxed)
                },
                config.load_balance,
                context,
            )?;

            parallel_for::execute(
                graph,
                |v| {
                    let i = v as usize;
                    if to_be_deleted[i].load(Ordering::Relaxed) {
                        deleted[i].store(true, Ordering::Relaxed);
                    }
                },
                ParallelForEach::Vertex,
                context,
            );

            // One decrement per removed neighbor edge; revisit on crossing k
            filter::execute(
                state.frontiers_mut(),
                |v| {
                    let i = v as usize;
                    if deleted[i].load(Ordering::Relaxed) {
                        return false;
                    }
                    atomic::add(&degrees[i], -1) - 1 == k
                },
                config.filter_algorithm,
                context,
            );
            rounds += 1;
        }

        debug!(k, rounds, "Threshold peeled");
        Ok(())
    }

    fn is_converged(&mut self, problem: &mut Self::Problem, state: &mut EnactorState<'_>) -> Result<bool> {
        let (degrees, deleted) = (&problem.degrees, &problem.deleted);
        let min_degree = reduce::execute(
            problem.graph,
            ParallelForEach::Vertex,
            |v| {
                let i = v as usize;
                if deleted[i].load(Ordering::Relaxed) {
                    i32::MAX
                } else {
                    degrees[i].load(Ordering::Relaxed)
                }
            },
            i32::MAX,
            i32::min,
            state.context(),
        );

        if min_degree == i32::MAX {
            return Ok(true);
        }

        problem.current_k = min_degree;
        state
            .frontiers_mut()
            .input_mut()
            .sequence(0, problem.graph.get_number_of_vertices())?;
        Ok(false)
    }
}

/// Compute core numbers into `k_cores`; returns elapsed milliseconds
///
/// Uses a fresh default context on the current device when `context` is
/// `None`. The graph must be symmetric (undirected) for the result to be
/// a core decomposition; directed input is accepted with a warning.
///
/// # Errors
///
/// Returns error if the graph has no CSR view, `k_cores` is not sized to the
/// vertex count, or no context can be created
pub fn run<W>(graph: &Graph<W>, k_cores: &mut [i32], context: Option<&MultiContext>) -> Result<f32>
where
    W: Copy + Send + Sync,
{
    Ok(run_with_config(graph, k_cores, context, &EnactorConfig::default())?.elapsed_ms)
}

/// [`run`] with explicit enactor configuration
///
/// # Errors
///
/// Same as [`run`]
pub fn run_with_config<W>(
    graph: &Graph<W>,
    k_cores: &mut [i32],
    context: Option<&MultiContext>,
    config: &EnactorConfig,
) -> Result<KCoreStats>
where
    W: Copy + Send + Sync,
{
    graph.require(&[Capability::Advance])?;
    let n = graph.get_number_of_vertices();
    if k_cores.len() != n {
        return Err(GraphError::OutputLengthMismatch {
            expected: n,
            actual: k_cores.len(),
        }
        .into());
    }
    if graph.properties().directed {
        warn!("k-core on a directed graph; degrees count out-edges only");
    }

    let owned;
    let context = match context {
        Some(context) => context,
        None => {
            owned = MultiContext::new(device::current())?;
            &owned
        }
    };

    let mut problem = KCoreProblem::new(graph, context);
    problem.init()?;
    problem.reset()?;

    let EnactStats {
        elapsed_ms,
        iterations,
        ..
    } = KCoreEnactor::<W>::new().enact(&mut problem, context, config)?;
    problem.write_core_numbers(k_cores)?;

    let degeneracy = k_cores.iter().copied().max().unwrap_or(0);
    debug!(vertices = n, iterations, degeneracy, elapsed_ms, "k-core complete");

    Ok(KCoreStats {
        elapsed_ms,
        iterations,
        degeneracy,
    })
}

/// Sequential min-degree peeling (reference implementation)
///
/// Repeatedly removes a vertex of minimum remaining degree; its core number
/// is the largest minimum degree seen so far. Degrees and removals follow
/// out-edges of the CSR view, matching [`run`].
///
/// # Errors
///
/// Returns [`GraphError::Unsupported`] if the graph has no CSR view
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // small reference graphs
pub fn core_numbers_sequential<W>(graph: &Graph<W>) -> Result<Vec<i32>, GraphError> {
    let csr = graph
        .csr()
        .ok_or(GraphError::Unsupported(Capability::Advance))?;
    let n = csr.get_number_of_vertices();

    let mut degrees: Vec<i32> = (0..n as u32)
        .map(|v| csr.get_number_of_neighbors(v) as i32)
        .collect();
    let mut removed = vec![false; n];
    let mut cores = vec![0; n];
    let mut heap: BinaryHeap<Reverse<(i32, u32)>> =
        (0..n as u32).map(|v| Reverse((degrees[v as usize], v))).collect();

    let mut k = 0;
    while let Some(Reverse((degree, v))) = heap.pop() {
        let i = v as usize;
        if removed[i] || degree != degrees[i] {
            continue;
        }
        k = k.max(degree);
        cores[i] = k;
        removed[i] = true;

        for &u in csr.neighbors(v) {
            let j = u as usize;
            if !removed[j] {
                degrees[j] -= 1;
                heap.push(Reverse((degrees[j], u)));
            }
        }
    }

    Ok(cores)
}
