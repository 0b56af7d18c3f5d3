//! Problem / enactor bulk-synchronous execution model
//!
//! A [`Problem`] owns an algorithm's per-vertex state and its lifecycle
//! (`init` allocates, `reset` derives initial values from the graph). An
//! [`Enactor`] supplies the loop hooks; [`Enactor::enact`] drives them:
//!
//! ```text
//! prepare_frontier
//! while !is_converged { iterate; iteration += 1 }
//! finalize
//! ```
//!
//! Every operator inside `iterate` is a barrier, so hooks always observe the
//! fully committed effects of the previous operator.

use crate::context::{Context, MultiContext};
use crate::error::GraphError;
use crate::frontier::{FrontierKind, FrontierPair};
use crate::graph::Graph;
use crate::operators::{FilterAlgorithm, LoadBalance};
use anyhow::Result;
use std::fmt;
use tracing::{debug, warn};

/// Lifecycle of a [`Problem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemState {
    /// Constructed, nothing allocated
    Created,
    /// State arrays allocated
    Initialized,
    /// Initial values derived from the graph; may be enacted
    Ready,
    /// Inside the enactor loop
    Iterating,
    /// Loop finished; results are final
    Converged,
}

impl ProblemState {
    /// Move to `next` if the lifecycle allows it
    ///
    /// `reset` (to `Ready`) is allowed from any state after `init`, which is
    /// how a problem is re-run.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidState`] naming the state `next` requires
    pub fn transition(&mut self, next: Self) -> Result<(), GraphError> {
        let allowed = match next {
            Self::Created => false,
            Self::Initialized => *self == Self::Created,
            Self::Ready => *self != Self::Created,
            Self::Iterating => *self == Self::Ready,
            Self::Converged => *self == Self::Iterating,
        };
        if allowed {
            *self = next;
            return Ok(());
        }

        let required = match next {
            Self::Created | Self::Initialized => Self::Created,
            Self::Ready => Self::Initialized,
            Self::Iterating => Self::Ready,
            Self::Converged => Self::Iterating,
        };
        Err(GraphError::InvalidState {
            expected: required,
            actual: *self,
        })
    }
}

impl fmt::Display for ProblemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Initialized => "initialized",
            Self::Ready => "ready",
            Self::Iterating => "iterating",
            Self::Converged => "converged",
        };
        f.write_str(name)
    }
}

/// Per-algorithm mutable state over one graph
pub trait Problem {
    /// Edge weight type of the graph
    type Weight;

    /// Graph the problem runs on
    fn graph(&self) -> &Graph<Self::Weight>;

    /// Current lifecycle state
    fn state(&self) -> ProblemState;

    /// Mutable lifecycle state (used by [`Enactor::enact`])
    fn state_mut(&mut self) -> &mut ProblemState;

    /// Allocate state sized to the graph
    ///
    /// # Errors
    ///
    /// Returns error if called twice
    fn init(&mut self) -> Result<()>;

    /// Derive initial values from the graph (no reallocation)
    ///
    /// # Errors
    ///
    /// Returns error if called before [`Problem::init`]
    fn reset(&mut self) -> Result<()>;
}

/// Enactor tuning knobs
#[derive(Debug, Clone)]
pub struct EnactorConfig {
    /// Advance load-balancing strategy
    pub load_balance: LoadBalance,
    /// Filter compaction algorithm
    pub filter_algorithm: FilterAlgorithm,
    /// Cap on loop iterations (`None` = run to convergence)
    pub max_iterations: Option<usize>,
}

impl Default for EnactorConfig {
    fn default() -> Self {
        Self {
            load_balance: LoadBalance::block_mapped(),
            filter_algorithm: FilterAlgorithm::Predicated,
            max_iterations: None,
        }
    }
}

impl EnactorConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the advance strategy
    #[must_use]
    pub const fn with_load_balance(mut self, load_balance: LoadBalance) -> Self {
        self.load_balance = load_balance;
        self
    }

    /// Use block-mapped advance with `block_size` edges per block
    #[must_use]
    pub const fn with_block_size(mut self, block_size: usize) -> Self {
        self.load_balance = LoadBalance::BlockMapped { block_size };
        self
    }

    /// Set the filter algorithm
    #[must_use]
    pub const fn with_filter_algorithm(mut self, filter_algorithm: FilterAlgorithm) -> Self {
        self.filter_algorithm = filter_algorithm;
        self
    }

    /// Stop after `max_iterations` loop iterations
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}

/// Loop state handed to every hook
#[derive(Debug)]
pub struct EnactorState<'c> {
    context: &'c MultiContext,
    config: EnactorConfig,
    frontiers: FrontierPair,
    iteration: usize,
}

impl<'c> EnactorState<'c> {
    /// Fresh loop state with an empty frontier pair
    #[must_use]
    pub const fn new(context: &'c MultiContext, config: EnactorConfig, kind: FrontierKind) -> Self {
        Self {
            context,
            config,
            frontiers: FrontierPair::new(kind),
            iteration: 0,
        }
    }

    /// Context operators dispatch on
    #[must_use]
    pub fn context(&self) -> &'c Context {
        self.context.primary()
    }

    /// Enactor configuration
    #[must_use]
    pub const fn config(&self) -> &EnactorConfig {
        &self.config
    }

    /// Frontier pair
    #[must_use]
    pub const fn frontiers(&self) -> &FrontierPair {
        &self.frontiers
    }

    /// Mutable frontier pair
    pub fn frontiers_mut(&mut self) -> &mut FrontierPair {
        &mut self.frontiers
    }

    /// Completed loop iterations
    #[must_use]
    pub const fn iteration(&self) -> usize {
        self.iteration
    }
}

/// Outcome of one [`Enactor::enact`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnactStats {
    /// Wall-clock time of the loop in milliseconds
    pub elapsed_ms: f32,
    /// Loop iterations executed
    pub iterations: usize,
    /// Stopped by [`EnactorConfig::max_iterations`] instead of converging
    pub capped: bool,
}

/// Algorithm-specific loop hooks
pub trait Enactor {
    /// Problem this enactor drives
    type Problem: Problem;

    /// Kind of ids carried by the frontier
    fn frontier_kind(&self) -> FrontierKind {
        FrontierKind::Vertex
    }

    /// Seed the input frontier
    ///
    /// # Errors
    ///
    /// Returns error if seeding fails
    fn prepare_frontier(&mut self, problem: &mut Self::Problem, state: &mut EnactorState<'_>) -> Result<()>;

    /// One loop iteration (any number of operator dispatches)
    ///
    /// # Errors
    ///
    /// Returns error if an operator fails
    fn iterate(&mut self, problem: &mut Self::Problem, state: &mut EnactorState<'_>) -> Result<()>;

    /// Whether the loop is done; may reseed the frontier and continue
    ///
    /// # Errors
    ///
    /// Returns error if the check fails
    fn is_converged(&mut self, _problem: &mut Self::Problem, state: &mut EnactorState<'_>) -> Result<bool> {
        Ok(state.frontiers().input().is_empty())
    }

    /// Post-loop hook
    ///
    /// # Errors
    ///
    /// Returns error if finalization fails
    fn finalize(&mut self, _problem: &mut Self::Problem, _state: &mut EnactorState<'_>) -> Result<()> {
        Ok(())
    }

    /// Drive the loop to convergence
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidState`] if the problem was not reset, or
    /// any error raised by a hook
    fn enact(
        &mut self,
        problem: &mut Self::Problem,
        context: &MultiContext,
        config: &EnactorConfig,
    ) -> Result<EnactStats> {
        problem.state_mut().transition(ProblemState::Iterating)?;

        let mut state = EnactorState::new(context, config.clone(), self.frontier_kind());
        let timer = state.context().timer();
        let mut capped = false;

        self.prepare_frontier(problem, &mut state)?;
        while !self.is_converged(problem, &mut state)? {
            if config.max_iterations.is_some_and(|max| state.iteration >= max) {
                warn!(iterations = state.iteration, "Iteration cap reached before convergence");
                capped = true;
                break;
            }
            self.iterate(problem, &mut state)?;
            state.iteration += 1;
            debug!(
                iteration = state.iteration,
                frontier = state.frontiers().input().len(),
                "Iteration complete"
            );
        }
        self.finalize(problem, &mut state)?;

        problem.state_mut().transition(ProblemState::Converged)?;
        let elapsed_ms = timer.end();
        debug!(iterations = state.iteration, elapsed_ms, "Converged");

        Ok(EnactStats {
            elapsed_ms,
            iterations: state.iteration,
            capped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build, GraphProperties};
    use crate::operators::advance;
    use crate::storage::Csr;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Level-synchronous reachability from vertex 0
    struct Reach<'g> {
        graph: &'g Graph<f32>,
        state: ProblemState,
        visited: Vec<AtomicBool>,
    }

    impl Problem for Reach<'_> {
        type Weight = f32;

        fn graph(&self) -> &Graph<f32> {
            self.graph
        }

        fn state(&self) -> ProblemState {
            self.state
        }

        fn state_mut(&mut self) -> &mut ProblemState {
            &mut self.state
        }

        fn init(&mut self) -> Result<()> {
            self.state.transition(ProblemState::Initialized)?;
            self.visited = (0..self.graph.get_number_of_vertices())
                .map(|_| AtomicBool::new(false))
                .collect();
            Ok(())
        }

        fn reset(&mut self) -> Result<()> {
            self.state.transition(ProblemState::Ready)?;
            for flag in &self.visited {
                flag.store(false, Ordering::Relaxed);
            }
            Ok(())
        }
    }

    struct ReachEnactor;

    impl Enactor for ReachEnactor {
        type Problem = Reach<'static>;

        fn prepare_frontier(&mut self, problem: &mut Reach<'static>, state: &mut EnactorState<'_>) -> Result<()> {
            problem.visited[0].store(true, Ordering::Relaxed);
            state.frontiers_mut().input_mut().push(0);
            Ok(())
        }

        fn iterate(&mut self, problem: &mut Reach<'static>, state: &mut EnactorState<'_>) -> Result<()> {
            let context = state.context();
            let load_balance = state.config().load_balance;
            let visited = &problem.visited;
            advance::execute(
                problem.graph,
                state.frontiers_mut(),
                |_, neighbor, _, _| !visited[neighbor as usize].swap(true, Ordering::Relaxed),
                load_balance,
                context,
            )?;
            Ok(())
        }
    }

    fn path_graph() -> &'static Graph<f32> {
        let csr = Csr::from_edge_list(&[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (4, 0, 1.0)]).unwrap();
        Box::leak(Box::new(build::from_csr(GraphProperties::directed(), &csr)))
    }

    fn problem(graph: &'static Graph<f32>) -> Reach<'static> {
        Reach {
            graph,
            state: ProblemState::Created,
            visited: Vec::new(),
        }
    }

    #[test]
    fn test_enact_runs_to_empty_frontier() {
        let ctx = MultiContext::new(0).unwrap();
        let mut reach = problem(path_graph());
        reach.init().unwrap();
        reach.reset().unwrap();

        let stats = ReachEnactor.enact(&mut reach, &ctx, &EnactorConfig::default()).unwrap();

        // 0 -> 1 -> 2 -> 3, then an empty frontier
        assert_eq!(stats.iterations, 4);
        assert!(!stats.capped);
        assert_eq!(reach.state(), ProblemState::Converged);
        let visited: Vec<bool> = reach.visited.iter().map(|f| f.load(Ordering::Relaxed)).collect();
        assert_eq!(visited, vec![true, true, true, true, false]);
    }

    #[test]
    fn test_enact_before_reset_fails() {
        let ctx = MultiContext::new(0).unwrap();
        let mut reach = problem(path_graph());
        reach.init().unwrap();

        let err = ReachEnactor
            .enact(&mut reach, &ctx, &EnactorConfig::default())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<GraphError>(),
            Some(&GraphError::InvalidState {
                expected: ProblemState::Ready,
                actual: ProblemState::Initialized,
            })
        );
    }

    #[test]
    fn test_rerun_after_reset() {
        let ctx = MultiContext::new(0).unwrap();
        let mut reach = problem(path_graph());
        reach.init().unwrap();

        for _ in 0..2 {
            reach.reset().unwrap();
            let stats = ReachEnactor.enact(&mut reach, &ctx, &EnactorConfig::default()).unwrap();
            assert_eq!(stats.iterations, 4);
        }
    }

    #[test]
    fn test_iteration_cap() {
        let ctx = MultiContext::new(0).unwrap();
        let mut reach = problem(path_graph());
        reach.init().unwrap();
        reach.reset().unwrap();

        let config = EnactorConfig::new()
            .with_load_balance(LoadBalance::ThreadMapped)
            .with_max_iterations(2);
        let stats = ReachEnactor.enact(&mut reach, &ctx, &config).unwrap();

        assert_eq!(stats.iterations, 2);
        assert!(stats.capped);
        assert!(!reach.visited[3].load(Ordering::Relaxed));
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut state = ProblemState::Created;
        assert!(state.transition(ProblemState::Ready).is_err());
        state.transition(ProblemState::Initialized).unwrap();
        assert!(state.transition(ProblemState::Initialized).is_err());
        assert!(state.transition(ProblemState::Iterating).is_err());
        state.transition(ProblemState::Ready).unwrap();
        state.transition(ProblemState::Iterating).unwrap();
        state.transition(ProblemState::Converged).unwrap();
        state.transition(ProblemState::Ready).unwrap();
        assert_eq!(state.to_string(), "ready");
    }
}
