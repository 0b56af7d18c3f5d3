//! trueno-frontier: frontier-based data-parallel graph engine
//!
//! # Overview
//!
//! Graphs are composed from any subset of CSR, CSC and COO storage and queried
//! through one interface. Algorithms are written as a [`Problem`] (per-vertex
//! state) plus an [`Enactor`] (bulk-synchronous loop hooks) over three bulk
//! operators: advance, filter and parallel-for. K-core decomposition is the
//! reference algorithm.
//!
//! # Quick Start
//!
//! ```
//! use trueno_frontier::algorithms::kcore;
//! use trueno_frontier::graph::{build, GraphProperties};
//! use trueno_frontier::storage::{Coo, Csr};
//!
//! # fn main() -> trueno_frontier::Result<()> {
//! // 5-cycle, stored in both directions
//! let coo = Coo::from_edge_list(&[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (4, 0, 1.0)])?
//!     .symmetrize();
//! let csr = Csr::from_coo(&coo)?;
//! let graph = build::from_coo_csr(GraphProperties::undirected(), &coo, &csr);
//!
//! assert_eq!(graph.get_number_of_vertices(), 5);
//! assert_eq!(graph.get_edge(0, 4).map(|e| graph.get_destination_vertex(e)), Some(4));
//!
//! let mut k_cores = vec![0; 5];
//! kcore::run(&graph, &mut k_cores, None)?;
//! assert_eq!(k_cores, vec![2; 5]);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: CSR/CSC/COO inputs, Matrix Market loading, Parquet
//!   persistence (`storage` feature)
//! - **Graph**: representation views and the builder that composes them
//! - **Execution**: frontiers, contexts (rayon thread pools), operators and
//!   the enactor loop
//! - **GPU**: wgpu device selection and CSR upload (`gpu` feature)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod context;
pub mod enactor;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod operators;
pub mod storage;
pub mod util;

#[cfg(feature = "gpu")]
pub mod gpu;

// Re-export core types
pub use context::{Context, ContextConfig, MultiContext};
pub use enactor::{EnactStats, Enactor, EnactorConfig, Problem, ProblemState};
pub use error::GraphError;
pub use frontier::{Frontier, FrontierKind, FrontierPair};
pub use graph::{Capability, Graph, GraphProperties, Representation};
pub use storage::{Coo, Csc, Csr, EdgeId, VertexId};

#[cfg(feature = "gpu")]
pub use gpu::{gpu_degrees, GpuDevice, GpuGraphBuffers};

// Error type
pub use anyhow::{Error, Result};
