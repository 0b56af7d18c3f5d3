//! Graph storage layer
//!
//! Format-specific inputs (CSR, CSC, COO) that the graph builder composes,
//! plus Matrix Market loading and Parquet persistence.

pub mod coo;
pub mod csc;
pub mod csr;
pub mod market;
#[cfg(feature = "storage")]
pub mod parquet;

pub use coo::Coo;
pub use csc::Csc;
pub use csr::Csr;
pub use market::read_market;

/// Vertex identifier: index into `[0, number_of_vertices)`
pub type VertexId = u32;

/// Edge identifier: index into `[0, number_of_edges)`, unique per directed edge
pub type EdgeId = u32;
