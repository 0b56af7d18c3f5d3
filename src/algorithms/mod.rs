//! Graph algorithms built on the enactor and operators
//!
//! K-core decomposition is the reference algorithm: it exercises every
//! operator (advance, parallel-for, filter, reduce) and the full problem
//! lifecycle.

pub mod kcore;

pub use kcore::{core_numbers_sequential, KCoreEnactor, KCoreProblem, KCoreStats};
