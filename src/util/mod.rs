//! Utilities shared by loaders and command-line front ends

pub mod filepath;

pub use filepath::{extract_dataset, extract_filename, is_binary_csr, is_market, load_graph, GraphFileFormat};
