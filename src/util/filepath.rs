//! File path helpers and format sniffing
//!
//! Pure string functions; only [`load_graph`] touches the filesystem.

use crate::graph::{build, Graph};
use crate::storage::{read_market, Csr};
use anyhow::{bail, Result};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Graph file formats recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFileFormat {
    /// Matrix Market (`.mtx`, `.mmio`)
    Market,
    /// Prebuilt binary CSR (`.csr`)
    BinaryCsr,
}

impl GraphFileFormat {
    /// Sniff the format from a file name
    #[must_use]
    pub fn from_filename(filename: &str) -> Option<Self> {
        if is_market(filename) {
            Some(Self::Market)
        } else if is_binary_csr(filename) {
            Some(Self::BinaryCsr)
        } else {
            None
        }
    }
}

impl fmt::Display for GraphFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "Matrix Market"),
            Self::BinaryCsr => write!(f, "binary CSR"),
        }
    }
}

/// Last `/`-separated component of `path`
#[must_use]
pub fn extract_filename(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// `filename` without its final extension
#[must_use]
pub fn extract_dataset(filename: &str) -> &str {
    filename.rsplit_once('.').map_or(filename, |(stem, _)| stem)
}

/// Matrix Market file name
#[must_use]
pub fn is_market(filename: &str) -> bool {
    filename.ends_with(".mtx") || filename.ends_with(".mmio")
}

/// Binary CSR file name
#[must_use]
pub fn is_binary_csr(filename: &str) -> bool {
    filename.ends_with(".csr")
}

/// Load a graph file into a graph with COO and CSR views
///
/// Symmetric Matrix Market files yield an undirected graph with both edge
/// directions stored.
///
/// # Errors
///
/// Returns error if the format is unknown or unsupported, or the file cannot
/// be read or parsed
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Graph<f32>> {
    let path = path.as_ref();
    let name = path.to_string_lossy();

    match GraphFileFormat::from_filename(&name) {
        Some(GraphFileFormat::Market) => {
            let (coo, properties) = read_market(path)?;
            let csr = Csr::from_coo(&coo)?;
            debug!(
                dataset = extract_dataset(extract_filename(&name)),
                vertices = csr.number_of_rows(),
                edges = csr.number_of_nonzeros(),
                "Loaded graph"
            );
            Ok(build::from_coo_csr(properties, &coo, &csr))
        }
        Some(format) => bail!("Loading {format} files is not supported: {name}"),
        None => bail!("Unrecognised graph file extension: {name}"),
    }
}
