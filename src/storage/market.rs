//! Matrix Market (`.mtx`) reader
//!
//! Supports the `coordinate` layout with `real`, `integer` or `pattern`
//! fields and `general` or `symmetric` symmetry. Indices in the file are
//! 1-based; the returned COO is 0-based.

use super::{Coo, VertexId};
use crate::graph::GraphProperties;
use anyhow::{anyhow, bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Field type declared in the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Real,
    Integer,
    Pattern,
}

/// Read a Matrix Market file into COO
///
/// Symmetric files are expanded to both directions and reported as undirected.
///
/// # Errors
///
/// Returns error if the file cannot be opened or is not a supported
/// coordinate matrix
pub fn read_market<P: AsRef<Path>>(path: P) -> Result<(Coo<f32>, GraphProperties)> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_market(BufReader::new(file)).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse Matrix Market content from any buffered reader
///
/// # Errors
///
/// Returns error on a malformed banner, size line or entry
pub fn parse_market<R: BufRead>(reader: R) -> Result<(Coo<f32>, GraphProperties)> {
    let mut lines = reader.lines();

    let banner = lines.next().ok_or_else(|| anyhow!("Empty Matrix Market input"))??;
    let (field, symmetric) = parse_banner(&banner)?;

    let mut size_line = None;
    for line in lines.by_ref() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        size_line = Some(line);
        break;
    }
    let size_line = size_line.ok_or_else(|| anyhow!("Missing size line"))?;
    let sizes: Vec<usize> = size_line
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .context("Invalid size line")?;
    let &[rows, cols, nonzeros] = sizes.as_slice() else {
        bail!("Size line must have three entries, got {}", sizes.len());
    };

    let number_of_vertices = rows.max(cols);
    let mut edges = Vec::with_capacity(if symmetric { nonzeros * 2 } else { nonzeros });

    for line in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let src = parse_index(parts.next())?;
        let dst = parse_index(parts.next())?;
        let weight = match field {
            Field::Pattern => 1.0,
            Field::Real | Field::Integer => parts
                .next()
                .ok_or_else(|| anyhow!("Missing value in entry '{trimmed}'"))?
                .parse::<f32>()
                .with_context(|| format!("Invalid value in entry '{trimmed}'"))?,
        };

        edges.push((src, dst, weight));
        if symmetric && src != dst {
            edges.push((dst, src, weight));
        }
    }

    let coo = Coo::from_edges(number_of_vertices, &edges)?;
    let properties = GraphProperties {
        directed: !symmetric,
        weighted: field != Field::Pattern,
    };

    Ok((coo, properties))
}

fn parse_banner(banner: &str) -> Result<(Field, bool)> {
    let tokens: Vec<String> = banner.split_whitespace().map(str::to_lowercase).collect();
    let [head, object, format, field, symmetry] = tokens.as_slice() else {
        bail!("Invalid Matrix Market banner '{banner}'");
    };

    if head != "%%matrixmarket" || object != "matrix" {
        bail!("Invalid Matrix Market banner '{banner}'");
    }
    if format != "coordinate" {
        bail!("Unsupported Matrix Market format '{format}' (only coordinate)");
    }

    let field = match field.as_str() {
        "real" | "double" => Field::Real,
        "integer" => Field::Integer,
        "pattern" => Field::Pattern,
        other => bail!("Unsupported Matrix Market field '{other}'"),
    };

    let symmetric = match symmetry.as_str() {
        "general" => false,
        "symmetric" => true,
        other => bail!("Unsupported Matrix Market symmetry '{other}'"),
    };

    Ok((field, symmetric))
}

fn parse_index(token: Option<&str>) -> Result<VertexId> {
    let one_based: VertexId = token
        .ok_or_else(|| anyhow!("Missing index in entry"))?
        .parse()
        .context("Invalid index in entry")?;

    one_based
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Matrix Market indices are 1-based, got 0"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_general_real() {
        let input = "%%MatrixMarket matrix coordinate real general\n\
                     % comment\n\
                     3 3 2\n\
                     1 2 0.5\n\
                     3 1 2.0\n";

        let (coo, props) = parse_market(Cursor::new(input)).unwrap();
        assert!(props.directed);
        assert!(props.weighted);
        assert_eq!(coo.number_of_rows(), 3);

        let triples: Vec<_> = coo.iter().collect();
        assert_eq!(triples, vec![(0, 1, 0.5), (2, 0, 2.0)]);
    }

    #[test]
    fn test_parse_symmetric_pattern() {
        let input = "%%MatrixMarket matrix coordinate pattern symmetric\n\
                     4 4 2\n\
                     2 1\n\
                     3 3\n";

        let (coo, props) = parse_market(Cursor::new(input)).unwrap();
        assert!(!props.directed);
        assert!(!props.weighted);
        assert_eq!(coo.number_of_rows(), 4);

        let triples: Vec<_> = coo.iter().collect();
        assert_eq!(triples, vec![(1, 0, 1.0), (0, 1, 1.0), (2, 2, 1.0)]);
    }

    #[test]
    fn test_rejects_array_format() {
        let input = "%%MatrixMarket matrix array real general\n2 2\n1.0\n";
        assert!(parse_market(Cursor::new(input)).is_err());
    }

    #[test]
    fn test_rejects_zero_index() {
        let input = "%%MatrixMarket matrix coordinate pattern general\n2 2 1\n0 1\n";
        assert!(parse_market(Cursor::new(input)).is_err());
    }
}
