//! K-core decomposition demo
//!
//! Loads a Matrix Market file (or builds a small sample graph), runs k-core
//! and prints the core-number histogram.
//!
//! Run with: `cargo run --example kcore_demo [-- path/to/graph.mtx]`

use std::collections::BTreeMap;
use trueno_frontier::algorithms::kcore;
use trueno_frontier::graph::build;
use trueno_frontier::util::{extract_dataset, extract_filename, load_graph};
use trueno_frontier::{Coo, Csr, EnactorConfig, Graph, GraphProperties, MultiContext};

fn sample_graph() -> anyhow::Result<Graph<f32>> {
    // K4 (0..4), a 5-cycle (4..9) touching it at 4, and a pendant path 9 - 10
    let mut edges = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (3, 4)];
    edges.extend([(4, 5), (5, 6), (6, 7), (7, 8), (8, 4), (8, 9), (9, 10)]);
    let list: Vec<(u32, u32, f32)> = edges.into_iter().map(|(u, v)| (u, v, 1.0)).collect();

    let coo = Coo::from_edge_list(&list)?.symmetrize();
    let csr = Csr::from_coo(&coo)?;
    Ok(build::from_coo_csr(GraphProperties::undirected(), &coo, &csr))
}

fn main() -> anyhow::Result<()> {
    let (name, graph) = match std::env::args().nth(1) {
        Some(path) => (extract_dataset(extract_filename(&path)).to_string(), load_graph(&path)?),
        None => ("sample".to_string(), sample_graph()?),
    };

    println!("Dataset: {name}");
    println!(
        "  {} vertices, {} edges",
        graph.get_number_of_vertices(),
        graph.get_number_of_edges()
    );

    let context = MultiContext::new(0)?;
    let mut k_cores = vec![0; graph.get_number_of_vertices()];
    let stats = kcore::run_with_config(&graph, &mut k_cores, Some(&context), &EnactorConfig::default())?;

    println!(
        "  k-core: {:.3} ms, {} thresholds, degeneracy {}",
        stats.elapsed_ms, stats.iterations, stats.degeneracy
    );

    let reference = kcore::core_numbers_sequential(&graph)?;
    println!(
        "  matches sequential peeling: {}",
        if reference == k_cores { "yes" } else { "NO" }
    );

    let mut histogram = BTreeMap::new();
    for &k in &k_cores {
        *histogram.entry(k).or_insert(0_usize) += 1;
    }
    println!("\nCore number  Vertices");
    for (k, count) in histogram {
        println!("{k:>11}  {count:>8}");
    }

    Ok(())
}
