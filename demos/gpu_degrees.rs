//! Upload a graph to the GPU and compute vertex degrees there
//!
//! Run with: `cargo run --example gpu_degrees --features gpu [-- device_id]`

use trueno_frontier::graph::build;
use trueno_frontier::{gpu_degrees, Coo, Csr, GpuDevice, GpuGraphBuffers, GraphProperties};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let device_id = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<usize>())
        .transpose()?
        .unwrap_or(0);

    println!("{} GPU adapter(s) found", GpuDevice::count());
    let device = match GpuDevice::with_device_id(device_id).await {
        Ok(device) => device,
        Err(e) => {
            println!("GPU unavailable: {e}");
            return Ok(());
        }
    };
    println!("Using device {device_id}: {}", device.info().name);

    // Star with 8 leaves plus a triangle among three leaves
    let mut edges: Vec<(u32, u32, f32)> = (1..=8).map(|v| (0, v, 1.0)).collect();
    edges.extend([(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)]);
    let coo = Coo::from_edge_list(&edges)?.symmetrize();
    let graph = build::from_csr(GraphProperties::undirected(), &Csr::from_coo(&coo)?);

    let buffers = GpuGraphBuffers::from_graph(&device, &graph)?;
    let degrees = gpu_degrees(&device, &buffers).await?;

    for (v, degree) in degrees.iter().enumerate() {
        println!("vertex {v}: degree {degree}");
    }
    Ok(())
}
