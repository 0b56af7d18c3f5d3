//! Vertex degrees on the GPU
//!
//! One invocation per vertex computes `row_offsets[v + 1] - row_offsets[v]`,
//! the initial degree array of k-core.

use super::{GpuDevice, GpuGraphBuffers};
use anyhow::Result;

const WORKGROUP_SIZE: u32 = 256;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DegreeParams {
    number_of_vertices: u32,
    _padding: [u32; 3],
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Out-degree of every vertex
///
/// # Errors
///
/// Returns error if the vertex count exceeds `u32` or readback fails
pub async fn gpu_degrees(device: &GpuDevice, buffers: &GpuGraphBuffers) -> Result<Vec<u32>> {
    const SHADER: &str = include_str!("shaders/degree.wgsl");

    let n = buffers.number_of_vertices();
    if n == 0 {
        return Ok(Vec::new());
    }
    let number_of_vertices = u32::try_from(n)?;

    let shader_module = device
        .device()
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Degree Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

    let bind_group_layout = device
        .device()
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Degree Bind Group Layout"),
            entries: &[
                // @binding(0): uniform params
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                storage_entry(1, true),
                storage_entry(2, false),
            ],
        });

    let pipeline_layout = device
        .device()
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Degree Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

    let pipeline = device
        .device()
        .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Degree Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader_module,
            entry_point: "vertex_degrees",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

    let params_buffer = device.create_buffer_init(
        "Degree Params",
        bytemuck::bytes_of(&DegreeParams {
            number_of_vertices,
            _padding: [0; 3],
        }),
        wgpu::BufferUsages::UNIFORM,
    );
    let degrees_buffer = device.create_buffer(
        "Degrees",
        u64::from(number_of_vertices) * 4,
        wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
    );

    let bind_group = device
        .device()
        .create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Degree Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffers.row_offsets.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: degrees_buffer.as_entire_binding(),
                },
            ],
        });

    let mut encoder = device
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Degree Command Encoder"),
        });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("Degree Compute Pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(number_of_vertices.div_ceil(WORKGROUP_SIZE), 1, 1);
    }
    device.queue().submit(Some(encoder.finish()));
    device.device().poll(wgpu::Maintain::Wait);

    device.read_u32s(&degrees_buffer, n).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build, GraphProperties};
    use crate::storage::{Coo, Csr};

    #[tokio::test]
    async fn test_degrees_match_host() {
        if !GpuDevice::is_gpu_available().await {
            eprintln!("Skipping test_degrees_match_host: GPU not available");
            return;
        }

        let coo = Coo::from_edges(5, &[(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0), (1, 2, 1.0)])
            .unwrap()
            .symmetrize();
        let graph = build::from_csr(GraphProperties::undirected(), &Csr::from_coo(&coo).unwrap());

        let device = GpuDevice::new().await.unwrap();
        let buffers = GpuGraphBuffers::from_graph(&device, &graph).unwrap();
        let degrees = gpu_degrees(&device, &buffers).await.unwrap();

        let host: Vec<u32> = (0..5)
            .map(|v| u32::try_from(graph.get_number_of_neighbors(v)).unwrap())
            .collect();
        assert_eq!(degrees, host);
        assert_eq!(degrees, vec![3, 2, 2, 1, 0]);
    }
}
