//! GPU buffers for the CSR view of a graph
//!
//! Uploads `row_offsets`, `column_indices` and `nonzero_values`. The arrays
//! are already `u32`/`f32`, so they go up without conversion.

use super::GpuDevice;
use crate::error::GraphError;
use crate::graph::{Graph, Representation};
use anyhow::Result;

/// Device-resident CSR arrays
#[derive(Debug)]
pub struct GpuGraphBuffers {
    /// Number of vertices
    pub number_of_vertices: usize,

    /// Number of edges
    pub number_of_edges: usize,

    /// Row offsets (`number_of_vertices + 1` entries)
    pub row_offsets: wgpu::Buffer,

    /// Column indices (`number_of_edges` entries)
    pub column_indices: wgpu::Buffer,

    /// Edge weights; `None` when the graph has no edges
    pub nonzero_values: Option<wgpu::Buffer>,
}

impl GpuGraphBuffers {
    /// Upload the CSR view of `graph`
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingRepresentation`] if the graph has no CSR
    /// view
    pub fn from_graph(device: &GpuDevice, graph: &Graph<f32>) -> Result<Self> {
        let csr = graph
            .csr()
            .ok_or(GraphError::MissingRepresentation(Representation::Csr))?;
        let (offsets, indices, values) = csr.components();
        let usage = wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST;

        let row_offsets = device.create_buffer_init("CSR row_offsets", bytemuck::cast_slice(offsets), usage);
        let column_indices =
            device.create_buffer_init("CSR column_indices", bytemuck::cast_slice(indices), usage);
        let nonzero_values = (!values.is_empty())
            .then(|| device.create_buffer_init("CSR nonzero_values", bytemuck::cast_slice(values), usage));

        Ok(Self {
            number_of_vertices: csr.get_number_of_vertices(),
            number_of_edges: csr.get_number_of_edges(),
            row_offsets,
            column_indices,
            nonzero_values,
        })
    }

    /// Number of vertices
    #[must_use]
    pub const fn number_of_vertices(&self) -> usize {
        self.number_of_vertices
    }

    /// Number of edges
    #[must_use]
    pub const fn number_of_edges(&self) -> usize {
        self.number_of_edges
    }
}
