//! GPU device selection and management
//!
//! Enumerates wgpu adapters, selects one by device id (the same ids the
//! host contexts use), and owns the device/queue pair.

use anyhow::{Context, Result};
use thiserror::Error;
use wgpu::util::DeviceExt;

/// GPU device initialization errors
#[derive(Debug, Error)]
pub enum GpuDeviceError {
    /// No compatible GPU adapter found
    #[error("No compatible GPU adapter found")]
    NoAdapter,

    /// Device id outside the enumerated adapters
    #[error("Invalid GPU device id {device} ({count} adapter(s) available)")]
    InvalidDevice {
        /// Requested id
        device: usize,
        /// Number of adapters
        count: usize,
    },

    /// Failed to request GPU device
    #[error("Failed to request GPU device: {0}")]
    DeviceRequest(String),
}

/// GPU device wrapper for graph kernels
///
/// # Example
///
/// ```ignore
/// # use trueno_frontier::gpu::GpuDevice;
/// let device = GpuDevice::with_device_id(0).await?;
/// println!("{}", device.info().name);
/// ```
#[derive(Debug)]
pub struct GpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter: wgpu::Adapter,
}

impl GpuDevice {
    /// Check if a GPU is available without keeping a device
    ///
    /// Useful for tests to skip gracefully on machines without a GPU.
    pub async fn is_gpu_available() -> bool {
        Self::new().await.is_ok()
    }

    /// Number of adapters on all backends
    #[must_use]
    pub fn count() -> usize {
        Self::instance(wgpu::Backends::all())
            .enumerate_adapters(wgpu::Backends::all())
            .len()
    }

    /// Highest-performance adapter on any backend
    ///
    /// # Errors
    ///
    /// Returns `GpuDeviceError` if no adapter is found or the device request
    /// fails
    pub async fn new() -> Result<Self, GpuDeviceError> {
        let instance = Self::instance(wgpu::Backends::all());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuDeviceError::NoAdapter)?;

        Self::open(adapter).await
    }

    /// Adapter `device` in enumeration order
    ///
    /// # Errors
    ///
    /// Returns `GpuDeviceError::InvalidDevice` if `device` is out of range
    pub async fn with_device_id(device: usize) -> Result<Self, GpuDeviceError> {
        Self::with_backend(device, wgpu::Backends::all()).await
    }

    /// Adapter `device` among those on `backends`
    ///
    /// # Errors
    ///
    /// Returns `GpuDeviceError` if no adapter matches or the request fails
    pub async fn with_backend(device: usize, backends: wgpu::Backends) -> Result<Self, GpuDeviceError> {
        let mut adapters = Self::instance(backends).enumerate_adapters(backends);
        if adapters.is_empty() {
            return Err(GpuDeviceError::NoAdapter);
        }
        if device >= adapters.len() {
            return Err(GpuDeviceError::InvalidDevice {
                device,
                count: adapters.len(),
            });
        }

        let adapter = adapters.swap_remove(device);
        tracing::debug!(device, name = %adapter.get_info().name, "Selected GPU adapter");
        Self::open(adapter).await
    }

    fn instance(backends: wgpu::Backends) -> wgpu::Instance {
        wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        })
    }

    async fn open(adapter: wgpu::Adapter) -> Result<Self, GpuDeviceError> {
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("trueno-frontier GPU device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| GpuDeviceError::DeviceRequest(e.to_string()))?;

        Ok(Self {
            device,
            queue,
            adapter,
        })
    }

    /// Adapter info (GPU name, backend, etc.)
    #[must_use]
    pub fn info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Create a buffer with initial data
    #[must_use]
    pub fn create_buffer_init(&self, label: &str, contents: &[u8], usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
    }

    /// Create an empty buffer
    #[must_use]
    pub fn create_buffer(&self, label: &str, size: u64, usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    /// Copy `len` u32 values out of `buffer` (needs `COPY_SRC`)
    ///
    /// # Errors
    ///
    /// Returns error if mapping the staging buffer fails
    pub async fn read_u32s(&self, buffer: &wgpu::Buffer, len: usize) -> Result<Vec<u32>> {
        let size = (len * std::mem::size_of::<u32>()) as u64;
        let staging = self.create_buffer(
            "Staging",
            size,
            wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        encoder.copy_buffer_to_buffer(buffer, 0, &staging, 0, size);
        self.queue.submit(Some(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        self.device.poll(wgpu::Maintain::Wait);
        rx.receive()
            .await
            .context("Failed to receive map result")?
            .context("Buffer mapping failed")?;

        let data = slice.get_mapped_range();
        let values = bytemuck::cast_slice(&data).to_vec();
        drop(data);
        staging.unmap();

        Ok(values)
    }

    /// Device reference
    #[must_use]
    pub const fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Queue reference
    #[must_use]
    pub const fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_first_device() {
        if !GpuDevice::is_gpu_available().await {
            eprintln!("Skipping test_select_first_device: GPU not available");
            return;
        }

        let device = GpuDevice::with_device_id(0).await.unwrap();
        assert!(!device.info().name.is_empty());
    }

    #[tokio::test]
    async fn test_device_id_out_of_range() {
        let count = GpuDevice::count();
        let err = GpuDevice::with_device_id(count).await.unwrap_err();
        if count == 0 {
            assert!(matches!(err, GpuDeviceError::NoAdapter));
        } else {
            assert!(matches!(err, GpuDeviceError::InvalidDevice { device, .. } if device == count));
        }
    }

    #[tokio::test]
    async fn test_empty_backends_fail() {
        let device = GpuDevice::with_backend(0, wgpu::Backends::empty()).await;
        assert!(matches!(device, Err(GpuDeviceError::NoAdapter)));
    }

    #[test]
    fn test_gpu_device_error_display() {
        assert_eq!(GpuDeviceError::NoAdapter.to_string(), "No compatible GPU adapter found");
        let err = GpuDeviceError::InvalidDevice { device: 2, count: 1 };
        assert_eq!(err.to_string(), "Invalid GPU device id 2 (1 adapter(s) available)");
    }

    #[tokio::test]
    async fn test_buffer_roundtrip() {
        if !GpuDevice::is_gpu_available().await {
            eprintln!("Skipping test_buffer_roundtrip: GPU not available");
            return;
        }

        let device = GpuDevice::new().await.unwrap();
        let data: Vec<u32> = vec![1, 2, 3, 4];
        let buffer = device.create_buffer_init(
            "roundtrip",
            bytemuck::cast_slice(&data),
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        );

        assert_eq!(device.read_u32s(&buffer, 4).await.unwrap(), data);
    }
}
