//! GPU backend (wgpu)
//!
//! Based on Gunrock (Wang et al., ACM `ToPC` 2017) device-resident CSR.
//!
//! # Architecture
//!
//! - `device`: adapter enumeration and selection by device id
//! - `buffer`: upload of a graph's CSR view
//! - `degree`: WGSL kernel computing per-vertex degrees
//!
//! # Feature Flag
//!
//! This module is only available with the `gpu` feature flag:
//! ```bash
//! cargo build --features gpu
//! ```

mod buffer;
mod degree;
mod device;

pub use buffer::GpuGraphBuffers;
pub use degree::gpu_degrees;
pub use device::{GpuDevice, GpuDeviceError};
