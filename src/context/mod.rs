//! Execution contexts
//!
//! A [`Context`] stands in for one accelerator stream: a device id plus a
//! dedicated rayon thread pool. Operators dispatch their per-element work onto
//! the pool with [`Context::install`]; returning from `install` is the barrier
//! between successive operators.
//!
//! The engine never creates global thread pools; callers pass a
//! [`MultiContext`] to every run.

pub mod device;

use anyhow::{Context as _, Result};
use device::DeviceId;
use std::time::Instant;
use thiserror::Error;

/// Context construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// Device id outside `[0, device::count())`
    #[error("Invalid device id {device} ({count} device(s) available)")]
    InvalidDevice {
        /// Requested id
        device: DeviceId,
        /// Number of devices
        count: usize,
    },

    /// A multi-context needs at least one device
    #[error("No devices requested")]
    NoDevices,
}

/// Context configuration
#[derive(Debug, Clone, Default)]
pub struct ContextConfig {
    /// Worker threads per context (0 = rayon default, one per core)
    pub num_threads: usize,
}

impl ContextConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set worker threads per context
    #[must_use]
    pub const fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }
}

/// One execution context (device + stream)
#[derive(Debug)]
pub struct Context {
    device: DeviceId,
    pool: rayon::ThreadPool,
}

impl Context {
    /// Create a context on `device`
    ///
    /// # Errors
    ///
    /// Returns error if the device id is invalid or the thread pool cannot be
    /// built
    pub fn new(device: DeviceId, config: &ContextConfig) -> Result<Self> {
        device::validate(device)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .thread_name(move |i| format!("trueno-frontier-d{device}-{i}"))
            .build()
            .context("Failed to build context thread pool")?;

        Ok(Self { device, pool })
    }

    /// Device this context runs on
    #[must_use]
    pub const fn device(&self) -> DeviceId {
        self.device
    }

    /// Worker threads in this context
    #[must_use]
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` on this context's workers and wait for it to finish
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Start a timer on this context
    #[must_use]
    pub fn timer(&self) -> Timer {
        Timer::begin()
    }
}

/// Set of execution contexts used by one run
#[derive(Debug)]
pub struct MultiContext {
    contexts: Vec<Context>,
}

impl MultiContext {
    /// Single default context on `device`
    ///
    /// # Errors
    ///
    /// Returns error if the device id is invalid or the pool cannot be built
    pub fn new(device: DeviceId) -> Result<Self> {
        Self::with_config(&[device], &ContextConfig::default())
    }

    /// One context per entry in `devices` (ids may repeat: several streams on
    /// one device)
    ///
    /// # Errors
    ///
    /// Returns error if `devices` is empty or any context fails to build
    pub fn with_config(devices: &[DeviceId], config: &ContextConfig) -> Result<Self> {
        if devices.is_empty() {
            return Err(ContextError::NoDevices.into());
        }

        let contexts = devices
            .iter()
            .map(|&device| Context::new(device, config))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { contexts })
    }

    /// Context `i`, if present
    #[must_use]
    pub fn get_context(&self, i: usize) -> Option<&Context> {
        self.contexts.get(i)
    }

    /// First context (operators dispatch here)
    #[must_use]
    pub fn primary(&self) -> &Context {
        &self.contexts[0]
    }

    /// Number of contexts
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Always false; construction rejects an empty device list
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

/// Wall-clock timer for a run
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start timing
    #[must_use]
    pub fn begin() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds since [`Timer::begin`]
    #[must_use]
    pub fn end(&self) -> f32 {
        self.start.elapsed().as_secs_f32() * 1000.0
    }
}
