//! Device selection
//!
//! Binds the calling thread's subsequent work to a device id. The host
//! backend exposes a single device (id 0); contexts on the same device are
//! independent streams (separate thread pools).

use super::ContextError;
use std::cell::Cell;

/// Device identifier
pub type DeviceId = usize;

/// Number of devices exposed by the host backend
pub const HOST_DEVICE_COUNT: usize = 1;

thread_local! {
    static CURRENT_DEVICE: Cell<DeviceId> = const { Cell::new(0) };
}

/// Number of selectable devices
#[must_use]
pub const fn count() -> usize {
    HOST_DEVICE_COUNT
}

/// Check that `device` names an existing device
///
/// # Errors
///
/// Returns [`ContextError::InvalidDevice`] if `device >= count()`
pub const fn validate(device: DeviceId) -> Result<(), ContextError> {
    if device < count() {
        Ok(())
    } else {
        Err(ContextError::InvalidDevice {
            device,
            count: count(),
        })
    }
}

/// Bind subsequent work on this thread to `device`
///
/// # Errors
///
/// Returns [`ContextError::InvalidDevice`] for an unknown id; the current
/// binding is left unchanged
pub fn set(device: DeviceId) -> Result<(), ContextError> {
    validate(device)?;
    CURRENT_DEVICE.with(|current| current.set(device));
    Ok(())
}

/// Device bound to this thread (0 unless [`set`] was called)
#[must_use]
pub fn current() -> DeviceId {
    CURRENT_DEVICE.with(Cell::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_valid_device() {
        assert!(set(0).is_ok());
        assert_eq!(current(), 0);
    }

    #[test]
    fn test_set_invalid_device_keeps_binding() {
        let err = set(7).unwrap_err();
        assert_eq!(err, ContextError::InvalidDevice { device: 7, count: 1 });
        assert_eq!(current(), 0);
    }
}
