//! Device claim and transport error types.

use crate::common::ErrorSeverity;

/// Device-level errors: claiming and talking to the physical unit.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeviceError {
    /// The profile declined the device; no state was created for it.
    #[error("Device not supported by profile {profile}: vendor={vendor_id:#06x}, product={product_id:#06x}")]
    Mismatch {
        /// Profile name that declined the device
        profile: String,
        /// USB vendor ID
        vendor_id: u16,
        /// USB product ID
        product_id: u16,
    },

    /// The external transport failed to read or write an item.
    #[error("Transport failure on {path}: {message}")]
    TransportFailure {
        /// HID path of the item
        path: String,
        /// Transport-provided message
        message: String,
    },

    /// Device disconnected
    #[error("Device disconnected")]
    Disconnected,
}

impl DeviceError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DeviceError::Mismatch { .. } => ErrorSeverity::Info,
            DeviceError::TransportFailure { .. } => ErrorSeverity::Error,
            DeviceError::Disconnected => ErrorSeverity::Critical,
        }
    }

    /// Create a mismatch error.
    pub fn mismatch(profile: impl Into<String>, vendor_id: u16, product_id: u16) -> Self {
        DeviceError::Mismatch {
            profile: profile.into(),
            vendor_id,
            product_id,
        }
    }

    /// Create a transport failure error.
    pub fn transport(path: impl Into<String>, message: impl Into<String>) -> Self {
        DeviceError::TransportFailure {
            path: path.into(),
            message: message.into(),
        }
    }
}
