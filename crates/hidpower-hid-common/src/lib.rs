//! Common HID utilities for power-device profiles
//!
//! This crate holds what every vendor profile and the translation engine
//! share: the identity of a connected device and the transport seam through
//! which decoded report items are read and written.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod hid_traits;

pub use device_info::*;
pub use hid_traits::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },

    #[error("String descriptor {0} not available")]
    StringNotFound(u8),

    #[error("Device disconnected")]
    Disconnected,
}

impl HidCommonError {
    /// Whether the failure only means the item does not exist on this unit.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            HidCommonError::ItemNotFound(_) | HidCommonError::StringNotFound(_)
        )
    }
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = HidCommonError::ItemNotFound("UPS.PowerSummary.Voltage".to_string());
        assert_eq!(format!("{}", err), "Item not found: UPS.PowerSummary.Voltage");
        assert!(err.is_not_found());

        let err = HidCommonError::Disconnected;
        assert_eq!(format!("{}", err), "Device disconnected");
        assert!(!err.is_not_found());
    }
}
