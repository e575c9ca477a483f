//! Common error types and utilities used across all engine crates.
//!
//! This module provides the top-level error enum that wraps all sub-errors,
//! along with error classification and severity levels.

use core::fmt;

use crate::{DeviceError, ProfileError, VariableError};

/// Top-level error type that can wrap all engine sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum HidPowerError {
    /// Device claim and transport errors
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Per-variable read/write errors
    #[error("Variable error: {0}")]
    Variable(#[from] VariableError),

    /// Profile table and configuration errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

impl HidPowerError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            HidPowerError::Device(_) => ErrorCategory::Device,
            HidPowerError::Variable(_) => ErrorCategory::Variable,
            HidPowerError::Profile(_) => ErrorCategory::Profile,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HidPowerError::Device(e) => e.severity(),
            HidPowerError::Variable(e) => e.severity(),
            HidPowerError::Profile(e) => e.severity(),
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Everything below [`ErrorSeverity::Critical`] leaves the engine usable;
    /// the next poll cycle simply tries again.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Device claim and transport errors
    Device = 0,
    /// Per-variable errors
    Variable = 1,
    /// Profile and configuration errors
    Profile = 2,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Device => write!(f, "Device"),
            ErrorCategory::Variable => write!(f, "Variable"),
            ErrorCategory::Profile => write!(f, "Profile"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the device can no longer be served
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
