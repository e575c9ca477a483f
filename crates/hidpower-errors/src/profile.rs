//! Profile table and configuration error types.
//!
//! Vendor tables are validated once at profile-load time; every error here
//! is raised before any device is touched.

use crate::common::ErrorSeverity;

/// Profile and configuration errors.
///
/// # Examples
///
/// ```
/// use hidpower_errors::{ErrorSeverity, ProfileError};
///
/// let err = ProfileError::invalid_rule("ups.load", "unsupported format '%d'");
/// assert_eq!(err.severity(), ErrorSeverity::Error);
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileError {
    /// A mapping rule failed validation
    #[error("Invalid rule {rule}: {reason}")]
    InvalidRule {
        /// Rule name (or path for status rules)
        rule: String,
        /// Reason for the failure
        reason: String,
    },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No registered profile claimed the device
    #[error("No profile claims device {vendor_id:04x}:{product_id:04x}")]
    NoProfile {
        /// USB vendor ID
        vendor_id: u16,
        /// USB product ID
        product_id: u16,
    },
}

impl ProfileError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProfileError::InvalidRule { .. } => ErrorSeverity::Error,
            ProfileError::InvalidConfig(_) => ErrorSeverity::Error,
            ProfileError::NoProfile { .. } => ErrorSeverity::Warning,
        }
    }

    /// Create an invalid rule error.
    pub fn invalid_rule(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfileError::InvalidRule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ProfileError::InvalidConfig(reason.into())
    }
}
