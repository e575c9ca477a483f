//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use hidpower_errors::prelude::*;
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(VariableError::UnknownVariable(name.to_string()).into())
//! }
//!
//! assert!(lookup("ups.temperature").is_err());
//! ```

pub use crate::{
    Result,
    common::{ErrorCategory, ErrorSeverity, HidPowerError},
    device::DeviceError,
    profile::ProfileError,
    variable::VariableError,
};
