//! Centralized error types for the HID power-device engine
//!
//! The engine never treats a single failure as fatal: the worst outcome of any
//! error in this crate is a variable reported absent or a command reported
//! failed. The taxonomy mirrors that contract.
//!
//! # Architecture
//!
//! - [`common`]: the top-level [`HidPowerError`], categories and severities
//! - [`device`]: claim and transport failures
//! - [`variable`]: per-variable read/write failures (absent, unwritable, ...)
//! - [`profile`]: vendor table validation and configuration errors
//!
//! # Example
//!
//! ```
//! use hidpower_errors::prelude::*;
//!
//! fn write_delay(writable: bool) -> Result<()> {
//!     if !writable {
//!         return Err(VariableError::unwritable("ups.delay.start").into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(write_delay(false).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod device;
pub mod prelude;
pub mod profile;
pub mod variable;

pub use common::{ErrorCategory, ErrorSeverity, HidPowerError};
pub use device::DeviceError;
pub use profile::ProfileError;
pub use variable::VariableError;

/// A specialized `Result` type for engine operations.
pub type Result<T> = std::result::Result<T, HidPowerError>;
