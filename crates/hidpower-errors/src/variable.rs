//! Per-variable error types.
//!
//! A variable error never aborts a poll cycle. [`VariableError::NoMatch`] and
//! [`VariableError::ConversionMiss`] only make the variable absent until a
//! later cycle succeeds.

use crate::common::ErrorSeverity;

/// Errors scoped to a single mapping rule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VariableError {
    /// No value exists for the path this cycle.
    #[error("No value for path {path}")]
    NoMatch {
        /// HID path
        path: String,
    },

    /// Write attempted against a read-only rule.
    #[error("Variable {name} is not writable")]
    Unwritable {
        /// Variable name
        name: String,
    },

    /// The raw value has no entry in the converter's table.
    #[error("No mapping for raw value {raw} of {name}")]
    ConversionMiss {
        /// Variable name (or path for status rules)
        name: String,
        /// Offending raw value
        raw: f64,
    },

    /// No rule carries this variable name.
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// No command rule carries this name.
    #[error("Unknown instant command: {0}")]
    UnknownCommand(String),

    /// The external value cannot be mapped to a raw value.
    #[error("Invalid value '{value}' for {name}")]
    InvalidValue {
        /// Variable name
        name: String,
        /// Rejected value
        value: String,
    },

    /// The external value exceeds the string bound of the rule.
    #[error("Value for {name} exceeds {max} bytes")]
    ValueTooLong {
        /// Variable name
        name: String,
        /// Declared bound
        max: usize,
    },
}

impl VariableError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VariableError::NoMatch { .. } => ErrorSeverity::Info,
            VariableError::ConversionMiss { .. } => ErrorSeverity::Warning,
            VariableError::Unwritable { .. }
            | VariableError::UnknownVariable(_)
            | VariableError::UnknownCommand(_)
            | VariableError::InvalidValue { .. }
            | VariableError::ValueTooLong { .. } => ErrorSeverity::Error,
        }
    }

    /// Whether the error only means "variable absent for now".
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            VariableError::NoMatch { .. } | VariableError::ConversionMiss { .. }
        )
    }

    /// Create a no-match error.
    pub fn no_match(path: impl Into<String>) -> Self {
        VariableError::NoMatch { path: path.into() }
    }

    /// Create an unwritable error.
    pub fn unwritable(name: impl Into<String>) -> Self {
        VariableError::Unwritable { name: name.into() }
    }

    /// Create a conversion-miss error.
    pub fn conversion_miss(name: impl Into<String>, raw: f64) -> Self {
        VariableError::ConversionMiss {
            name: name.into(),
            raw,
        }
    }

    /// Create an invalid-value error.
    pub fn invalid_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        VariableError::InvalidValue {
            name: name.into(),
            value: value.into(),
        }
    }
}
