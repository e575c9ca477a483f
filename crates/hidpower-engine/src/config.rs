//! Engine configuration.
//!
//! Parsed from JSON; every field is optional.
//!
//! ```
//! use hidpower_engine::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "product_id_override": "0x0003" }"#)?;
//! assert_eq!(config.product_id_override, Some(0x0003));
//! # Ok::<(), hidpower_errors::ProfileError>(())
//! ```

use std::time::Duration;

use hidpower_errors::ProfileError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::ClaimOptions;

/// Default re-read interval for semi-static variables.
pub const DEFAULT_SEMI_STATIC_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Accept devices that are only possibly supported. Given as a number
    /// or as a hex string (`"0x0003"`, `"0003"`).
    #[serde(deserialize_with = "deserialize_product_id")]
    pub product_id_override: Option<u16>,
    pub semi_static_interval_secs: u64,
    /// Global cap on string variables, applied on top of each rule's bound.
    pub max_string_length: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            product_id_override: None,
            semi_static_interval_secs: DEFAULT_SEMI_STATIC_INTERVAL_SECS,
            max_string_length: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate.
    ///
    /// # Errors
    ///
    /// [`ProfileError::InvalidConfig`] for malformed JSON or invalid values.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ProfileError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// [`ProfileError::InvalidConfig`] when an interval or bound is zero.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.semi_static_interval_secs == 0 {
            return Err(ProfileError::invalid_config(
                "semi_static_interval_secs must be greater than zero",
            ));
        }
        if self.max_string_length == Some(0) {
            return Err(ProfileError::invalid_config(
                "max_string_length must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn semi_static_interval(&self) -> Duration {
        Duration::from_secs(self.semi_static_interval_secs)
    }

    pub fn claim_options(&self) -> ClaimOptions {
        ClaimOptions {
            product_id_override: self.product_id_override,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductIdRepr {
    Number(u16),
    Text(String),
}

fn deserialize_product_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u16>, D::Error> {
    let Some(repr) = Option::<ProductIdRepr>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match repr {
        ProductIdRepr::Number(id) => Ok(Some(id)),
        ProductIdRepr::Text(text) => parse_product_id(&text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid product id '{text}'"))),
    }
}

/// Parse a hex product id, with or without a `0x` prefix.
pub fn parse_product_id(text: &str) -> Option<u16> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || digits.len() > 4 {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}
