//! Phoenixtec/Liebert USB HID power-device profile.
//!
//! Tables only: the identity table that decides which devices the profile
//! claims, an (empty) vendor usage layer over the generic power-device
//! usages, and the mapping table from report paths to monitoring variables,
//! status tokens and instant commands. All behaviour lives in
//! `hidpower-engine`.
//!
//! ## Verification status
//!
//! **VID:** `0x06da` is registered to Phoenixtec Power Co., Ltd. No
//! individual product IDs are tracked, so claiming a unit requires the
//! `product_id_override` setting.
//!
//! **Mapping table:** paths follow the generic Power Device usages except
//! four vendor items on `UPS.PowerConverter.Output` (`ffff0057`, `ffff0058`,
//! `ffff00f8`, `ffff00f9`) that carry the input transfer thresholds.
//!
//! **Report descriptor:** used as delivered; no fix-up is applied.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod mapping;
pub mod profile;

pub use ids::{
    DEFAULT_OFFDELAY, DEFAULT_ONDELAY, LIEBERT_HID_VERSION, LIEBERT_VENDOR_ID,
    LIEBERT_VENDOR_LABEL,
};
#[cfg(feature = "unmapped-data-points")]
pub use mapping::UNMAPPED_RULES;
pub use mapping::{DELAY_MAX_LENGTH, LIEBERT_RULES, liebert_rules, paths};
pub use profile::{LIEBERT_IDENTITIES, LIEBERT_USAGES, LiebertProfile, liebert_profile};
