//! Phoenixtec/Liebert USB identifiers and profile constants.
//!
//! ## Vendor ID
//!
//! Units sold under the Liebert brand with this subdriver enumerate with the
//! Phoenixtec Power Co., Ltd vendor ID `0x06da`. Other Liebert units use the
//! Belkin firmware and vendor ID and are not covered here.
//!
//! No product IDs are known individually. Every product under `0x06da`,
//! `ffff` included, is only possibly supported and is claimed once the
//! operator sets `product_id_override`.
//!
//! | Field | Value | Source |
//! |-------|-------|--------|
//! | VID | `0x06da` | usb.org registry ("Phoenixtec Power Co., Ltd") |
//! | Products | any | field reports across GXT and PSI models |

/// Phoenixtec Power Co., Ltd USB vendor ID.
pub const LIEBERT_VENDOR_ID: u16 = 0x06da;

/// Profile name and version.
pub const LIEBERT_HID_VERSION: &str = "Phoenixtec/Liebert HID 0.41";

/// Vendor label used in advisories and as the manufacturer fallback.
pub const LIEBERT_VENDOR_LABEL: &str = "Liebert";

/// Default startup delay in seconds (`ups.delay.start`, `load.on.delay`).
pub const DEFAULT_ONDELAY: &str = "30";

/// Default shutdown delay in seconds (`ups.delay.shutdown`, `load.off.delay`).
pub const DEFAULT_OFFDELAY: &str = "20";
