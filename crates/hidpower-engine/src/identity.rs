//! Device identity tables and support classification.

use std::fmt;

use hidpower_hid_common::HidDeviceInfo;
use tracing::{debug, info, warn};

/// Which product ids an identity entry accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductMatch {
    Exact(u16),
    /// Accept any product of the vendor. Devices matched this way are only
    /// ever classified as possibly supported.
    Any,
}

/// One row of a profile's identity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    pub vendor_id: u16,
    pub product: ProductMatch,
    /// Free-form tag shown in logs (model family, usually).
    pub tag: &'static str,
}

impl DeviceIdentity {
    /// End-of-table sentinel. Matches nothing.
    pub const TERMINATOR: Self = Self {
        vendor_id: 0,
        product: ProductMatch::Exact(0),
        tag: "",
    };

    pub const fn exact(vendor_id: u16, product_id: u16, tag: &'static str) -> Self {
        Self {
            vendor_id,
            product: ProductMatch::Exact(product_id),
            tag,
        }
    }

    pub const fn any_product(vendor_id: u16, tag: &'static str) -> Self {
        Self {
            vendor_id,
            product: ProductMatch::Any,
            tag,
        }
    }

    pub fn is_terminator(&self) -> bool {
        self.vendor_id == 0 && self.product == ProductMatch::Exact(0)
    }
}

/// Outcome of matching a device against an identity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimResult {
    Supported,
    PossiblySupported,
    NotSupported,
}

impl fmt::Display for ClaimResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClaimResult::Supported => "supported",
            ClaimResult::PossiblySupported => "possibly supported",
            ClaimResult::NotSupported => "not supported",
        };
        f.write_str(s)
    }
}

/// Ordered identity rows, always ending with [`DeviceIdentity::TERMINATOR`].
///
/// Rows past an explicit terminator in the source slice are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentityTable {
    entries: Vec<DeviceIdentity>,
}

impl DeviceIdentityTable {
    pub fn new(rows: &[DeviceIdentity]) -> Self {
        let mut entries: Vec<DeviceIdentity> = rows
            .iter()
            .take_while(|row| !row.is_terminator())
            .copied()
            .collect();
        entries.push(DeviceIdentity::TERMINATOR);
        Self { entries }
    }

    /// Rows before the terminator.
    pub fn entries(&self) -> &[DeviceIdentity] {
        self.entries
            .split_last()
            .map(|(_, rows)| rows)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Classify a vendor/product pair.
    ///
    /// An exact product row gives [`ClaimResult::Supported`]. Any other row of
    /// the same vendor (a wildcard, or an exact row for a different product)
    /// gives [`ClaimResult::PossiblySupported`].
    pub fn classify(&self, vendor_id: u16, product_id: u16) -> ClaimResult {
        let mut result = ClaimResult::NotSupported;
        for row in self.entries().iter().filter(|row| row.vendor_id == vendor_id) {
            if row.product == ProductMatch::Exact(product_id) {
                return ClaimResult::Supported;
            }
            result = ClaimResult::PossiblySupported;
        }
        result
    }
}

/// Classify `device` against `table`.
pub fn classify(device: &HidDeviceInfo, table: &DeviceIdentityTable) -> ClaimResult {
    table.classify(device.vendor_id, device.product_id)
}

/// Operator settings consulted by [`claim_device`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimOptions {
    /// Set when the operator configured an explicit product id; possibly
    /// supported devices are then accepted.
    pub product_id_override: Option<u16>,
}

impl ClaimOptions {
    pub fn accepts_possibly_supported(&self) -> bool {
        self.product_id_override.is_some()
    }
}

/// Operator-facing notice that a device may work but is untested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub vendor_label: String,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "This {} device ({:04x}:{:04x}) is not (or perhaps not yet) supported. \
             Set product_id_override to try it, and please report the results.",
            self.vendor_label, self.vendor_id, self.product_id
        )
    }
}

/// Receives advisories raised while claiming devices.
pub trait AdvisorySink {
    fn possibly_supported(&mut self, advisory: &Advisory);
}

/// Forwards advisories to the log at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAdvisorySink;

impl AdvisorySink for LogAdvisorySink {
    fn possibly_supported(&mut self, advisory: &Advisory) {
        warn!(
            vendor = %advisory.vendor_label,
            vendor_id = advisory.vendor_id,
            product_id = advisory.product_id,
            "{advisory}"
        );
    }
}

/// Keeps advisories in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingAdvisorySink {
    pub advisories: Vec<Advisory>,
}

impl AdvisorySink for CollectingAdvisorySink {
    fn possibly_supported(&mut self, advisory: &Advisory) {
        self.advisories.push(advisory.clone());
    }
}

/// Decide whether a profile takes ownership of `device`.
///
/// A possibly supported device is claimed only when `options` carries a
/// product id override. Otherwise it is rejected and one advisory goes to
/// `sink`.
pub fn claim_device(
    table: &DeviceIdentityTable,
    device: &HidDeviceInfo,
    vendor_label: &str,
    options: &ClaimOptions,
    sink: &mut dyn AdvisorySink,
) -> bool {
    match classify(device, table) {
        ClaimResult::Supported => {
            info!(device = %device.id_string(), vendor = vendor_label, "device supported");
            true
        }
        ClaimResult::PossiblySupported if options.accepts_possibly_supported() => {
            info!(
                device = %device.id_string(),
                vendor = vendor_label,
                "possibly supported device accepted by override"
            );
            true
        }
        ClaimResult::PossiblySupported => {
            debug!(
                device = %device.id_string(),
                vendor = vendor_label,
                "possibly supported device rejected"
            );
            sink.possibly_supported(&Advisory {
                vendor_label: vendor_label.to_string(),
                vendor_id: device.vendor_id,
                product_id: device.product_id,
            });
            false
        }
        ClaimResult::NotSupported => {
            debug!(device = %device.id_string(), vendor = vendor_label, "device not supported");
            false
        }
    }
}
