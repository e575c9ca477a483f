//! The Phoenixtec/Liebert [`PowerDeviceProfile`].

use std::sync::{Arc, OnceLock};

use hidpower_engine::{
    DeviceIdentity, DeviceIdentityTable, MappingRuleTable, PowerDeviceProfile, UsageEntry,
    UsageTable, UsageTableSet,
};
use hidpower_errors::ProfileError;
use tracing::debug;

use crate::ids::{LIEBERT_HID_VERSION, LIEBERT_VENDOR_ID, LIEBERT_VENDOR_LABEL};
use crate::mapping::liebert_rules;

/// Every product under the Phoenixtec vendor ID. No product is known
/// individually, so each one needs operator consent to be claimed.
pub const LIEBERT_IDENTITIES: &[DeviceIdentity] = &[
    DeviceIdentity::any_product(LIEBERT_VENDOR_ID, "various models"),
    DeviceIdentity::TERMINATOR,
];

/// Vendor-specific usages. The firmware's vendor items (`ffff0057` and
/// friends) have no published names and resolve to their hex form.
pub const LIEBERT_USAGES: &[UsageEntry] = &[];

/// Profile for Phoenixtec-built Liebert units.
///
/// Model and serial come straight from the USB string descriptors. The
/// manufacturer falls back to `"Liebert"` when the device reports none. The
/// report descriptor needs no fix-up.
#[derive(Debug)]
pub struct LiebertProfile {
    identities: DeviceIdentityTable,
    usages: UsageTableSet,
    table: Arc<MappingRuleTable>,
}

impl LiebertProfile {
    /// Build the profile, validating its mapping table.
    ///
    /// # Errors
    ///
    /// [`ProfileError::InvalidRule`] if a mapping row is malformed.
    pub fn new() -> Result<Self, ProfileError> {
        let table = MappingRuleTable::new(&liebert_rules())?;
        debug!(
            profile = LIEBERT_HID_VERSION,
            rules = table.len(),
            "mapping table loaded"
        );
        Ok(Self {
            identities: DeviceIdentityTable::new(LIEBERT_IDENTITIES),
            usages: UsageTableSet::vendor(UsageTable::from_entries("liebert", LIEBERT_USAGES)),
            table: Arc::new(table),
        })
    }
}

/// Shared profile instance, built on first use.
///
/// # Errors
///
/// The validation error of [`LiebertProfile::new`], on every call.
pub fn liebert_profile() -> Result<Arc<LiebertProfile>, ProfileError> {
    static PROFILE: OnceLock<Result<Arc<LiebertProfile>, ProfileError>> = OnceLock::new();
    PROFILE
        .get_or_init(|| LiebertProfile::new().map(Arc::new))
        .clone()
}

impl PowerDeviceProfile for LiebertProfile {
    fn name(&self) -> &str {
        LIEBERT_HID_VERSION
    }

    fn vendor_label(&self) -> &str {
        LIEBERT_VENDOR_LABEL
    }

    fn identity_table(&self) -> &DeviceIdentityTable {
        &self.identities
    }

    fn usage_tables(&self) -> &UsageTableSet {
        &self.usages
    }

    fn mapping_table(&self) -> &Arc<MappingRuleTable> {
        &self.table
    }
}
