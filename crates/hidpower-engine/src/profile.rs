//! Vendor profiles and device attachment.

use std::sync::Arc;

use hidpower_errors::{DeviceError, HidPowerError, ProfileError};
use hidpower_hid_common::HidDeviceInfo;
use serde::Serialize;
use tracing::info;

use crate::access::VariableController;
use crate::config::EngineConfig;
use crate::identity::{AdvisorySink, ClaimOptions, DeviceIdentityTable, claim_device};
use crate::rules::MappingRuleTable;
use crate::usage::UsageTableSet;

/// Everything the engine needs to drive one vendor's devices.
pub trait PowerDeviceProfile: Send + Sync {
    /// Name and version, e.g. `"Acme HID 0.3"`.
    fn name(&self) -> &str;

    /// Vendor name used in advisories and as the manufacturer fallback.
    fn vendor_label(&self) -> &str;

    fn identity_table(&self) -> &DeviceIdentityTable;

    fn usage_tables(&self) -> &UsageTableSet;

    fn mapping_table(&self) -> &Arc<MappingRuleTable>;

    /// Decide whether this profile drives `device`.
    fn claim(
        &self,
        device: &HidDeviceInfo,
        options: &ClaimOptions,
        sink: &mut dyn AdvisorySink,
    ) -> bool {
        claim_device(self.identity_table(), device, self.vendor_label(), options, sink)
    }

    fn model_name(&self, device: &HidDeviceInfo) -> Option<String> {
        device.product_str().map(str::to_string)
    }

    fn manufacturer_name(&self, device: &HidDeviceInfo) -> String {
        device
            .manufacturer_str()
            .unwrap_or(self.vendor_label())
            .to_string()
    }

    fn serial_number(&self, device: &HidDeviceInfo) -> Option<String> {
        device.serial_str().map(str::to_string)
    }

    /// Patch a broken report descriptor before it is parsed. Returns whether
    /// anything was changed.
    fn fix_report_descriptor(&self, _device: &HidDeviceInfo, _descriptor: &mut Vec<u8>) -> bool {
        false
    }
}

/// Identification strings reported for an attached device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentification {
    pub manufacturer: String,
    pub model: Option<String>,
    pub serial: Option<String>,
}

/// A claimed device with its runtime state.
#[derive(Debug)]
pub struct AttachedDevice {
    pub profile: String,
    pub info: HidDeviceInfo,
    pub identification: DeviceIdentification,
    pub descriptor_fixed: bool,
    pub controller: VariableController,
}

/// Claim `device` with `profile` and build its runtime state.
///
/// `descriptor` is the raw report descriptor; the profile may patch it in
/// place before the caller hands it to the parser.
///
/// # Errors
///
/// [`DeviceError::Mismatch`] when the profile declines the device (no state
/// is created), [`ProfileError::InvalidConfig`] for an invalid `config`.
pub fn attach(
    profile: &dyn PowerDeviceProfile,
    device: &HidDeviceInfo,
    descriptor: &mut Vec<u8>,
    config: &EngineConfig,
    sink: &mut dyn AdvisorySink,
) -> Result<AttachedDevice, HidPowerError> {
    config.validate()?;
    if !profile.claim(device, &config.claim_options(), sink) {
        return Err(DeviceError::mismatch(profile.name(), device.vendor_id, device.product_id).into());
    }

    let descriptor_fixed = profile.fix_report_descriptor(device, descriptor);
    let identification = DeviceIdentification {
        manufacturer: profile.manufacturer_name(device),
        model: profile.model_name(device),
        serial: profile.serial_number(device),
    };
    info!(
        profile = profile.name(),
        device = %device.id_string(),
        manufacturer = %identification.manufacturer,
        descriptor_fixed,
        "device attached"
    );

    Ok(AttachedDevice {
        profile: profile.name().to_string(),
        info: device.clone(),
        identification,
        descriptor_fixed,
        controller: VariableController::new(Arc::clone(profile.mapping_table()), config),
    })
}

/// First profile in `profiles` that claims `device`.
///
/// # Errors
///
/// [`ProfileError::NoProfile`] when none does.
pub fn select_profile<'p>(
    profiles: &'p [Arc<dyn PowerDeviceProfile>],
    device: &HidDeviceInfo,
    config: &EngineConfig,
    sink: &mut dyn AdvisorySink,
) -> Result<&'p Arc<dyn PowerDeviceProfile>, ProfileError> {
    let options = config.claim_options();
    profiles
        .iter()
        .find(|profile| profile.claim(device, &options, sink))
        .ok_or(ProfileError::NoProfile {
            vendor_id: device.vendor_id,
            product_id: device.product_id,
        })
}
