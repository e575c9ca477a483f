//! Shared fixtures: a small UPS table and a transport populated for it.

use std::sync::{Arc, OnceLock};

use hidpower_engine::{
    AccessFlags, Converter, DeviceIdentity, DeviceIdentityTable, MappingRule, MappingRuleTable,
    PowerDeviceProfile, StatusToken, UsageEntry, UsageTable, UsageTableSet,
};
use hidpower_errors::ProfileError;
use hidpower_hid_common::HidDeviceInfo;
use hidpower_hid_common::mock::MockTransport;

pub const VENDOR_ID: u16 = 0x06da;
pub const PRODUCT_ID: u16 = 0x0002;

pub const CHARGE: &str = "UPS.PowerSummary.RemainingCapacity";
pub const CHARGE_LOW: &str = "UPS.PowerSummary.RemainingCapacityLimit";
pub const VOLTAGE: &str = "UPS.PowerSummary.Voltage";
pub const CHEMISTRY: &str = "UPS.PowerSummary.iDeviceChemistry";
pub const SHUTDOWN_DELAY: &str = "UPS.PowerSummary.DelayBeforeShutdown";
pub const BEEPER: &str = "UPS.PowerSummary.AudibleAlarmControl";
pub const LOAD: &str = "UPS.PowerConverter.Output.PercentLoad";
pub const TRANSFER_LOW: &str = "UPS.PowerConverter.Output.ffff0057";
pub const AC_PRESENT: &str = "UPS.PowerSummary.PresentStatus.ACPresent";
pub const CHARGING: &str = "UPS.PowerSummary.PresentStatus.Charging";
pub const DISCHARGING: &str = "UPS.PowerSummary.PresentStatus.Discharging";
pub const BELOW_LIMIT: &str = "UPS.PowerSummary.PresentStatus.BelowRemainingCapacityLimit";
pub const TEST: &str = "UPS.BatterySystem.Battery.Test";

pub const DEMO_RULES: &[MappingRule] = &[
    MappingRule::variable("battery.charge", CHARGE, "%.0f").with_flags(AccessFlags::QUICK_POLL),
    MappingRule::variable("battery.charge.low", CHARGE_LOW, "%.0f")
        .with_flags(AccessFlags::READ_WRITE.union(AccessFlags::SEMI_STATIC)),
    MappingRule::variable("battery.voltage", VOLTAGE, "%.1f"),
    MappingRule::variable("battery.type", CHEMISTRY, "%s")
        .bounded_string(8)
        .with_flags(AccessFlags::SEMI_STATIC)
        .with_converter(Converter::StringIndex),
    MappingRule::variable("ups.delay.shutdown", SHUTDOWN_DELAY, "20")
        .writable_string(10)
        .with_flags(AccessFlags::ABSENT_BY_DEFAULT),
    MappingRule::variable("ups.beeper.status", BEEPER, "%s")
        .with_flags(AccessFlags::READ_WRITE.union(AccessFlags::QUICK_POLL))
        .with_converter(Converter::Beeper),
    MappingRule::variable("ups.load", LOAD, "%.0f").with_flags(AccessFlags::QUICK_POLL),
    MappingRule::variable("input.transfer.low", TRANSFER_LOW, "%.0f")
        .with_flags(AccessFlags::SEMI_STATIC),
    MappingRule::status(AC_PRESENT, Converter::Status(StatusToken::Online)),
    MappingRule::status(CHARGING, Converter::Status(StatusToken::Charging)),
    MappingRule::status(DISCHARGING, Converter::Status(StatusToken::Discharging)),
    MappingRule::status(BELOW_LIMIT, Converter::Status(StatusToken::LowBattery)),
    MappingRule::command("beeper.enable", BEEPER, "enabled").with_converter(Converter::Beeper),
    MappingRule::command("beeper.disable", BEEPER, "1"),
    MappingRule::command("shutdown.stop", SHUTDOWN_DELAY, "-1"),
    MappingRule::command("test.battery.start.quick", TEST, "1"),
    MappingRule::END,
];

pub fn demo_table() -> Result<Arc<MappingRuleTable>, ProfileError> {
    MappingRuleTable::new(DEMO_RULES).map(Arc::new)
}

/// Transport holding a healthy, charging unit on mains.
pub fn demo_transport() -> MockTransport {
    MockTransport::from_info(
        HidDeviceInfo::new(VENDOR_ID, PRODUCT_ID)
            .with_manufacturer("Phoenixtec Power")
            .with_product("GXT3-1000"),
    )
    .with_item(CHARGE, 87.0)
    .with_item(CHARGE_LOW, 10.0)
    .with_item(VOLTAGE, 27.3)
    .with_item(CHEMISTRY, 4.0)
    .with_item(SHUTDOWN_DELAY, 20.0)
    .with_item(BEEPER, 2.0)
    .with_item(LOAD, 23.0)
    .with_item(TRANSFER_LOW, 88.0)
    .with_item(AC_PRESENT, 1.0)
    .with_item(CHARGING, 1.0)
    .with_item(DISCHARGING, 0.0)
    .with_item(BELOW_LIMIT, 0.0)
    .with_item(TEST, 6.0)
    .with_string(4, "PbAcidBattery")
}

const DEMO_IDENTITIES: &[DeviceIdentity] = &[
    DeviceIdentity::exact(VENDOR_ID, PRODUCT_ID, "GXT3"),
    DeviceIdentity::exact(VENDOR_ID, 0x0003, "PSI"),
    DeviceIdentity::TERMINATOR,
];

const DEMO_USAGES: &[UsageEntry] = &[UsageEntry::new("LowVoltageTransferMin", 0xffff_0057)];

/// Profile over the demo tables. Its descriptor fix-up flips the first byte.
pub struct DemoProfile {
    identities: DeviceIdentityTable,
    usages: UsageTableSet,
    table: Arc<MappingRuleTable>,
}

pub fn demo_profile() -> Result<Arc<DemoProfile>, ProfileError> {
    static PROFILE: OnceLock<Result<Arc<DemoProfile>, ProfileError>> = OnceLock::new();
    PROFILE
        .get_or_init(|| {
            Ok(Arc::new(DemoProfile {
                identities: DeviceIdentityTable::new(DEMO_IDENTITIES),
                usages: UsageTableSet::vendor(UsageTable::from_entries("demo", DEMO_USAGES)),
                table: demo_table()?,
            }))
        })
        .clone()
}

impl PowerDeviceProfile for DemoProfile {
    fn name(&self) -> &str {
        "Demo HID 0.1"
    }

    fn vendor_label(&self) -> &str {
        "Demo"
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

    fn fix_report_descriptor(&self, _device: &HidDeviceInfo, descriptor: &mut Vec<u8>) -> bool {
        match descriptor.first_mut() {
            Some(byte) => {
                *byte ^= 0xff;
                true
            }
            None => false,
        }
    }
}
