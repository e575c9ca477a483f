//! Shared fixture: a transport holding every item the Liebert table reads.

use hidpower_hid_common::HidDeviceInfo;
use hidpower_hid_common::mock::MockTransport;
use hidpower_hid_liebert_protocol::LIEBERT_VENDOR_ID;
use hidpower_hid_liebert_protocol::paths::*;

pub const PRODUCT_ID: u16 = 0x0002;

/// A GXT3 on mains, fully charged, no self-test run yet.
pub fn gxt3_transport() -> MockTransport {
    MockTransport::from_info(
        HidDeviceInfo::new(LIEBERT_VENDOR_ID, PRODUCT_ID)
            .with_manufacturer("Phoenixtec Power")
            .with_product("GXT3-1000RT120")
            .with_serial("1234567890"),
    )
    .with_item(BATTERY_VOLTAGE, 27.3)
    .with_item(BATTERY_CHARGE, 100.0)
    .with_item("UPS.PowerSummary.FullChargeCapacity", 100.0)
    .with_item("UPS.PowerSummary.DesignCapacity", 100.0)
    .with_item(BATTERY_RUNTIME, 1260.0)
    .with_item(BATTERY_CHEMISTRY, 4.0)
    .with_item(LOAD, 18.0)
    .with_item(POWER_NOMINAL, 1000.0)
    .with_item(BATTERY_TEST, 6.0)
    .with_item(AUDIBLE_ALARM, 2.0)
    .with_item(OUTPUT_VOLTAGE, 120.0)
    .with_item("UPS.Flow.[4].ConfigVoltage", 120.0)
    .with_item(OUTPUT_FREQUENCY, 60.0)
    .with_item("UPS.Flow.[4].ConfigFrequency", 60.0)
    .with_item("UPS.PowerConverter.Output.HighVoltageTransfer", 138.0)
    .with_item("UPS.PowerConverter.Output.LowVoltageTransfer", 96.0)
    .with_item(INPUT_VOLTAGE, 121.5)
    .with_item(INPUT_FREQUENCY, 59.98)
    .with_item(INPUT_TRANSFER_LOW, 88.0)
    .with_item(INPUT_TRANSFER_HIGH, 140.0)
    .with_item("UPS.PowerConverter.Output.ffff00f9", 40.0)
    .with_item("UPS.PowerConverter.Output.ffff00f8", 70.0)
    .with_item(AC_PRESENT, 1.0)
    .with_item(BELOW_LIMIT, 0.0)
    .with_item(CHARGING, 1.0)
    .with_item(DISCHARGING, 0.0)
    .with_item(OVERLOAD, 0.0)
    .with_item(GOOD, 1.0)
    .with_item(INTERNAL_FAILURE, 0.0)
    .with_item(SHUTDOWN_IMMINENT, 0.0)
    .with_item(BUCK, 0.0)
    .with_item(BOOST, 0.0)
    .with_item(DELAY_START, 30.0)
    .with_item(DELAY_SHUTDOWN, 20.0)
    .with_item("UPS.PowerSummary.FlowID", 1.0)
    .with_item("UPS.PowerSummary.PowerSummaryID", 1.0)
    .with_item("UPS.PowerSummary.CapacityGranularity1", 1.0)
    .with_item("UPS.PowerSummary.CapacityMode", 2.0)
    .with_item("UPS.PowerSummary.Rechargeable", 1.0)
    .with_item("UPS.PowerSummary.iProduct", 2.0)
    .with_item("UPS.PowerSummary.iManufacturer", 1.0)
    .with_item("UPS.PowerSummary.iSerialNumber", 3.0)
    .with_string(1, "Phoenixtec Power")
    .with_string(2, "GXT3-1000RT120")
    .with_string(3, "1234567890")
    .with_string(4, "PbAcid")
}
