//! Snapshot tests for error message formatting.
//!
//! Operators read these messages in driver logs, so they must stay stable.

use hidpower_errors::{
    common::HidPowerError,
    device::DeviceError,
    profile::ProfileError,
    variable::VariableError,
};
use insta::assert_snapshot;

#[test]
fn test_no_match() {
    assert_snapshot!(
        VariableError::no_match("UPS.PowerSummary.Voltage").to_string(),
        @"No value for path UPS.PowerSummary.Voltage"
    );
}

#[test]
fn test_conversion_miss() {
    assert_snapshot!(
        VariableError::conversion_miss("ups.beeper.status", 9.0).to_string(),
        @"No mapping for raw value 9 of ups.beeper.status"
    );
}

#[test]
fn test_value_too_long() {
    let err = VariableError::ValueTooLong {
        name: "ups.delay.start".into(),
        max: 10,
    };
    assert_snapshot!(err.to_string(), @"Value for ups.delay.start exceeds 10 bytes");
}

#[test]
fn test_device_mismatch() {
    assert_snapshot!(
        DeviceError::mismatch("Phoenixtec/Liebert HID 0.41", 0x0001, 0x0002).to_string(),
        @"Device not supported by profile Phoenixtec/Liebert HID 0.41: vendor=0x0001, product=0x0002"
    );
}

#[test]
fn test_transport_failure_wrapped() {
    let err: HidPowerError =
        DeviceError::transport("UPS.BatterySystem.Battery.Test", "timeout").into();
    assert_snapshot!(
        err.to_string(),
        @"Device error: Transport failure on UPS.BatterySystem.Battery.Test: timeout"
    );
}

#[test]
fn test_invalid_rule() {
    assert_snapshot!(
        ProfileError::invalid_rule("BOOL", "status rule without status converter").to_string(),
        @"Invalid rule BOOL: status rule without status converter"
    );
}
