//! Comprehensive tests for the hidpower-hid-common crate.
//!
//! Covers device info, the mock transport and error handling.

use hidpower_hid_common::{HidCommonError, HidDeviceInfo, ReportTransport, mock::MockTransport};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// HidDeviceInfo
// ---------------------------------------------------------------------------

#[test]
fn device_info_builder_sets_all_strings() {
    let info = HidDeviceInfo::new(0x06da, 0x0002)
        .with_manufacturer("Phoenixtec Power Co., Ltd")
        .with_product("PSI 1440")
        .with_serial("0123456789");

    assert_eq!(info.manufacturer_str(), Some("Phoenixtec Power Co., Ltd"));
    assert_eq!(info.product_str(), Some("PSI 1440"));
    assert_eq!(info.serial_str(), Some("0123456789"));
}

#[test]
fn device_info_blank_strings_count_as_missing() {
    let info = HidDeviceInfo::new(0x06da, 0x0002)
        .with_manufacturer("")
        .with_serial(" ");
    assert_eq!(info.manufacturer_str(), None);
    assert_eq!(info.serial_str(), None);
}

#[test]
fn device_info_serde_roundtrip_json() -> Result<(), serde_json::Error> {
    let info = HidDeviceInfo::new(0x06da, 0xffff).with_product("GXT4");
    let json = serde_json::to_string(&info)?;
    let back: HidDeviceInfo = serde_json::from_str(&json)?;
    assert_eq!(back, info);
    Ok(())
}

#[test]
fn device_info_json_snapshot() {
    let info = HidDeviceInfo::new(0x06da, 0xffff).with_product("GXT4");
    insta::assert_json_snapshot!(info, @r#"
    {
      "vendor_id": 1754,
      "product_id": 65535,
      "manufacturer": null,
      "product": "GXT4",
      "serial_number": null
    }
    "#);
}

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

#[test]
fn mock_strings_resolve_by_index() -> Result<(), HidCommonError> {
    let mut transport = MockTransport::new(0x06da, 0xffff).with_string(3, "PbAc");
    assert_eq!(transport.read_string(3)?, "PbAc");
    assert!(matches!(
        transport.read_string(4),
        Err(HidCommonError::StringNotFound(4))
    ));
    Ok(())
}

#[test]
fn mock_injected_failure_is_not_not_found() {
    let mut transport = MockTransport::new(0x06da, 0xffff).with_item("UPS.PowerSummary.Voltage", 27.1);
    transport.fail_item("UPS.PowerSummary.Voltage");

    let err = transport.read_item("UPS.PowerSummary.Voltage");
    assert!(matches!(err, Err(HidCommonError::ReadError { .. })));

    transport.restore_item("UPS.PowerSummary.Voltage");
    assert!(transport.read_item("UPS.PowerSummary.Voltage").is_ok());
}

#[test]
fn mock_failed_write_is_not_recorded() {
    let mut transport = MockTransport::new(0x06da, 0xffff);
    transport.fail_item("UPS.PowerSummary.AudibleAlarmControl");
    assert!(
        transport
            .write_item("UPS.PowerSummary.AudibleAlarmControl", 1.0)
            .is_err()
    );
    assert!(transport.write_history().is_empty());
}

#[test]
fn mock_reconnect_restores_access() {
    let mut transport = MockTransport::new(0x06da, 0xffff).with_item("UPS.PowerSummary.PercentLoad", 40.0);
    transport.disconnect();
    assert!(transport.read_item("UPS.PowerSummary.PercentLoad").is_err());
    transport.reconnect();
    assert!(transport.read_item("UPS.PowerSummary.PercentLoad").is_ok());
}

#[test]
fn mock_device_info_is_exposed() {
    let transport = MockTransport::from_info(HidDeviceInfo::new(0x06da, 0x1234).with_product("X"));
    assert_eq!(transport.device_info().id_string(), "06da:1234");
}

proptest! {
    #[test]
    fn prop_id_string_is_nine_hex_chars(vid: u16, pid: u16) {
        let id = HidDeviceInfo::new(vid, pid).id_string();
        prop_assert_eq!(id.len(), 9);
        prop_assert_eq!(id, format!("{vid:04x}:{pid:04x}"));
    }

    #[test]
    fn prop_written_value_reads_back(value in -1.0e6f64..1.0e6) {
        let mut transport = MockTransport::new(0x06da, 0xffff);
        prop_assert!(transport.write_item("UPS.Flow.[4].ConfigVoltage", value).is_ok());
        let read = transport.read_item("UPS.Flow.[4].ConfigVoltage");
        prop_assert!(matches!(read, Ok(v) if v.to_bits() == value.to_bits()));
    }
}
