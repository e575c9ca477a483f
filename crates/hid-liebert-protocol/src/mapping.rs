//! HID-to-variable mapping table for Phoenixtec/Liebert units.
//!
//! Rows are matched by path in table order. Several paths carry more than
//! one row: `DelayBeforeShutdown` backs a writable variable and two
//! commands, `Battery.Test` a result variable and a command.

use hidpower_engine::{AccessFlags, Converter, MappingRule, StatusToken};

use crate::ids::{DEFAULT_OFFDELAY, DEFAULT_ONDELAY};

/// Paths referenced by more than one row, or by the tests.
pub mod paths {
    pub const BATTERY_VOLTAGE: &str = "UPS.PowerSummary.Voltage";
    pub const BATTERY_CHARGE: &str = "UPS.PowerSummary.RemainingCapacity";
    pub const BATTERY_RUNTIME: &str = "UPS.PowerSummary.RunTimeToEmpty";
    pub const BATTERY_CHEMISTRY: &str = "UPS.PowerSummary.iDeviceChemistry";
    pub const LOAD: &str = "UPS.PowerSummary.PercentLoad";
    pub const POWER_NOMINAL: &str = "UPS.Flow.[4].ConfigApparentPower";
    pub const BATTERY_TEST: &str = "UPS.BatterySystem.Battery.Test";
    pub const AUDIBLE_ALARM: &str = "UPS.PowerSummary.AudibleAlarmControl";
    pub const OUTPUT_VOLTAGE: &str = "UPS.PowerConverter.Output.Voltage";
    pub const OUTPUT_FREQUENCY: &str = "UPS.PowerConverter.Output.Frequency";
    pub const INPUT_VOLTAGE: &str = "UPS.PowerConverter.Input.[1].Voltage";
    pub const INPUT_FREQUENCY: &str = "UPS.PowerConverter.Input.[1].Frequency";
    pub const INPUT_TRANSFER_LOW: &str = "UPS.PowerConverter.Output.ffff0057";
    pub const INPUT_TRANSFER_HIGH: &str = "UPS.PowerConverter.Output.ffff0058";
    pub const AC_PRESENT: &str = "UPS.PowerSummary.PresentStatus.ACPresent";
    pub const BELOW_LIMIT: &str = "UPS.PowerSummary.PresentStatus.BelowRemainingCapacityLimit";
    pub const CHARGING: &str = "UPS.PowerSummary.PresentStatus.Charging";
    pub const DISCHARGING: &str = "UPS.PowerSummary.PresentStatus.Discharging";
    pub const OVERLOAD: &str = "UPS.PowerSummary.PresentStatus.Overload";
    pub const GOOD: &str = "UPS.PowerSummary.PresentStatus.Good";
    pub const INTERNAL_FAILURE: &str = "UPS.PowerSummary.PresentStatus.InternalFailure";
    pub const SHUTDOWN_IMMINENT: &str = "UPS.PowerSummary.PresentStatus.ShutdownImminent";
    pub const BUCK: &str = "UPS.PowerConverter.Input.[1].PresentStatus.Buck";
    pub const BOOST: &str = "UPS.PowerConverter.Input.[1].PresentStatus.Boost";
    pub const DELAY_START: &str = "UPS.PowerSummary.DelayBeforeStartup";
    pub const DELAY_SHUTDOWN: &str = "UPS.PowerSummary.DelayBeforeShutdown";
}

use paths::*;

const SEMI_STATIC: AccessFlags = AccessFlags::SEMI_STATIC;

/// Bound on the delay variables, in bytes.
pub const DELAY_MAX_LENGTH: usize = 10;

/// The mapping table, terminated by [`MappingRule::END`].
pub const LIEBERT_RULES: &[MappingRule] = &[
    // Battery
    MappingRule::variable("battery.voltage", BATTERY_VOLTAGE, "%.2f"),
    MappingRule::variable("battery.charge", BATTERY_CHARGE, "%.0f"),
    MappingRule::variable(
        "experimental.battery.capacity",
        "UPS.PowerSummary.FullChargeCapacity",
        "%.0f",
    ),
    MappingRule::variable(
        "experimental.battery.capacity.nominal",
        "UPS.PowerSummary.DesignCapacity",
        "%.0f",
    ),
    MappingRule::variable("battery.runtime", BATTERY_RUNTIME, "%.0f"),
    MappingRule::variable("battery.type", BATTERY_CHEMISTRY, "%s")
        .with_converter(Converter::StringIndex),
    // UPS
    MappingRule::variable("ups.load", LOAD, "%.0f"),
    MappingRule::variable("ups.power.nominal", POWER_NOMINAL, "%.0f").with_flags(SEMI_STATIC),
    MappingRule::variable("ups.test.result", BATTERY_TEST, "%s")
        .with_converter(Converter::TestResult),
    MappingRule::variable("ups.beeper.status", AUDIBLE_ALARM, "%s")
        .with_flags(SEMI_STATIC)
        .with_converter(Converter::Beeper),
    // Output
    MappingRule::variable("output.voltage", OUTPUT_VOLTAGE, "%.1f"),
    MappingRule::variable("output.voltage.nominal", "UPS.Flow.[4].ConfigVoltage", "%.0f")
        .with_flags(SEMI_STATIC),
    MappingRule::variable("output.frequency", OUTPUT_FREQUENCY, "%.2f"),
    MappingRule::variable("output.frequency.nominal", "UPS.Flow.[4].ConfigFrequency", "%.0f")
        .with_flags(SEMI_STATIC),
    MappingRule::variable(
        "output.transfer.high",
        "UPS.PowerConverter.Output.HighVoltageTransfer",
        "%.1f",
    )
    .with_flags(SEMI_STATIC),
    MappingRule::variable(
        "output.transfer.low",
        "UPS.PowerConverter.Output.LowVoltageTransfer",
        "%.1f",
    )
    .with_flags(SEMI_STATIC),
    // Input
    MappingRule::variable("input.voltage", INPUT_VOLTAGE, "%.1f"),
    MappingRule::variable("input.frequency", INPUT_FREQUENCY, "%.2f"),
    MappingRule::variable("input.transfer.low", INPUT_TRANSFER_LOW, "%.0f").with_flags(SEMI_STATIC),
    MappingRule::variable("input.transfer.high", INPUT_TRANSFER_HIGH, "%.0f")
        .with_flags(SEMI_STATIC),
    MappingRule::variable(
        "input.frequency.transfer.low",
        "UPS.PowerConverter.Output.ffff00f9",
        "%.0f",
    )
    .with_flags(SEMI_STATIC),
    MappingRule::variable(
        "input.frequency.transfer.high",
        "UPS.PowerConverter.Output.ffff00f8",
        "%.0f",
    )
    .with_flags(SEMI_STATIC),
    // Status
    MappingRule::status(AC_PRESENT, Converter::Status(StatusToken::Online)).with_format("%.0f"),
    MappingRule::status(BELOW_LIMIT, Converter::Status(StatusToken::LowBattery))
        .with_format("%.0f"),
    MappingRule::status(CHARGING, Converter::Status(StatusToken::Charging)).with_format("%.0f"),
    MappingRule::status(DISCHARGING, Converter::Status(StatusToken::Discharging))
        .with_format("%.0f"),
    MappingRule::status(OVERLOAD, Converter::Status(StatusToken::Overload)).with_format("%.0f"),
    MappingRule::status(GOOD, Converter::Status(StatusToken::Healthy)),
    MappingRule::status(INTERNAL_FAILURE, Converter::Status(StatusToken::InternalFault)),
    MappingRule::status(SHUTDOWN_IMMINENT, Converter::Status(StatusToken::ShutdownImminent))
        .with_format("%.0f"),
    // Buck and boost only refresh on full cycles.
    MappingRule::status(BUCK, Converter::Status(StatusToken::Trim))
        .without_flags(AccessFlags::QUICK_POLL),
    MappingRule::status(BOOST, Converter::Status(StatusToken::Boost))
        .without_flags(AccessFlags::QUICK_POLL),
    // Writable delays
    MappingRule::variable("ups.delay.start", DELAY_START, DEFAULT_ONDELAY)
        .writable_string(DELAY_MAX_LENGTH)
        .with_flags(AccessFlags::ABSENT_BY_DEFAULT),
    MappingRule::variable("ups.delay.shutdown", DELAY_SHUTDOWN, DEFAULT_OFFDELAY)
        .writable_string(DELAY_MAX_LENGTH)
        .with_flags(AccessFlags::ABSENT_BY_DEFAULT),
    // Instant commands
    MappingRule::command("test.battery.start", BATTERY_TEST, "1"),
    MappingRule::command("load.off.delay", DELAY_SHUTDOWN, DEFAULT_OFFDELAY),
    MappingRule::command("load.on.delay", DELAY_START, DEFAULT_ONDELAY),
    MappingRule::command("shutdown.stop", DELAY_SHUTDOWN, "-1"),
    MappingRule::command("beeper.toggle", AUDIBLE_ALARM, "1"),
    MappingRule::END,
];

/// Raw PowerSummary items, listed ahead of [`LIEBERT_RULES`] when the
/// `unmapped-data-points` feature is on.
#[cfg(feature = "unmapped-data-points")]
pub const UNMAPPED_RULES: &[MappingRule] = &[
    MappingRule::variable("unmapped.ups.powersummary.flowid", "UPS.PowerSummary.FlowID", "%.0f"),
    MappingRule::variable(
        "unmapped.ups.powersummary.powersummaryid",
        "UPS.PowerSummary.PowerSummaryID",
        "%.0f",
    ),
    MappingRule::variable(
        "unmapped.ups.powersummary.capacitygranularity1",
        "UPS.PowerSummary.CapacityGranularity1",
        "%.0f",
    ),
    MappingRule::variable(
        "unmapped.ups.powersummary.capacitymode",
        "UPS.PowerSummary.CapacityMode",
        "%.0f",
    ),
    MappingRule::variable(
        "unmapped.ups.powersummary.rechargeable",
        "UPS.PowerSummary.Rechargeable",
        "%.0f",
    ),
    MappingRule::variable("unmapped.ups.powersummary.iproduct", "UPS.PowerSummary.iProduct", "%.0f"),
    MappingRule::variable("unmapped.ups.powersummary.product", "UPS.PowerSummary.iProduct", "%s")
        .with_converter(Converter::StringIndex),
    MappingRule::variable(
        "unmapped.ups.powersummary.imanufacturer",
        "UPS.PowerSummary.iManufacturer",
        "%.0f",
    ),
    MappingRule::variable(
        "unmapped.ups.powersummary.manufacturer",
        "UPS.PowerSummary.iManufacturer",
        "%s",
    )
    .with_converter(Converter::StringIndex),
    MappingRule::variable(
        "unmapped.ups.powersummary.iserialnumber",
        "UPS.PowerSummary.iSerialNumber",
        "%.0f",
    ),
    MappingRule::variable(
        "unmapped.ups.powersummary.serialnumber",
        "UPS.PowerSummary.iSerialNumber",
        "%s",
    )
    .with_converter(Converter::StringIndex),
];

/// Every row the profile loads, in match order.
pub fn liebert_rules() -> Vec<MappingRule> {
    #[cfg(feature = "unmapped-data-points")]
    let unmapped = UNMAPPED_RULES;
    #[cfg(not(feature = "unmapped-data-points"))]
    let unmapped: &[MappingRule] = &[];

    unmapped
        .iter()
        .chain(LIEBERT_RULES.iter().take_while(|rule| !rule.is_end()))
        .copied()
        .collect()
}
