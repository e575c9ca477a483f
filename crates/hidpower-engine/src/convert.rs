//! Value converters attached to mapping rules.
//!
//! A converter turns a raw report value into an external label (and back).
//! Status converters are special: they turn a one-bit item into the presence
//! or absence of a [`StatusToken`].

use std::fmt;
use std::str::FromStr;

/// Condition flags that make up the device status.
///
/// Declaration order is the canonical order used when a status set is
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum StatusToken {
    Online = 0,
    LowBattery = 1,
    Charging = 2,
    Discharging = 3,
    Overload = 4,
    Healthy = 5,
    InternalFault = 6,
    ShutdownImminent = 7,
    Trim = 8,
    Boost = 9,
}

impl StatusToken {
    pub const ALL: [StatusToken; 10] = [
        StatusToken::Online,
        StatusToken::LowBattery,
        StatusToken::Charging,
        StatusToken::Discharging,
        StatusToken::Overload,
        StatusToken::Healthy,
        StatusToken::InternalFault,
        StatusToken::ShutdownImminent,
        StatusToken::Trim,
        StatusToken::Boost,
    ];

    /// Machine token.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusToken::Online => "online",
            StatusToken::LowBattery => "lowbatt",
            StatusToken::Charging => "chrg",
            StatusToken::Discharging => "dischrg",
            StatusToken::Overload => "overload",
            StatusToken::Healthy => "good",
            StatusToken::InternalFault => "fault",
            StatusToken::ShutdownImminent => "shutdownimm",
            StatusToken::Trim => "trim",
            StatusToken::Boost => "boost",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StatusToken::Online => "on mains power",
            StatusToken::LowBattery => "battery low",
            StatusToken::Charging => "charging",
            StatusToken::Discharging => "discharging",
            StatusToken::Overload => "overloaded",
            StatusToken::Healthy => "device healthy",
            StatusToken::InternalFault => "internal fault",
            StatusToken::ShutdownImminent => "shutdown imminent",
            StatusToken::Trim => "voltage bucked",
            StatusToken::Boost => "voltage boosted",
        }
    }

    pub(crate) fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for StatusToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusToken {
    type Err = UnknownConverter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusToken::ALL
            .into_iter()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| UnknownConverter(s.to_string()))
    }
}

/// Converter identifier not known to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConverter(pub String);

impl fmt::Display for UnknownConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown converter '{}'", self.0)
    }
}

impl std::error::Error for UnknownConverter {}

/// Beeper control values.
pub const BEEPER_LABELS: &[(i64, &str)] = &[(1, "disabled"), (2, "enabled"), (3, "muted")];

/// Self-test result codes.
pub const TEST_RESULT_LABELS: &[(i64, &str)] = &[
    (1, "Done and passed"),
    (2, "Done and warning"),
    (3, "Done and error"),
    (4, "Aborted"),
    (5, "In progress"),
    (6, "No test initiated"),
    (7, "Test scheduled"),
    (0, "No test initiated"),
];

/// How a rule's raw value is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    /// One-bit status item. 1 sets the token, 0 clears it.
    Status(StatusToken),
    /// Audible alarm state.
    Beeper,
    /// Battery self-test result.
    TestResult,
    /// Raw value is a USB string descriptor index.
    StringIndex,
}

impl Converter {
    /// Identifier used in vendor tables.
    pub fn identifier(&self) -> &'static str {
        match self {
            Converter::Status(StatusToken::Online) => "online_info",
            Converter::Status(StatusToken::LowBattery) => "lowbatt_info",
            Converter::Status(StatusToken::Charging) => "charging_info",
            Converter::Status(StatusToken::Discharging) => "discharging_info",
            Converter::Status(StatusToken::Overload) => "overload_info",
            Converter::Status(StatusToken::Healthy) => "off_info",
            Converter::Status(StatusToken::InternalFault) => "commfault_info",
            Converter::Status(StatusToken::ShutdownImminent) => "shutdownimm_info",
            Converter::Status(StatusToken::Trim) => "trim_info",
            Converter::Status(StatusToken::Boost) => "boost_info",
            Converter::Beeper => "beeper_info",
            Converter::TestResult => "test_read_info",
            Converter::StringIndex => "stringid_conversion",
        }
    }

    pub fn status_token(&self) -> Option<StatusToken> {
        match self {
            Converter::Status(token) => Some(*token),
            _ => None,
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self, Converter::Status(_))
    }

    fn labels(&self) -> &'static [(i64, &'static str)] {
        match self {
            Converter::Beeper => BEEPER_LABELS,
            Converter::TestResult => TEST_RESULT_LABELS,
            Converter::Status(_) | Converter::StringIndex => &[],
        }
    }

    /// Status bit for `raw`: `Some(true)` for 1, `Some(false)` for 0, `None`
    /// for anything else or for non-status converters.
    pub fn status_bit(&self, raw: f64) -> Option<bool> {
        if !self.is_status() {
            return None;
        }
        match integral(raw) {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        }
    }

    /// Label for `raw` in a lookup-table converter.
    pub fn label(&self, raw: f64) -> Option<&'static str> {
        let key = integral(raw)?;
        self.labels()
            .iter()
            .find(|(value, _)| *value == key)
            .map(|(_, label)| *label)
    }

    /// Raw value for `label` in a lookup-table converter. The first entry
    /// carrying the label wins.
    pub fn raw_for(&self, label: &str) -> Option<f64> {
        self.labels()
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(value, _)| *value as f64)
    }

    /// String descriptor index carried by `raw`. Index 0 means "no string".
    pub fn string_index(&self, raw: f64) -> Option<u8> {
        if *self != Converter::StringIndex {
            return None;
        }
        integral(raw)
            .and_then(|value| u8::try_from(value).ok())
            .filter(|index| *index != 0)
    }
}

impl FromStr for Converter {
    type Err = UnknownConverter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let converter = match s {
            "online_info" => Converter::Status(StatusToken::Online),
            "lowbatt_info" => Converter::Status(StatusToken::LowBattery),
            "charging_info" => Converter::Status(StatusToken::Charging),
            "discharging_info" => Converter::Status(StatusToken::Discharging),
            "overload_info" => Converter::Status(StatusToken::Overload),
            "off_info" => Converter::Status(StatusToken::Healthy),
            "commfault_info" => Converter::Status(StatusToken::InternalFault),
            "shutdownimm_info" => Converter::Status(StatusToken::ShutdownImminent),
            "trim_info" => Converter::Status(StatusToken::Trim),
            "boost_info" => Converter::Status(StatusToken::Boost),
            "beeper_info" => Converter::Beeper,
            "test_read_info" => Converter::TestResult,
            "stringid_conversion" => Converter::StringIndex,
            other => return Err(UnknownConverter(other.to_string())),
        };
        Ok(converter)
    }
}

/// `raw` as an integer, if it has no fractional part and fits.
pub(crate) fn integral(raw: f64) -> Option<i64> {
    if !raw.is_finite() || (raw - raw.round()).abs() > f64::EPSILON {
        return None;
    }
    let rounded = raw.round();
    if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return None;
    }
    Some(rounded as i64)
}
