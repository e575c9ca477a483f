//! Raw ⇄ external value translation for a single rule.

use std::fmt;

use hidpower_errors::VariableError;
use hidpower_hid_common::ReportTransport;
use serde::{Serialize, Serializer};

use crate::convert::Converter;
use crate::rules::{MappingRule, ValueFormat};

/// A variable value as monitoring clients see it.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalValue {
    Text(String),
    /// Fixed-point number rendered with `decimals` digits.
    Number { value: f64, decimals: u8 },
    /// A status bit.
    Flag(bool),
}

impl ExternalValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExternalValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ExternalValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for ExternalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalValue::Text(s) => f.write_str(s),
            ExternalValue::Number { value, decimals } => {
                write!(f, "{value:.prec$}", prec = usize::from(*decimals))
            }
            ExternalValue::Flag(active) => f.write_str(if *active { "1" } else { "0" }),
        }
    }
}

impl Serialize for ExternalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where string-index converters fetch descriptor text from.
pub trait StringSource {
    fn string_descriptor(&mut self, index: u8) -> Option<String>;
}

impl<T: ReportTransport + ?Sized> StringSource for T {
    fn string_descriptor(&mut self, index: u8) -> Option<String> {
        self.read_string(index).ok()
    }
}

/// A [`StringSource`] with no descriptors at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStrings;

impl StringSource for NoStrings {
    fn string_descriptor(&mut self, _index: u8) -> Option<String> {
        None
    }
}

/// Cut `s` to at most `max` bytes without splitting a character.
pub fn truncate_to(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

/// Convert a raw report value into the rule's external value.
///
/// String rules are bounded to their declared length.
///
/// # Errors
///
/// [`VariableError::ConversionMiss`] when the rule's converter has no entry
/// for `raw` (or the string descriptor it points at cannot be read).
pub fn to_external<S: StringSource + ?Sized>(
    raw: f64,
    rule: &MappingRule,
    strings: &mut S,
) -> Result<ExternalValue, VariableError> {
    let miss = || VariableError::conversion_miss(rule_label(rule), raw);

    let value = match rule.converter {
        Some(converter @ Converter::Status(_)) => {
            ExternalValue::Flag(converter.status_bit(raw).ok_or_else(miss)?)
        }
        Some(converter @ Converter::StringIndex) => {
            let index = converter.string_index(raw).ok_or_else(miss)?;
            ExternalValue::Text(strings.string_descriptor(index).ok_or_else(miss)?)
        }
        Some(converter) => ExternalValue::Text(converter.label(raw).ok_or_else(miss)?.to_string()),
        None => match rule.value_format() {
            ValueFormat::Fixed(decimals) => ExternalValue::Number {
                value: raw,
                decimals,
            },
            // Literal-default rules expose the device's current integer value.
            ValueFormat::Literal(_) | ValueFormat::Text | ValueFormat::Unspecified => {
                ExternalValue::Text(format!("{raw:.0}"))
            }
        },
    };

    if rule.is_string() {
        let mut text = value.to_string();
        truncate_to(&mut text, rule.string_max_length);
        return Ok(ExternalValue::Text(text));
    }
    Ok(value)
}

/// Convert an external value into the raw value to write for `rule`.
///
/// Command rules ignore `external` and yield their payload.
///
/// # Errors
///
/// - [`VariableError::Unwritable`] for read-only rules
/// - [`VariableError::ValueTooLong`] when a string exceeds the rule's bound
/// - [`VariableError::InvalidValue`] when the value cannot be mapped
pub fn to_internal(external: &str, rule: &MappingRule) -> Result<f64, VariableError> {
    if rule.is_command() {
        return command_payload(rule);
    }
    if !rule.is_writable() {
        return Err(VariableError::unwritable(rule.name));
    }
    if rule.is_string() && external.len() > rule.string_max_length {
        return Err(VariableError::ValueTooLong {
            name: rule.name.to_string(),
            max: rule.string_max_length,
        });
    }
    let invalid = || VariableError::invalid_value(rule.name, external);

    match rule.converter {
        Some(Converter::StringIndex) => Err(invalid()),
        Some(Converter::Status(_)) => match external.trim() {
            "1" => Ok(1.0),
            "0" => Ok(0.0),
            _ => Err(invalid()),
        },
        Some(converter) => converter.raw_for(external).ok_or_else(invalid),
        None => parse_number(external).ok_or_else(invalid),
    }
}

/// Raw value an instant command writes.
///
/// # Errors
///
/// [`VariableError::InvalidValue`] when the payload is neither a converter
/// label nor a number, [`VariableError::UnknownCommand`] for non-command rules.
pub fn command_payload(rule: &MappingRule) -> Result<f64, VariableError> {
    if !rule.is_command() {
        return Err(VariableError::UnknownCommand(rule.name.to_string()));
    }
    let payload = rule.default_or_format.unwrap_or_default();
    rule.converter
        .and_then(|converter| converter.raw_for(payload))
        .or_else(|| parse_number(payload))
        .ok_or_else(|| VariableError::invalid_value(rule.name, payload))
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn rule_label(rule: &MappingRule) -> &'static str {
    if rule.is_status() { rule.hid_path } else { rule.name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StatusToken;
    use crate::rules::AccessFlags;

    struct Strings(&'static str);

    impl StringSource for Strings {
        fn string_descriptor(&mut self, index: u8) -> Option<String> {
            (index == 3).then(|| self.0.to_string())
        }
    }

    #[test]
    fn test_fixed_point_rendering() -> Result<(), VariableError> {
        let rule = MappingRule::variable("battery.voltage", "UPS.PowerSummary.Voltage", "%.2f");
        let value = to_external(13.5, &rule, &mut NoStrings)?;
        assert_eq!(value.to_string(), "13.50");
        assert_eq!(value.as_number(), Some(13.5));
        Ok(())
    }

    #[test]
    fn test_literal_rule_exposes_integer() -> Result<(), VariableError> {
        let rule = MappingRule::variable("ups.delay.start", "UPS.PowerSummary.DelayBeforeStartup", "30")
            .writable_string(10);
        assert_eq!(to_external(45.0, &rule, &mut NoStrings)?.to_string(), "45");
        Ok(())
    }

    #[test]
    fn test_label_converter_miss() {
        let rule = MappingRule::variable("ups.beeper.status", "UPS.PowerSummary.AudibleAlarmControl", "%s")
            .with_converter(Converter::Beeper);
        let err = to_external(9.0, &rule, &mut NoStrings);
        assert!(matches!(err, Err(VariableError::ConversionMiss { .. })));
    }

    #[test]
    fn test_string_index_truncated() -> Result<(), VariableError> {
        let rule = MappingRule::variable("battery.type", "UPS.PowerSummary.iDeviceChemistry", "%s")
            .with_flags(AccessFlags::STRING_TYPE)
            .with_converter(Converter::StringIndex);
        let rule = MappingRule {
            string_max_length: 4,
            ..rule
        };
        let value = to_external(3.0, &rule, &mut Strings("PbAcid"))?;
        assert_eq!(value, ExternalValue::Text("PbAc".to_string()));
        assert!(to_external(4.0, &rule, &mut Strings("PbAcid")).is_err());
        Ok(())
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let mut s = "Ünïcode".to_string();
        truncate_to(&mut s, 2);
        assert_eq!(s, "Ü");
        let mut s = "short".to_string();
        truncate_to(&mut s, 20);
        assert_eq!(s, "short");
    }

    #[test]
    fn test_to_internal_rules() {
        let read_only = MappingRule::variable("ups.load", "UPS.PowerSummary.PercentLoad", "%.0f");
        assert!(matches!(
            to_internal("10", &read_only),
            Err(VariableError::Unwritable { .. })
        ));

        let delay = MappingRule::variable("ups.delay.start", "UPS.PowerSummary.DelayBeforeStartup", "30")
            .writable_string(3);
        assert_eq!(to_internal("120", &delay), Ok(120.0));
        assert!(matches!(
            to_internal("1200", &delay),
            Err(VariableError::ValueTooLong { max: 3, .. })
        ));
        assert!(matches!(
            to_internal("abc", &delay),
            Err(VariableError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_to_internal_reverse_maps_labels() {
        let beeper = MappingRule::variable("ups.beeper.status", "UPS.PowerSummary.AudibleAlarmControl", "%s")
            .with_flags(AccessFlags::READ_WRITE)
            .with_converter(Converter::Beeper);
        assert_eq!(to_internal("enabled", &beeper), Ok(2.0));
        assert!(to_internal("on", &beeper).is_err());
    }

    #[test]
    fn test_command_payload() {
        let beeper_on = MappingRule::command("beeper.on", "UPS.PowerSummary.AudibleAlarmControl", "2");
        assert_eq!(command_payload(&beeper_on), Ok(2.0));
        assert_eq!(to_internal("ignored", &beeper_on), Ok(2.0));

        let labelled = MappingRule::command("beeper.mute", "UPS.PowerSummary.AudibleAlarmControl", "muted")
            .with_converter(Converter::Beeper);
        assert_eq!(command_payload(&labelled), Ok(3.0));

        let status = MappingRule::status(
            "UPS.PowerSummary.PresentStatus.ACPresent",
            Converter::Status(StatusToken::Online),
        );
        assert!(command_payload(&status).is_err());
    }
}
