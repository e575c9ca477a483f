//! HID usage code resolution.
//!
//! A profile carries a [`UsageTableSet`]: its vendor table first, then the
//! generic Power Device / Battery System table. Resolution walks the layers
//! in order and stops at the first hit. Codes nobody knows are rendered as
//! their 8-digit hex form (`ffff0057`) so path construction never fails.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// One symbolic name for a full 32-bit usage (page << 16 | id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageEntry {
    pub name: &'static str,
    pub code: u32,
}

impl UsageEntry {
    pub const fn new(name: &'static str, code: u32) -> Self {
        Self { name, code }
    }
}

/// Immutable lookup table built from a static entry list.
///
/// When a list repeats a code or a name, the first entry wins.
#[derive(Debug, Clone)]
pub struct UsageTable {
    label: &'static str,
    by_code: HashMap<u32, &'static str>,
    by_name: HashMap<&'static str, u32>,
}

impl UsageTable {
    pub fn from_entries(label: &'static str, entries: &[UsageEntry]) -> Self {
        let mut by_code = HashMap::with_capacity(entries.len());
        let mut by_name = HashMap::with_capacity(entries.len());
        for entry in entries {
            by_code.entry(entry.code).or_insert(entry.name);
            by_name.entry(entry.name).or_insert(entry.code);
        }
        Self {
            label,
            by_code,
            by_name,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn name_of(&self, code: u32) -> Option<&'static str> {
        self.by_code.get(&code).copied()
    }

    pub fn code_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }
}

/// One segment of a report-tree path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A collection or field usage.
    Usage(u32),
    /// An indexed-collection selector, rendered as `[n]`.
    Index(u32),
}

/// Ordered usage layers, vendor-specific first.
#[derive(Debug, Clone, Default)]
pub struct UsageTableSet {
    layers: Vec<Arc<UsageTable>>,
}

impl UsageTableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vendor table layered over the generic power-device table.
    pub fn vendor(vendor: UsageTable) -> Self {
        Self::new().with_layer(Arc::new(vendor)).with_generic()
    }

    pub fn with_layer(mut self, table: Arc<UsageTable>) -> Self {
        self.layers.push(table);
        self
    }

    pub fn with_generic(self) -> Self {
        self.with_layer(Arc::clone(generic_power_usages()))
    }

    pub fn layers(&self) -> impl Iterator<Item = &UsageTable> {
        self.layers.iter().map(|layer| layer.as_ref())
    }

    /// Symbolic name for `code`, or its hex rendering.
    pub fn resolve(&self, code: u32) -> Cow<'static, str> {
        self.layers
            .iter()
            .find_map(|layer| layer.name_of(code))
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(format!("{code:08x}")))
    }

    /// Inverse of [`resolve`](Self::resolve); also parses the hex fallback.
    pub fn reverse(&self, name: &str) -> Option<u32> {
        self.layers
            .iter()
            .find_map(|layer| layer.code_of(name))
            .or_else(|| parse_hex_usage(name))
    }

    /// Build the dotted path string used as a rule match key.
    pub fn resolve_path(&self, segments: &[PathSegment]) -> String {
        PathDisplay {
            tables: self,
            segments,
        }
        .to_string()
    }

    /// Split a dotted path back into segments. `None` if a segment is neither
    /// a known name, a hex code nor a `[n]` selector.
    pub fn parse_path(&self, path: &str) -> Option<Vec<PathSegment>> {
        path.split('.')
            .map(|part| match part.strip_prefix('[').and_then(|p| p.strip_suffix(']')) {
                Some(index) => index.parse().ok().map(PathSegment::Index),
                None => self.reverse(part).map(PathSegment::Usage),
            })
            .collect()
    }
}

/// Resolve `code` against `tables`.
pub fn resolve(code: u32, tables: &UsageTableSet) -> Cow<'static, str> {
    tables.resolve(code)
}

fn parse_hex_usage(name: &str) -> Option<u32> {
    if name.len() != 8 || !name.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(name, 16).ok()
}

struct PathDisplay<'a> {
    tables: &'a UsageTableSet,
    segments: &'a [PathSegment],
}

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Usage(code) => f.write_str(&self.tables.resolve(*code))?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Power Device page (0x84) and Battery System page (0x85) usages.
pub const GENERIC_POWER_USAGE_ENTRIES: &[UsageEntry] = &[
    // Power Device page
    UsageEntry::new("iName", 0x0084_0001),
    UsageEntry::new("PresentStatus", 0x0084_0002),
    UsageEntry::new("ChangedStatus", 0x0084_0003),
    UsageEntry::new("UPS", 0x0084_0004),
    UsageEntry::new("PowerSupply", 0x0084_0005),
    UsageEntry::new("BatterySystem", 0x0084_0010),
    UsageEntry::new("BatterySystemID", 0x0084_0011),
    UsageEntry::new("Battery", 0x0084_0012),
    UsageEntry::new("BatteryID", 0x0084_0013),
    UsageEntry::new("Charger", 0x0084_0014),
    UsageEntry::new("ChargerID", 0x0084_0015),
    UsageEntry::new("PowerConverter", 0x0084_0016),
    UsageEntry::new("PowerConverterID", 0x0084_0017),
    UsageEntry::new("OutletSystem", 0x0084_0018),
    UsageEntry::new("OutletSystemID", 0x0084_0019),
    UsageEntry::new("Input", 0x0084_001a),
    UsageEntry::new("InputID", 0x0084_001b),
    UsageEntry::new("Output", 0x0084_001c),
    UsageEntry::new("OutputID", 0x0084_001d),
    UsageEntry::new("Flow", 0x0084_001e),
    UsageEntry::new("FlowID", 0x0084_001f),
    UsageEntry::new("Outlet", 0x0084_0020),
    UsageEntry::new("OutletID", 0x0084_0021),
    UsageEntry::new("Gang", 0x0084_0022),
    UsageEntry::new("GangID", 0x0084_0023),
    UsageEntry::new("PowerSummary", 0x0084_0024),
    UsageEntry::new("PowerSummaryID", 0x0084_0025),
    UsageEntry::new("Voltage", 0x0084_0030),
    UsageEntry::new("Current", 0x0084_0031),
    UsageEntry::new("Frequency", 0x0084_0032),
    UsageEntry::new("ApparentPower", 0x0084_0033),
    UsageEntry::new("ActivePower", 0x0084_0034),
    UsageEntry::new("PercentLoad", 0x0084_0035),
    UsageEntry::new("Temperature", 0x0084_0036),
    UsageEntry::new("Humidity", 0x0084_0037),
    UsageEntry::new("BadCount", 0x0084_0038),
    UsageEntry::new("ConfigVoltage", 0x0084_0040),
    UsageEntry::new("ConfigCurrent", 0x0084_0041),
    UsageEntry::new("ConfigFrequency", 0x0084_0042),
    UsageEntry::new("ConfigApparentPower", 0x0084_0043),
    UsageEntry::new("ConfigActivePower", 0x0084_0044),
    UsageEntry::new("ConfigPercentLoad", 0x0084_0045),
    UsageEntry::new("ConfigTemperature", 0x0084_0046),
    UsageEntry::new("ConfigHumidity", 0x0084_0047),
    UsageEntry::new("SwitchOnControl", 0x0084_0050),
    UsageEntry::new("SwitchOffControl", 0x0084_0051),
    UsageEntry::new("ToggleControl", 0x0084_0052),
    UsageEntry::new("LowVoltageTransfer", 0x0084_0053),
    UsageEntry::new("HighVoltageTransfer", 0x0084_0054),
    UsageEntry::new("DelayBeforeReboot", 0x0084_0055),
    UsageEntry::new("DelayBeforeStartup", 0x0084_0056),
    UsageEntry::new("DelayBeforeShutdown", 0x0084_0057),
    UsageEntry::new("Test", 0x0084_0058),
    UsageEntry::new("ModuleReset", 0x0084_0059),
    UsageEntry::new("AudibleAlarmControl", 0x0084_005a),
    UsageEntry::new("Present", 0x0084_0060),
    UsageEntry::new("Good", 0x0084_0061),
    UsageEntry::new("InternalFailure", 0x0084_0062),
    UsageEntry::new("VoltageOutOfRange", 0x0084_0063),
    UsageEntry::new("FrequencyOutOfRange", 0x0084_0064),
    UsageEntry::new("Overload", 0x0084_0065),
    UsageEntry::new("OverCharged", 0x0084_0066),
    UsageEntry::new("OverTemperature", 0x0084_0067),
    UsageEntry::new("ShutdownRequested", 0x0084_0068),
    UsageEntry::new("ShutdownImminent", 0x0084_0069),
    UsageEntry::new("SwitchOnOff", 0x0084_006b),
    UsageEntry::new("Switchable", 0x0084_006c),
    UsageEntry::new("Used", 0x0084_006d),
    UsageEntry::new("Boost", 0x0084_006e),
    UsageEntry::new("Buck", 0x0084_006f),
    UsageEntry::new("Initialized", 0x0084_0070),
    UsageEntry::new("Tested", 0x0084_0071),
    UsageEntry::new("AwaitingPower", 0x0084_0072),
    UsageEntry::new("CommunicationLost", 0x0084_0073),
    UsageEntry::new("iManufacturer", 0x0084_00fd),
    UsageEntry::new("iProduct", 0x0084_00fe),
    UsageEntry::new("iSerialNumber", 0x0084_00ff),
    // Battery System page
    UsageEntry::new("RemainingCapacityLimit", 0x0085_0029),
    UsageEntry::new("RemainingTimeLimit", 0x0085_002a),
    UsageEntry::new("CapacityMode", 0x0085_002c),
    UsageEntry::new("BelowRemainingCapacityLimit", 0x0085_0042),
    UsageEntry::new("RemainingTimeLimitExpired", 0x0085_0043),
    UsageEntry::new("Charging", 0x0085_0044),
    UsageEntry::new("Discharging", 0x0085_0045),
    UsageEntry::new("NeedReplacement", 0x0085_004b),
    UsageEntry::new("RemainingCapacity", 0x0085_0066),
    UsageEntry::new("FullChargeCapacity", 0x0085_0067),
    UsageEntry::new("RunTimeToEmpty", 0x0085_0068),
    UsageEntry::new("AverageTimeToEmpty", 0x0085_006a),
    UsageEntry::new("DesignCapacity", 0x0085_0083),
    UsageEntry::new("ManufactureDate", 0x0085_0085),
    UsageEntry::new("iDeviceChemistry", 0x0085_0089),
    UsageEntry::new("Rechargeable", 0x0085_008b),
    UsageEntry::new("WarningCapacityLimit", 0x0085_008c),
    UsageEntry::new("CapacityGranularity1", 0x0085_008d),
    UsageEntry::new("CapacityGranularity2", 0x0085_008e),
    UsageEntry::new("iOEMInformation", 0x0085_008f),
    UsageEntry::new("ACPresent", 0x0085_00d0),
    UsageEntry::new("BatteryPresent", 0x0085_00d1),
];

fn generic_power_usages() -> &'static Arc<UsageTable> {
    static GENERIC: OnceLock<Arc<UsageTable>> = OnceLock::new();
    GENERIC.get_or_init(|| Arc::new(UsageTable::from_entries("hid", GENERIC_POWER_USAGE_ENTRIES)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VENDOR: &[UsageEntry] = &[
        UsageEntry::new("VendorTransferLow", 0xffff_0057),
        UsageEntry::new("MyVoltage", 0x0084_0030),
    ];

    #[test]
    fn test_vendor_layer_wins() {
        let tables = UsageTableSet::vendor(UsageTable::from_entries("vendor", VENDOR));
        assert_eq!(tables.resolve(0x0084_0030), "MyVoltage");
        assert_eq!(tables.resolve(0x0084_0031), "Current");
    }

    #[test]
    fn test_unknown_code_falls_back_to_hex() {
        let tables = UsageTableSet::new().with_generic();
        assert_eq!(tables.resolve(0xffff_0058), "ffff0058");
        assert_eq!(tables.reverse("ffff0058"), Some(0xffff_0058));
    }

    #[test]
    fn test_resolve_path_with_selector() {
        let tables = UsageTableSet::new().with_generic();
        let path = tables.resolve_path(&[
            PathSegment::Usage(0x0084_0004),
            PathSegment::Usage(0x0084_0016),
            PathSegment::Usage(0x0084_001a),
            PathSegment::Index(1),
            PathSegment::Usage(0x0084_0030),
        ]);
        assert_eq!(path, "UPS.PowerConverter.Input.[1].Voltage");
    }

    #[test]
    fn test_parse_path_inverts_resolve_path() -> Result<(), Box<dyn std::error::Error>> {
        let tables = UsageTableSet::new().with_generic();
        let segments = tables
            .parse_path("UPS.PowerConverter.Output.ffff0057")
            .ok_or("path should parse")?;
        assert_eq!(
            tables.resolve_path(&segments),
            "UPS.PowerConverter.Output.ffff0057"
        );
        assert!(tables.parse_path("UPS.NotAUsage").is_none());
        Ok(())
    }

    #[test]
    fn test_empty_set_resolves_everything_to_hex() {
        let tables = UsageTableSet::new();
        assert_eq!(resolve(0x0084_0004, &tables), "00840004");
    }
}
