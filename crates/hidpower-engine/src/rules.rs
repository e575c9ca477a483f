//! Mapping rules: the table that binds HID paths to named variables.
//!
//! Vendor crates declare their tables as `const` slices of [`MappingRule`]
//! and hand them to [`MappingRuleTable::new`], which validates every row once
//! at load time and builds the path index used during polling.

use std::collections::HashMap;

use bitflags::bitflags;
use hidpower_errors::ProfileError;

use crate::convert::Converter;

bitflags! {
    /// Per-rule behaviour flags.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u16 {
        /// The variable accepts writes.
        const READ_WRITE        = 0b0000_0001;
        /// The external value is a bounded string.
        const STRING_TYPE       = 0b0000_0010;
        /// Rarely changes; re-read only on change or after the semi-static interval.
        const SEMI_STATIC       = 0b0000_0100;
        /// Included in quick update cycles.
        const QUICK_POLL        = 0b0000_1000;
        /// Hidden until the first successful read.
        const ABSENT_BY_DEFAULT = 0b0001_0000;
        /// The rule is an instant command, not a variable.
        const COMMAND_TYPE      = 0b0010_0000;
    }
}

/// Name carried by rules that only feed the status set.
pub const STATUS_RULE_NAME: &str = "BOOL";

/// How the external value of a rule is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Fixed-point with the given number of decimals (`%.Nf`).
    Fixed(u8),
    /// Plain string (`%s`).
    Text,
    /// Literal default value, or the payload of a command.
    Literal(&'static str),
    /// No format declared.
    Unspecified,
}

impl ValueFormat {
    /// Parse a format declaration. Anything that starts with `%` must be one
    /// of `%s`, `%.0f`, `%.1f` or `%.2f`; everything else is a literal.
    pub fn parse(declared: Option<&'static str>) -> Result<Self, String> {
        let Some(declared) = declared else {
            return Ok(ValueFormat::Unspecified);
        };
        let Some(spec) = declared.strip_prefix('%') else {
            return Ok(ValueFormat::Literal(declared));
        };
        if spec == "s" {
            return Ok(ValueFormat::Text);
        }
        spec.strip_prefix('.')
            .and_then(|rest| rest.strip_suffix('f'))
            .and_then(|digits| match digits {
                "0" => Some(ValueFormat::Fixed(0)),
                "1" => Some(ValueFormat::Fixed(1)),
                "2" => Some(ValueFormat::Fixed(2)),
                _ => None,
            })
            .ok_or_else(|| format!("unsupported format '{declared}'"))
    }
}

/// One row of a vendor mapping table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingRule {
    /// Variable or command name; [`STATUS_RULE_NAME`] for status-only rules.
    pub name: &'static str,
    pub flags: AccessFlags,
    /// Bound on the external string, for [`AccessFlags::STRING_TYPE`] rules.
    pub string_max_length: usize,
    pub hid_path: &'static str,
    /// A `%` format, a literal default, or a command payload.
    pub default_or_format: Option<&'static str>,
    pub converter: Option<Converter>,
}

impl MappingRule {
    /// End-of-table sentinel.
    pub const END: Self = Self {
        name: "",
        flags: AccessFlags::empty(),
        string_max_length: 0,
        hid_path: "",
        default_or_format: None,
        converter: None,
    };

    /// Read-only numeric or string variable.
    pub const fn variable(
        name: &'static str,
        hid_path: &'static str,
        format: &'static str,
    ) -> Self {
        Self {
            name,
            flags: AccessFlags::empty(),
            string_max_length: 0,
            hid_path,
            default_or_format: Some(format),
            converter: None,
        }
    }

    /// Status-only rule contributing one token.
    pub const fn status(hid_path: &'static str, converter: Converter) -> Self {
        Self {
            name: STATUS_RULE_NAME,
            flags: AccessFlags::QUICK_POLL,
            string_max_length: 0,
            hid_path,
            default_or_format: None,
            converter: Some(converter),
        }
    }

    /// Instant command writing `payload` to `hid_path`.
    pub const fn command(name: &'static str, hid_path: &'static str, payload: &'static str) -> Self {
        Self {
            name,
            flags: AccessFlags::COMMAND_TYPE,
            string_max_length: 0,
            hid_path,
            default_or_format: Some(payload),
            converter: None,
        }
    }

    pub const fn with_flags(mut self, flags: AccessFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// String value bounded to `max` bytes.
    pub const fn bounded_string(mut self, max: usize) -> Self {
        self.flags = self.flags.union(AccessFlags::STRING_TYPE);
        self.string_max_length = max;
        self
    }

    /// Writable string bounded to `max` bytes.
    pub const fn writable_string(self, max: usize) -> Self {
        self.bounded_string(max).with_flags(AccessFlags::READ_WRITE)
    }

    pub const fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    pub const fn without_flags(mut self, flags: AccessFlags) -> Self {
        self.flags = self.flags.difference(flags);
        self
    }

    /// Declared format for a rule whose builder left it unset.
    pub const fn with_format(mut self, format: &'static str) -> Self {
        self.default_or_format = Some(format);
        self
    }

    pub fn is_end(&self) -> bool {
        self.name.is_empty() && self.hid_path.is_empty()
    }

    pub fn is_status(&self) -> bool {
        self.name == STATUS_RULE_NAME
    }

    pub fn is_command(&self) -> bool {
        self.flags.contains(AccessFlags::COMMAND_TYPE)
    }

    pub fn is_variable(&self) -> bool {
        !self.is_status() && !self.is_command()
    }

    pub fn is_writable(&self) -> bool {
        self.flags.contains(AccessFlags::READ_WRITE)
    }

    pub fn is_string(&self) -> bool {
        self.flags.contains(AccessFlags::STRING_TYPE)
    }

    /// Validated tables never fail here; an unparsable `%` spec degrades to a literal.
    pub fn value_format(&self) -> ValueFormat {
        ValueFormat::parse(self.default_or_format)
            .unwrap_or(ValueFormat::Literal(self.default_or_format.unwrap_or_default()))
    }

    /// First two path segments: the report subtree a write touches.
    pub fn subsystem(&self) -> &'static str {
        subsystem_of(self.hid_path)
    }

    fn label(&self) -> &'static str {
        if self.is_status() { self.hid_path } else { self.name }
    }

    fn validate(&self) -> Result<(), ProfileError> {
        let fail = |reason: &str| Err(ProfileError::invalid_rule(self.label(), reason));

        if self.name.is_empty() {
            return fail("empty name");
        }
        if self.hid_path.is_empty() {
            return fail("empty HID path");
        }
        let format = ValueFormat::parse(self.default_or_format)
            .map_err(|reason| ProfileError::invalid_rule(self.label(), reason))?;

        if self.is_status() {
            if !self.converter.is_some_and(|c| c.is_status()) {
                return fail("status rule without a status converter");
            }
            if self.is_command() || self.is_writable() {
                return fail("status rule cannot be writable or a command");
            }
            return Ok(());
        }
        if self.converter.is_some_and(|c| c.is_status()) {
            return fail("status converter on a named variable");
        }
        if self.is_command() {
            if !matches!(format, ValueFormat::Literal(_)) {
                return fail("command without a literal payload");
            }
            if self.is_writable() {
                return fail("command cannot be flagged writable");
            }
        }
        if self.is_string() && self.string_max_length == 0 {
            return fail("string rule without a length bound");
        }
        Ok(())
    }
}

/// Prefix made of the first two segments of `path`.
pub fn subsystem_of(path: &str) -> &str {
    match path.match_indices('.').nth(1) {
        Some((end, _)) => path.get(..end).unwrap_or(path),
        None => path,
    }
}

/// Position of a rule inside its table.
pub type RuleIndex = usize;

/// A validated, indexed vendor mapping table.
#[derive(Debug, Clone)]
pub struct MappingRuleTable {
    rules: Vec<MappingRule>,
    by_path: HashMap<&'static str, Vec<RuleIndex>>,
}

impl MappingRuleTable {
    /// Validate `rules` up to the first [`MappingRule::END`].
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidRule`] for the first malformed row.
    pub fn new(rules: &[MappingRule]) -> Result<Self, ProfileError> {
        let rules: Vec<MappingRule> = rules.iter().take_while(|r| !r.is_end()).copied().collect();
        let mut by_path: HashMap<&'static str, Vec<RuleIndex>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            rule.validate()?;
            by_path.entry(rule.hid_path).or_default().push(index);
        }
        Ok(Self { rules, by_path })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: RuleIndex) -> Option<&MappingRule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleIndex, &MappingRule)> {
        self.rules.iter().enumerate()
    }

    /// Every rule bound to `path`, in table order.
    pub fn find_rules<'a>(
        &'a self,
        path: &str,
    ) -> impl Iterator<Item = (RuleIndex, &'a MappingRule)> + use<'a> {
        self.by_path
            .get(path)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.rules.get(index).map(|rule| (index, rule)))
    }

    /// First variable rule carrying `name`.
    pub fn find_variable(&self, name: &str) -> Option<(RuleIndex, &MappingRule)> {
        self.iter().find(|(_, r)| r.is_variable() && r.name == name)
    }

    /// First command rule carrying `name`.
    pub fn find_command(&self, name: &str) -> Option<(RuleIndex, &MappingRule)> {
        self.iter().find(|(_, r)| r.is_command() && r.name == name)
    }

    pub fn status_rules(&self) -> impl Iterator<Item = (RuleIndex, &MappingRule)> {
        self.iter().filter(|(_, r)| r.is_status())
    }

    /// Distinct variable names, first occurrence order.
    pub fn variable_names(&self) -> Vec<&'static str> {
        dedup_names(self.rules.iter().filter(|r| r.is_variable()))
    }

    pub fn writable_names(&self) -> Vec<&'static str> {
        dedup_names(self.rules.iter().filter(|r| r.is_variable() && r.is_writable()))
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        dedup_names(self.rules.iter().filter(|r| r.is_command()))
    }
}

fn dedup_names<'a>(rules: impl Iterator<Item = &'a MappingRule>) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for rule in rules {
        if !names.contains(&rule.name) {
            names.push(rule.name);
        }
    }
    names
}

/// Every rule of `table` bound to `path`.
pub fn find_rules<'a>(path: &str, table: &'a MappingRuleTable) -> Vec<(RuleIndex, &'a MappingRule)> {
    table.find_rules(path).collect()
}
