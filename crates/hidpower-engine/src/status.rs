//! Device status derivation.

use std::collections::HashMap;
use std::fmt;

use hidpower_errors::VariableError;
use serde::{Serialize, Serializer};

use crate::convert::StatusToken;
use crate::rules::{MappingRule, MappingRuleTable, RuleIndex};

/// Set of active [`StatusToken`]s.
///
/// Iteration and display follow the token declaration order, so the rendered
/// form does not depend on the order rules were evaluated in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatusSet {
    bits: u16,
}

impl StatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: StatusToken) {
        self.bits |= token.bit();
    }

    pub fn remove(&mut self, token: StatusToken) {
        self.bits &= !token.bit();
    }

    pub fn contains(&self, token: StatusToken) -> bool {
        self.bits & token.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusToken> + '_ {
        StatusToken::ALL.into_iter().filter(|t| self.contains(*t))
    }
}

impl FromIterator<StatusToken> for StatusSet {
    fn from_iter<I: IntoIterator<Item = StatusToken>>(iter: I) -> Self {
        let mut set = StatusSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<StatusToken> for StatusSet {
    fn extend<I: IntoIterator<Item = StatusToken>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}

impl fmt::Display for StatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for StatusSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(StatusToken::as_str))
    }
}

/// Result of one status derivation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSummary {
    pub tokens: StatusSet,
    /// Status rules that had a reading this cycle.
    pub evaluated: usize,
    /// Readings that were neither 0 nor 1.
    pub misses: Vec<VariableError>,
}

/// Compose the status set from the readings of one cycle.
///
/// Each status rule of `table` is evaluated once. A rule without a reading
/// contributes nothing; a reading other than 0 or 1 is recorded as a
/// conversion miss and contributes nothing either.
pub fn derive_status<'a>(
    table: &MappingRuleTable,
    readings: impl IntoIterator<Item = (&'a str, f64)>,
) -> StatusSummary {
    let readings: HashMap<&str, f64> = readings.into_iter().collect();
    compose_status(table, |_, rule| readings.get(rule.hid_path).copied())
}

/// Evaluate every status rule of `table` against `reading`, which yields the
/// raw value a rule holds this cycle, if any.
pub fn compose_status(
    table: &MappingRuleTable,
    mut reading: impl FnMut(RuleIndex, &MappingRule) -> Option<f64>,
) -> StatusSummary {
    let mut summary = StatusSummary::default();

    for (index, rule) in table.status_rules() {
        let (Some(raw), Some(converter)) = (reading(index, rule), rule.converter) else {
            continue;
        };
        summary.evaluated += 1;
        match (converter.status_bit(raw), converter.status_token()) {
            (Some(true), Some(token)) => summary.tokens.insert(token),
            (Some(false), _) => {}
            _ => summary
                .misses
                .push(VariableError::conversion_miss(rule.hid_path, raw)),
        }
    }
    summary
}
