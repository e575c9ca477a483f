//! Variable access: polling, cached values, writes and instant commands.
//!
//! The controller owns one cache slot per rule of its table, addressed by
//! [`RuleIndex`]. A poll cycle walks the table in order, reads each eligible
//! rule through the transport and converts it. Failures are collected per
//! rule; nothing short of the caller dropping the controller ends a cycle.

use std::sync::Arc;
use std::time::{Duration, Instant};

use hidpower_errors::{DeviceError, HidPowerError, VariableError};
use hidpower_hid_common::{HidCommonError, ReportTransport};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::rules::{AccessFlags, MappingRule, MappingRuleTable, RuleIndex};
use crate::status::{StatusSet, compose_status};
use crate::translate::{ExternalValue, command_payload, to_external, to_internal, truncate_to};

/// Which rules a poll cycle visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollMode {
    /// Every non-command rule.
    Init,
    /// Every non-command rule, except semi-static rules that are still fresh.
    Full,
    /// Only rules flagged [`AccessFlags::QUICK_POLL`].
    Quick,
}

/// One rule that failed during a cycle.
#[derive(Debug)]
pub struct RuleFailure {
    pub index: RuleIndex,
    pub path: &'static str,
    pub error: HidPowerError,
}

/// Summary of one poll cycle.
#[derive(Debug)]
pub struct PollReport {
    pub mode: PollMode,
    pub polled: usize,
    pub skipped: usize,
    pub failures: Vec<RuleFailure>,
}

impl PollReport {
    fn new(mode: PollMode) -> Self {
        Self {
            mode,
            polled: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures other than "variable absent for now".
    pub fn hard_failures(&self) -> impl Iterator<Item = &RuleFailure> {
        self.failures.iter().filter(|f| {
            !matches!(&f.error, HidPowerError::Variable(e) if e.is_absent())
        })
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    value: Option<ExternalValue>,
    last_read: Option<Instant>,
}

impl Slot {
    fn store(&mut self, value: ExternalValue, now: Instant) {
        self.value = Some(value);
        self.last_read = Some(now);
    }

    fn clear(&mut self) {
        self.value = None;
    }
}

/// Runtime state for one attached device.
#[derive(Debug)]
pub struct VariableController {
    table: Arc<MappingRuleTable>,
    slots: Vec<Slot>,
    status: StatusSet,
    data_changed: bool,
    semi_static_interval: Duration,
    max_string_length: Option<usize>,
}

impl VariableController {
    pub fn new(table: Arc<MappingRuleTable>, config: &EngineConfig) -> Self {
        let slots = vec![Slot::default(); table.len()];
        Self {
            table,
            slots,
            status: StatusSet::new(),
            data_changed: false,
            semi_static_interval: config.semi_static_interval(),
            max_string_length: config.max_string_length,
        }
    }

    pub fn table(&self) -> &MappingRuleTable {
        &self.table
    }

    /// Current status set, recomposed at the end of every cycle.
    pub fn status(&self) -> StatusSet {
        self.status
    }

    /// Set by successful writes and commands; cleared by the next init or
    /// full cycle, which then re-reads semi-static rules.
    pub fn data_changed(&self) -> bool {
        self.data_changed
    }

    pub fn poll(&mut self, transport: &mut dyn ReportTransport, mode: PollMode) -> PollReport {
        self.poll_at(transport, mode, Instant::now())
    }

    /// Run one cycle with an explicit clock reading.
    pub fn poll_at(
        &mut self,
        transport: &mut dyn ReportTransport,
        mode: PollMode,
        now: Instant,
    ) -> PollReport {
        let table = Arc::clone(&self.table);
        let mut report = PollReport::new(mode);

        for (index, rule) in table.iter().filter(|(_, rule)| !rule.is_command()) {
            if !self.is_due(index, rule, mode, now) {
                if mode == PollMode::Full {
                    debug!(rule = rule.name, path = rule.hid_path, "semi-static value cached");
                }
                report.skipped += 1;
                continue;
            }
            report.polled += 1;
            if let Err(error) = self.refresh(index, rule, transport, now) {
                report.failures.push(RuleFailure {
                    index,
                    path: rule.hid_path,
                    error,
                });
            }
        }

        if mode != PollMode::Quick {
            self.data_changed = false;
        }
        self.recompose_status();
        debug!(
            ?mode,
            polled = report.polled,
            skipped = report.skipped,
            failures = report.failures.len(),
            status = %self.status,
            "poll cycle complete"
        );
        report
    }

    fn is_due(&self, index: RuleIndex, rule: &MappingRule, mode: PollMode, now: Instant) -> bool {
        match mode {
            PollMode::Init => true,
            PollMode::Quick => rule.flags.contains(AccessFlags::QUICK_POLL),
            PollMode::Full if rule.flags.contains(AccessFlags::SEMI_STATIC) => {
                let last_read = self.slots.get(index).and_then(|slot| slot.last_read);
                match last_read {
                    None => true,
                    Some(_) if self.data_changed => true,
                    Some(at) => now.saturating_duration_since(at) >= self.semi_static_interval,
                }
            }
            PollMode::Full => true,
        }
    }

    /// Read and convert one rule, updating its slot.
    fn refresh(
        &mut self,
        index: RuleIndex,
        rule: &MappingRule,
        transport: &mut dyn ReportTransport,
        now: Instant,
    ) -> Result<(), HidPowerError> {
        let outcome = match transport.read_item(rule.hid_path) {
            Ok(raw) => to_external(raw, rule, &mut *transport).map_err(HidPowerError::from),
            Err(e) => Err(read_error(rule, e)),
        };
        let Some(slot) = self.slots.get_mut(index) else {
            return Ok(());
        };

        match outcome {
            Ok(mut value) => {
                clamp(&mut value, rule, self.max_string_length);
                trace!(rule = rule.name, path = rule.hid_path, %value, "read");
                slot.store(value, now);
                Ok(())
            }
            Err(HidPowerError::Variable(e)) => {
                slot.clear();
                if rule.flags.contains(AccessFlags::ABSENT_BY_DEFAULT) && e.is_absent() {
                    trace!(rule = rule.name, path = rule.hid_path, "optional variable absent");
                } else if matches!(e, VariableError::ConversionMiss { .. }) {
                    warn!(rule = rule.name, path = rule.hid_path, error = %e, "conversion miss");
                } else {
                    debug!(rule = rule.name, path = rule.hid_path, error = %e, "variable absent");
                }
                Err(e.into())
            }
            Err(e) => {
                warn!(rule = rule.name, path = rule.hid_path, error = %e, "read failed, keeping last value");
                Err(e)
            }
        }
    }

    fn recompose_status(&mut self) {
        let slots = &self.slots;
        let summary = compose_status(&self.table, |index, _| {
            match slots.get(index).and_then(|slot| slot.value.as_ref()) {
                Some(ExternalValue::Flag(active)) => Some(f64::from(u8::from(*active))),
                _ => None,
            }
        });
        self.status = summary.tokens;
    }

    /// Cached value of `name`: the first rule carrying the name that
    /// currently holds a value.
    pub fn get(&self, name: &str) -> Option<&ExternalValue> {
        self.table
            .iter()
            .filter(|(_, rule)| rule.is_variable() && rule.name == name)
            .find_map(|(index, _)| self.slots.get(index).and_then(|slot| slot.value.as_ref()))
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every variable that currently holds a value, in table order.
    pub fn variables(&self) -> Vec<(&'static str, &ExternalValue)> {
        self.table
            .variable_names()
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name, value)))
            .collect()
    }

    /// Write an external value to the first rule carrying `name`.
    ///
    /// On success the cache for that rule is updated and the quick-poll
    /// rules of the same subsystem are re-read.
    ///
    /// # Errors
    ///
    /// [`VariableError::UnknownVariable`], any error of
    /// [`to_internal`](crate::translate::to_internal), or a
    /// [`DeviceError::TransportFailure`] from the write itself.
    pub fn set_variable(
        &mut self,
        transport: &mut dyn ReportTransport,
        name: &str,
        value: &str,
    ) -> Result<(), HidPowerError> {
        let table = Arc::clone(&self.table);
        let (index, rule) = table
            .find_variable(name)
            .ok_or_else(|| VariableError::UnknownVariable(name.to_string()))?;
        let raw = to_internal(value, rule)?;

        transport
            .write_item(rule.hid_path, raw)
            .map_err(|e| write_error(rule, e))?;
        info!(variable = name, value, raw, path = rule.hid_path, "variable set");

        let now = Instant::now();
        match to_external(raw, rule, &mut *transport) {
            Ok(mut external) => {
                clamp(&mut external, rule, self.max_string_length);
                if let Some(slot) = self.slots.get_mut(index) {
                    slot.store(external, now);
                }
            }
            Err(e) => debug!(variable = name, error = %e, "written value not cached"),
        }
        self.after_write(transport, rule.subsystem(), now);
        Ok(())
    }

    /// Trigger the instant command `name`.
    ///
    /// # Errors
    ///
    /// [`VariableError::UnknownCommand`], an invalid payload, or a transport
    /// failure from the write.
    pub fn instant_command(
        &mut self,
        transport: &mut dyn ReportTransport,
        name: &str,
    ) -> Result<(), HidPowerError> {
        let table = Arc::clone(&self.table);
        let (_, rule) = table
            .find_command(name)
            .ok_or_else(|| VariableError::UnknownCommand(name.to_string()))?;
        let raw = command_payload(rule)?;

        transport
            .write_item(rule.hid_path, raw)
            .map_err(|e| write_error(rule, e))?;
        info!(command = name, raw, path = rule.hid_path, "instant command sent");

        self.after_write(transport, rule.subsystem(), Instant::now());
        Ok(())
    }

    fn after_write(&mut self, transport: &mut dyn ReportTransport, subsystem: &str, now: Instant) {
        self.data_changed = true;
        let table = Arc::clone(&self.table);
        let related = table.iter().filter(|(_, rule)| {
            rule.flags.contains(AccessFlags::QUICK_POLL)
                && !rule.is_command()
                && rule.subsystem() == subsystem
        });
        for (index, rule) in related {
            if let Err(e) = self.refresh(index, rule, transport, now) {
                debug!(path = rule.hid_path, error = %e, "refresh after write failed");
            }
        }
        self.recompose_status();
    }
}

/// Apply the global string cap to string rules.
fn clamp(value: &mut ExternalValue, rule: &MappingRule, cap: Option<usize>) {
    if let (Some(cap), true, ExternalValue::Text(text)) = (cap, rule.is_string(), value) {
        truncate_to(text, cap);
    }
}

fn read_error(rule: &MappingRule, error: HidCommonError) -> HidPowerError {
    match error {
        e if e.is_not_found() => VariableError::no_match(rule.hid_path).into(),
        HidCommonError::Disconnected => DeviceError::Disconnected.into(),
        e => DeviceError::transport(rule.hid_path, e.to_string()).into(),
    }
}

fn write_error(rule: &MappingRule, error: HidCommonError) -> HidPowerError {
    match error {
        HidCommonError::Disconnected => DeviceError::Disconnected.into(),
        e => DeviceError::transport(rule.hid_path, e.to_string()).into(),
    }
}
