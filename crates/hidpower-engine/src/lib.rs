//! Table-driven translation engine for HID power devices (UPS units).
//!
//! A vendor profile supplies three static tables: which devices it claims
//! ([`DeviceIdentityTable`]), what its report usages are called
//! ([`UsageTableSet`]), and how report items map to named monitoring
//! variables, status tokens and instant commands ([`MappingRuleTable`]).
//! The engine does the rest:
//!
//! - [`identity`]: support classification and claiming
//! - [`usage`]: usage code ⇄ symbolic path resolution
//! - [`rules`]: mapping rule declaration and validation
//! - [`convert`] / [`translate`]: raw ⇄ external value conversion
//! - [`status`]: status-set derivation
//! - [`access`]: the per-device [`VariableController`] (polling, writes, commands)
//! - [`profile`]: the [`PowerDeviceProfile`] trait, [`attach`] and [`select_profile`]
//!
//! The USB transport and the report-descriptor parser are external; they are
//! reached through [`hidpower_hid_common::ReportTransport`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod access;
pub mod config;
pub mod convert;
pub mod identity;
pub mod profile;
pub mod rules;
pub mod status;
pub mod translate;
pub mod usage;

pub use access::{PollMode, PollReport, RuleFailure, VariableController};
pub use config::EngineConfig;
pub use convert::{Converter, StatusToken};
pub use identity::{
    Advisory, AdvisorySink, ClaimOptions, ClaimResult, CollectingAdvisorySink, DeviceIdentity,
    DeviceIdentityTable, LogAdvisorySink, ProductMatch, claim_device, classify,
};
pub use profile::{AttachedDevice, DeviceIdentification, PowerDeviceProfile, attach, select_profile};
pub use rules::{AccessFlags, MappingRule, MappingRuleTable, RuleIndex, STATUS_RULE_NAME, ValueFormat, find_rules};
pub use status::{StatusSet, StatusSummary, compose_status, derive_status};
pub use translate::{ExternalValue, NoStrings, StringSource, command_payload, to_external, to_internal};
pub use usage::{PathSegment, UsageEntry, UsageTable, UsageTableSet, resolve};
