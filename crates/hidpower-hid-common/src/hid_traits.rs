//! Report transport trait
//!
//! The USB transport and report-descriptor parser live outside this
//! workspace. They hand the engine decoded items addressed by their dotted
//! HID path (`UPS.PowerSummary.RemainingCapacity`) through this trait.

use crate::{HidCommonError, HidCommonResult, HidDeviceInfo};

/// Synchronous access to the decoded report items of one attached device.
///
/// Implementations must not retry internally; a timeout or stall is returned
/// as an error and the engine reports it for the one item concerned.
pub trait ReportTransport: Send {
    /// Read the current value of the item at `path`.
    fn read_item(&mut self, path: &str) -> HidCommonResult<f64>;

    /// Write `value` to the item at `path` (feature report SET).
    fn write_item(&mut self, path: &str, value: f64) -> HidCommonResult<()>;

    /// Fetch a USB string descriptor by index.
    fn read_string(&mut self, index: u8) -> HidCommonResult<String>;

    fn device_info(&self) -> &HidDeviceInfo;
}

pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// In-memory transport backed by a path → value map.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        info: HidDeviceInfo,
        items: HashMap<String, f64>,
        strings: HashMap<u8, String>,
        failing: HashSet<String>,
        write_history: Vec<(String, f64)>,
        read_log: Vec<String>,
        connected: bool,
    }

    impl MockTransport {
        pub fn new(vendor_id: u16, product_id: u16) -> Self {
            Self::from_info(HidDeviceInfo::new(vendor_id, product_id))
        }

        pub fn from_info(info: HidDeviceInfo) -> Self {
            Self {
                info,
                connected: true,
                ..Self::default()
            }
        }

        pub fn with_item(mut self, path: impl Into<String>, value: f64) -> Self {
            self.set_item(path, value);
            self
        }

        pub fn with_string(mut self, index: u8, value: impl Into<String>) -> Self {
            self.strings.insert(index, value.into());
            self
        }

        pub fn set_item(&mut self, path: impl Into<String>, value: f64) {
            self.items.insert(path.into(), value);
        }

        pub fn remove_item(&mut self, path: &str) {
            self.items.remove(path);
        }

        pub fn item(&self, path: &str) -> Option<f64> {
            self.items.get(path).copied()
        }

        /// Make every read and write of `path` fail with a transport error.
        pub fn fail_item(&mut self, path: impl Into<String>) {
            self.failing.insert(path.into());
        }

        pub fn restore_item(&mut self, path: &str) {
            self.failing.remove(path);
        }

        pub fn write_history(&self) -> &[(String, f64)] {
            &self.write_history
        }

        /// Number of reads issued against `path` so far.
        pub fn read_count(&self, path: &str) -> usize {
            self.read_log.iter().filter(|p| p.as_str() == path).count()
        }

        pub fn clear_reads(&mut self) {
            self.read_log.clear();
        }

        pub fn disconnect(&mut self) {
            self.connected = false;
        }

        pub fn reconnect(&mut self) {
            self.connected = true;
        }

        fn check(&self, path: &str, write: bool) -> HidCommonResult<()> {
            if !self.connected {
                return Err(HidCommonError::Disconnected);
            }
            if self.failing.contains(path) {
                let message = "injected failure".to_string();
                let path = path.to_string();
                return Err(if write {
                    HidCommonError::WriteError { path, message }
                } else {
                    HidCommonError::ReadError { path, message }
                });
            }
            Ok(())
        }
    }

    impl ReportTransport for MockTransport {
        fn read_item(&mut self, path: &str) -> HidCommonResult<f64> {
            self.read_log.push(path.to_string());
            self.check(path, false)?;
            self.items
                .get(path)
                .copied()
                .ok_or_else(|| HidCommonError::ItemNotFound(path.to_string()))
        }

        fn write_item(&mut self, path: &str, value: f64) -> HidCommonResult<()> {
            self.check(path, true)?;
            self.write_history.push((path.to_string(), value));
            self.items.insert(path.to_string(), value);
            Ok(())
        }

        fn read_string(&mut self, index: u8) -> HidCommonResult<String> {
            if !self.connected {
                return Err(HidCommonError::Disconnected);
            }
            self.strings
                .get(&index)
                .cloned()
                .ok_or(HidCommonError::StringNotFound(index))
        }

        fn device_info(&self) -> &HidDeviceInfo {
            &self.info
        }
    }
}
