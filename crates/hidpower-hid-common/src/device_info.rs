//! Identity of a connected HID power device

use serde::{Deserialize, Serialize};

/// What the USB layer reports about a device at attach time.
///
/// The string fields are whatever the device self-reports; many units leave
/// some of them empty, which is why profiles carry fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidDeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial_number: Option<String>,
}

impl HidDeviceInfo {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            ..Self::default()
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    /// `vvvv:pppp` in lowercase hex, the form used in advisories and logs.
    pub fn id_string(&self) -> String {
        format!("{:04x}:{:04x}", self.vendor_id, self.product_id)
    }

    /// Non-empty self-reported manufacturer string.
    pub fn manufacturer_str(&self) -> Option<&str> {
        self.manufacturer.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Non-empty self-reported product string.
    pub fn product_str(&self) -> Option<&str> {
        self.product.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Non-empty self-reported serial number.
    pub fn serial_str(&self) -> Option<&str> {
        self.serial_number
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_creation() {
        let info = HidDeviceInfo::new(0x06da, 0xffff);
        assert_eq!(info.vendor_id, 0x06da);
        assert_eq!(info.product_id, 0xffff);
        assert_eq!(info.id_string(), "06da:ffff");
        assert_eq!(info.product_str(), None);
    }

    #[test]
    fn test_blank_product_counts_as_missing() {
        let info = HidDeviceInfo::new(0x06da, 0x0002).with_product("   ");
        assert_eq!(info.product_str(), None);
    }
}
