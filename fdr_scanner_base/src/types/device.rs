//! Devices and their threshold violations

use super::criterion::Criterion;
use serde::{Deserialize, Serialize};

/// A criterion together with the observed value that exceeded it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceError {
    pub criterion: Criterion,
    pub value: i64,
}

impl DeviceError {
    pub fn new(criterion: Criterion, value: i64) -> Self {
        Self { criterion, value }
    }
}

/// One enumerated storage device
///
/// `device_type`, `name` and `protocol` come from enumeration; `model` and
/// `serial_number` are filled once the detail query succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "type")]
    pub device_type: String,
    pub name: String,
    pub protocol: String,
    pub model: String,
    pub serial_number: String,
    #[serde(skip)]
    pub duplicate: bool,
    pub errors: Vec<DeviceError>,
}

impl Device {
    pub fn new(device_type: &str, name: &str, protocol: &str) -> Self {
        Self {
            device_type: device_type.to_string(),
            name: name.to_string(),
            protocol: protocol.to_string(),
            model: String::new(),
            serial_number: String::new(),
            duplicate: false,
            errors: Vec::new(),
        }
    }

    /// Same physical unit as `other`
    pub fn same_unit_as(&self, other: &Device) -> bool {
        self.model == other.model && self.serial_number == other.serial_number
    }

    pub fn is_failing(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Devices in enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceCollection {
    devices: Vec<Device>,
}

impl DeviceCollection {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Total number of violations across all devices
    pub fn error_count(&self) -> usize {
        self.devices.iter().map(|d| d.errors.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.devices.iter()
    }

    pub fn failing_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|d| d.is_failing())
    }

    pub fn get(&self, index: usize) -> Option<&Device> {
        self.devices.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Device> {
        self.devices.get_mut(index)
    }

    pub(crate) fn as_slice(&self) -> &[Device] {
        &self.devices
    }

    /// Drop devices flagged as duplicates, keeping relative order
    pub fn remove_duplicates(&mut self) {
        self.devices.retain(|device| !device.duplicate);
    }
}

impl<'a> IntoIterator for &'a DeviceCollection {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}
