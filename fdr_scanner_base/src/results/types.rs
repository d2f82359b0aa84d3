//! Serializable outcome of one evaluation run

use super::error::ResultError;
use crate::types::DeviceCollection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete evaluation report for one host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub host: HostContext,
    pub timestamp: TimestampInfo,
    pub summary: EvaluationSummary,

    /// Surviving devices after deduplication, violations included
    pub devices: DeviceCollection,
}

/// Host the drives were evaluated on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostContext {
    pub hostname: String,

    /// Operating system and architecture
    pub os_info: String,
}

/// Evaluation timestamps (RFC 3339 when serialized)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampInfo {
    pub scan_start: DateTime<Utc>,
    pub scan_end: DateTime<Utc>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub device_count: usize,
    pub error_count: usize,
    pub failing_devices: usize,

    /// No device has a violation
    pub passed: bool,
}

impl HostContext {
    pub fn from_system() -> Self {
        Self {
            hostname: hostname::get()
                .unwrap_or_else(|_| std::ffi::OsString::from("unknown"))
                .to_string_lossy()
                .to_string(),
            os_info: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }

    pub fn new(hostname: String, os_info: String) -> Self {
        Self { hostname, os_info }
    }
}

impl EvaluationSummary {
    pub fn from_devices(devices: &DeviceCollection) -> Self {
        let failing_devices = devices.failing_devices().count();

        Self {
            device_count: devices.len(),
            error_count: devices.error_count(),
            failing_devices,
            passed: failing_devices == 0,
        }
    }
}

impl EvaluationReport {
    /// Start a report; the clock runs until [`finalize`](Self::finalize)
    pub fn new(host: HostContext) -> Self {
        let now = Utc::now();

        Self {
            host,
            timestamp: TimestampInfo {
                scan_start: now,
                scan_end: now,
                duration_ms: 0,
            },
            summary: EvaluationSummary::default(),
            devices: DeviceCollection::default(),
        }
    }

    /// Record the final devices and stop the clock
    pub fn finalize(&mut self, devices: DeviceCollection) {
        self.timestamp.scan_end = Utc::now();
        self.timestamp.duration_ms = (self.timestamp.scan_end - self.timestamp.scan_start)
            .num_milliseconds()
            .max(0) as u64;
        self.summary = EvaluationSummary::from_devices(&devices);
        self.devices = devices;
    }

    pub fn passed(&self) -> bool {
        self.summary.passed
    }

    pub fn to_json(&self) -> Result<String, ResultError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ResultError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ResultError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Criterion, Device, DeviceError};

    fn devices() -> DeviceCollection {
        let healthy = Device::new("nvme", "/dev/nvme0", "NVMe");
        let mut failing = Device::new("sat", "/dev/sda", "ATA");
        failing.model = "WDC WD40EFRX".to_string();
        failing.serial_number = "WD-1".to_string();
        failing.errors.push(DeviceError::new(
            Criterion::new("ATA", "ata_smart_attributes", 0)
                .with_id(5)
                .with_label("Reallocated sectors"),
            12,
        ));

        DeviceCollection::new(vec![healthy, failing])
    }

    #[test]
    fn test_finalize_summary() {
        let mut report = EvaluationReport::new(HostContext::new(
            "nas01".to_string(),
            "linux x86_64".to_string(),
        ));
        report.finalize(devices());

        assert_eq!(
            report.summary,
            EvaluationSummary {
                device_count: 2,
                error_count: 1,
                failing_devices: 1,
                passed: false,
            }
        );
        assert!(!report.passed());
        assert!(report.timestamp.scan_end >= report.timestamp.scan_start);
    }

    #[test]
    fn test_json_shape() {
        let mut report = EvaluationReport::new(HostContext::new(
            "nas01".to_string(),
            "linux x86_64".to_string(),
        ));
        report.finalize(devices());

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["host"]["hostname"], "nas01");
        assert_eq!(value["devices"][1]["type"], "sat");
        assert_eq!(value["devices"][1]["errors"][0]["value"], 12);
        assert_eq!(value["devices"][1]["errors"][0]["criterion"]["id"], 5);
        assert!(value["devices"][1].get("duplicate").is_none());
        assert_eq!(value["summary"]["passed"], false);
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut report = EvaluationReport::new(HostContext::from_system());
        report.finalize(DeviceCollection::default());
        report.write_json(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"passed\": true"));

        let missing_dir = dir.path().join("missing").join("report.json");
        assert!(matches!(
            report.write_json(&missing_dir),
            Err(ResultError::Write { .. })
        ));
    }
}
