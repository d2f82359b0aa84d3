//! In-memory telemetry source
//!
//! Replays captured smartctl documents instead of running the tool. Used by
//! the test suites and for offline evaluation of saved output.

use super::source::{DetailOutput, TelemetryError, TelemetrySource};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct FixtureSource {
    scan: String,
    details: HashMap<String, DetailOutput>,
    queried: RefCell<Vec<String>>,
}

impl FixtureSource {
    pub fn new(scan: impl Into<String>) -> Self {
        Self {
            scan: scan.into(),
            ..Self::default()
        }
    }

    /// Register the detail document returned for `device_name`
    pub fn with_detail(
        mut self,
        device_name: impl Into<String>,
        raw: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        self.details
            .insert(device_name.into(), DetailOutput::new(raw, exit_code));
        self
    }

    /// Device names passed to `fetch_detail`, in call order
    pub fn queried_devices(&self) -> Vec<String> {
        self.queried.borrow().clone()
    }
}

impl TelemetrySource for FixtureSource {
    fn source_id(&self) -> &str {
        "fixture"
    }

    fn enumerate(&self) -> Result<String, TelemetryError> {
        Ok(self.scan.clone())
    }

    fn fetch_detail(
        &self,
        _device_type: &str,
        device_name: &str,
    ) -> Result<DetailOutput, TelemetryError> {
        self.queried.borrow_mut().push(device_name.to_string());

        self.details
            .get(device_name)
            .cloned()
            .ok_or_else(|| TelemetryError::UnknownDevice {
                device: device_name.to_string(),
            })
    }
}
