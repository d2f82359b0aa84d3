//! Reporting contracts

use crate::types::DeviceCollection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Reporter '{reporter}' failed: {reason}")]
    Delivery { reporter: String, reason: String },

    #[error("Invalid configuration for reporter '{reporter}': {reason}")]
    InvalidConfig { reporter: String, reason: String },

    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A notification backend
///
/// `report` returns whether a message was actually sent.
pub trait Reporter {
    fn name(&self) -> &str;

    fn report(&self, devices: &DeviceCollection) -> Result<bool, ReportError>;
}

/// Overall verdict of an evaluation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Healthy,
    Failing,
}

impl ReportOutcome {
    pub fn from_devices(devices: &DeviceCollection) -> Self {
        if devices.error_count() > 0 {
            ReportOutcome::Failing
        } else {
            ReportOutcome::Healthy
        }
    }
}

/// Decides whether reporters run at all for this outcome
pub trait ReportGate {
    fn should_report(&self, outcome: ReportOutcome) -> Result<bool, ReportError>;
}
