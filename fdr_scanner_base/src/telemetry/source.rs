//! Telemetry source contract

use super::command_executor::CommandError;

/// Raw per-device detail as returned by the diagnostic tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailOutput {
    /// Structured (JSON) document written by the tool
    pub raw: String,

    /// Process exit code; non-zero values are classified by the engine
    pub exit_code: i32,
}

impl DetailOutput {
    pub fn new(raw: impl Into<String>, exit_code: i32) -> Self {
        Self {
            raw: raw.into(),
            exit_code,
        }
    }
}

/// Errors raised when the diagnostic tool cannot be used at all
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("{0}")]
    Command(#[from] CommandError),

    #[error("'{command}' exited with code {exit_code} without output: {stderr}")]
    NoOutput {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("No telemetry fixture for device '{device}'")]
    UnknownDevice { device: String },
}

/// Source of raw device telemetry
///
/// `enumerate` lists devices, `fetch_detail` queries one device. Only a real
/// invocation failure is an error; a non-zero exit code is reported through
/// [`DetailOutput::exit_code`].
pub trait TelemetrySource {
    /// Source identifier for logging
    fn source_id(&self) -> &str;

    fn enumerate(&self) -> Result<String, TelemetryError>;

    fn fetch_detail(
        &self,
        device_type: &str,
        device_name: &str,
    ) -> Result<DetailOutput, TelemetryError>;
}

impl<T: TelemetrySource + ?Sized> TelemetrySource for Box<T> {
    fn source_id(&self) -> &str {
        (**self).source_id()
    }

    fn enumerate(&self) -> Result<String, TelemetryError> {
        (**self).enumerate()
    }

    fn fetch_detail(
        &self,
        device_type: &str,
        device_name: &str,
    ) -> Result<DetailOutput, TelemetryError> {
        (**self).fetch_detail(device_type, device_name)
    }
}
