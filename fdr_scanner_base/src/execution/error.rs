//! Fatal evaluation errors

use crate::logging::{codes, Code};
use crate::parser::ParseError;
use crate::resolution::ResolveError;
use crate::telemetry::{CommandError, TelemetryError};

/// Any of these aborts the whole evaluation run
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The tool ran but exited with a code that is not advisory
    #[error("smartctl failed on {device} with exit code {code}: {message}")]
    ExternalTool {
        device: String,
        code: i32,
        message: String,
    },

    /// The tool could not be run at all
    #[error("Telemetry source failure: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Malformed telemetry for {context}: {reason}")]
    MalformedTelemetry { context: String, reason: String },

    #[error("Criterion '{key}.{name}' not found for device {device}")]
    MissingCriterion {
        device: String,
        key: String,
        name: String,
    },

    #[error("No criteria configured for protocol '{protocol}' of device {device}")]
    UnknownProtocol { device: String, protocol: String },

    #[error("No criterion of protocol '{protocol}' could be read from device {device}")]
    NoTelemetryData { device: String, protocol: String },
}

impl EngineError {
    pub fn malformed(context: &str, error: ParseError) -> Self {
        EngineError::MalformedTelemetry {
            context: context.to_string(),
            reason: error.to_string(),
        }
    }

    /// Attach the device name to a resolver failure
    pub fn from_resolve(device: &str, error: ResolveError) -> Self {
        match error {
            ResolveError::MissingCriterion { key, name } => EngineError::MissingCriterion {
                device: device.to_string(),
                key,
                name,
            },
            ResolveError::Malformed(parse_error) => Self::malformed(device, parse_error),
        }
    }

    /// Log code matching this error
    pub fn code(&self) -> Code {
        match self {
            EngineError::ExternalTool { .. } => codes::telemetry::TOOL_FAILED,
            EngineError::Telemetry(TelemetryError::Command(
                CommandError::ProgramNotFound { .. } | CommandError::PermissionDenied { .. },
            )) => codes::telemetry::TOOL_UNAVAILABLE,
            EngineError::Telemetry(_) => codes::telemetry::TOOL_FAILED,
            EngineError::MalformedTelemetry { .. } => codes::telemetry::MALFORMED_TELEMETRY,
            EngineError::MissingCriterion { .. } => codes::evaluation::MISSING_CRITERION,
            EngineError::UnknownProtocol { .. } => codes::evaluation::UNKNOWN_PROTOCOL,
            EngineError::NoTelemetryData { .. } => codes::evaluation::NO_TELEMETRY_DATA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_errors_carry_device() {
        let missing = ResolveError::MissingCriterion {
            key: "nvme_smart_health_information_log".to_string(),
            name: "media_errors".to_string(),
        };

        match EngineError::from_resolve("/dev/nvme0", missing) {
            EngineError::MissingCriterion { device, name, .. } => {
                assert_eq!(device, "/dev/nvme0");
                assert_eq!(name, "media_errors");
            }
            other => panic!("Expected MissingCriterion, got {:?}", other),
        }

        let malformed = ResolveError::Malformed(ParseError::missing_field("attrs.table row 0", "raw.value"));
        let error = EngineError::from_resolve("/dev/sda", malformed);
        assert_eq!(error.code(), codes::telemetry::MALFORMED_TELEMETRY);
        assert!(error.to_string().contains("raw.value"));
    }

    #[test]
    fn test_error_codes() {
        let unavailable = EngineError::Telemetry(TelemetryError::Command(
            CommandError::ProgramNotFound {
                program: "smartctl".to_string(),
            },
        ));
        assert_eq!(unavailable.code(), codes::telemetry::TOOL_UNAVAILABLE);

        let unknown = EngineError::UnknownProtocol {
            device: "/dev/sda".to_string(),
            protocol: "SCSI".to_string(),
        };
        assert_eq!(unknown.code(), codes::evaluation::UNKNOWN_PROTOCOL);
    }
}
