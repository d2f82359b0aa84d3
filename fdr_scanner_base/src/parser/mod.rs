//! # Record Parser
//!
//! Extracts typed fields from smartctl JSON documents without a fixed schema.
//! Absent optional data is reported as absence; only required fields produce
//! a [`ParseError`].

pub mod error;
pub mod record;

pub use error::ParseError;
pub use record::TelemetryRecord;

use crate::logging::codes;
use crate::log_warning;
use crate::types::Device;
use serde_json::Value;
use std::collections::HashSet;

const SCAN_CONTEXT: &str = "device scan";

/// Build the device list from `--scan-open` output
///
/// Every descriptor must carry string `type`, `name` and `protocol`; the
/// first incomplete descriptor aborts the whole parse. Devices whose protocol
/// is in `ignored_protocols` are dropped here.
pub fn parse_enumeration(
    raw: &str,
    ignored_protocols: &HashSet<String>,
) -> Result<Vec<Device>, ParseError> {
    let record = TelemetryRecord::parse(raw, SCAN_CONTEXT)?;

    let descriptors = match record.get(&["devices"]) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ParseError::unexpected_type(
                SCAN_CONTEXT,
                "devices",
                "an array",
            ))
        }
        None => {
            log_warning!(
                codes::telemetry::EMPTY_ENUMERATION,
                "Scan output has no device list"
            );
            return Ok(Vec::new());
        }
    };

    let mut devices = Vec::with_capacity(descriptors.len());

    for (index, descriptor) in descriptors.iter().enumerate() {
        let context = format!("device descriptor {}", index);
        let device_type = required_str(descriptor, "type", &context)?;
        let name = required_str(descriptor, "name", &context)?;
        let protocol = required_str(descriptor, "protocol", &context)?;

        if ignored_protocols.contains(protocol) {
            continue;
        }

        devices.push(Device::new(device_type, name, protocol));
    }

    Ok(devices)
}

/// Model name and serial number of a detail document
pub fn parse_device_info(record: &TelemetryRecord) -> Result<(String, String), ParseError> {
    let context = "device detail";
    let model = required_str(record.as_json_value(), "model_name", context)?;
    let serial = required_str(record.as_json_value(), "serial_number", context)?;

    Ok((model.to_string(), serial.to_string()))
}

/// Messages the tool attached to its output, joined with "; "
///
/// Best effort: returns an empty string when there are none.
pub fn parse_tool_error_message(record: &TelemetryRecord) -> String {
    let messages = match record.get(&["smartctl", "messages"]) {
        Some(Value::Array(items)) => items,
        _ => return String::new(),
    };

    messages
        .iter()
        .filter_map(|message| message.get("string").and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Existence check that never fails
pub fn has_path(record: &TelemetryRecord, path: &[&str]) -> bool {
    record.has_path(path)
}

fn required_str<'a>(value: &'a Value, field: &str, context: &str) -> Result<&'a str, ParseError> {
    match value.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ParseError::unexpected_type(context, field, "a string")),
        None => Err(ParseError::missing_field(context, field)),
    }
}
