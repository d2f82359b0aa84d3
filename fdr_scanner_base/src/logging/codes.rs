//! Log codes and their classification
//!
//! Single source of truth for every code the scanner emits, together with the
//! category and description used by structured output.

use std::fmt;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Diagnostic tool and telemetry codes
pub mod telemetry {
    use super::Code;

    pub const TOOL_UNAVAILABLE: Code = Code::new("E010");
    pub const TOOL_FAILED: Code = Code::new("E011");
    pub const ADVISORY_EXIT_CODE: Code = Code::new("W012");
    pub const MALFORMED_TELEMETRY: Code = Code::new("E013");
    pub const EMPTY_ENUMERATION: Code = Code::new("W014");
}

/// Criteria evaluation codes
pub mod evaluation {
    use super::Code;

    pub const MISSING_CRITERION: Code = Code::new("E030");
    pub const UNKNOWN_PROTOCOL: Code = Code::new("E031");
    pub const NO_TELEMETRY_DATA: Code = Code::new("E032");
    pub const THRESHOLD_EXCEEDED: Code = Code::new("W033");
    pub const DUPLICATE_DEVICE: Code = Code::new("I034");
}

/// Configuration codes
pub mod config {
    use super::Code;

    pub const CONFIG_LOAD_FAILED: Code = Code::new("E050");
    pub const INVALID_CONFIG: Code = Code::new("E051");
}

/// Reporting codes
pub mod reporting {
    use super::Code;

    pub const REPORT_FAILED: Code = Code::new("E070");
    pub const OUTPUT_WRITE_FAILED: Code = Code::new("E071");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const ENUMERATION_COMPLETE: Code = Code::new("I002");
    pub const EVALUATION_COMPLETE: Code = Code::new("I003");
    pub const REPORT_SENT: Code = Code::new("I004");
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Category a code belongs to, derived from its numeric range
pub fn get_category(code: &str) -> &'static str {
    if code.starts_with("ERR") {
        return "System";
    }

    let number: u32 = code
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .unwrap_or(0);

    match number {
        1..=9 => "Lifecycle",
        10..=29 => "Telemetry",
        30..=49 => "Evaluation",
        50..=69 => "Configuration",
        70..=89 => "Reporting",
        _ => "General",
    }
}

/// Human readable description of a code
pub fn get_description(code: &str) -> &'static str {
    match code {
        "ERR001" => "Internal scanner error",
        "ERR002" => "Scanner initialization failed",
        "E010" => "Diagnostic tool could not be executed",
        "E011" => "Diagnostic tool reported a failure",
        "W012" => "Diagnostic tool returned an advisory exit code",
        "E013" => "Telemetry is missing a required field",
        "W014" => "Device enumeration returned no devices",
        "E030" => "Criterion value not present in telemetry",
        "E031" => "No criteria configured for device protocol",
        "E032" => "No criterion could be read for device",
        "W033" => "Device exceeds a configured threshold",
        "I034" => "Device already seen under another path",
        "E050" => "Configuration file could not be loaded",
        "E051" => "Configuration content is invalid",
        "E070" => "Reporter failed to deliver report",
        "E071" => "Result file could not be written",
        "I001" => "Logging system initialized",
        "I002" => "Device enumeration completed",
        "I003" => "Device evaluation completed",
        "I004" => "Report delivered",
        _ => "Unknown code",
    }
}
