//! Errors for malformed telemetry

/// Required data absent from, or of the wrong shape in, tool output
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid JSON in {context}: {reason}")]
    InvalidJson { context: String, reason: String },

    #[error("Missing required field '{field}' in {context}")]
    MissingField { context: String, field: String },

    #[error("Field '{field}' in {context} is not {expected}")]
    UnexpectedType {
        context: String,
        field: String,
        expected: &'static str,
    },
}

impl ParseError {
    pub fn missing_field(context: &str, field: &str) -> Self {
        Self::MissingField {
            context: context.to_string(),
            field: field.to_string(),
        }
    }

    pub fn unexpected_type(context: &str, field: &str, expected: &'static str) -> Self {
        Self::UnexpectedType {
            context: context.to_string(),
            field: field.to_string(),
            expected,
        }
    }
}
