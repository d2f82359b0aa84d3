//! # Evaluation results
//!
//! [`EvaluationReport`] wraps the final device collection with host and
//! timing metadata for JSON output.

pub mod error;
pub mod types;

pub use error::ResultError;
pub use types::{EvaluationReport, EvaluationSummary, HostContext, TimestampInfo};
