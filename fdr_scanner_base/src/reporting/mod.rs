//! # Reporting boundary
//!
//! Reporters deliver the final verdict; a [`ReportGate`] decides whether they
//! run for a given outcome.

pub mod dispatch;
pub mod gate;
pub mod traits;

pub use dispatch::ReportDispatcher;
pub use gate::{AlwaysReport, FailuresOnly};
pub use traits::{ReportError, ReportGate, ReportOutcome, Reporter};
