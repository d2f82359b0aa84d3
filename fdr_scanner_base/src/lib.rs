//! # FDR Scanner Base - Failing Drive Reporter
//!
//! Collects SMART telemetry through `smartctl`, evaluates it against
//! per-protocol thresholds and hands the verdict to reporters.

pub mod execution;
pub mod logging;
pub mod parser;
pub mod reporting;
pub mod resolution;
pub mod results;
pub mod telemetry;
pub mod types;

pub mod prelude {
    pub use crate::execution::{EngineError, Evaluator, ADVISORY_EXIT_CODES};
    pub use crate::logging::{codes, Code, LoggingPreferences};
    pub use crate::parser::{ParseError, TelemetryRecord};
    pub use crate::reporting::{
        AlwaysReport, FailuresOnly, ReportDispatcher, ReportError, ReportGate, ReportOutcome,
        Reporter,
    };
    pub use crate::resolution::{resolve, ResolveError};
    pub use crate::results::{EvaluationReport, HostContext, ResultError};
    pub use crate::telemetry::{
        CommandError, DetailOutput, FixtureSource, SmartctlSource, SystemCommandExecutor,
        TelemetryError, TelemetrySource,
    };
    pub use crate::types::{CriteriaSet, Criterion, Device, DeviceCollection, DeviceError};
}
