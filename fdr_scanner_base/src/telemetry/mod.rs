//! # Telemetry collection
//!
//! Whitelisted command execution and the sources that feed raw device
//! telemetry into the evaluation engine.

pub mod command_executor;
pub mod fixture;
pub mod smartctl;
pub mod source;

pub use command_executor::{CommandError, CommandOutput, SystemCommandExecutor};
pub use fixture::FixtureSource;
pub use smartctl::{SmartctlSource, SMARTCTL_PROGRAM};
pub use source::{DetailOutput, TelemetryError, TelemetrySource};
