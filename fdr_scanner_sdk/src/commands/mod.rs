//! Command executor configurations
//!
//! Provides whitelisted command executors for telemetry collection.

pub mod smartctl;

pub use smartctl::{create_smartctl_command_executor, create_smartctl_source};
