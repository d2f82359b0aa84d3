//! # FDR Scanner SDK
//!
//! Configuration, smartctl wiring and reporters for the `fdr` command.

pub mod app;
pub mod commands;
pub mod config;
pub mod reporters;

pub use app::{run, AppError, RunOptions, RunSummary};
pub use config::{Config, ConfigError, DEFAULT_CONFIG_PATH};
