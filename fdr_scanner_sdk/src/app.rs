//! One complete fdr run: evaluate, save, report

use crate::config::{Config, ConfigError};
use crate::reporters::ReporterRegistry;
use fdr_scanner_base::execution::{EngineError, Evaluator};
use fdr_scanner_base::logging::codes;
use fdr_scanner_base::reporting::{
    AlwaysReport, FailuresOnly, ReportDispatcher, ReportError, ReportGate,
};
use fdr_scanner_base::results::{EvaluationReport, HostContext, ResultError};
use fdr_scanner_base::telemetry::TelemetrySource;
use fdr_scanner_base::{log_info, log_success};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Output(#[from] ResultError),
}

impl AppError {
    pub fn code(&self) -> fdr_scanner_base::logging::Code {
        match self {
            AppError::Config(ConfigError::Read { .. }) => codes::config::CONFIG_LOAD_FAILED,
            AppError::Config(_) => codes::config::INVALID_CONFIG,
            AppError::Engine(e) => e.code(),
            AppError::Report(_) => codes::reporting::REPORT_FAILED,
            AppError::Output(_) => codes::reporting::OUTPUT_WRITE_FAILED,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Write the evaluation report as JSON here
    pub json_output: Option<PathBuf>,

    /// Report regardless of outcome
    pub force: bool,
}

/// Result of a run as shown to the user
#[derive(Debug)]
pub struct RunSummary {
    pub report: EvaluationReport,

    /// Reporters that sent a message
    pub sent: Vec<String>,
}

/// Evaluate all drives from `source` and dispatch the verdict
pub fn run<S: TelemetrySource>(
    config: &Config,
    source: S,
    options: &RunOptions,
) -> Result<RunSummary, AppError> {
    // Reporters are built first so a bad reporter table fails before any
    // device is queried
    let registry = ReporterRegistry::with_builtin();
    let mut dispatcher = ReportDispatcher::new(report_gate(config, options.force));
    for reporter in registry.build_all(&config.reporters)? {
        dispatcher.add_reporter(reporter);
    }

    log_info!(
        "Starting drive evaluation",
        "protocols" => config.criteria_set().protocols().join(","),
        "criteria" => config.smart.criteria.len(),
        "reporters" => dispatcher.reporter_count()
    );

    let mut report = EvaluationReport::new(HostContext::from_system());
    let evaluator = Evaluator::new(source, config.criteria_set(), config.ignored_protocols());
    let devices = evaluator.run()?;
    report.finalize(devices);

    if let Some(path) = &options.json_output {
        report.write_json(path)?;
        log_success!(
            codes::success::REPORT_SENT,
            "JSON report written",
            "path" => path.display()
        );
    }

    let sent = dispatcher.dispatch(&report.devices)?;

    Ok(RunSummary { report, sent })
}

fn report_gate(config: &Config, force: bool) -> Box<dyn ReportGate> {
    if force || config.general.report_healthy {
        Box::new(AlwaysReport)
    } else {
        Box::new(FailuresOnly)
    }
}
