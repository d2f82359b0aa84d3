//! # FDR CLI
//!
//! Evaluates every drive smartctl can see and reports failing ones.

use clap::Parser;
use fdr_scanner_base::logging::{self, codes};
use fdr_scanner_base::{log_info, log_success};
use fdr_scanner_sdk::commands::create_smartctl_source;
use fdr_scanner_sdk::{run, AppError, Config, RunOptions, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

/// Failing drive reporter: checks SMART attributes against thresholds.
#[derive(Parser, Debug)]
#[command(name = "fdr", version, about)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Also write the evaluation report as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Report even when the configuration would suppress it
    #[arg(short, long)]
    force: bool,

    /// Debug logging and smartctl output dumps
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(&cli) {
        logging::safe_log_error(e.code(), &e.to_string());
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<(), AppError> {
    let config = Config::load(&cli.config)?;

    if let Err(e) = logging::init_global_logging(&config.logging_preferences(cli.debug)) {
        eprintln!("Warning: logging unavailable: {}", e);
    }
    log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "fdr starting",
        "version" => env!("CARGO_PKG_VERSION"),
        "config" => cli.config.display()
    );

    let source = create_smartctl_source(
        &config.smart.smartctl_path,
        config.smart.command_timeout,
        config.debug_enabled(cli.debug),
    );
    let options = RunOptions {
        json_output: cli.json.clone(),
        force: cli.force,
    };

    let summary = run(&config, source, &options)?;

    println!(
        "{} devices and {} errors detected",
        summary.report.summary.device_count, summary.report.summary.error_count
    );
    for name in &summary.sent {
        println!("Report sent to {}", name);
    }

    log_info!(
        "fdr finished",
        "passed" => summary.report.passed(),
        "duration_ms" => summary.report.timestamp.duration_ms
    );

    Ok(())
}
