//! smartctl backed telemetry source

use super::command_executor::SystemCommandExecutor;
use super::source::{DetailOutput, TelemetryError, TelemetrySource};
use crate::{log_debug, log_info};

pub const SMARTCTL_PROGRAM: &str = "smartctl";

/// Queries smartmontools in JSON mode through a whitelisted executor
#[derive(Debug, Clone)]
pub struct SmartctlSource {
    executor: SystemCommandExecutor,
    program: String,
    debug_dump: bool,
}

impl SmartctlSource {
    /// The executor must already allow `smartctl`
    pub fn new(executor: SystemCommandExecutor) -> Self {
        Self {
            executor,
            program: SMARTCTL_PROGRAM.to_string(),
            debug_dump: false,
        }
    }

    /// Run `program` instead of `smartctl`; the executor must allow it
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Also run the human readable variant of every query and log it at debug level
    pub fn with_debug_dump(mut self, enabled: bool) -> Self {
        self.debug_dump = enabled;
        self
    }

    pub fn scan_args() -> Vec<&'static str> {
        vec!["--scan-open", "--json"]
    }

    pub fn detail_args<'a>(device_type: &'a str, device_name: &'a str) -> Vec<&'a str> {
        vec!["--all", "--json", "--device", device_type, device_name]
    }

    fn dump_human_readable(&self, args: &[&str]) {
        if !self.debug_dump {
            return;
        }

        let command_line = format!("{} {}", self.program, args.join(" "));
        log_debug!("Running diagnostic command", "command" => &command_line);

        match self.executor.execute(&self.program, args, None) {
            Ok(output) => {
                log_debug!(&output.stdout, "command" => &command_line, "exit_code" => output.exit_code)
            }
            Err(e) => log_debug!("Diagnostic dump failed", "command" => &command_line, "error" => e),
        }
    }
}

impl TelemetrySource for SmartctlSource {
    fn source_id(&self) -> &str {
        &self.program
    }

    fn enumerate(&self) -> Result<String, TelemetryError> {
        self.dump_human_readable(&["--scan-open"]);

        let args = Self::scan_args();
        log_info!("Enumerating devices", "command" => format!("{} {}", self.program, args.join(" ")));
        let output = self.executor.execute(&self.program, &args, None)?;

        if !output.success() && output.stdout.trim().is_empty() {
            return Err(TelemetryError::NoOutput {
                command: format!("{} {}", self.program, args.join(" ")),
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    fn fetch_detail(
        &self,
        device_type: &str,
        device_name: &str,
    ) -> Result<DetailOutput, TelemetryError> {
        self.dump_human_readable(&["--all", "--device", device_type, device_name]);

        let args = Self::detail_args(device_type, device_name);
        let output = self.executor.execute(&self.program, &args, None)?;

        log_debug!(
            "Device detail retrieved",
            "device" => device_name,
            "exit_code" => output.exit_code,
            "bytes" => output.stdout.len(),
            "duration_ms" => output.duration.as_millis()
        );

        Ok(DetailOutput::new(output.stdout, output.exit_code))
    }
}
