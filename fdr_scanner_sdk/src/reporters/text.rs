//! Plain text reporter
//!
//! Writes the verdict to stdout, or appends it to the file named by the
//! optional `output` key.

use fdr_scanner_base::reporting::{ReportError, Reporter};
use fdr_scanner_base::results::HostContext;
use fdr_scanner_base::types::DeviceCollection;
use std::io::Write;
use std::path::PathBuf;

pub const TEXT_REPORTER_TYPE: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReporter {
    name: String,
    error_header: String,
    error_footer: String,
    output: Option<PathBuf>,
}

impl TextReporter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            error_header: String::new(),
            error_footer: String::new(),
            output: None,
        }
    }

    pub fn with_error_header(mut self, header: &str) -> Self {
        self.error_header = header.to_string();
        self
    }

    pub fn with_error_footer(mut self, footer: &str) -> Self {
        self.error_footer = footer.to_string();
        self
    }

    pub fn with_output(mut self, path: PathBuf) -> Self {
        self.output = Some(path);
        self
    }

    /// Build from a `[[reporters]]` table
    pub fn from_table(table: &toml::Table) -> Result<Self, ReportError> {
        let name = optional_string(table, "name")?.unwrap_or_else(|| TEXT_REPORTER_TYPE.to_string());
        let mut reporter = Self::new(&name);

        if let Some(header) = optional_string(table, "error_header")? {
            reporter.error_header = header;
        }
        if let Some(footer) = optional_string(table, "error_footer")? {
            reporter.error_footer = footer;
        }
        reporter.output = optional_string(table, "output")?.map(PathBuf::from);

        Ok(reporter)
    }

    /// Message for `devices` as seen on `hostname` at `timestamp`
    pub fn render(&self, devices: &DeviceCollection, hostname: &str, timestamp: &str) -> String {
        let failing = devices.error_count() > 0;
        let mut message = String::new();

        if failing && !self.error_header.is_empty() {
            message.push_str(&self.error_header);
            message.push('\n');
        }

        message.push_str(&format!("{} on {}\n", timestamp, hostname));

        if !failing {
            message.push_str(&format!("{} drives found\n", devices.len()));
            return message;
        }

        message.push_str("Failing drives\n");
        for device in devices.failing_devices() {
            message.push_str(&format!(
                "* {} ({}) on {}\n",
                device.model, device.serial_number, device.name
            ));
            for error in &device.errors {
                message.push_str(&format!(
                    "Error: {} at {} (max:{})\n",
                    error.criterion.display_label(),
                    error.value,
                    error.criterion.max
                ));
            }
        }

        if !self.error_footer.is_empty() {
            message.push('\n');
            message.push_str(&self.error_footer);
            message.push('\n');
        }

        message
    }

    fn write(&self, message: &str) -> Result<(), ReportError> {
        match &self.output {
            Some(path) => {
                let mut file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                file.write_all(message.as_bytes())?;
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(message.as_bytes())?;
                handle.flush()?;
            }
        }
        Ok(())
    }
}

impl Reporter for TextReporter {
    fn name(&self) -> &str {
        &self.name
    }

    fn report(&self, devices: &DeviceCollection) -> Result<bool, ReportError> {
        let hostname = HostContext::from_system().hostname;
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();

        self.write(&self.render(devices, &hostname, &timestamp))?;
        Ok(true)
    }
}

fn optional_string(table: &toml::Table, key: &str) -> Result<Option<String>, ReportError> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ReportError::InvalidConfig {
            reporter: TEXT_REPORTER_TYPE.to_string(),
            reason: format!("'{}' must be a string", key),
        }),
    }
}
