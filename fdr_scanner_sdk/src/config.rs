//! # Configuration file
//!
//! ```toml
//! [general]
//! verbose = true
//!
//! [smart]
//! ignored_protocols = ["SCSI"]
//! command_timeout = "90s"
//! smartctl_path = "/usr/local/sbin/smartctl"
//!
//! [[smart.criteria]]
//! protocol = "ATA"
//! key = "ata_smart_attributes"
//! id = 5
//! label = "Reallocated sectors"
//! max = 0
//!
//! [[reporters]]
//! type = "text"
//! name = "console"
//! ```

use fdr_scanner_base::logging::LoggingPreferences;
use fdr_scanner_base::telemetry::SMARTCTL_PROGRAM;
use fdr_scanner_base::types::{CriteriaSet, Criterion};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "fdr.toml";

const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {reason}")]
    Invalid { reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    pub smart: SmartConfig,

    /// Raw reporter tables; each needs a `type` tag
    #[serde(default)]
    pub reporters: Vec<toml::Table>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub debug: bool,

    /// Also report runs without violations
    #[serde(default = "default_true")]
    pub report_healthy: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
            report_healthy: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmartConfig {
    #[serde(default)]
    pub ignored_protocols: Vec<String>,

    /// Upper bound for one smartctl invocation, e.g. "60s" or "2m"
    #[serde(
        default = "default_command_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub command_timeout: Duration,

    /// Program name or absolute path of the smartctl binary
    #[serde(default = "default_smartctl_path")]
    pub smartctl_path: String,

    pub criteria: Vec<Criterion>,
}

fn default_true() -> bool {
    true
}

fn default_command_timeout() -> Duration {
    DEFAULT_COMMAND_TIMEOUT
}

fn default_smartctl_path() -> String {
    SMARTCTL_PROGRAM.to_string()
}

fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.smart.criteria.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "smart.criteria is empty".to_string(),
            });
        }

        for (index, criterion) in self.smart.criteria.iter().enumerate() {
            if criterion.protocol.is_empty() || criterion.key.is_empty() {
                return Err(ConfigError::Invalid {
                    reason: format!("criterion {} needs a protocol and a key", index),
                });
            }
            if criterion.row_id().is_none() && criterion.name.is_none() {
                return Err(ConfigError::Invalid {
                    reason: format!(
                        "criterion {} ({}.{}) has neither an id nor a name",
                        index, criterion.protocol, criterion.key
                    ),
                });
            }
        }

        if self.smart.command_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                reason: "smart.command_timeout must be greater than zero".to_string(),
            });
        }

        if self.smart.smartctl_path.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "smart.smartctl_path is empty".to_string(),
            });
        }

        Ok(())
    }

    /// Criteria grouped by protocol, file order kept
    pub fn criteria_set(&self) -> CriteriaSet {
        self.smart.criteria.iter().cloned().collect()
    }

    pub fn ignored_protocols(&self) -> HashSet<String> {
        self.smart.ignored_protocols.iter().cloned().collect()
    }

    /// Environment defaults raised by the file and the `--debug` flag
    pub fn logging_preferences(&self, debug_flag: bool) -> LoggingPreferences {
        LoggingPreferences::default()
            .verbose(self.general.verbose)
            .debug(self.general.debug || debug_flag)
    }

    pub fn debug_enabled(&self, debug_flag: bool) -> bool {
        self.general.debug || debug_flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdr_scanner_base::logging::LogLevel;
    use std::io::Write;

    const CONFIG: &str = r#"
[general]
verbose = true

[smart]
ignored_protocols = ["SCSI"]
command_timeout = "2m"

[[smart.criteria]]
protocol = "ATA"
key = "ata_smart_attributes"
id = 5
label = "Reallocated sectors"
max = 0

[[smart.criteria]]
protocol = "ATA"
key = "ata_smart_attributes"
id = -1
name = "Current_Pending_Sector"
label = "Pending sectors"
max = 2

[[smart.criteria]]
protocol = "NVMe"
key = "nvme_smart_health_information_log"
name = "media_errors"
label = "Media errors"
max = 0

[[reporters]]
type = "text"
name = "console"
error_header = "DRIVE FAILURE"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(CONFIG).unwrap();

        assert!(config.general.verbose);
        assert!(config.general.report_healthy);
        assert_eq!(config.smart.command_timeout, Duration::from_secs(120));
        assert!(config.ignored_protocols().contains("SCSI"));
        assert_eq!(config.reporters.len(), 1);

        let criteria = config.criteria_set();
        assert_eq!(criteria.len(), 3);
        assert_eq!(criteria.protocols(), vec!["ATA", "NVMe"]);

        let ata = criteria.for_protocol("ATA").unwrap();
        assert_eq!(ata[0].row_id(), Some(5));
        assert_eq!(ata[1].row_id(), None);
        assert_eq!(ata[1].name.as_deref(), Some("Current_Pending_Sector"));
        assert_eq!(ata[1].max, 2);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str(
            r#"
[smart]
[[smart.criteria]]
protocol = "NVMe"
key = "nvme_smart_health_information_log"
name = "critical_warning"
max = 0
"#,
        )
        .unwrap();

        assert!(!config.general.verbose);
        assert!(config.general.report_healthy);
        assert_eq!(config.smart.command_timeout, DEFAULT_COMMAND_TIMEOUT);
        assert_eq!(config.smart.smartctl_path, "smartctl");
        assert!(config.ignored_protocols().is_empty());
        assert!(config.reporters.is_empty());
    }

    #[test]
    fn test_missing_criteria_is_an_error() {
        assert!(matches!(
            Config::from_toml_str("[smart]\nignored_protocols = []\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[smart]\ncriteria = []\n"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_unmatchable_criterion_is_rejected() {
        let content = r#"
[smart]
[[smart.criteria]]
protocol = "ATA"
key = "ata_smart_attributes"
id = -1
max = 0
"#;
        match Config::from_toml_str(content) {
            Err(ConfigError::Invalid { reason }) => assert!(reason.contains("neither an id nor a name")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_smartctl_path() {
        let content = CONFIG.replace(
            "command_timeout = \"2m\"",
            "command_timeout = \"2m\"\nsmartctl_path = \"/usr/local/sbin/smartctl\"",
        );
        let config = Config::from_toml_str(&content).unwrap();
        assert_eq!(config.smart.smartctl_path, "/usr/local/sbin/smartctl");

        let empty = CONFIG.replace(
            "command_timeout = \"2m\"",
            "command_timeout = \"2m\"\nsmartctl_path = \"\"",
        );
        match Config::from_toml_str(&empty) {
            Err(ConfigError::Invalid { reason }) => assert!(reason.contains("smartctl_path")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_timeout() {
        let content = CONFIG.replace("\"2m\"", "\"soon\"");
        assert!(matches!(
            Config::from_toml_str(&content),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_logging_preferences() {
        let config = Config::from_toml_str(CONFIG).unwrap();
        assert!(config.logging_preferences(false).min_log_level >= LogLevel::Info);
        assert_eq!(config.logging_preferences(true).min_log_level, LogLevel::Debug);
        assert!(config.debug_enabled(true));
        assert!(!config.debug_enabled(false));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.criteria_set().len(), 3);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            Config::load(&missing),
            Err(ConfigError::Read { .. })
        ));
    }
}
