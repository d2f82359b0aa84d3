//! Runtime logging preferences
//!
//! Defaults come from the environment (`FDR_LOG_LEVEL`, `FDR_STRUCTURED_LOGGING`)
//! and may be raised by the configuration file or command line.

use super::events::LogLevel;
use std::env;

pub const LOG_LEVEL_ENV: &str = "FDR_LOG_LEVEL";
pub const STRUCTURED_LOGGING_ENV: &str = "FDR_STRUCTURED_LOGGING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingPreferences {
    /// Most verbose level that is still emitted
    pub min_log_level: LogLevel,

    /// Emit one JSON object per event instead of plain text
    pub use_structured_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var(LOG_LEVEL_ENV)
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Warning),
            use_structured_logging: env::var(STRUCTURED_LOGGING_ENV)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl LoggingPreferences {
    /// Raise verbosity to at least `level`; never lowers it
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        if level > self.min_log_level {
            self.min_log_level = level;
        }
        self
    }

    pub fn verbose(self, enabled: bool) -> Self {
        if enabled {
            self.with_min_level(LogLevel::Info)
        } else {
            self
        }
    }

    pub fn debug(self, enabled: bool) -> Self {
        if enabled {
            self.with_min_level(LogLevel::Debug)
        } else {
            self
        }
    }

    pub fn structured(mut self, enabled: bool) -> Self {
        self.use_structured_logging = enabled;
        self
    }
}
