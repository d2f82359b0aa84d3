//! Global logging module for the drive scanner
//!
//! Provides a thread-safe global logging service with coded events,
//! plain-text or JSON output and a small macro interface. Logging before
//! initialization is a silent no-op so the library can be embedded freely.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use config::LoggingPreferences;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from user preferences
pub fn init_global_logging(preferences: &LoggingPreferences) -> Result<(), String> {
    let service = Arc::new(LoggingService::with_preferences(preferences));

    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized")?;

    service.log_event(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        )
        .with_context("level", preferences.min_log_level.as_str()),
    );

    Ok(())
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Attach context and hand the event to the global logger (used by the macros)
pub fn log_with_context(mut event: LogEvent, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Error logging that falls back to stderr when logging is not initialized
pub fn safe_log_error(code: Code, message: &str) {
    match try_get_global_logger() {
        Some(logger) => logger.log_error(code, message),
        None => eprintln!("[ERROR] {} - {}", code.as_str(), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_without_initialization_is_noop() {
        // Must not panic whether or not another test initialized the logger
        crate::log_info!("uninitialized", "key" => 1);
        crate::log_debug!("uninitialized");
        crate::log_warning!(codes::telemetry::ADVISORY_EXIT_CODE, "uninitialized", "code" => 64);
        safe_log_error(codes::system::INTERNAL_ERROR, "uninitialized");
    }
}
