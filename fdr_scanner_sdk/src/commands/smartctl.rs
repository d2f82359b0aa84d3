//! smartctl command executor configuration

use fdr_scanner_base::telemetry::{SmartctlSource, SystemCommandExecutor};
use std::time::Duration;

/// Executor that may run `program` and nothing else
pub fn create_smartctl_command_executor(program: &str, timeout: Duration) -> SystemCommandExecutor {
    let mut executor = SystemCommandExecutor::with_timeout(timeout);
    executor.allow_command(program);
    executor
}

/// Telemetry source backed by the smartctl binary at `program`
pub fn create_smartctl_source(program: &str, timeout: Duration, debug_dump: bool) -> SmartctlSource {
    SmartctlSource::new(create_smartctl_command_executor(program, timeout))
        .with_program(program)
        .with_debug_dump(debug_dump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdr_scanner_base::telemetry::{TelemetrySource, SMARTCTL_PROGRAM};

    #[test]
    fn test_smartctl_executor_whitelist() {
        let executor = create_smartctl_command_executor(SMARTCTL_PROGRAM, Duration::from_secs(30));

        assert!(executor.is_allowed("smartctl"));
        assert_eq!(executor.default_timeout(), Duration::from_secs(30));

        assert!(!executor.is_allowed("sh"));
        assert!(!executor.is_allowed("dd"));
        assert!(!executor.is_allowed("hdparm"));
    }

    #[test]
    fn test_smartctl_source() {
        let source = create_smartctl_source(SMARTCTL_PROGRAM, Duration::from_secs(5), false);
        assert_eq!(source.source_id(), "smartctl");
    }

    #[test]
    fn test_custom_smartctl_path() {
        let path = "/usr/local/sbin/smartctl";
        let executor = create_smartctl_command_executor(path, Duration::from_secs(5));
        assert!(executor.is_allowed(path));
        assert!(!executor.is_allowed("smartctl"));

        let source = create_smartctl_source(path, Duration::from_secs(5), false);
        assert_eq!(source.source_id(), path);
    }

    #[cfg(unix)]
    #[test]
    fn test_custom_smartctl_path_runs() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("smartctl");
        std::fs::write(&script, "#!/bin/sh\necho '{\"devices\": []}'\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        let path = script.display().to_string();

        let source = create_smartctl_source(&path, Duration::from_secs(5), false);
        assert_eq!(source.enumerate().unwrap().trim(), r#"{"devices": []}"#);
    }
}
