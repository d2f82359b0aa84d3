use super::traits::{ReportError, ReportGate, ReportOutcome};

/// Report every run
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReport;

impl ReportGate for AlwaysReport {
    fn should_report(&self, _outcome: ReportOutcome) -> Result<bool, ReportError> {
        Ok(true)
    }
}

/// Report only runs that found violations
#[derive(Debug, Clone, Copy, Default)]
pub struct FailuresOnly;

impl ReportGate for FailuresOnly {
    fn should_report(&self, outcome: ReportOutcome) -> Result<bool, ReportError> {
        Ok(outcome == ReportOutcome::Failing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates() {
        assert!(AlwaysReport.should_report(ReportOutcome::Healthy).unwrap());
        assert!(AlwaysReport.should_report(ReportOutcome::Failing).unwrap());
        assert!(!FailuresOnly.should_report(ReportOutcome::Healthy).unwrap());
        assert!(FailuresOnly.should_report(ReportOutcome::Failing).unwrap());
    }
}
