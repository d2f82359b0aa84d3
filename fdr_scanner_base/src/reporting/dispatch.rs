//! Runs the configured reporters behind a gate

use super::traits::{ReportError, ReportGate, Reporter, ReportOutcome};
use crate::logging::codes;
use crate::types::DeviceCollection;
use crate::{log_debug, log_error, log_success};

pub struct ReportDispatcher {
    reporters: Vec<Box<dyn Reporter>>,
    gate: Box<dyn ReportGate>,
}

impl ReportDispatcher {
    pub fn new(gate: Box<dyn ReportGate>) -> Self {
        Self {
            reporters: Vec::new(),
            gate,
        }
    }

    pub fn add_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.reporters.push(reporter);
    }

    pub fn reporter_count(&self) -> usize {
        self.reporters.len()
    }

    /// Names of the reporters that sent a message, in configuration order
    ///
    /// Stops at the first failing reporter.
    pub fn dispatch(&self, devices: &DeviceCollection) -> Result<Vec<String>, ReportError> {
        let outcome = ReportOutcome::from_devices(devices);

        if !self.gate.should_report(outcome)? {
            log_debug!("Report suppressed by gate", "outcome" => format!("{:?}", outcome));
            return Ok(Vec::new());
        }

        let mut sent = Vec::new();

        for reporter in &self.reporters {
            match reporter.report(devices) {
                Ok(true) => {
                    log_success!(
                        codes::success::REPORT_SENT,
                        "Report sent",
                        "reporter" => reporter.name()
                    );
                    sent.push(reporter.name().to_string());
                }
                Ok(false) => {
                    log_debug!("Reporter skipped", "reporter" => reporter.name());
                }
                Err(e) => {
                    log_error!(
                        codes::reporting::REPORT_FAILED,
                        "Reporter failed",
                        "reporter" => reporter.name(),
                        "error" => &e
                    );
                    return Err(e);
                }
            }
        }

        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::{AlwaysReport, FailuresOnly};
    use crate::types::{Criterion, Device, DeviceError};
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingReporter {
        name: String,
        calls: Rc<Cell<usize>>,
        send: bool,
    }

    impl Reporter for CountingReporter {
        fn name(&self) -> &str {
            &self.name
        }

        fn report(&self, _devices: &DeviceCollection) -> Result<bool, ReportError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.send)
        }
    }

    struct FailingReporter;

    impl Reporter for FailingReporter {
        fn name(&self) -> &str {
            "broken"
        }

        fn report(&self, _devices: &DeviceCollection) -> Result<bool, ReportError> {
            Err(ReportError::Delivery {
                reporter: "broken".to_string(),
                reason: "unreachable".to_string(),
            })
        }
    }

    fn reporter(name: &str, send: bool, calls: &Rc<Cell<usize>>) -> Box<dyn Reporter> {
        Box::new(CountingReporter {
            name: name.to_string(),
            calls: Rc::clone(calls),
            send,
        })
    }

    fn failing_devices() -> DeviceCollection {
        let mut device = Device::new("sat", "/dev/sda", "ATA");
        device
            .errors
            .push(DeviceError::new(Criterion::new("ATA", "ata_smart_attributes", 0), 1));
        DeviceCollection::new(vec![device])
    }

    #[test]
    fn test_dispatch_collects_sent_names() {
        let calls = Rc::new(Cell::new(0));
        let mut dispatcher = ReportDispatcher::new(Box::new(AlwaysReport));
        dispatcher.add_reporter(reporter("console", true, &calls));
        dispatcher.add_reporter(reporter("quiet", false, &calls));

        let sent = dispatcher.dispatch(&DeviceCollection::default()).unwrap();

        assert_eq!(sent, vec!["console".to_string()]);
        assert_eq!(calls.get(), 2);
        assert_eq!(dispatcher.reporter_count(), 2);
    }

    #[test]
    fn test_gate_suppresses_healthy_runs() {
        let calls = Rc::new(Cell::new(0));
        let mut dispatcher = ReportDispatcher::new(Box::new(FailuresOnly));
        dispatcher.add_reporter(reporter("console", true, &calls));

        assert!(dispatcher.dispatch(&DeviceCollection::default()).unwrap().is_empty());
        assert_eq!(calls.get(), 0);

        assert_eq!(dispatcher.dispatch(&failing_devices()).unwrap().len(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failure_stops_dispatch() {
        let calls = Rc::new(Cell::new(0));
        let mut dispatcher = ReportDispatcher::new(Box::new(AlwaysReport));
        dispatcher.add_reporter(Box::new(FailingReporter));
        dispatcher.add_reporter(reporter("console", true, &calls));

        assert!(matches!(
            dispatcher.dispatch(&failing_devices()),
            Err(ReportError::Delivery { .. })
        ));
        assert_eq!(calls.get(), 0);
    }
}
