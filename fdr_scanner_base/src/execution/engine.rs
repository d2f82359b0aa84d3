//! # Evaluation Engine
//!
//! Enumerates devices, fetches their detail, drops duplicate units and checks
//! every remaining device against the criteria of its protocol.
use super::error::EngineError;
use crate::logging::codes;
use crate::parser::{parse_device_info, parse_enumeration, parse_tool_error_message, TelemetryRecord};
use crate::resolution::resolve;
use crate::telemetry::TelemetrySource;
use crate::types::{CriteriaSet, Device, DeviceCollection, DeviceError};
use crate::{log_debug, log_info, log_success, log_warning};
use std::collections::HashSet;
use std::time::Instant;

/// smartctl exit codes that describe past events, not a current failure
///
/// 4: a SMART command failed or a checksum error was found,
/// 64: the error log contains errors,
/// 68: both of the above.
pub const ADVISORY_EXIT_CODES: [i32; 3] = [4, 64, 68];

pub fn is_advisory_exit_code(code: i32) -> bool {
    ADVISORY_EXIT_CODES.contains(&code)
}

/// Sequential, fail-fast drive health evaluator
pub struct Evaluator<S: TelemetrySource> {
    source: S,
    criteria: CriteriaSet,
    ignored_protocols: HashSet<String>,
}

impl<S: TelemetrySource> Evaluator<S> {
    pub fn new(source: S, criteria: CriteriaSet, ignored_protocols: HashSet<String>) -> Self {
        Self {
            source,
            criteria,
            ignored_protocols,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn criteria(&self) -> &CriteriaSet {
        &self.criteria
    }

    /// Full pass: enumerate, evaluate, deduplicate
    pub fn run(&self) -> Result<DeviceCollection, EngineError> {
        let start = Instant::now();

        let mut devices = self.discover()?;
        self.find_errors(&mut devices)?;

        let enumerated = devices.len();
        devices.remove_duplicates();

        log_success!(
            codes::success::EVALUATION_COMPLETE,
            "Drive evaluation completed",
            "devices" => devices.len(),
            "duplicates" => enumerated - devices.len(),
            "errors" => devices.error_count(),
            "duration_ms" => start.elapsed().as_millis()
        );

        Ok(devices)
    }

    /// Enumerate devices, ignored protocols already filtered out
    pub fn discover(&self) -> Result<DeviceCollection, EngineError> {
        let raw = self.source.enumerate()?;
        let devices = parse_enumeration(&raw, &self.ignored_protocols)
            .map_err(|e| EngineError::malformed("device scan", e))?;

        log_success!(
            codes::success::ENUMERATION_COMPLETE,
            "Device enumeration completed",
            "source" => self.source.source_id(),
            "devices" => devices.len()
        );

        Ok(DeviceCollection::new(devices))
    }

    /// Fetch, deduplicate and evaluate every device in enumeration order
    ///
    /// Duplicates are flagged but stay in the collection; the first error
    /// aborts the pass.
    pub fn find_errors(&self, devices: &mut DeviceCollection) -> Result<(), EngineError> {
        for index in 0..devices.len() {
            let Some(device) = devices.get_mut(index) else {
                break;
            };

            let record = self.fetch_record(device)?;
            let (model, serial_number) = parse_device_info(&record)
                .map_err(|e| EngineError::malformed(&device.name, e))?;
            device.model = model;
            device.serial_number = serial_number;

            let (earlier, rest) = devices.as_slice().split_at(index);
            let Some(device) = rest.first() else {
                break;
            };
            let original = earlier
                .iter()
                .find(|other| other.same_unit_as(device))
                .map(|other| other.name.clone());

            let errors = match &original {
                Some(original) => {
                    log_info!(
                        "Skipping duplicate device",
                        "code" => codes::evaluation::DUPLICATE_DEVICE,
                        "device" => &device.name,
                        "duplicate_of" => original
                    );
                    Vec::new()
                }
                None => self.evaluate_device(device, &record)?,
            };

            if let Some(device) = devices.get_mut(index) {
                device.duplicate = original.is_some();
                device.errors = errors;
            }
        }

        Ok(())
    }

    /// Run the detail query and classify its exit code
    fn fetch_record(&self, device: &Device) -> Result<TelemetryRecord, EngineError> {
        let detail = self
            .source
            .fetch_detail(&device.device_type, &device.name)?;
        let record = TelemetryRecord::parse(&detail.raw, &device.name);

        if detail.exit_code != 0 {
            if !is_advisory_exit_code(detail.exit_code) {
                let message = record
                    .as_ref()
                    .map(parse_tool_error_message)
                    .unwrap_or_default();

                return Err(EngineError::ExternalTool {
                    device: device.name.clone(),
                    code: detail.exit_code,
                    message,
                });
            }

            log_warning!(
                codes::telemetry::ADVISORY_EXIT_CODE,
                "smartctl reported past errors",
                "device" => &device.name,
                "exit_code" => detail.exit_code
            );
        }

        record.map_err(|e| EngineError::malformed(&device.name, e))
    }

    /// Violations of the device's protocol criteria, in criteria order
    fn evaluate_device(
        &self,
        device: &Device,
        record: &TelemetryRecord,
    ) -> Result<Vec<DeviceError>, EngineError> {
        let criteria = self.criteria.for_protocol(&device.protocol).ok_or_else(|| {
            EngineError::UnknownProtocol {
                device: device.name.clone(),
                protocol: device.protocol.clone(),
            }
        })?;

        let mut resolved = 0usize;
        let mut errors = Vec::new();

        for criterion in criteria {
            let value = match resolve(record, criterion) {
                Ok(Some(value)) => value,
                Ok(None) => {
                    log_debug!(
                        "Criterion not present in attribute table",
                        "device" => &device.name,
                        "criterion" => criterion.display_label()
                    );
                    continue;
                }
                Err(e) => return Err(EngineError::from_resolve(&device.name, e)),
            };

            resolved += 1;

            if criterion.is_exceeded_by(value) {
                log_warning!(
                    codes::evaluation::THRESHOLD_EXCEEDED,
                    "Criterion exceeded",
                    "device" => &device.name,
                    "criterion" => criterion.display_label(),
                    "value" => value,
                    "max" => criterion.max
                );
                errors.push(DeviceError::new(criterion.clone(), value));
            }
        }

        if resolved == 0 {
            return Err(EngineError::NoTelemetryData {
                device: device.name.clone(),
                protocol: device.protocol.clone(),
            });
        }

        Ok(errors)
    }
}
