//! Reporter factories keyed by the `type` tag of a `[[reporters]]` table

use super::text::{TextReporter, TEXT_REPORTER_TYPE};
use fdr_scanner_base::reporting::{ReportError, Reporter};
use std::collections::HashMap;

/// Builds one reporter from its configuration table
pub type ReporterFactory = fn(&toml::Table) -> Result<Box<dyn Reporter>, ReportError>;

pub struct ReporterRegistry {
    factories: HashMap<String, ReporterFactory>,
}

impl ReporterRegistry {
    /// Create a registry without any reporter types
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every reporter type shipped with fdr
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(TEXT_REPORTER_TYPE.to_string(), build_text);
        registry
    }

    pub fn register(&mut self, type_tag: &str, factory: ReporterFactory) -> Result<(), ReportError> {
        if self.factories.contains_key(type_tag) {
            return Err(ReportError::InvalidConfig {
                reporter: type_tag.to_string(),
                reason: "reporter type registered twice".to_string(),
            });
        }
        self.factories.insert(type_tag.to_string(), factory);
        Ok(())
    }

    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn build(&self, table: &toml::Table) -> Result<Box<dyn Reporter>, ReportError> {
        let type_tag = match table.get("type") {
            Some(toml::Value::String(tag)) => tag.as_str(),
            Some(_) => {
                return Err(ReportError::InvalidConfig {
                    reporter: reporter_label(table),
                    reason: "'type' must be a string".to_string(),
                })
            }
            None => {
                return Err(ReportError::InvalidConfig {
                    reporter: reporter_label(table),
                    reason: "missing 'type'".to_string(),
                })
            }
        };

        let factory = self
            .factories
            .get(type_tag)
            .ok_or_else(|| ReportError::InvalidConfig {
                reporter: reporter_label(table),
                reason: format!(
                    "unknown reporter type '{}' (known: {})",
                    type_tag,
                    self.types().join(", ")
                ),
            })?;

        factory(table)
    }

    /// Reporters in configuration order; a console text reporter when none
    /// are configured
    pub fn build_all(&self, tables: &[toml::Table]) -> Result<Vec<Box<dyn Reporter>>, ReportError> {
        if tables.is_empty() {
            return Ok(vec![Box::new(TextReporter::new(TEXT_REPORTER_TYPE))]);
        }

        tables.iter().map(|table| self.build(table)).collect()
    }
}

impl Default for ReporterRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

fn build_text(table: &toml::Table) -> Result<Box<dyn Reporter>, ReportError> {
    Ok(Box::new(TextReporter::from_table(table)?))
}

fn reporter_label(table: &toml::Table) -> String {
    table
        .get("name")
        .and_then(toml::Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string()
}
