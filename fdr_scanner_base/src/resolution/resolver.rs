//! Criterion value lookup in a detail record

use super::error::ResolveError;
use crate::parser::{self, ParseError, TelemetryRecord};
use crate::types::Criterion;
use serde_json::Value;

/// How a criterion's value is located in the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// `key` holds a `table` of rows matched by id or name; value at `raw.value`
    Table,
    /// `key` is an object holding the value under the criterion name
    Direct,
}

impl LookupStrategy {
    pub fn select(record: &TelemetryRecord, criterion: &Criterion) -> Self {
        if parser::has_path(record, &[criterion.key.as_str(), "table"]) {
            LookupStrategy::Table
        } else {
            LookupStrategy::Direct
        }
    }
}

/// Value the criterion refers to
///
/// `Ok(None)` means a table was present but no row matched. A direct lookup
/// that finds nothing is a [`ResolveError::MissingCriterion`].
pub fn resolve(
    record: &TelemetryRecord,
    criterion: &Criterion,
) -> Result<Option<i64>, ResolveError> {
    match LookupStrategy::select(record, criterion) {
        LookupStrategy::Table => resolve_from_table(record, criterion),
        LookupStrategy::Direct => resolve_direct(record, criterion).map(Some),
    }
}

/// First row matching the criterion's id or name wins
fn resolve_from_table(
    record: &TelemetryRecord,
    criterion: &Criterion,
) -> Result<Option<i64>, ResolveError> {
    let context = format!("{}.table", criterion.key);

    let rows = match record.get(&[criterion.key.as_str(), "table"]) {
        Some(Value::Array(rows)) => rows,
        _ => return Err(ParseError::unexpected_type(&context, "table", "an array").into()),
    };

    for (index, row) in rows.iter().enumerate() {
        let row_context = format!("{} row {}", context, index);
        let row_id = optional_i64(row, "id", &row_context)?;
        let row_name = optional_str(row, "name", &row_context)?;

        if !criterion.matches_row(row_id, row_name) {
            continue;
        }

        let value = match row.get("raw").and_then(|raw| raw.get("value")) {
            Some(value) => value
                .as_i64()
                .ok_or_else(|| ParseError::unexpected_type(&row_context, "raw.value", "an integer"))?,
            None => return Err(ParseError::missing_field(&row_context, "raw.value").into()),
        };

        return Ok(Some(value));
    }

    Ok(None)
}

fn resolve_direct(record: &TelemetryRecord, criterion: &Criterion) -> Result<i64, ResolveError> {
    let missing = || ResolveError::MissingCriterion {
        key: criterion.key.clone(),
        name: criterion.name.clone().unwrap_or_default(),
    };

    let name = criterion.name.as_deref().ok_or_else(missing)?;

    match record.get(&[criterion.key.as_str(), name]) {
        Some(value) => value.as_i64().ok_or_else(|| {
            ParseError::unexpected_type(&criterion.key, name, "an integer").into()
        }),
        None => Err(missing()),
    }
}

fn optional_i64(row: &Value, field: &str, context: &str) -> Result<Option<i64>, ParseError> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| ParseError::unexpected_type(context, field, "an integer")),
    }
}

fn optional_str<'a>(row: &'a Value, field: &str, context: &str) -> Result<Option<&'a str>, ParseError> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ParseError::unexpected_type(context, field, "a string")),
    }
}
