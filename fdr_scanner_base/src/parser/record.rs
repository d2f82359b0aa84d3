//! Schema-less access to one structured telemetry document

use super::error::ParseError;
use serde_json::Value;

/// A parsed JSON document produced by the diagnostic tool
///
/// Paths are sequences of object keys; a component that parses as an
/// unsigned integer also indexes into arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    data: Value,
}

impl TelemetryRecord {
    /// Parse raw tool output; `context` names the document in errors
    pub fn parse(raw: &str, context: &str) -> Result<Self, ParseError> {
        serde_json::from_str(raw)
            .map(Self::from_json_value)
            .map_err(|e| ParseError::InvalidJson {
                context: context.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn from_json_value(data: Value) -> Self {
        Self { data }
    }

    pub fn as_json_value(&self) -> &Value {
        &self.data
    }

    /// Value at `path`, if every component exists
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.data, path)
    }

    pub fn has_path(&self, path: &[&str]) -> bool {
        self.get(path).is_some()
    }

    pub fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_i64(&self, path: &[&str]) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }
}

/// Navigate `path` below `value`
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;

    for component in path {
        current = match current {
            Value::Object(map) => map.get(*component)?,
            Value::Array(items) => items.get(component.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> TelemetryRecord {
        TelemetryRecord::from_json_value(json!({
            "model_name": "Samsung SSD 860",
            "ata_smart_attributes": {
                "table": [
                    {"id": 5, "name": "Reallocated_Sector_Ct", "raw": {"value": 0}}
                ]
            },
            "temperature": {"current": 31}
        }))
    }

    #[test]
    fn test_nested_lookup() {
        let record = record();
        assert_eq!(record.get_i64(&["temperature", "current"]), Some(31));
        assert_eq!(record.get_str(&["model_name"]), Some("Samsung SSD 860"));
        assert_eq!(
            record.get_i64(&["ata_smart_attributes", "table", "0", "id"]),
            Some(5)
        );
    }

    #[test]
    fn test_missing_paths() {
        let record = record();
        assert!(record.has_path(&["ata_smart_attributes", "table"]));
        assert!(!record.has_path(&["nvme_smart_health_information_log"]));
        assert!(!record.has_path(&["temperature", "current", "deeper"]));
        assert!(!record.has_path(&["ata_smart_attributes", "table", "7"]));
        assert!(record.has_path(&[]));
    }

    #[test]
    fn test_type_mismatch_is_absent() {
        let record = record();
        assert_eq!(record.get_i64(&["model_name"]), None);
        assert_eq!(record.get_str(&["temperature", "current"]), None);
    }

    #[test]
    fn test_invalid_json() {
        match TelemetryRecord::parse("{not json", "scan output") {
            Err(ParseError::InvalidJson { context, .. }) => assert_eq!(context, "scan output"),
            other => panic!("Expected InvalidJson, got {:?}", other),
        }
    }
}
