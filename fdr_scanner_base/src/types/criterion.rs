//! Threshold criteria grouped by device protocol

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single threshold rule bound to a protocol
///
/// `key` names the telemetry field to look in. When that field holds a row
/// table, rows are matched by `id` or `name`; otherwise `name` is the field
/// read directly under `key`. A value strictly greater than `max` is a
/// violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub protocol: String,
    pub key: String,

    /// Row identifier; absent or negative means match by name only
    #[serde(default)]
    pub id: Option<i64>,

    /// Row name, or field name for direct lookups
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub label: String,

    pub max: i64,
}

impl Criterion {
    pub fn new(protocol: &str, key: &str, max: i64) -> Self {
        Self {
            protocol: protocol.to_string(),
            key: key.to_string(),
            id: None,
            name: None,
            label: String::new(),
            max,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Row identifier usable for matching
    pub fn row_id(&self) -> Option<i64> {
        self.id.filter(|id| *id >= 0)
    }

    pub fn matches_row(&self, row_id: Option<i64>, row_name: Option<&str>) -> bool {
        let by_id = matches!((self.row_id(), row_id), (Some(wanted), Some(found)) if wanted == found);
        let by_name =
            matches!((self.name.as_deref(), row_name), (Some(wanted), Some(found)) if wanted == found);
        by_id || by_name
    }

    /// Whether `value` violates this criterion
    pub fn is_exceeded_by(&self, value: i64) -> bool {
        value > self.max
    }

    /// Label for reports, falling back to the row or field name
    pub fn display_label(&self) -> &str {
        if !self.label.is_empty() {
            &self.label
        } else {
            self.name.as_deref().unwrap_or(&self.key)
        }
    }
}

/// Criteria grouped by protocol, order preserved within each protocol
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaSet {
    by_protocol: HashMap<String, Vec<Criterion>>,
}

impl CriteriaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, criterion: Criterion) {
        self.by_protocol
            .entry(criterion.protocol.clone())
            .or_default()
            .push(criterion);
    }

    pub fn for_protocol(&self, protocol: &str) -> Option<&[Criterion]> {
        self.by_protocol.get(protocol).map(Vec::as_slice)
    }

    pub fn protocols(&self) -> Vec<&str> {
        let mut protocols: Vec<&str> = self.by_protocol.keys().map(String::as_str).collect();
        protocols.sort_unstable();
        protocols
    }

    /// Total number of criteria across all protocols
    pub fn len(&self) -> usize {
        self.by_protocol.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Criterion> for CriteriaSet {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        let mut set = Self::new();
        for criterion in iter {
            set.insert(criterion);
        }
        set
    }
}
