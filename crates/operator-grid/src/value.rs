// File: operator-grid/src/value.rs
// Purpose: Cell values held by a row

use crate::normalize::{display_phone, format_timestamp, is_blank, is_truthy, json_to_text, normalize_phone};
use crate::schema::{DisplayFormat, FieldShape, FieldSpec};

/// Current or confirmed value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    /// Ordered entries; the entry count is the list length
    Repeating(Vec<String>),
}

impl FieldValue {
    /// Empty value for a freshly added row: repeating fields start with one blank entry
    pub fn blank(spec: &FieldSpec) -> Self {
        match spec.shape {
            FieldShape::Scalar => FieldValue::Scalar(String::new()),
            FieldShape::Repeating => FieldValue::Repeating(vec![String::new()]),
        }
    }

    /// Build a cell value from a list-response field
    pub fn from_json(spec: &FieldSpec, value: &serde_json::Value) -> Self {
        match (spec.shape, value) {
            (FieldShape::Repeating, serde_json::Value::Array(items)) => {
                FieldValue::Repeating(items.iter().map(json_to_text).collect())
            }
            (FieldShape::Repeating, serde_json::Value::Null) => FieldValue::Repeating(Vec::new()),
            (FieldShape::Repeating, other) => FieldValue::Repeating(vec![json_to_text(other)]),
            (FieldShape::Scalar, other) => FieldValue::Scalar(json_to_text(other)),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::Repeating(_) => None,
        }
    }

    /// All entries; a scalar is a single entry
    pub fn entries(&self) -> &[String] {
        match self {
            FieldValue::Scalar(s) => std::slice::from_ref(s),
            FieldValue::Repeating(items) => items,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries().len()
    }

    /// Index of the first blank entry, if any
    pub fn first_blank(&self) -> Option<usize> {
        self.entries().iter().position(|e| is_blank(e))
    }

    /// Canonical form used for change detection and for request bodies
    pub fn normalized(&self, format: DisplayFormat) -> FieldValue {
        let canon = |raw: &String| match format {
            DisplayFormat::Phone => normalize_phone(raw),
            _ => raw.trim().to_string(),
        };
        match self {
            FieldValue::Scalar(s) => FieldValue::Scalar(canon(s)),
            FieldValue::Repeating(items) => FieldValue::Repeating(items.iter().map(canon).collect()),
        }
    }

    /// Display text of each entry in view mode
    pub fn display_entries(&self, format: DisplayFormat) -> Vec<String> {
        self.entries()
            .iter()
            .map(|raw| display_text(raw, format))
            .collect()
    }
}

/// Display text for a single stored entry
pub fn display_text(raw: &str, format: DisplayFormat) -> String {
    match format {
        DisplayFormat::Plain => raw.to_string(),
        DisplayFormat::Phone => display_phone(raw),
        DisplayFormat::Timestamp => format_timestamp(raw),
        DisplayFormat::Flag => {
            if is_truthy(raw) {
                "✓".to_string()
            } else {
                String::new()
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::Repeating(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::Repeating(items.into_iter().map(str::to_string).collect())
    }
}
