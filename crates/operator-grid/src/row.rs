// File: operator-grid/src/row.rs
// Purpose: Per-row lifecycle (view / edit / unsaved-new) and field-level change tracking

use std::collections::BTreeMap;

use crate::error::{GridError, Result};
use crate::gateway::wire::RecordPayload;
use crate::kind::RecordKind;
use crate::normalize::{coerce_id, json_to_text};
use crate::schema::{schema_for, DisplayFormat, FieldOrigin, FieldSchema, FieldSpec};
use crate::value::{display_text, FieldValue};

/// Field name to value, keyed by the schema's static names
pub type Fields = BTreeMap<&'static str, FieldValue>;

/// Local handle of a row inside its grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub u64);

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Lifecycle state of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    View,
    Editing,
    NewUnsaved,
}

impl RowState {
    pub fn as_str(self) -> &'static str {
        match self {
            RowState::View => "view",
            RowState::Editing => "editing",
            RowState::NewUnsaved => "new",
        }
    }

    pub fn is_editable(self) -> bool {
        matches!(self, RowState::Editing | RowState::NewUnsaved)
    }
}

/// Outcome of committing an edit
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// Nothing changed; the row is back in view mode without a request
    Unchanged,
    /// Changes must be sent; `submitted` becomes the confirmed state on success
    Send {
        payload: RecordPayload,
        submitted: Fields,
    },
}

/// One record rendered in a grid
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    key: RowKey,
    kind: RecordKind,
    server_id: Option<i64>,
    fields: Fields,
    /// Last value accepted by the server; absent while the row is new
    original: Option<Fields>,
    state: RowState,
    /// Sequence number of the save/delete in flight for this row
    in_flight: Option<u64>,
}

impl Row {
    /// Blank row requested by the operator
    pub fn new_unsaved(key: RowKey, kind: RecordKind) -> Self {
        let fields = schema_for(kind)
            .fields
            .iter()
            .map(|spec| (spec.name, FieldValue::blank(spec)))
            .collect();

        Self {
            key,
            kind,
            server_id: None,
            fields,
            original: None,
            state: RowState::NewUnsaved,
            in_flight: None,
        }
    }

    /// Row from a page fetch: the fetched values are the confirmed values.
    ///
    /// Kinds with a single field may be listed as bare strings.
    pub fn hydrate(key: RowKey, kind: RecordKind, data: &serde_json::Value) -> Result<Self> {
        let schema = schema_for(kind);

        let fields: Fields = match (data, schema.single_field()) {
            (serde_json::Value::Object(map), _) => schema
                .fields
                .iter()
                .map(|spec| {
                    let value = spec
                        .source_keys()
                        .find_map(|k| map.get(k))
                        .unwrap_or(&serde_json::Value::Null);
                    (spec.name, FieldValue::from_json(spec, value))
                })
                .collect(),
            (scalar, Some(spec)) if !scalar.is_array() => {
                std::iter::once((spec.name, FieldValue::from_json(spec, scalar))).collect()
            }
            _ => {
                return Err(crate::error::TransportError::Decode(format!(
                    "unexpected {} row: {}",
                    kind, data
                ))
                .into())
            }
        };

        let server_id = schema
            .server_assigned()
            .and_then(|spec| fields.get(spec.name))
            .and_then(|v| v.as_scalar())
            .and_then(coerce_id);

        Ok(Self {
            key,
            kind,
            server_id,
            original: Some(fields.clone()),
            fields,
            state: RowState::View,
            in_flight: None,
        })
    }

    pub fn key(&self) -> RowKey {
        self.key
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn schema(&self) -> &'static FieldSchema {
        schema_for(self.kind)
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn server_id(&self) -> Option<i64> {
        self.server_id
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn original(&self) -> Option<&Fields> {
        self.original.as_ref()
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn original_value(&self, field: &str) -> Option<&FieldValue> {
        self.original.as_ref().and_then(|o| o.get(field))
    }

    /// Number of entries of a repeating field before the edit started
    pub fn original_count(&self, field: &str) -> usize {
        self.original_value(field).map_or(0, FieldValue::entry_count)
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn mark_in_flight(&mut self, seq: u64) {
        self.in_flight = Some(seq);
    }

    pub(crate) fn clear_in_flight(&mut self, seq: u64) {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
        }
    }

    /// `View -> Editing`. Phone fields switch to their display form for editing.
    pub fn begin_edit(&mut self) -> Result<()> {
        self.ensure_kind_editable("edit")?;
        if self.state != RowState::View {
            return Err(self.invalid("edit"));
        }

        for spec in self.schema().operator_fields() {
            if spec.display != DisplayFormat::Phone {
                continue;
            }
            if let Some(value) = self.fields.get_mut(spec.name) {
                let shown = match &*value {
                    FieldValue::Scalar(s) => FieldValue::Scalar(display_text(s, spec.display)),
                    FieldValue::Repeating(items) => FieldValue::Repeating(
                        items.iter().map(|s| display_text(s, spec.display)).collect(),
                    ),
                };
                *value = shown;
            }
        }

        self.state = RowState::Editing;
        tracing::debug!(row = %self.key, kind = %self.kind, "row entered edit mode");
        Ok(())
    }

    /// Replace a scalar field (or the whole list of a repeating field)
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> Result<()> {
        let spec = self.editable_spec(field, "change")?;
        let value = match (spec.is_repeating(), value) {
            (true, FieldValue::Scalar(s)) => FieldValue::Repeating(vec![s]),
            (false, FieldValue::Repeating(mut items)) if items.len() == 1 => {
                FieldValue::Scalar(items.remove(0))
            }
            (false, FieldValue::Repeating(_)) => {
                return Err(GridError::NoSuchField {
                    kind: self.kind,
                    field: format!("{}[]", field),
                })
            }
            (_, value) => value,
        };
        self.fields.insert(spec.name, value);
        Ok(())
    }

    /// Overwrite one entry of a repeating field
    pub fn set_entry(&mut self, field: &str, index: usize, text: impl Into<String>) -> Result<()> {
        let kind = self.kind;
        let entries = self.entries_mut(field, "change")?;
        match entries.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                Ok(())
            }
            None => Err(GridError::NoSuchField {
                kind,
                field: format!("{}[{}]", field, index),
            }),
        }
    }

    /// Append one blank entry; returns the new entry count
    pub fn add_entry(&mut self, field: &str) -> Result<usize> {
        let entries = self.entries_mut(field, "add an entry to")?;
        entries.push(String::new());
        Ok(entries.len())
    }

    /// Drop one entry; returns the new entry count
    pub fn remove_entry(&mut self, field: &str, index: usize) -> Result<usize> {
        let kind = self.kind;
        let entries = self.entries_mut(field, "remove an entry from")?;
        if index >= entries.len() {
            return Err(GridError::NoSuchField {
                kind,
                field: format!("{}[{}]", field, index),
            });
        }
        entries.remove(index);
        Ok(entries.len())
    }

    /// Blank check over every required field, every entry included.
    /// A repeating field needs at least one entry.
    pub fn validate(&self) -> Result<()> {
        for spec in self.schema().required_fields() {
            let blank = match self.fields.get(spec.name) {
                Some(value) => {
                    (spec.is_repeating() && value.entry_count() == 0)
                        || value.first_blank().is_some()
                }
                None => true,
            };
            if blank {
                return Err(GridError::empty_field(spec.name));
            }
        }
        Ok(())
    }

    /// Field-by-field comparison of normalized values against the confirmed ones.
    /// New rows always count as changed.
    pub fn has_changes(&self) -> bool {
        let Some(original) = &self.original else {
            return true;
        };
        self.schema().operator_fields().any(|spec| {
            let current = self.fields.get(spec.name).map(|v| v.normalized(spec.display));
            let confirmed = original.get(spec.name).map(|v| v.normalized(spec.display));
            current != confirmed
        })
    }

    /// Validate and diff the edit.
    ///
    /// Unchanged rows go straight back to view mode showing the confirmed
    /// values; otherwise the save payload is returned and the state is left
    /// alone until the server answers.
    pub fn commit(&mut self) -> Result<Commit> {
        self.ensure_kind_editable("save")?;
        if !self.state.is_editable() {
            return Err(self.invalid("save"));
        }
        self.validate()?;

        if !self.has_changes() {
            if let Some(original) = &self.original {
                self.fields = original.clone();
            }
            self.state = RowState::View;
            tracing::debug!(row = %self.key, "no changes, back to view without a request");
            return Ok(Commit::Unchanged);
        }

        let schema = self.schema();
        let mut submitted = Fields::new();
        let mut payload = RecordPayload::new();

        for spec in schema.fields {
            match spec.origin {
                FieldOrigin::ServerAssigned => {
                    if let Some(id) = self.server_id {
                        payload.insert(spec.server_key, serde_json::Value::from(id));
                        submitted.insert(spec.name, FieldValue::Scalar(id.to_string()));
                    }
                }
                FieldOrigin::Operator => {
                    let value = self
                        .fields
                        .get(spec.name)
                        .map(|v| v.normalized(spec.display))
                        .unwrap_or_else(|| FieldValue::blank(spec));
                    payload.insert(spec.server_key, encode(&value));
                    submitted.insert(spec.name, value);
                }
                FieldOrigin::ReadOnly => {}
            }
        }

        Ok(Commit::Send { payload, submitted })
    }

    /// The server accepted `submitted`; adopt it (and a newly assigned id) as confirmed.
    pub fn confirm_saved(&mut self, mut submitted: Fields, new_id: Option<i64>) {
        let schema = self.schema();
        if let Some(id) = new_id {
            self.server_id = Some(id);
        }
        if let (Some(spec), Some(id)) = (schema.server_assigned(), self.server_id) {
            submitted.insert(spec.name, FieldValue::Scalar(id.to_string()));
        }

        self.original = Some(submitted.clone());
        self.fields = submitted;
        self.state = RowState::View;
        self.in_flight = None;
        tracing::debug!(row = %self.key, id = ?self.server_id, "row saved");
    }

    /// Key set of the server record, taken from the confirmed values.
    ///
    /// An uncommitted edit never changes which record is targeted.
    pub fn delete_identity(&self) -> Result<RecordPayload> {
        let Some(original) = &self.original else {
            return Err(self.invalid("delete remotely"));
        };

        let mut identity = RecordPayload::new();
        for spec in self.schema().identity_fields() {
            let value = original
                .get(spec.name)
                .map(|v| v.normalized(spec.display))
                .filter(|v| v.first_blank().is_none())
                .ok_or_else(|| GridError::empty_field(spec.name))?;

            let json = match (spec.origin, value.as_scalar().and_then(coerce_id)) {
                (FieldOrigin::ServerAssigned, Some(id)) => serde_json::Value::from(id),
                _ => encode(&value),
            };
            identity.insert(spec.server_key, json);
        }
        Ok(identity)
    }

    /// Display text of a scalar field, as shown in view mode
    pub fn display(&self, field: &str) -> Option<String> {
        let spec = self.schema().field(field)?;
        let value = self.fields.get(field)?;
        Some(
            value
                .entries()
                .iter()
                .map(|raw| display_text(raw, spec.display))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    fn ensure_kind_editable(&self, action: &'static str) -> Result<()> {
        if self.kind.is_editable() {
            Ok(())
        } else {
            Err(GridError::Unsupported {
                kind: self.kind,
                action,
            })
        }
    }

    fn invalid(&self, action: &'static str) -> GridError {
        GridError::InvalidTransition {
            state: self.state,
            action,
        }
    }

    fn editable_spec(&self, field: &str, action: &'static str) -> Result<&'static FieldSpec> {
        self.ensure_kind_editable(action)?;
        if !self.state.is_editable() {
            return Err(self.invalid(action));
        }
        self.schema()
            .field(field)
            .filter(|spec| spec.is_operator_input())
            .ok_or_else(|| GridError::NoSuchField {
                kind: self.kind,
                field: field.to_string(),
            })
    }

    fn entries_mut(&mut self, field: &str, action: &'static str) -> Result<&mut Vec<String>> {
        let spec = self.editable_spec(field, action)?;
        let kind = self.kind;
        match self.fields.get_mut(spec.name) {
            Some(FieldValue::Repeating(items)) => Ok(items),
            _ => Err(GridError::NoSuchField {
                kind,
                field: field.to_string(),
            }),
        }
    }
}

/// JSON form of a normalized value
fn encode(value: &FieldValue) -> serde_json::Value {
    match value {
        FieldValue::Scalar(s) => serde_json::Value::String(s.clone()),
        FieldValue::Repeating(items) => {
            serde_json::Value::Array(items.iter().cloned().map(serde_json::Value::String).collect())
        }
    }
}

/// Compact description of a row for logs
pub fn describe(row: &Row) -> String {
    let fields = row
        .fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, json_to_text(&encode(v))))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} {} [{}] {}", row.kind, row.key, row.state.as_str(), fields)
}
