// File: operator-grid/src/gateway/wire.rs
// Purpose: JSON bodies exchanged with the console backend

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Query of one grid page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub search: String,
    pub rows_per_page: u32,
}

/// Body of `GET /table/{kind}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListReply {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    pub current_page: u32,
    pub total_rows: u64,
    #[serde(default)]
    pub rows_per_page: Option<u32>,
}

/// Request body built from a row: a save payload or a delete identity.
///
/// Keys are the schema's server keys, phones are normalized digit strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordPayload(pub serde_json::Map<String, serde_json::Value>);

impl RecordPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(|v| v.as_i64())
    }
}

/// Body of `POST /deauth` and `POST /block`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacBody {
    pub mac: String,
}

/// Failure description; older backends send a bare string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Structured { description: String },
    Text(String),
}

impl ErrorBody {
    pub fn description(&self) -> &str {
        match self {
            ErrorBody::Structured { description } => description,
            ErrorBody::Text(text) => text,
        }
    }
}

/// Envelope of every mutating endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ActionReply {
    pub fn ok() -> Self {
        Self {
            success: true,
            new_id: None,
            error: None,
        }
    }

    pub fn created(id: i64) -> Self {
        Self {
            new_id: Some(id),
            ..Self::ok()
        }
    }

    pub fn rejected(description: impl Into<String>) -> Self {
        Self {
            success: false,
            new_id: None,
            error: Some(ErrorBody::Structured {
                description: description.into(),
            }),
        }
    }

    /// `success: false` becomes a remote rejection carrying the server's description
    pub fn into_result(self) -> Result<Option<i64>> {
        if self.success {
            return Ok(self.new_id);
        }
        let description = self
            .error
            .as_ref()
            .map(|e| e.description().to_string())
            .unwrap_or_default();
        Err(GridError::RemoteRejection(description))
    }
}
