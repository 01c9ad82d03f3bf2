//! Error taxonomy for grid operations.
//!
//! Three classes reach the operator: local validation failures, remote
//! rejections (`success: false` from the server) and transport failures.
//! The remaining variants are misuse of the controller API (unknown rows,
//! actions that the row state does not allow) and are reported the same way.

use thiserror::Error;

use crate::kind::RecordKind;
use crate::row::{RowKey, RowState};

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Local validation failure, raised before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{field}` must not be empty")]
    EmptyField { field: String },
}

/// Network failure or a response that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection, timeout or other client-side failure
    #[error("request failed: {0}")]
    Request(String),

    /// Non-2xx status code
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not the JSON we expected
    #[error("unparseable response: {0}")]
    Decode(String),
}

/// Errors surfaced by grid operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Server answered with `success: false`
    #[error("rejected by server: {0}")]
    RemoteRejection(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("unknown record kind: {0}")]
    UnknownKind(String),

    #[error("no row with key {0}")]
    UnknownRow(RowKey),

    #[error("cannot {action} a row in state {state:?}")]
    InvalidTransition {
        state: RowState,
        action: &'static str,
    },

    #[error("{kind} grid does not support {action}")]
    Unsupported {
        kind: RecordKind,
        action: &'static str,
    },

    #[error("{kind} has no field `{field}`")]
    NoSuchField { kind: RecordKind, field: String },
}

impl GridError {
    pub fn remote(description: impl Into<String>) -> Self {
        Self::RemoteRejection(description.into())
    }

    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::Validation(ValidationError::EmptyField {
            field: field.into(),
        })
    }

    /// Translation key used when the error is shown to the operator
    pub fn notice_key(&self) -> &'static str {
        match self {
            GridError::Validation(ValidationError::EmptyField { .. }) => {
                "errors.admin.tables.empty_field"
            }
            GridError::RemoteRejection(_) => "errors.admin.tables.rejected",
            GridError::Transport(_) => "errors.admin.tables.transport",
            GridError::UnknownKind(_) => "errors.admin.tables.unknown_table",
            GridError::UnknownRow(_) => "errors.admin.tables.row_not_found",
            GridError::InvalidTransition { .. } => "errors.admin.tables.invalid_action",
            GridError::Unsupported { .. } => "errors.admin.tables.unsupported",
            GridError::NoSuchField { .. } => "errors.admin.tables.unknown_field",
        }
    }

    /// Placeholder values for the translated notice
    pub fn notice_params(&self) -> Vec<(&'static str, String)> {
        match self {
            GridError::Validation(ValidationError::EmptyField { field }) => {
                vec![("field", field.clone())]
            }
            GridError::RemoteRejection(description) => vec![("description", description.clone())],
            GridError::UnknownKind(name) => vec![("table", name.clone())],
            GridError::Unsupported { kind, action } => {
                vec![("table", kind.slug().to_string()), ("action", action.to_string())]
            }
            GridError::NoSuchField { field, .. } => vec![("field", field.clone())],
            // Transport details go to the log, the operator gets a generic message
            _ => Vec::new(),
        }
    }
}
