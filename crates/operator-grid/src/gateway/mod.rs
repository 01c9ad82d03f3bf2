//! Remote sync gateway: the stateless request/response boundary to the
//! console backend.
//!
//! Backends convert every failure into the grid error taxonomy:
//! `success: false` becomes [`GridError::RemoteRejection`], anything
//! below that (connection errors, non-2xx, unparseable bodies) becomes
//! [`GridError::Transport`].

use async_trait::async_trait;

use crate::error::{GridError, Result};
use crate::kind::RecordKind;

pub mod memory;
pub mod wire;

#[cfg(feature = "http")]
pub mod http;

pub use wire::{ActionReply, ListReply, PageQuery, RecordPayload};

/// Trait for console backends
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch one page of a grid
    async fn list(&self, kind: RecordKind, query: &PageQuery) -> Result<ListReply>;

    /// Create or update a record; returns the id assigned to a created record
    async fn save(&self, kind: RecordKind, payload: &RecordPayload) -> Result<Option<i64>>;

    /// Delete the record identified by `identity`
    async fn delete(&self, kind: RecordKind, identity: &RecordPayload) -> Result<()>;

    /// End the session of a WiFi client
    async fn deauth(&self, mac: &str) -> Result<()>;

    /// Blacklist the phone behind a WiFi client
    async fn block(&self, mac: &str) -> Result<()>;

    /// Get backend name
    fn name(&self) -> &'static str;
}

/// A call the controller wants made
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    List { kind: RecordKind, query: PageQuery },
    Save { kind: RecordKind, payload: RecordPayload },
    Delete { kind: RecordKind, identity: RecordPayload },
    Deauth { mac: String },
    Block { mac: String },
}

impl Request {
    pub fn verb(&self) -> &'static str {
        match self {
            Request::List { .. } => "list",
            Request::Save { .. } => "save",
            Request::Delete { .. } => "delete",
            Request::Deauth { .. } => "deauth",
            Request::Block { .. } => "block",
        }
    }
}

/// Successful outcome of a [`Request`]
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Page(ListReply),
    Saved { new_id: Option<i64> },
    Done,
}

/// Run one request against a backend
pub async fn execute(gateway: &dyn Gateway, request: &Request) -> Result<Reply> {
    tracing::debug!(backend = gateway.name(), verb = request.verb(), "sending request");

    let outcome = match request {
        Request::List { kind, query } => gateway.list(*kind, query).await.map(Reply::Page),
        Request::Save { kind, payload } => gateway
            .save(*kind, payload)
            .await
            .map(|new_id| Reply::Saved { new_id }),
        Request::Delete { kind, identity } => {
            gateway.delete(*kind, identity).await.map(|_| Reply::Done)
        }
        Request::Deauth { mac } => gateway.deauth(mac).await.map(|_| Reply::Done),
        Request::Block { mac } => gateway.block(mac).await.map(|_| Reply::Done),
    };

    match &outcome {
        Err(GridError::Transport(err)) => {
            tracing::error!(verb = request.verb(), error = %err, "transport failure")
        }
        Err(GridError::RemoteRejection(description)) => {
            tracing::warn!(verb = request.verb(), %description, "request rejected")
        }
        _ => {}
    }
    outcome
}
