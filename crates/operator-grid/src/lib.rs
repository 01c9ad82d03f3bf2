//! # Operator Grid - editable data grids for the hotspot operator console
//!
//! One generic engine drives the employee roster, the phone blacklist and the
//! WiFi-client list: paginated and searchable pages, rows that move between
//! view, edit and unsaved-new states, and repeating fields such as an
//! employee's list of phones.
//!
//! ## Features
//!
//! - **Message driven**: operator [`Command`]s and gateway [`Response`]s are
//!   consumed by a [`GridController`], which answers with [`Effect`]s
//! - **Stale responses dropped**: per-grid sequence numbers on every request
//! - **Backends**: in-memory, HTTP (`http` feature, on by default)
//! - **Markup**: rows, tables and page bars rendered with maud
//!
//! ## Example
//!
//! ```rust
//! use operator_grid::gateway::memory::MemoryGateway;
//! use operator_grid::{Command, Console, GridConfig, LogDialog, RecordKind};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = MemoryGateway::new();
//!     gateway.add_blacklisted("+7 916 000 00 00").await;
//!
//!     let mut console = Console::new(
//!         Arc::new(gateway),
//!         Box::new(LogDialog::default()),
//!         Arc::new(|key: &str, _: &[(&str, String)]| key.to_string()),
//!         &GridConfig::default(),
//!     );
//!     console.start().await.unwrap();
//!     console.dispatch(RecordKind::Blacklist, Command::AddRow).await.unwrap();
//!
//!     let grid = console.grid(RecordKind::Blacklist).unwrap();
//!     assert_eq!(grid.rows().len(), 2);
//! }
//! ```

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod i18n;
pub mod kind;
pub mod normalize;
pub mod pagination;
pub mod registry;
pub mod render;
pub mod row;
pub mod schema;
pub mod value;

pub use command::{Command, Effect, Notice, Outgoing, Response, Ticket};
pub use config::{Config, GatewayConfig, GridConfig, UiConfig};
pub use controller::{GridController, GridState};
pub use error::{GridError, Result, TransportError, ValidationError};
pub use gateway::{Gateway, Reply, Request};
pub use i18n::{Catalog, Dialog, LogDialog, Translate};
pub use kind::RecordKind;
pub use normalize::{is_blank, normalize_phone};
pub use pagination::{page_buttons, total_pages, PageButton};
pub use registry::{Console, GridRegistry};
pub use render::{render_pagination, render_row, render_table};
pub use row::{Row, RowKey, RowState};
pub use schema::{schema_for, FieldSchema, FieldSpec};
pub use value::FieldValue;

#[cfg(feature = "http")]
pub use gateway::http::HttpGateway;
