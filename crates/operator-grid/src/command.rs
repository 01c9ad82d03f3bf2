// File: operator-grid/src/command.rs
// Purpose: Messages exchanged between the operator, the grid controllers and the gateway

use crate::error::{GridError, Result};
use crate::gateway::{Reply, Request};
use crate::kind::RecordKind;
use crate::row::RowKey;
use crate::value::FieldValue;

/// Identifies one outgoing request; `seq` grows monotonically per grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub kind: RecordKind,
    pub seq: u64,
}

/// One operator interaction with a grid
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadPage,
    Search(String),
    GotoPage(u32),
    AddRow,
    BeginEdit(RowKey),
    SetField {
        row: RowKey,
        field: String,
        value: FieldValue,
    },
    SetEntry {
        row: RowKey,
        field: String,
        index: usize,
        value: String,
    },
    AddEntry {
        row: RowKey,
        field: String,
    },
    RemoveEntry {
        row: RowKey,
        field: String,
        index: usize,
    },
    Save(RowKey),
    Delete(RowKey),
    Deauth(String),
    Block(String),
}

/// A request the controller wants sent
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub ticket: Ticket,
    pub request: Request,
}

/// Failure to show to the operator
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: RecordKind,
    pub error: GridError,
}

/// What a controller asks of its surroundings after a command or response
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Send(Outgoing),
    Notify(Notice),
    /// Another grid must refetch its current page
    Reload(RecordKind),
    /// Rows or page state changed
    Rerender,
}

/// A completed request coming back to its grid
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub ticket: Ticket,
    pub outcome: Result<Reply>,
}

impl Response {
    pub fn new(ticket: Ticket, outcome: Result<Reply>) -> Self {
        Self { ticket, outcome }
    }
}
