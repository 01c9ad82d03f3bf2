// File: operator-grid/src/kind.rs
// Purpose: Record kinds shown by the operator console grids

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GridError;

/// The record type a grid displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Staff roster, one row per employee with a list of phones
    Employee,
    /// Blocked phone numbers
    Blacklist,
    /// Read-only view of connected WiFi clients
    #[serde(rename = "wifi_clients", alias = "wifi_client")]
    WifiClient,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Employee,
        RecordKind::Blacklist,
        RecordKind::WifiClient,
    ];

    /// Path segment used by the remote endpoints
    pub fn slug(self) -> &'static str {
        match self {
            RecordKind::Employee => "employee",
            RecordKind::Blacklist => "blacklist",
            RecordKind::WifiClient => "wifi_clients",
        }
    }

    /// Whether rows of this kind can be created, edited and deleted
    pub fn is_editable(self) -> bool {
        match self {
            RecordKind::Employee | RecordKind::Blacklist => true,
            RecordKind::WifiClient => false,
        }
    }

    /// Translation key of the table caption
    pub fn title_key(self) -> &'static str {
        match self {
            RecordKind::Employee => "admin.tables.employee.title",
            RecordKind::Blacklist => "admin.tables.blacklist.title",
            RecordKind::WifiClient => "admin.tables.wifi_clients.title",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for RecordKind {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" | "employees" => Ok(RecordKind::Employee),
            "blacklist" => Ok(RecordKind::Blacklist),
            "wifi_clients" | "wifi_client" => Ok(RecordKind::WifiClient),
            other => Err(GridError::UnknownKind(other.to_string())),
        }
    }
}
