//! In-memory console backend
//!
//! Keeps the three tables in memory and answers like the real backend does:
//! paginated, searchable listings and `success: false` rejections for
//! duplicates and missing records. Every call is recorded so callers can
//! check which requests were (or were not) made.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{GridError, Result, TransportError};
use crate::gateway::wire::{ListReply, PageQuery, RecordPayload};
use crate::gateway::Gateway;
use crate::kind::RecordKind;
use crate::normalize::normalize_phone;

/// Stored employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    pub lastname: String,
    pub name: String,
    pub phones: Vec<String>,
}

/// Stored WiFi client session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiClientRecord {
    pub mac: String,
    pub expiration: Option<String>,
    pub employee: bool,
    pub phone: Option<String>,
    pub online: bool,
    pub last_location: Option<String>,
    pub last_ipv4_address: Option<String>,
}

impl WifiClientRecord {
    pub fn new(mac: impl Into<String>, phone: Option<&str>) -> Self {
        Self {
            mac: mac.into(),
            expiration: None,
            employee: false,
            phone: phone.map(normalize_phone),
            online: false,
            last_location: None,
            last_ipv4_address: None,
        }
    }
}

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCall {
    pub verb: &'static str,
    pub kind: Option<RecordKind>,
    pub body: serde_json::Value,
}

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<EmployeeRecord>,
    last_employee_id: i64,
    blacklist: Vec<String>,
    wifi_clients: Vec<WifiClientRecord>,
}

/// In-memory backend
#[derive(Clone, Default)]
pub struct MemoryGateway {
    tables: Arc<RwLock<Tables>>,
    calls: Arc<RwLock<Vec<GatewayCall>>>,
    failures: Arc<RwLock<VecDeque<TransportError>>>,
}

impl MemoryGateway {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an employee; returns the assigned id
    pub async fn add_employee(&self, lastname: &str, name: &str, phones: &[&str]) -> i64 {
        let mut tables = self.tables.write().await;
        tables.last_employee_id += 1;
        let id = tables.last_employee_id;
        tables.employees.push(EmployeeRecord {
            id,
            lastname: lastname.to_string(),
            name: name.to_string(),
            phones: phones.iter().map(|p| normalize_phone(p)).collect(),
        });
        id
    }

    /// Seed a blacklisted phone
    pub async fn add_blacklisted(&self, phone: &str) {
        self.tables.write().await.blacklist.push(normalize_phone(phone));
    }

    /// Seed a WiFi client
    pub async fn add_wifi_client(&self, client: WifiClientRecord) {
        self.tables.write().await.wifi_clients.push(client);
    }

    /// Make the next call fail with a transport error
    pub async fn fail_next(&self, err: TransportError) {
        self.failures.write().await.push_back(err);
    }

    pub async fn employees(&self) -> Vec<EmployeeRecord> {
        self.tables.read().await.employees.clone()
    }

    pub async fn blacklist(&self) -> Vec<String> {
        self.tables.read().await.blacklist.clone()
    }

    pub async fn wifi_clients(&self) -> Vec<WifiClientRecord> {
        self.tables.read().await.wifi_clients.clone()
    }

    /// Every call made so far, oldest first
    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Calls with the given verb (`list`, `save`, `delete`, `deauth`, `block`)
    pub async fn calls_of(&self, verb: &str) -> Vec<GatewayCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.verb == verb)
            .cloned()
            .collect()
    }

    async fn record(
        &self,
        verb: &'static str,
        kind: Option<RecordKind>,
        body: serde_json::Value,
    ) -> Result<()> {
        self.calls.write().await.push(GatewayCall { verb, kind, body });
        match self.failures.write().await.pop_front() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

fn required_str<'a>(payload: &'a RecordPayload, key: &str) -> Result<&'a str> {
    payload
        .get_str(key)
        .ok_or_else(|| GridError::remote(format!("missing `{}` in request data", key)))
}

fn paginate<T: Clone>(items: &[T], query: &PageQuery) -> Vec<T> {
    let per_page = query.rows_per_page.max(1) as usize;
    let offset = (query.page.max(1) as usize - 1) * per_page;
    items.iter().skip(offset).take(per_page).cloned().collect()
}

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn list(&self, kind: RecordKind, query: &PageQuery) -> Result<ListReply> {
        let body = serde_json::to_value(query).unwrap_or_default();
        self.record("list", Some(kind), body).await?;

        let tables = self.tables.read().await;
        let needle = query.search.trim().to_lowercase();

        let (rows, total): (Vec<serde_json::Value>, usize) = match kind {
            RecordKind::Employee => {
                let found: Vec<_> = tables
                    .employees
                    .iter()
                    .filter(|e| {
                        needle.is_empty()
                            || matches(&e.lastname, &needle)
                            || matches(&e.name, &needle)
                            || e.phones.iter().any(|p| matches(p, &needle))
                    })
                    .cloned()
                    .collect();
                let page = paginate(&found, query)
                    .into_iter()
                    .map(|e| serde_json::to_value(e).unwrap_or_default())
                    .collect();
                (page, found.len())
            }
            RecordKind::Blacklist => {
                let found: Vec<_> = tables
                    .blacklist
                    .iter()
                    .filter(|p| needle.is_empty() || matches(p, &needle))
                    .cloned()
                    .collect();
                let page = paginate(&found, query)
                    .into_iter()
                    .map(serde_json::Value::String)
                    .collect();
                (page, found.len())
            }
            RecordKind::WifiClient => {
                let found: Vec<_> = tables
                    .wifi_clients
                    .iter()
                    .filter(|c| {
                        needle.is_empty()
                            || matches(&c.mac, &needle)
                            || c.phone.as_deref().is_some_and(|p| matches(p, &needle))
                    })
                    .cloned()
                    .collect();
                let page = paginate(&found, query)
                    .into_iter()
                    .map(|c| serde_json::to_value(c).unwrap_or_default())
                    .collect();
                (page, found.len())
            }
        };

        Ok(ListReply {
            data: rows,
            current_page: query.page,
            total_rows: total as u64,
            rows_per_page: Some(query.rows_per_page),
        })
    }

    async fn save(&self, kind: RecordKind, payload: &RecordPayload) -> Result<Option<i64>> {
        let body = serde_json::to_value(payload).unwrap_or_default();
        self.record("save", Some(kind), body).await?;

        let mut tables = self.tables.write().await;
        match kind {
            RecordKind::Employee => {
                let lastname = required_str(payload, "lastname")?.to_string();
                let name = required_str(payload, "name")?.to_string();
                let phones: Vec<String> = payload
                    .get("phone")
                    .and_then(|v| v.as_array())
                    .ok_or_else(|| GridError::remote("missing `phone` in request data"))?
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(normalize_phone)
                    .collect();

                match payload.get_i64("id") {
                    Some(id) => {
                        let taken = tables.employees.iter().any(|e| {
                            e.id != id && e.phones.iter().any(|p| phones.contains(p))
                        });
                        if taken {
                            return Err(GridError::remote("phone number exists"));
                        }
                        let employee = tables
                            .employees
                            .iter_mut()
                            .find(|e| e.id == id)
                            .ok_or_else(|| GridError::remote("employee not found"))?;
                        employee.lastname = lastname;
                        employee.name = name;
                        employee.phones = phones;
                        Ok(None)
                    }
                    None => {
                        let taken = tables
                            .employees
                            .iter()
                            .any(|e| e.phones.iter().any(|p| phones.contains(p)));
                        if taken {
                            return Err(GridError::remote("phone number exists"));
                        }
                        tables.last_employee_id += 1;
                        let id = tables.last_employee_id;
                        tables.employees.push(EmployeeRecord {
                            id,
                            lastname,
                            name,
                            phones,
                        });
                        Ok(Some(id))
                    }
                }
            }
            RecordKind::Blacklist => {
                let phone = normalize_phone(required_str(payload, "phone")?);
                if tables.blacklist.contains(&phone) {
                    return Err(GridError::remote("phone number exists"));
                }
                tables.blacklist.push(phone);
                Ok(None)
            }
            RecordKind::WifiClient => Err(GridError::remote("table is read-only")),
        }
    }

    async fn delete(&self, kind: RecordKind, identity: &RecordPayload) -> Result<()> {
        let body = serde_json::to_value(identity).unwrap_or_default();
        self.record("delete", Some(kind), body).await?;

        let mut tables = self.tables.write().await;
        match kind {
            RecordKind::Employee => {
                let id = identity
                    .get_i64("id")
                    .ok_or_else(|| GridError::remote("bad employee id"))?;
                let before = tables.employees.len();
                tables.employees.retain(|e| e.id != id);
                if tables.employees.len() == before {
                    return Err(GridError::remote("employee not found"));
                }
                Ok(())
            }
            RecordKind::Blacklist => {
                let phone = normalize_phone(required_str(identity, "phone")?);
                let before = tables.blacklist.len();
                tables.blacklist.retain(|p| *p != phone);
                if tables.blacklist.len() == before {
                    return Err(GridError::remote("phone not found"));
                }
                Ok(())
            }
            RecordKind::WifiClient => Err(GridError::remote("table is read-only")),
        }
    }

    async fn deauth(&self, mac: &str) -> Result<()> {
        self.record("deauth", None, serde_json::json!({ "mac": mac }))
            .await?;

        let mut tables = self.tables.write().await;
        let client = tables
            .wifi_clients
            .iter_mut()
            .find(|c| c.mac == mac)
            .ok_or_else(|| GridError::remote("client not found"))?;
        client.expiration = None;
        client.online = false;
        Ok(())
    }

    async fn block(&self, mac: &str) -> Result<()> {
        self.record("block", None, serde_json::json!({ "mac": mac }))
            .await?;

        let mut tables = self.tables.write().await;
        let position = tables
            .wifi_clients
            .iter()
            .position(|c| c.mac == mac)
            .ok_or_else(|| GridError::remote("client not found"))?;
        let phone = tables.wifi_clients[position]
            .phone
            .clone()
            .ok_or_else(|| GridError::remote("client has no phone number"))?;
        if tables.blacklist.contains(&phone) {
            return Err(GridError::remote("already blocked"));
        }

        tables.wifi_clients.remove(position);
        tables.blacklist.push(phone);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
