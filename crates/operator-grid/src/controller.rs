//! Grid controller: one table's page, search term and rows.
//!
//! The controller never talks to the network itself. Commands come in,
//! [`Effect`]s go out; a [`Effect::Send`] carries a [`Ticket`] and the
//! completed request comes back through [`GridController::apply`].
//!
//! Every request gets a sequence number. A page response is applied only
//! when it answers the latest page request, and a save or delete response
//! is applied only while its row still exists. Everything else is dropped
//! with a warning.

use std::collections::HashMap;

use crate::command::{Command, Effect, Notice, Outgoing, Response, Ticket};
use crate::error::{GridError, Result, TransportError};
use crate::gateway::wire::{ListReply, PageQuery};
use crate::gateway::{Reply, Request};
use crate::kind::RecordKind;
use crate::pagination::total_pages;
use crate::row::{describe, Commit, Fields, Row, RowKey, RowState};
use crate::value::FieldValue;

/// Data of one table
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    pub kind: RecordKind,
    /// 1-based; may exceed the page count until the next fetch corrects it
    pub current_page: u32,
    pub page_size: u32,
    pub search_query: String,
    pub rows: Vec<Row>,
    pub total_rows: u64,
}

impl GridState {
    pub fn new(kind: RecordKind, page_size: u32) -> Self {
        Self {
            kind,
            current_page: 1,
            page_size: page_size.max(1),
            search_query: String::new(),
            rows: Vec::new(),
            total_rows: 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_rows, self.page_size)
    }

    pub fn row(&self, key: RowKey) -> Option<&Row> {
        self.rows.iter().find(|r| r.key() == key)
    }

    fn query(&self) -> PageQuery {
        PageQuery {
            page: self.current_page,
            search: self.search_query.clone(),
            rows_per_page: self.page_size,
        }
    }
}

/// What an issued ticket was for
#[derive(Debug, Clone)]
enum Pending {
    List,
    Save { row: RowKey, submitted: Fields },
    Delete { row: RowKey },
    Deauth,
    Block,
}

/// Controller of one grid
#[derive(Debug)]
pub struct GridController {
    state: GridState,
    next_seq: u64,
    next_key: u64,
    pending: HashMap<u64, Pending>,
    latest_list: Option<u64>,
}

impl GridController {
    pub fn new(kind: RecordKind, page_size: u32) -> Self {
        Self {
            state: GridState::new(kind, page_size),
            next_seq: 0,
            next_key: 0,
            pending: HashMap::new(),
            latest_list: None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.state.kind
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn rows(&self) -> &[Row] {
        &self.state.rows
    }

    pub fn row(&self, key: RowKey) -> Option<&Row> {
        self.state.row(key)
    }

    /// Number of requests still awaiting a response
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Handle one operator command. Failures become [`Effect::Notify`].
    pub fn handle(&mut self, command: Command) -> Vec<Effect> {
        tracing::debug!(kind = %self.kind(), ?command, "grid command");

        let result = match command {
            Command::LoadPage => Ok(self.load_page()),
            Command::Search(query) => Ok(self.search_changed(query)),
            Command::GotoPage(page) => Ok(self.goto_page(page)),
            Command::AddRow => self.add_row().map(|_| vec![Effect::Rerender]),
            Command::BeginEdit(key) => self.begin_edit(key),
            Command::SetField { row, field, value } => self
                .row_mut(row)
                .and_then(|r| r.set_field(&field, value))
                .map(|_| Vec::new()),
            Command::SetEntry {
                row,
                field,
                index,
                value,
            } => self
                .row_mut(row)
                .and_then(|r| r.set_entry(&field, index, value))
                .map(|_| Vec::new()),
            Command::AddEntry { row, field } => self
                .row_mut(row)
                .and_then(|r| r.add_entry(&field))
                .map(|_| vec![Effect::Rerender]),
            Command::RemoveEntry { row, field, index } => self
                .row_mut(row)
                .and_then(|r| r.remove_entry(&field, index))
                .map(|_| vec![Effect::Rerender]),
            Command::Save(key) => self.commit_edit(key),
            Command::Delete(key) => self.delete_row(key),
            Command::Deauth(mac) => self.deauth(mac),
            Command::Block(mac) => self.block(mac),
        };

        result.unwrap_or_else(|error| vec![self.notify(error)])
    }

    /// Fetch the current page. Supersedes every earlier page request.
    pub fn load_page(&mut self) -> Vec<Effect> {
        let seq = self.issue(Pending::List);
        self.latest_list = Some(seq);
        vec![self.send(
            seq,
            Request::List {
                kind: self.kind(),
                query: self.state.query(),
            },
        )]
    }

    pub fn search_changed(&mut self, query: impl Into<String>) -> Vec<Effect> {
        self.state.search_query = query.into();
        self.state.current_page = 1;
        self.load_page()
    }

    /// Pages past the end are fetched as asked; the response decides what is shown
    pub fn goto_page(&mut self, page: u32) -> Vec<Effect> {
        self.state.current_page = page.max(1);
        self.load_page()
    }

    /// Append a blank row at the end of the visible rows
    pub fn add_row(&mut self) -> Result<RowKey> {
        if !self.kind().is_editable() {
            return Err(GridError::Unsupported {
                kind: self.kind(),
                action: "add",
            });
        }
        let key = self.allocate_key();
        self.state.rows.push(Row::new_unsaved(key, self.kind()));
        tracing::debug!(kind = %self.kind(), row = %key, "row added");
        Ok(key)
    }

    pub fn begin_edit(&mut self, key: RowKey) -> Result<Vec<Effect>> {
        self.row_mut(key)?.begin_edit()?;
        Ok(vec![Effect::Rerender])
    }

    /// Validate and diff the row; send it only when something changed
    pub fn commit_edit(&mut self, key: RowKey) -> Result<Vec<Effect>> {
        let kind = self.kind();
        let commit = self.row_mut(key)?.commit()?;

        match commit {
            Commit::Unchanged => Ok(vec![Effect::Rerender]),
            Commit::Send { payload, submitted } => {
                let seq = self.issue(Pending::Save {
                    row: key,
                    submitted,
                });
                self.row_mut(key)?.mark_in_flight(seq);
                Ok(vec![
                    self.send(seq, Request::Save { kind, payload }),
                    Effect::Rerender,
                ])
            }
        }
    }

    /// Unsaved rows go away locally; others are deleted by their confirmed identity
    pub fn delete_row(&mut self, key: RowKey) -> Result<Vec<Effect>> {
        let kind = self.kind();
        if !kind.is_editable() {
            return Err(GridError::Unsupported {
                kind,
                action: "delete",
            });
        }

        let row = self.row_mut(key)?;
        if row.state() == RowState::NewUnsaved {
            self.state.rows.retain(|r| r.key() != key);
            tracing::debug!(kind = %kind, row = %key, "unsaved row dropped");
            return Ok(vec![Effect::Rerender]);
        }

        let identity = row.delete_identity()?;
        let seq = self.issue(Pending::Delete { row: key });
        self.row_mut(key)?.mark_in_flight(seq);
        Ok(vec![
            self.send(seq, Request::Delete { kind, identity }),
            Effect::Rerender,
        ])
    }

    pub fn deauth(&mut self, mac: impl Into<String>) -> Result<Vec<Effect>> {
        self.ensure_wifi("deauth")?;
        let seq = self.issue(Pending::Deauth);
        Ok(vec![self.send(seq, Request::Deauth { mac: mac.into() })])
    }

    pub fn block(&mut self, mac: impl Into<String>) -> Result<Vec<Effect>> {
        self.ensure_wifi("block")?;
        let seq = self.issue(Pending::Block);
        Ok(vec![self.send(seq, Request::Block { mac: mac.into() })])
    }

    /// Apply a completed request
    pub fn apply(&mut self, response: Response) -> Vec<Effect> {
        let Response { ticket, outcome } = response;
        let kind = self.kind();
        if ticket.kind != kind {
            tracing::warn!(%kind, ?ticket, "response for another grid dropped");
            return Vec::new();
        }
        let Some(pending) = self.pending.remove(&ticket.seq) else {
            tracing::warn!(%kind, seq = ticket.seq, "response for unknown request dropped");
            return Vec::new();
        };

        match (pending, outcome) {
            (Pending::List, outcome) => self.apply_page(ticket.seq, outcome),
            (Pending::Save { row, submitted }, Ok(Reply::Saved { new_id })) => {
                match self.state.rows.iter_mut().find(|r| r.key() == row) {
                    Some(r) => {
                        r.confirm_saved(submitted, new_id);
                        vec![Effect::Rerender]
                    }
                    None => {
                        tracing::warn!(%kind, %row, seq = ticket.seq, "save response for a row no longer shown dropped");
                        Vec::new()
                    }
                }
            }
            (Pending::Delete { row }, Ok(Reply::Done)) => {
                let before = self.state.rows.len();
                self.state.rows.retain(|r| r.key() != row);
                if self.state.rows.len() == before {
                    tracing::warn!(%kind, %row, seq = ticket.seq, "delete response for a row no longer shown dropped");
                    return Vec::new();
                }
                tracing::debug!(%kind, %row, "row deleted");
                vec![Effect::Rerender]
            }
            (Pending::Deauth, Ok(Reply::Done)) => self.load_page(),
            (Pending::Block, Ok(Reply::Done)) => {
                let mut effects = self.load_page();
                effects.push(Effect::Reload(RecordKind::Blacklist));
                effects
            }
            (Pending::Save { row, .. } | Pending::Delete { row }, Err(error)) => {
                if let Some(r) = self.state.rows.iter_mut().find(|r| r.key() == row) {
                    r.clear_in_flight(ticket.seq);
                }
                vec![self.notify(error), Effect::Rerender]
            }
            (_, Err(error)) => vec![self.notify(error)],
            (pending, Ok(reply)) => {
                let error = TransportError::Decode(format!(
                    "unexpected reply {:?} to {:?}",
                    reply, pending
                ));
                if let Pending::Save { row, .. } | Pending::Delete { row } = pending {
                    if let Some(r) = self.state.rows.iter_mut().find(|r| r.key() == row) {
                        r.clear_in_flight(ticket.seq);
                    }
                }
                vec![self.notify(error.into())]
            }
        }
    }

    fn apply_page(&mut self, seq: u64, outcome: Result<Reply>) -> Vec<Effect> {
        if self.latest_list != Some(seq) {
            tracing::warn!(kind = %self.kind(), seq, latest = ?self.latest_list, "stale page response dropped");
            return Vec::new();
        }

        let reply = match outcome {
            Ok(Reply::Page(reply)) => reply,
            Ok(other) => {
                let error = TransportError::Decode(format!("unexpected reply {:?} to list", other));
                return vec![self.notify(error.into())];
            }
            Err(error) => return vec![self.notify(error)],
        };

        match self.hydrate_page(&reply) {
            Ok(rows) => {
                let dropped = self
                    .state
                    .rows
                    .iter()
                    .filter(|r| r.state() != RowState::View)
                    .count();
                if dropped > 0 {
                    tracing::debug!(kind = %self.kind(), dropped, "reload discarded unsaved rows");
                }
                self.state.rows = rows;
                self.state.total_rows = reply.total_rows;
                self.state.current_page = reply.current_page.max(1);
                // rows of the old page are gone, so are their in-flight requests
                self.pending
                    .retain(|_, p| !matches!(p, Pending::Save { .. } | Pending::Delete { .. }));
                tracing::debug!(
                    kind = %self.kind(),
                    page = self.state.current_page,
                    total_rows = self.state.total_rows,
                    rows = self.state.rows.len(),
                    "page loaded"
                );
                vec![Effect::Rerender]
            }
            Err(error) => vec![self.notify(error)],
        }
    }

    fn hydrate_page(&mut self, reply: &ListReply) -> Result<Vec<Row>> {
        let kind = self.kind();
        let first_key = self.next_key;
        let rows = reply
            .data
            .iter()
            .enumerate()
            .map(|(i, data)| Row::hydrate(RowKey(first_key + i as u64), kind, data))
            .collect::<Result<Vec<_>>>()?;
        self.next_key += rows.len() as u64;
        Ok(rows)
    }

    fn issue(&mut self, pending: Pending) -> u64 {
        self.next_seq += 1;
        self.pending.insert(self.next_seq, pending);
        self.next_seq
    }

    fn send(&self, seq: u64, request: Request) -> Effect {
        Effect::Send(Outgoing {
            ticket: Ticket {
                kind: self.kind(),
                seq,
            },
            request,
        })
    }

    fn notify(&self, error: GridError) -> Effect {
        Effect::Notify(Notice {
            kind: self.kind(),
            error,
        })
    }

    fn allocate_key(&mut self) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        key
    }

    fn row_mut(&mut self, key: RowKey) -> Result<&mut Row> {
        self.state
            .rows
            .iter_mut()
            .find(|r| r.key() == key)
            .ok_or(GridError::UnknownRow(key))
    }

    fn ensure_wifi(&self, action: &'static str) -> Result<()> {
        if self.kind() == RecordKind::WifiClient {
            Ok(())
        } else {
            Err(GridError::Unsupported {
                kind: self.kind(),
                action,
            })
        }
    }
}

impl std::fmt::Display for GridController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} page {}/{} search={:?}",
            self.kind(),
            self.state.current_page,
            self.state.total_pages(),
            self.state.search_query
        )?;
        for row in &self.state.rows {
            writeln!(f, "  {}", describe(row))?;
        }
        Ok(())
    }
}

/// Convenience for setting a field from plain text
impl From<(RowKey, &str, &str)> for Command {
    fn from((row, field, value): (RowKey, &str, &str)) -> Self {
        Command::SetField {
            row,
            field: field.to_string(),
            value: FieldValue::from(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::gateway::RecordPayload;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sent(effects: &[Effect]) -> Vec<&Outgoing> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Send(out) => Some(out),
                _ => None,
            })
            .collect()
    }

    fn only_send(effects: &[Effect]) -> Outgoing {
        let out = sent(effects);
        assert_eq!(out.len(), 1, "expected one request in {:?}", effects);
        out[0].clone()
    }

    fn page(ticket: Ticket, data: serde_json::Value, current_page: u32, total_rows: u64) -> Response {
        let data = data.as_array().cloned().unwrap_or_default();
        Response::new(
            ticket,
            Ok(Reply::Page(ListReply {
                data,
                current_page,
                total_rows,
                rows_per_page: None,
            })),
        )
    }

    fn loaded(kind: RecordKind, data: serde_json::Value) -> GridController {
        let mut grid = GridController::new(kind, 10);
        let out = only_send(&grid.load_page());
        let total = data.as_array().map_or(0, |a| a.len()) as u64;
        grid.apply(page(out.ticket, data, 1, total));
        grid
    }

    fn employees() -> GridController {
        loaded(
            RecordKind::Employee,
            json!([
                {"id": 1, "lastname": "Ivanov", "name": "Petr", "phones": ["79161234567"]},
                {"id": 2, "lastname": "Sidorova", "name": "Anna", "phones": ["79160000000", "79160000001"]}
            ]),
        )
    }

    fn notices(effects: &[Effect]) -> Vec<GridError> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(n) => Some(n.error.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_load_page_hydrates_view_rows() {
        let grid = employees();
        assert_eq!(grid.rows().len(), 2);
        assert!(grid.rows().iter().all(|r| r.state() == RowState::View));
        assert_eq!(grid.state().total_rows, 2);
        assert_eq!(grid.in_flight(), 0);
    }

    #[test]
    fn test_search_resets_page_and_fetches() {
        let mut grid = employees();
        grid.goto_page(3);
        let out = only_send(&grid.handle(Command::Search("iva".into())));
        assert_eq!(grid.state().current_page, 1);
        assert_eq!(
            out.request,
            Request::List {
                kind: RecordKind::Employee,
                query: PageQuery {
                    page: 1,
                    search: "iva".into(),
                    rows_per_page: 10
                }
            }
        );
    }

    #[test]
    fn test_goto_page_beyond_total_still_fetches() {
        let mut grid = employees();
        let out = only_send(&grid.handle(Command::GotoPage(99)));
        assert!(matches!(out.request, Request::List { ref query, .. } if query.page == 99));

        // the server answers with its own notion of the page
        grid.apply(page(out.ticket, json!([]), 99, 2));
        assert_eq!(grid.state().current_page, 99);
        assert!(grid.rows().is_empty());
    }

    #[test]
    fn test_add_row_appends_blank_row_without_fetch() {
        let mut grid = employees();
        let effects = grid.handle(Command::AddRow);
        assert_eq!(effects, vec![Effect::Rerender]);

        let row = grid.rows().last().unwrap();
        assert_eq!(row.state(), RowState::NewUnsaved);
        assert_eq!(row.value("phone"), Some(&FieldValue::from(vec![""])));
    }

    #[test]
    fn test_wifi_grid_has_no_add_row() {
        let mut grid = GridController::new(RecordKind::WifiClient, 10);
        let effects = grid.handle(Command::AddRow);
        assert!(matches!(
            notices(&effects)[..],
            [GridError::Unsupported { action: "add", .. }]
        ));
    }

    #[test]
    fn test_blank_field_never_sends_and_keeps_state() {
        let mut grid = employees();
        let key = grid.rows()[0].key();
        grid.handle(Command::BeginEdit(key));
        grid.handle((key, "lastname", "").into());

        let effects = grid.handle(Command::Save(key));
        assert!(sent(&effects).is_empty());
        assert_eq!(
            notices(&effects),
            vec![GridError::Validation(ValidationError::EmptyField {
                field: "lastname".into()
            })]
        );
        assert_eq!(grid.row(key).unwrap().state(), RowState::Editing);
    }

    #[test]
    fn test_unchanged_edit_returns_to_view_without_request() {
        let mut grid = employees();
        let key = grid.rows()[1].key();
        grid.handle(Command::BeginEdit(key));
        let effects = grid.handle(Command::Save(key));
        assert_eq!(effects, vec![Effect::Rerender]);
        assert_eq!(grid.row(key).unwrap().state(), RowState::View);
    }

    #[test]
    fn test_save_success_confirms_row() {
        let mut grid = employees();
        let key = grid.rows()[0].key();
        grid.handle(Command::BeginEdit(key));
        grid.handle((key, "name", "Pavel").into());

        let out = only_send(&grid.handle(Command::Save(key)));
        assert!(grid.row(key).unwrap().is_pending());

        let effects = grid.apply(Response::new(out.ticket, Ok(Reply::Saved { new_id: None })));
        assert_eq!(effects, vec![Effect::Rerender]);
        let row = grid.row(key).unwrap();
        assert_eq!(row.state(), RowState::View);
        assert_eq!(row.original_value("name"), Some(&FieldValue::from("Pavel")));
        assert!(!row.is_pending());
    }

    #[test]
    fn test_save_rejection_keeps_editing() {
        let mut grid = employees();
        let key = grid.rows()[0].key();
        grid.handle(Command::BeginEdit(key));
        grid.handle((key, "name", "Pavel").into());
        let out = only_send(&grid.handle(Command::Save(key)));

        let effects = grid.apply(Response::new(
            out.ticket,
            Err(GridError::remote("phone number exists")),
        ));
        assert_eq!(notices(&effects), vec![GridError::remote("phone number exists")]);

        let row = grid.row(key).unwrap();
        assert_eq!(row.state(), RowState::Editing);
        assert_eq!(row.value("name"), Some(&FieldValue::from("Pavel")));
        assert_eq!(row.original_value("name"), Some(&FieldValue::from("Petr")));
        assert!(!row.is_pending());
    }

    #[test]
    fn test_delete_unsaved_row_is_local() {
        let mut grid = employees();
        let key = grid.add_row().unwrap();
        let effects = grid.handle(Command::Delete(key));
        assert!(sent(&effects).is_empty());
        assert!(grid.row(key).is_none());
        assert_eq!(grid.rows().len(), 2);
    }

    #[test]
    fn test_delete_mid_edit_targets_pre_edit_identity() {
        let mut grid = loaded(RecordKind::Blacklist, json!(["79160000000"]));
        let key = grid.rows()[0].key();
        grid.handle(Command::BeginEdit(key));
        grid.handle((key, "phone", "+7 999 999 99 99").into());

        let out = only_send(&grid.handle(Command::Delete(key)));
        let mut identity = RecordPayload::new();
        identity.insert("phone", json!("79160000000"));
        assert_eq!(
            out.request,
            Request::Delete {
                kind: RecordKind::Blacklist,
                identity
            }
        );

        grid.apply(Response::new(out.ticket, Ok(Reply::Done)));
        assert!(grid.rows().is_empty());
    }

    #[test]
    fn test_delete_failure_leaves_row() {
        let mut grid = employees();
        let key = grid.rows()[0].key();
        let out = only_send(&grid.handle(Command::Delete(key)));
        let effects = grid.apply(Response::new(
            out.ticket,
            Err(TransportError::Status {
                status: 500,
                body: String::new(),
            }
            .into()),
        ));
        assert_eq!(notices(&effects).len(), 1);
        assert_eq!(grid.row(key).unwrap().state(), RowState::View);
    }

    #[test]
    fn test_stale_page_response_dropped() {
        let mut grid = employees();
        let first = only_send(&grid.goto_page(2));
        let second = only_send(&grid.goto_page(3));

        let latest = grid.apply(page(second.ticket, json!([{"id": 30, "lastname": "C", "name": "C", "phones": ["73"]}]), 3, 21));
        assert_eq!(latest, vec![Effect::Rerender]);

        let stale = grid.apply(page(first.ticket, json!([{"id": 20, "lastname": "B", "name": "B", "phones": ["72"]}]), 2, 21));
        assert!(stale.is_empty());
        assert_eq!(grid.state().current_page, 3);
        assert_eq!(grid.rows()[0].server_id(), Some(30));
    }

    #[test]
    fn test_save_response_after_reload_dropped() {
        let mut grid = employees();
        let key = grid.rows()[0].key();
        grid.handle(Command::BeginEdit(key));
        grid.handle((key, "name", "Pavel").into());
        let save = only_send(&grid.handle(Command::Save(key)));

        let reload = only_send(&grid.load_page());
        grid.apply(page(reload.ticket, json!([{"id": 1, "lastname": "Ivanov", "name": "Pavel", "phones": ["79161234567"]}]), 1, 1));

        let effects = grid.apply(Response::new(save.ticket, Ok(Reply::Saved { new_id: None })));
        assert!(effects.is_empty());
        assert_eq!(grid.rows().len(), 1);
        assert_eq!(grid.rows()[0].state(), RowState::View);
    }

    #[test]
    fn test_reload_discards_unsaved_rows() {
        let mut grid = employees();
        grid.add_row().unwrap();
        let out = only_send(&grid.load_page());
        grid.apply(page(out.ticket, json!([]), 1, 0));
        assert!(grid.rows().is_empty());
    }

    #[test]
    fn test_block_reloads_both_grids() {
        let mut grid = loaded(
            RecordKind::WifiClient,
            json!([{"mac": "AA:BB", "phone": "79161234567", "employee": false}]),
        );
        let out = only_send(&grid.handle(Command::Block("AA:BB".into())));
        assert_eq!(out.request, Request::Block { mac: "AA:BB".into() });

        let effects = grid.apply(Response::new(out.ticket, Ok(Reply::Done)));
        assert_eq!(sent(&effects).len(), 1);
        assert!(effects.contains(&Effect::Reload(RecordKind::Blacklist)));
    }

    #[test]
    fn test_deauth_only_on_wifi_grid() {
        let mut grid = employees();
        let effects = grid.handle(Command::Deauth("AA:BB".into()));
        assert!(sent(&effects).is_empty());
        assert!(matches!(
            notices(&effects)[..],
            [GridError::Unsupported { action: "deauth", .. }]
        ));
    }

    #[test]
    fn test_unknown_row_is_reported() {
        let mut grid = employees();
        let effects = grid.handle(Command::BeginEdit(RowKey(999)));
        assert_eq!(notices(&effects), vec![GridError::UnknownRow(RowKey(999))]);
    }

    #[test]
    fn test_malformed_page_is_transport_error() {
        let mut grid = GridController::new(RecordKind::Employee, 10);
        let out = only_send(&grid.load_page());
        let effects = grid.apply(page(out.ticket, json!([42]), 1, 1));
        assert!(matches!(notices(&effects)[..], [GridError::Transport(_)]));
    }

    #[test]
    fn test_display_lists_rows() {
        let text = employees().to_string();
        assert!(text.starts_with("employee page 1/1"));
        assert!(text.contains("lastname=Ivanov"));
    }
}
