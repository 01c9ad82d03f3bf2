// End-to-end flows through the console against the in-memory backend

use operator_grid::gateway::memory::{MemoryGateway, WifiClientRecord};
use operator_grid::{
    Command, Console, Dialog, FieldValue, GridConfig, RecordKind, RowState, TransportError,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct RecordingDialog {
    opened: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingDialog {
    fn messages(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap()
            .iter()
            .map(|(_, content)| content.clone())
            .collect()
    }
}

impl Dialog for RecordingDialog {
    fn open(&mut self, title: &str, content: &str) {
        self.opened
            .lock()
            .unwrap()
            .push((title.to_string(), content.to_string()));
    }

    fn close(&mut self) {}
}

fn translate(key: &str, params: &[(&str, String)]) -> String {
    let mut text = key.to_string();
    for (name, value) in params {
        text.push_str(&format!(" {}={}", name, value));
    }
    text
}

async fn console(gateway: &MemoryGateway, dialog: &RecordingDialog) -> Console {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut console = Console::new(
        Arc::new(gateway.clone()),
        Box::new(dialog.clone()),
        Arc::new(translate),
        &GridConfig { rows_per_page: 3 },
    );
    console.start().await.unwrap();
    console
}

fn set(row: operator_grid::RowKey, field: &str, value: &str) -> Command {
    Command::SetField {
        row,
        field: field.to_string(),
        value: FieldValue::from(value),
    }
}

#[tokio::test]
async fn add_and_save_employee_adopts_server_id() {
    let gateway = MemoryGateway::new();
    for i in 1..=41 {
        let phone = format!("7900000{:04}", i);
        gateway.add_employee("Seed", "Row", &[phone.as_str()]).await;
    }
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Employee;

    console.dispatch(kind, Command::AddRow).await.unwrap();
    let key = console.grid(kind).unwrap().rows().last().unwrap().key();

    console.dispatch(kind, set(key, "lastname", "Ivanov")).await.unwrap();
    console.dispatch(kind, set(key, "name", "Petr")).await.unwrap();
    console
        .dispatch(
            kind,
            Command::SetEntry {
                row: key,
                field: "phone".into(),
                index: 0,
                value: "+7 916 123 45 67".into(),
            },
        )
        .await
        .unwrap();
    console.dispatch(kind, Command::Save(key)).await.unwrap();

    let row = console.grid(kind).unwrap().row(key).unwrap();
    assert_eq!(row.state(), RowState::View);
    assert_eq!(row.server_id(), Some(42));
    assert_eq!(row.display("id").as_deref(), Some("42"));
    assert_eq!(row.display("phone").as_deref(), Some("+79161234567"));

    let saves = gateway.calls_of("save").await;
    assert_eq!(
        saves[0].body,
        serde_json::json!({"lastname": "Ivanov", "name": "Petr", "phone": ["79161234567"]})
    );

    let html = console.render(kind).unwrap().into_string();
    assert!(html.contains(r#"data-action="edit""#));
    assert!(dialog.messages().is_empty());
}

#[tokio::test]
async fn formatting_only_blacklist_edit_makes_no_request() {
    let gateway = MemoryGateway::new();
    gateway.add_blacklisted("79161234567").await;
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Blacklist;
    let key = console.grid(kind).unwrap().rows()[0].key();
    let calls_before = gateway.call_count().await;

    console.dispatch(kind, Command::BeginEdit(key)).await.unwrap();
    console
        .dispatch(kind, set(key, "phone", "8 (916) 123-45-67"))
        .await
        .unwrap();
    console.dispatch(kind, Command::Save(key)).await.unwrap();

    assert_eq!(gateway.call_count().await, calls_before);
    let row = console.grid(kind).unwrap().row(key).unwrap();
    assert_eq!(row.state(), RowState::View);
    assert_eq!(row.value("phone"), Some(&FieldValue::from("79161234567")));
}

#[tokio::test]
async fn blank_field_is_reported_without_request() {
    let gateway = MemoryGateway::new();
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Employee;
    let calls_before = gateway.call_count().await;

    console.dispatch(kind, Command::AddRow).await.unwrap();
    let key = console.grid(kind).unwrap().rows()[0].key();
    console.dispatch(kind, set(key, "lastname", "Ivanov")).await.unwrap();
    console.dispatch(kind, Command::Save(key)).await.unwrap();

    assert_eq!(gateway.call_count().await, calls_before);
    assert_eq!(
        dialog.messages(),
        vec!["errors.admin.tables.empty_field field=name".to_string()]
    );
    let row = console.grid(kind).unwrap().row(key).unwrap();
    assert_eq!(row.state(), RowState::NewUnsaved);
}

#[tokio::test]
async fn removing_every_phone_is_reported_without_request() {
    let gateway = MemoryGateway::new();
    gateway.add_employee("Ivanov", "Petr", &["79161234567"]).await;
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Employee;
    let key = console.grid(kind).unwrap().rows()[0].key();
    let calls_before = gateway.call_count().await;

    console.dispatch(kind, Command::BeginEdit(key)).await.unwrap();
    console
        .dispatch(
            kind,
            Command::RemoveEntry {
                row: key,
                field: "phone".into(),
                index: 0,
            },
        )
        .await
        .unwrap();
    console.dispatch(kind, Command::Save(key)).await.unwrap();

    assert_eq!(gateway.call_count().await, calls_before);
    assert_eq!(
        dialog.messages(),
        vec!["errors.admin.tables.empty_field field=phone".to_string()]
    );
    let row = console.grid(kind).unwrap().row(key).unwrap();
    assert_eq!(row.state(), RowState::Editing);
    assert_eq!(gateway.employees().await[0].phones, vec!["79161234567".to_string()]);
}

#[tokio::test]
async fn duplicate_phone_rejection_keeps_row_editable() {
    let gateway = MemoryGateway::new();
    gateway.add_blacklisted("79160000000").await;
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Blacklist;

    console.dispatch(kind, Command::AddRow).await.unwrap();
    let key = console.grid(kind).unwrap().rows().last().unwrap().key();
    console.dispatch(kind, set(key, "phone", "+7 916 000 00 00")).await.unwrap();
    console.dispatch(kind, Command::Save(key)).await.unwrap();

    assert_eq!(
        dialog.messages(),
        vec!["errors.admin.tables.rejected description=phone number exists".to_string()]
    );
    let row = console.grid(kind).unwrap().row(key).unwrap();
    assert_eq!(row.state(), RowState::NewUnsaved);
    assert!(!row.is_pending());
    assert_eq!(gateway.blacklist().await.len(), 1);
}

#[tokio::test]
async fn deleting_unsaved_row_makes_no_request() {
    let gateway = MemoryGateway::new();
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Employee;
    let calls_before = gateway.call_count().await;

    console.dispatch(kind, Command::AddRow).await.unwrap();
    let key = console.grid(kind).unwrap().rows()[0].key();
    console.dispatch(kind, Command::Delete(key)).await.unwrap();

    assert_eq!(gateway.call_count().await, calls_before);
    assert!(console.grid(kind).unwrap().rows().is_empty());
}

#[tokio::test]
async fn delete_employee_removes_row() {
    let gateway = MemoryGateway::new();
    let id = gateway.add_employee("Ivanov", "Petr", &["79161234567"]).await;
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Employee;
    let key = console.grid(kind).unwrap().rows()[0].key();

    console.dispatch(kind, Command::Delete(key)).await.unwrap();

    assert!(console.grid(kind).unwrap().rows().is_empty());
    assert_eq!(
        gateway.calls_of("delete").await[0].body,
        serde_json::json!({ "id": id })
    );
    assert!(gateway.employees().await.is_empty());
}

#[tokio::test]
async fn transport_failure_leaves_row_and_shows_generic_notice() {
    let gateway = MemoryGateway::new();
    gateway.add_blacklisted("79160000000").await;
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Blacklist;
    let key = console.grid(kind).unwrap().rows()[0].key();

    gateway
        .fail_next(TransportError::Status {
            status: 502,
            body: "bad gateway".into(),
        })
        .await;
    console.dispatch(kind, Command::Delete(key)).await.unwrap();

    assert_eq!(dialog.messages(), vec!["errors.admin.tables.transport".to_string()]);
    let row = console.grid(kind).unwrap().row(key).unwrap();
    assert_eq!(row.state(), RowState::View);
    assert!(!row.is_pending());
}

#[tokio::test]
async fn block_reloads_wifi_and_blacklist_grids() {
    let gateway = MemoryGateway::new();
    gateway
        .add_wifi_client(WifiClientRecord::new("AA:BB:CC:00:11:22", Some("89161234567")))
        .await;
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    console.take_dirty();
    assert!(console.grid(RecordKind::Blacklist).unwrap().rows().is_empty());

    console
        .dispatch(RecordKind::WifiClient, Command::Block("AA:BB:CC:00:11:22".into()))
        .await
        .unwrap();

    assert!(console.grid(RecordKind::WifiClient).unwrap().rows().is_empty());
    let blacklist = console.grid(RecordKind::Blacklist).unwrap();
    assert_eq!(blacklist.rows().len(), 1);
    assert_eq!(
        blacklist.rows()[0].value("phone"),
        Some(&FieldValue::from("79161234567"))
    );
    assert_eq!(
        console.take_dirty(),
        vec![RecordKind::Blacklist, RecordKind::WifiClient]
    );
}

#[tokio::test]
async fn deauth_clears_expiration_and_reloads() {
    let gateway = MemoryGateway::new();
    let mut client = WifiClientRecord::new("AA:BB", Some("79161234567"));
    client.expiration = Some("2026-10-16T12:00:00+03:00".into());
    client.online = true;
    gateway.add_wifi_client(client).await;
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::WifiClient;
    assert_eq!(
        console.grid(kind).unwrap().rows()[0].display("expiration").as_deref(),
        Some("2026-10-16 12:00:00")
    );

    console.dispatch(kind, Command::Deauth("AA:BB".into())).await.unwrap();

    let row = &console.grid(kind).unwrap().rows()[0];
    assert_eq!(row.display("expiration").as_deref(), Some(""));
    assert_eq!(row.display("online").as_deref(), Some(""));
}

#[tokio::test]
async fn paging_and_search_follow_server() {
    let gateway = MemoryGateway::new();
    for (lastname, phone) in [
        ("Ivanov", "71"),
        ("Petrov", "72"),
        ("Sidorov", "73"),
        ("Ivanova", "74"),
        ("Smirnov", "75"),
    ] {
        gateway.add_employee(lastname, "X", &[phone]).await;
    }
    let dialog = RecordingDialog::default();
    let mut console = console(&gateway, &dialog).await;
    let kind = RecordKind::Employee;
    assert_eq!(console.grid(kind).unwrap().state().total_pages(), 2);

    console.dispatch(kind, Command::GotoPage(2)).await.unwrap();
    let state = console.grid(kind).unwrap().state();
    assert_eq!(state.current_page, 2);
    assert_eq!(state.rows.len(), 2);

    console.dispatch(kind, Command::GotoPage(7)).await.unwrap();
    let state = console.grid(kind).unwrap().state();
    assert_eq!(state.current_page, 7);
    assert!(state.rows.is_empty());

    console
        .dispatch(kind, Command::Search("ivan".into()))
        .await
        .unwrap();
    let state = console.grid(kind).unwrap().state();
    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_rows, 2);
    assert_eq!(
        gateway.calls_of("list").await.last().unwrap().body,
        serde_json::json!({"page": 1, "search": "ivan", "rows_per_page": 3})
    );
}
