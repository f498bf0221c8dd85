//! Round-trip tests for the gateway and the workspace protocol, run against
//! a local mock of the Zelvo backend.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zelvo::api::{ApiClient, auth};
use zelvo::model::{Task, TaskDraft, TaskPriority, TaskStatus};
use zelvo::ops::Workspace;

const TOKEN: &str = "test-jwt";

fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri()).with_token(TOKEN)
}

fn three_tasks() -> serde_json::Value {
    json!([
        {"id": 1, "title": "one", "status": "TODO", "priority": "LOW", "dueDate": "2024-05-01", "completed": false, "userId": 9},
        {"id": 2, "title": "two", "status": "IN_PROGRESS", "priority": "HIGH", "dueDate": "2024-05-02", "completed": false, "userId": 9},
        {"id": 3, "title": "three", "status": "DONE", "priority": "MEDIUM", "dueDate": "2024-05-03", "completed": true, "userId": 9}
    ])
}

async fn snapshot_for_body(body: serde_json::Value) -> Vec<Task> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let mut ws = Workspace::new();
    ws.load(&api(&server)).await.expect("load should succeed");
    ws.store.snapshot()
}

// ---------------------------------------------------------------------------
// Envelope normalization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_normalizes_all_four_envelope_shapes() {
    let bare = snapshot_for_body(three_tasks()).await;
    let page = snapshot_for_body(json!({"content": three_tasks()})).await;
    let wrapped = snapshot_for_body(json!({"status": "success", "data": three_tasks()})).await;
    let wrapped_page =
        snapshot_for_body(json!({"status": "success", "data": {"content": three_tasks()}})).await;

    assert_eq!(bare.len(), 3);
    assert_eq!(bare, page);
    assert_eq!(bare, wrapped);
    assert_eq!(bare, wrapped_page);
}

#[tokio::test]
async fn load_with_unknown_shape_yields_empty_store() {
    let snapshot = snapshot_for_body(json!({"status": "success", "message": "odd"})).await;
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn failed_load_keeps_previous_contents_and_records_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_tasks()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"status": "error", "message": "boom"})),
        )
        .mount(&server)
        .await;

    let client = api(&server);
    let mut ws = Workspace::new();
    ws.load(&client).await.unwrap();
    assert_eq!(ws.store.len(), 3);

    let err = ws.load(&client).await.unwrap_err();
    assert_eq!(err.user_message(), "boom");
    assert_eq!(ws.store.len(), 3, "last known good contents kept");
    assert_eq!(ws.store.last_error(), Some("boom"));
}

// ---------------------------------------------------------------------------
// Single-task fetch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_task_flattens_nested_refs_and_truncates_due_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "id": 7,
                "title": "Review PR",
                "dueDate": "2024-06-01T15:30:00",
                "status": "REVIEW",
                "priority": "HIGH",
                "completed": false,
                "user": {"id": 42, "name": "Ada", "email": "ada@example.com"},
                "category": {"id": 3, "name": "Work", "color": "#aabbcc"}
            }
        })))
        .mount(&server)
        .await;

    let task = api(&server).get_task(7).await.unwrap();
    assert_eq!(task.id, Some(7));
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    assert_eq!(task.user_id, Some(42));
    assert_eq!(task.category_id, Some(3));
}

// ---------------------------------------------------------------------------
// Create / update / delete end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_update_delete_scenario() {
    let server = MockServer::start().await;
    let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(body_json(json!({
            "title": "Write spec",
            "dueDate": "2024-06-01",
            "priority": "HIGH",
            "status": "TODO",
            "completed": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "data": {
                "id": 11,
                "title": "Write spec",
                "dueDate": "2024-06-01",
                "status": "TODO",
                "priority": "HIGH",
                "completed": false,
                "createdAt": "2024-05-20T08:00:00"
            }
        })))
        .mount(&server)
        .await;

    let client = api(&server);
    let mut ws = Workspace::new();

    // Create
    let mut draft = TaskDraft::new("Write spec", due);
    draft.priority = TaskPriority::High;
    let id = ws.create(&client, &draft).await.unwrap();
    assert_eq!(id, 11);
    assert_eq!(ws.store.len(), 1);
    let created = ws.store.get(id).unwrap().clone();
    assert_eq!(created.title, "Write spec");
    ws.open_tab(id);
    assert_eq!(ws.tabs.active(), Some(11));

    // Update priority only; status stays off the wire
    Mock::given(method("PUT"))
        .and(path("/tasks/11"))
        .and(body_json(json!({
            "title": "Write spec",
            "description": null,
            "dueDate": "2024-06-01",
            "priority": "LOW",
            "completed": false,
            "categoryId": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "id": 11,
                "title": "Write spec",
                "dueDate": "2024-06-01",
                "status": "TODO",
                "priority": "LOW",
                "completed": false
            }
        })))
        .mount(&server)
        .await;

    let mut edited = created.clone();
    edited.priority = TaskPriority::Low;
    ws.update(&client, &edited).await.unwrap();

    let updated = ws.store.get(id).unwrap();
    assert_eq!(updated.priority, TaskPriority::Low);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.due_date, created.due_date);
    assert_eq!(updated.status, TaskStatus::Todo);

    // Delete cascades out of the open tabs
    Mock::given(method("DELETE"))
        .and(path("/tasks/11"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    ws.delete(&client, id).await.unwrap();
    assert!(ws.store.is_empty());
    assert!(!ws.tabs.is_open(id));
    assert_eq!(ws.tabs.active(), None);
}

#[tokio::test]
async fn invalid_draft_sends_no_request() {
    // No mocks mounted: any request would 404 and fail the op with an API
    // error instead of the validation error we expect.
    let server = MockServer::start().await;
    let client = api(&server);
    let mut ws = Workspace::new();

    let draft = TaskDraft {
        title: "   ".into(),
        ..TaskDraft::default()
    };
    let err = ws.create(&client, &draft).await.unwrap_err();
    assert_eq!(err.user_message(), "Task title is required");
    assert!(ws.store.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn failed_delete_leaves_store_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_tasks()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"status": "error", "message": "nope"})),
        )
        .mount(&server)
        .await;

    let client = api(&server);
    let mut ws = Workspace::new();
    ws.load(&client).await.unwrap();
    ws.open_tab(1);

    let err = ws.delete(&client, 1).await.unwrap_err();
    assert_eq!(err.user_message(), "nope");
    assert!(ws.store.contains(1), "no optimistic removal");
    assert!(ws.tabs.is_open(1));
}

#[tokio::test]
async fn failed_update_leaves_entry_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_tasks()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/tasks/2"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"status": "error", "message": "Validation failed"}),
        ))
        .mount(&server)
        .await;

    let client = api(&server);
    let mut ws = Workspace::new();
    ws.load(&client).await.unwrap();

    let mut edited = ws.store.get(2).unwrap().clone();
    edited.title = "renamed".into();
    let err = ws.update(&client, &edited).await.unwrap_err();
    assert_eq!(err.user_message(), "Validation failed");
    assert_eq!(ws.store.get(2).unwrap().title, "two");
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_goes_out_without_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "token": "fresh-jwt",
                "refreshToken": "refresh",
                "user": {"id": 1, "name": "Ada", "email": "ada@example.com"}
            }
        })))
        .mount(&server)
        .await;

    // Client without a token: login must still work
    let client = ApiClient::new(server.uri());
    let session = auth::login(&client, "ada@example.com", "pw").await.unwrap();
    assert_eq!(session.token, "fresh-jwt");
    assert_eq!(session.user.unwrap().name, "Ada");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn categories_unwrap_their_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [
                {"id": 1, "name": "Work", "color": "#ff0000"},
                {"id": 2, "name": "Home"}
            ]
        })))
        .mount(&server)
        .await;

    let categories = api(&server).list_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Work");
    assert_eq!(categories[1].color, None);
}
