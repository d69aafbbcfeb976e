//! Gateway dispatch integration tests.
//!
//! Run with: `cargo test -p dzatlas-api --test gateway_test`
//! No database required: these cover the paths that must settle before any
//! store access (dispatch, allow-list, credential check, validation).

mod helpers;

use helpers::{admin_token, setup_test_server};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_unknown_task_is_404() {
    let server = setup_test_server();

    let response = server.get("/api").add_query_param("task", "frobnicate").await;
    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Not Found");

    let response = server.post("/api").json(&json!({ "task": "frobnicate" })).await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_missing_task_is_400() {
    let server = setup_test_server();

    let response = server.get("/api").await;
    assert_eq!(response.status_code(), 400);

    let response = server.post("/api").json(&json!({ "name": "no task here" })).await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_task_in_query_string_wins_for_post() {
    let server = setup_test_server();

    // body says frobnicate, query says admin-get-entities; the admin task is
    // selected and rejected for the missing credential
    let response = server
        .post("/api")
        .add_query_param("task", "admin-get-entities")
        .json(&json!({ "task": "frobnicate" }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_get_lookups_rejects_non_allow_listed_table() {
    let server = setup_test_server();

    // the invalid table is rejected before any store access; a store touch
    // would surface as STORE_ERROR instead
    let response = server
        .get("/api")
        .add_query_param("task", "get-lookups")
        .add_query_param("table", "invoices")
        .await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_TABLE");
    assert!(body["error"].as_str().unwrap().contains("invoices"));
}

#[tokio::test]
async fn test_get_lookups_rejects_missing_table() {
    let server = setup_test_server();

    let response = server.get("/api").add_query_param("task", "get-lookups").await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_TABLE");
}

#[tokio::test]
async fn test_admin_tasks_require_bearer_credential() {
    let server = setup_test_server();

    // every admin task rejects before touching data; no credential, no query
    for task in [
        "admin-get-entities",
        "admin-upsert-entity",
        "admin-approve-entity",
        "admin-delete-entity",
        "admin-list-table",
        "admin-upsert-table",
        "admin-delete-table",
    ] {
        let response = server.post("/api").json(&json!({ "task": task })).await;
        assert_eq!(response.status_code(), 401, "task {task} must be guarded");
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_admin_task_rejects_garbage_token() {
    let server = setup_test_server();

    let response = server
        .post("/api")
        .add_header("Authorization", "Bearer not-a-jwt")
        .json(&json!({ "task": "admin-get-entities" }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_credential_check_precedes_payload_parsing() {
    let server = setup_test_server();

    // a body that would fail parsing still yields 401 without a credential
    let response = server
        .post("/api")
        .json(&json!({ "task": "admin-approve-entity", "id": "not-a-uuid" }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_authorized_admin_with_invalid_table_is_400() {
    let server = setup_test_server();

    // allow-list enforcement sits after the credential check and before the
    // store: an authorized caller naming a bad table gets INVALID_TABLE, not
    // a store error
    let response = server
        .post("/api")
        .add_header("Authorization", format!("Bearer {}", admin_token()))
        .json(&json!({ "task": "admin-list-table", "table": "entities" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_TABLE");
}

#[tokio::test]
async fn test_authorized_admin_bad_payload_is_400() {
    let server = setup_test_server();

    let response = server
        .post("/api")
        .add_header("Authorization", format!("Bearer {}", admin_token()))
        .json(&json!({ "task": "admin-approve-entity", "id": "not-a-uuid" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_submission_validation_blocks_before_store() {
    let server = setup_test_server();

    // name too short
    let response = server
        .post("/api")
        .json(&json!({
            "task": "submit-entity",
            "name": "A",
            "type_id": Uuid::new_v4()
        }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");

    // malformed year
    let response = server
        .post("/api")
        .json(&json!({
            "task": "submit-entity",
            "name": "Acme Robotics",
            "type_id": Uuid::new_v4(),
            "founded_year": "22"
        }))
        .await;
    assert_eq!(response.status_code(), 400);

    // malformed website URL
    let response = server
        .post("/api")
        .json(&json!({
            "task": "submit-entity",
            "name": "Acme Robotics",
            "type_id": Uuid::new_v4(),
            "website": "not a url"
        }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_submission_with_missing_required_fields_is_400() {
    let server = setup_test_server();

    let response = server
        .post("/api")
        .json(&json!({ "task": "submit-entity", "name": "Acme Robotics" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = setup_test_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}
