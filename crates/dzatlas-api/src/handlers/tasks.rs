//! Task dispatch.
//!
//! The gateway is one route: GET carries the task in the query string, POST
//! in the JSON body (query string wins when both are present, matching the
//! original wire contract). Admin tasks resolve the bearer credential before
//! anything else; an unknown task is a 404 with no further detail.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
    Json,
};
use dzatlas_core::models::LookupTable;
use dzatlas_core::AppError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::auth::resolve_admin;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

use super::{entities, lookups};

#[derive(Debug, Deserialize)]
pub struct TaskParams {
    pub task: Option<String>,
    pub table: Option<String>,
}

fn parse_payload<T: DeserializeOwned>(body: &JsonValue) -> Result<T, AppError> {
    serde_json::from_value(body.clone())
        .map_err(|err| AppError::InvalidInput(format!("Invalid request body: {}", err)))
}

/// GET dispatch: read-only lookup tasks.
#[utoipa::path(
    get,
    path = "/api",
    tag = "gateway",
    params(
        ("task" = String, Query, description = "Task name (get-lookups)"),
        ("table" = Option<String>, Query, description = "Lookup table name")
    ),
    responses(
        (status = 200, description = "Requested rows", body = serde_json::Value),
        (status = 400, description = "Invalid table", body = ErrorResponse),
        (status = 404, description = "Unknown task", body = ErrorResponse)
    )
)]
pub async fn dispatch_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TaskParams>,
) -> Result<Response, HttpAppError> {
    let task = params
        .task
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing task parameter".to_string()))?;

    match task {
        "get-lookups" => {
            let table = LookupTable::parse(params.table.as_deref().unwrap_or_default())?;
            lookups::get_lookups(&state, table).await
        }
        other => Err(AppError::UnknownTask(other.to_string()).into()),
    }
}

/// POST dispatch: everything else. The body is one JSON object holding the
/// task name next to the task-specific fields.
#[utoipa::path(
    post,
    path = "/api",
    tag = "gateway",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Task result", body = serde_json::Value),
        (status = 400, description = "Handled failure", body = ErrorResponse),
        (status = 401, description = "Missing or invalid admin credential", body = ErrorResponse),
        (status = 404, description = "Unknown task", body = ErrorResponse)
    )
)]
pub async fn dispatch_post(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TaskParams>,
    headers: HeaderMap,
    ValidatedJson(body): ValidatedJson<JsonValue>,
) -> Result<Response, HttpAppError> {
    let task = params
        .task
        .as_deref()
        .map(str::to_string)
        .or_else(|| {
            body.get("task")
                .and_then(|t| t.as_str())
                .map(str::to_string)
        })
        .ok_or_else(|| AppError::BadRequest("Missing task field".to_string()))?;

    match task.as_str() {
        // --- public tasks, restricted pool ---
        "get-entities" => entities::get_entities(&state, parse_payload(&body)?).await,
        "submit-entity" => entities::submit_entity(&state, parse_payload(&body)?).await,

        // --- admin tasks: credential resolved before any store access ---
        "admin-get-entities" => {
            let admin = resolve_admin(&headers, &state.config.jwt_secret)?;
            entities::admin_get_entities(&state, admin).await
        }
        "admin-upsert-entity" => {
            let admin = resolve_admin(&headers, &state.config.jwt_secret)?;
            entities::admin_upsert_entity(&state, admin, parse_payload(&body)?).await
        }
        "admin-approve-entity" => {
            let admin = resolve_admin(&headers, &state.config.jwt_secret)?;
            entities::admin_approve_entity(&state, admin, parse_payload(&body)?).await
        }
        "admin-delete-entity" => {
            let admin = resolve_admin(&headers, &state.config.jwt_secret)?;
            entities::admin_delete_entity(&state, admin, parse_payload(&body)?).await
        }
        "admin-list-table" => {
            let admin = resolve_admin(&headers, &state.config.jwt_secret)?;
            lookups::admin_list_table(&state, admin, parse_payload(&body)?).await
        }
        "admin-upsert-table" => {
            let admin = resolve_admin(&headers, &state.config.jwt_secret)?;
            lookups::admin_upsert_table(&state, admin, parse_payload(&body)?).await
        }
        "admin-delete-table" => {
            let admin = resolve_admin(&headers, &state.config.jwt_secret)?;
            lookups::admin_delete_table(&state, admin, parse_payload(&body)?).await
        }

        other => Err(AppError::UnknownTask(other.to_string()).into()),
    }
}

/// Shared success body for admin mutations.
pub(super) fn success_response() -> Result<Response, HttpAppError> {
    use axum::response::IntoResponse;
    Ok(Json(serde_json::json!({ "success": true })).into_response())
}
