//! Lookup task handlers.
//!
//! The table name in every request is parsed through the `LookupTable`
//! allow-list before a repository is touched; "invalid table" failures never
//! reach the store.

use axum::{response::IntoResponse, response::Response, Json};
use dzatlas_core::models::{LookupTable, LookupUpsert};
use dzatlas_core::AppError;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminIdentity;
use crate::error::HttpAppError;
use crate::state::AppState;

use super::tasks::success_response;

pub async fn get_lookups(state: &AppState, table: LookupTable) -> Result<Response, HttpAppError> {
    let rows = state.db.public_lookups.list(table).await?;
    Ok(Json(rows).into_response())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TableRequest {
    pub table: String,
}

pub async fn admin_list_table(
    state: &AppState,
    admin: AdminIdentity,
    req: TableRequest,
) -> Result<Response, HttpAppError> {
    let table = LookupTable::parse(&req.table)?;
    tracing::debug!(admin = %admin.subject, table = %table, "Listing lookup table");
    let rows = state.db.admin_lookups.list(table).await?;
    Ok(Json(rows).into_response())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertTableRequest {
    pub table: String,
    pub data: LookupUpsert,
}

pub async fn admin_upsert_table(
    state: &AppState,
    admin: AdminIdentity,
    req: UpsertTableRequest,
) -> Result<Response, HttpAppError> {
    let table = LookupTable::parse(&req.table)?;
    if req.data.slug.is_empty() || req.data.name.is_empty() {
        return Err(AppError::InvalidInput("Name and slug are required".to_string()).into());
    }
    state.db.admin_lookups.upsert(table, &req.data).await?;
    tracing::info!(admin = %admin.subject, table = %table, slug = %req.data.slug, "Lookup row upserted");
    success_response()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteTableRequest {
    pub table: String,
    pub id: Uuid,
}

pub async fn admin_delete_table(
    state: &AppState,
    admin: AdminIdentity,
    req: DeleteTableRequest,
) -> Result<Response, HttpAppError> {
    let table = LookupTable::parse(&req.table)?;
    let found = state.db.admin_lookups.delete(table, req.id).await?;
    if !found {
        return Err(AppError::NotFound("Row not found".to_string()).into());
    }
    tracing::info!(admin = %admin.subject, table = %table, id = %req.id, "Lookup row deleted");
    success_response()
}
