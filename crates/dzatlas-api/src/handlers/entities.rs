//! Entity task handlers.

use axum::{response::IntoResponse, response::Response, Json};
use dzatlas_core::models::{AdminUpsertEntity, SubmitEntity};
use dzatlas_core::AppError;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AdminIdentity;
use crate::error::HttpAppError;
use crate::state::AppState;

use super::tasks::success_response;

/// get-entities request. The original wire format used camelCase here, so
/// both spellings are accepted. A caller-supplied `status` is accepted and
/// discarded: the public query is pinned to approved.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GetEntitiesRequest {
    #[serde(default, alias = "entityTypeSlug")]
    pub entity_type_slug: Option<String>,
}

/// Public listing: resolve the type slug (a miss means "no type filter"),
/// then fetch every approved entity of that type with its relations.
pub async fn get_entities(
    state: &AppState,
    req: GetEntitiesRequest,
) -> Result<Response, HttpAppError> {
    let type_id = match req.entity_type_slug.as_deref().filter(|s| !s.is_empty()) {
        Some(slug) => state.db.public_lookups.entity_type_id_by_slug(slug).await?,
        None => None,
    };

    let entities = state.db.public_entities.list_approved(type_id).await?;
    Ok(Json(entities).into_response())
}

/// Public submission: validate everything client-side-equivalent first, then
/// insert with status forced to pending. On failure no row exists and the
/// caller gets a generic failure notice.
pub async fn submit_entity(
    state: &AppState,
    payload: SubmitEntity,
) -> Result<Response, HttpAppError> {
    payload.validate().map_err(AppError::from)?;

    let row = state.db.public_entities.insert_submission(&payload).await?;
    tracing::info!(entity_id = %row.id, slug = %row.slug, "Submission received, pending review");
    Ok(Json(row).into_response())
}

pub async fn admin_get_entities(
    state: &AppState,
    admin: AdminIdentity,
) -> Result<Response, HttpAppError> {
    tracing::debug!(admin = %admin.subject, "Listing all entities");
    let rows = state.db.admin_entities.list_all().await?;
    Ok(Json(rows).into_response())
}

/// Admin insert/update. The entity row and its classification links are two
/// separate writes; a link failure after a successful row write is logged,
/// not rolled back.
pub async fn admin_upsert_entity(
    state: &AppState,
    admin: AdminIdentity,
    payload: AdminUpsertEntity,
) -> Result<Response, HttpAppError> {
    payload.validate().map_err(AppError::from)?;

    let id = state.db.admin_entities.upsert(&payload).await?;
    tracing::info!(admin = %admin.subject, entity_id = %id, "Entity upserted");

    if let Some(category_ids) = &payload.category_ids {
        if let Err(err) = state
            .db
            .admin_entities
            .set_categories(id, category_ids)
            .await
        {
            tracing::error!(entity_id = %id, error = %err, "Failed to update category links");
        }
    }
    if let Some(media_type_ids) = &payload.media_type_ids {
        if let Err(err) = state
            .db
            .admin_entities
            .set_media_types(id, media_type_ids)
            .await
        {
            tracing::error!(entity_id = %id, error = %err, "Failed to update media type links");
        }
    }

    success_response()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EntityIdRequest {
    pub id: Uuid,
}

/// pending → approved. Idempotent: re-approving reports success.
pub async fn admin_approve_entity(
    state: &AppState,
    admin: AdminIdentity,
    req: EntityIdRequest,
) -> Result<Response, HttpAppError> {
    let found = state.db.admin_entities.approve(req.id).await?;
    if !found {
        return Err(AppError::NotFound("Entity not found".to_string()).into());
    }
    tracing::info!(admin = %admin.subject, entity_id = %req.id, "Entity approved");
    success_response()
}

/// Hard delete, allowed from any status.
pub async fn admin_delete_entity(
    state: &AppState,
    admin: AdminIdentity,
    req: EntityIdRequest,
) -> Result<Response, HttpAppError> {
    let found = state.db.admin_entities.delete(req.id).await?;
    if !found {
        return Err(AppError::NotFound("Entity not found".to_string()).into());
    }
    tracing::info!(admin = %admin.subject, entity_id = %req.id, "Entity deleted");
    success_response()
}
