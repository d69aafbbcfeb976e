//! OpenAPI documentation assembly.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dzatlas Query Gateway",
        description = "Task-dispatch gateway for the Algerian startup ecosystem directory"
    ),
    paths(
        crate::handlers::tasks::dispatch_get,
        crate::handlers::tasks::dispatch_post
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::handlers::entities::GetEntitiesRequest,
        crate::handlers::entities::EntityIdRequest,
        crate::handlers::lookups::TableRequest,
        crate::handlers::lookups::UpsertTableRequest,
        crate::handlers::lookups::DeleteTableRequest,
        dzatlas_core::models::Entity,
        dzatlas_core::models::EntityKind,
        dzatlas_core::models::EntityRow,
        dzatlas_core::models::EntityStatus,
        dzatlas_core::models::EntityTypeSlug,
        dzatlas_core::models::AdminEntityRow,
        dzatlas_core::models::AdminUpsertEntity,
        dzatlas_core::models::SubmitEntity,
        dzatlas_core::models::EntityType,
        dzatlas_core::models::Category,
        dzatlas_core::models::Wilaya,
        dzatlas_core::models::MediaType,
        dzatlas_core::models::LookupTable,
        dzatlas_core::models::LookupUpsert,
    )),
    tags(
        (name = "gateway", description = "Single task-dispatch endpoint")
    )
)]
pub struct ApiDoc;
