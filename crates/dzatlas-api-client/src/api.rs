//! Domain methods for the Dzatlas gateway client.
//!
//! Response types are the `dzatlas_core::models` types. Reads go through the
//! query cache; every mutation invalidates the tasks it affects before
//! returning.

use crate::ApiClient;
use anyhow::Result;
use dzatlas_core::models::{
    AdminEntityRow, AdminUpsertEntity, Category, Entity, EntityRow, EntityType, LookupUpsert,
    MediaType, SubmitEntity, Wilaya,
};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

/// Filter option sources for the listing pages, fetched concurrently.
#[derive(Debug, Clone, Default)]
pub struct FilterLookups {
    pub categories: Vec<Category>,
    pub wilayas: Vec<Wilaya>,
    pub media_types: Vec<MediaType>,
}

impl ApiClient {
    // ----- public reads -----

    /// All approved entities, optionally narrowed to one type slug. A slug
    /// the gateway cannot resolve simply widens to all types; the listing
    /// pipeline runs client-side on the result.
    pub async fn get_entities(&self, entity_type_slug: Option<&str>) -> Result<Vec<Entity>> {
        let slug = entity_type_slug.unwrap_or_default();
        self.post_task_cached(
            "get-entities",
            &[("entity_type_slug", slug)],
            json!({
                "task": "get-entities",
                "entity_type_slug": entity_type_slug,
            }),
        )
        .await
    }

    /// One lookup table, name-ordered, as raw rows.
    pub async fn get_lookups(&self, table: &str) -> Result<Vec<JsonValue>> {
        self.get_task("get-lookups", &[("table", table)]).await
    }

    pub async fn get_entity_types(&self) -> Result<Vec<EntityType>> {
        self.get_task("get-lookups", &[("table", "entity_types")])
            .await
    }

    pub async fn get_wilayas(&self) -> Result<Vec<Wilaya>> {
        self.get_task("get-lookups", &[("table", "wilayas")]).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        self.get_task("get-lookups", &[("table", "categories")])
            .await
    }

    pub async fn get_media_types(&self) -> Result<Vec<MediaType>> {
        self.get_task("get-lookups", &[("table", "media_types")])
            .await
    }

    /// The three filter-option tables in one concurrent round: independent
    /// lookups never block one another.
    pub async fn fetch_filter_lookups(&self) -> Result<FilterLookups> {
        let (categories, wilayas, media_types) = tokio::join!(
            self.get_categories(),
            self.get_wilayas(),
            self.get_media_types(),
        );
        Ok(FilterLookups {
            categories: categories?,
            wilayas: wilayas?,
            media_types: media_types?,
        })
    }

    // ----- public submission -----

    /// Submit a new entry. The gateway stores it pending regardless of
    /// anything else in the payload; the listing cache is invalidated so a
    /// later approval is picked up on the next fetch.
    pub async fn submit_entity(&self, payload: &SubmitEntity) -> Result<EntityRow> {
        let mut body = serde_json::to_value(payload)?;
        body["task"] = json!("submit-entity");
        let row: EntityRow = self.post_task(body).await?;
        self.invalidate("get-entities");
        Ok(row)
    }

    // ----- admin moderation (requires Auth::Bearer) -----

    pub async fn admin_get_entities(&self) -> Result<Vec<AdminEntityRow>> {
        self.post_task_cached(
            "admin-get-entities",
            &[],
            json!({ "task": "admin-get-entities" }),
        )
        .await
    }

    pub async fn admin_upsert_entity(&self, payload: &AdminUpsertEntity) -> Result<()> {
        let mut body = serde_json::to_value(payload)?;
        body["task"] = json!("admin-upsert-entity");
        let _: JsonValue = self.post_task(body).await?;
        self.invalidate("get-entities");
        self.invalidate("admin-get-entities");
        Ok(())
    }

    pub async fn admin_approve_entity(&self, id: Uuid) -> Result<()> {
        let _: JsonValue = self
            .post_task(json!({ "task": "admin-approve-entity", "id": id }))
            .await?;
        self.invalidate("get-entities");
        self.invalidate("admin-get-entities");
        Ok(())
    }

    pub async fn admin_delete_entity(&self, id: Uuid) -> Result<()> {
        let _: JsonValue = self
            .post_task(json!({ "task": "admin-delete-entity", "id": id }))
            .await?;
        self.invalidate("get-entities");
        self.invalidate("admin-get-entities");
        Ok(())
    }

    pub async fn admin_list_table(&self, table: &str) -> Result<Vec<JsonValue>> {
        self.post_task_cached(
            "admin-list-table",
            &[("table", table)],
            json!({ "task": "admin-list-table", "table": table }),
        )
        .await
    }

    pub async fn admin_upsert_table(&self, table: &str, data: &LookupUpsert) -> Result<()> {
        let _: JsonValue = self
            .post_task(json!({
                "task": "admin-upsert-table",
                "table": table,
                "data": data,
            }))
            .await?;
        self.invalidate("get-lookups");
        self.invalidate("admin-list-table");
        Ok(())
    }

    pub async fn admin_delete_table(&self, table: &str, id: Uuid) -> Result<()> {
        let _: JsonValue = self
            .post_task(json!({
                "task": "admin-delete-table",
                "table": table,
                "id": id,
            }))
            .await?;
        self.invalidate("get-lookups");
        self.invalidate("admin-list-table");
        Ok(())
    }
}
