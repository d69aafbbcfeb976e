use dzatlas_core::models::{Category, EntityType, LookupTable, LookupUpsert, MediaType, Wilaya};
use dzatlas_core::AppError;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for the allow-listed reference tables. Every method takes a
/// `LookupTable`, so an unvetted table name cannot reach this layer.
#[derive(Clone)]
pub struct LookupRepository {
    pool: PgPool,
}

impl LookupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All rows of a lookup table, ordered by name. Rows are returned as
    /// JSON so the four differently-shaped tables share one listing path.
    #[tracing::instrument(skip(self), fields(db.operation = "select", db.table = %table))]
    pub async fn list(&self, table: LookupTable) -> Result<Vec<JsonValue>, AppError> {
        let rows = match table {
            LookupTable::EntityTypes => {
                let rows = sqlx::query_as::<Postgres, EntityType>(
                    "SELECT id, slug, name FROM entity_types ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?;
                rows.into_iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?
            }
            LookupTable::Wilayas => {
                let rows = sqlx::query_as::<Postgres, Wilaya>(
                    "SELECT id, code, name, slug FROM wilayas ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?;
                rows.into_iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?
            }
            LookupTable::Categories => {
                let rows = sqlx::query_as::<Postgres, Category>(
                    "SELECT id, slug, name FROM categories ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?;
                rows.into_iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?
            }
            LookupTable::MediaTypes => {
                let rows = sqlx::query_as::<Postgres, MediaType>(
                    "SELECT id, slug, name, icon_url, icon_emoji FROM media_types ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?;
                rows.into_iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    /// Resolve an entity type slug to its id. A miss is an absence, not an
    /// error: the caller treats it as "no type filter".
    #[tracing::instrument(skip(self), fields(db.table = "entity_types", db.operation = "select"))]
    pub async fn entity_type_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<Postgres, Uuid>(
            "SELECT id FROM entity_types WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    /// Insert (no id) or update (id present) a lookup row. Columns that do
    /// not apply to the target table are ignored; wilayas require a code.
    #[tracing::instrument(skip(self, payload), fields(db.operation = "upsert", db.table = %table))]
    pub async fn upsert(&self, table: LookupTable, payload: &LookupUpsert) -> Result<(), AppError> {
        match table {
            LookupTable::EntityTypes | LookupTable::Categories => {
                let sql_table = table.table_name();
                match payload.id {
                    Some(id) => {
                        sqlx::query(&format!(
                            "UPDATE {sql_table} SET slug = $2, name = $3 WHERE id = $1"
                        ))
                        .bind(id)
                        .bind(&payload.slug)
                        .bind(&payload.name)
                        .execute(&self.pool)
                        .await?;
                    }
                    None => {
                        sqlx::query(&format!(
                            "INSERT INTO {sql_table} (slug, name) VALUES ($1, $2)"
                        ))
                        .bind(&payload.slug)
                        .bind(&payload.name)
                        .execute(&self.pool)
                        .await?;
                    }
                }
            }
            LookupTable::Wilayas => {
                let code = payload.code.ok_or_else(|| {
                    AppError::InvalidInput("code is required for wilayas".to_string())
                })?;
                match payload.id {
                    Some(id) => {
                        sqlx::query(
                            "UPDATE wilayas SET slug = $2, name = $3, code = $4 WHERE id = $1",
                        )
                        .bind(id)
                        .bind(&payload.slug)
                        .bind(&payload.name)
                        .bind(code)
                        .execute(&self.pool)
                        .await?;
                    }
                    None => {
                        sqlx::query("INSERT INTO wilayas (slug, name, code) VALUES ($1, $2, $3)")
                            .bind(&payload.slug)
                            .bind(&payload.name)
                            .bind(code)
                            .execute(&self.pool)
                            .await?;
                    }
                }
            }
            LookupTable::MediaTypes => match payload.id {
                Some(id) => {
                    sqlx::query(
                        "UPDATE media_types SET slug = $2, name = $3, icon_url = $4, \
                         icon_emoji = $5 WHERE id = $1",
                    )
                    .bind(id)
                    .bind(&payload.slug)
                    .bind(&payload.name)
                    .bind(&payload.icon_url)
                    .bind(&payload.icon_emoji)
                    .execute(&self.pool)
                    .await?;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO media_types (slug, name, icon_url, icon_emoji) \
                         VALUES ($1, $2, $3, $4)",
                    )
                    .bind(&payload.slug)
                    .bind(&payload.name)
                    .bind(&payload.icon_url)
                    .bind(&payload.icon_emoji)
                    .execute(&self.pool)
                    .await?;
                }
            },
        }
        Ok(())
    }

    /// Delete a lookup row by id. Returns false when the id matches nothing.
    #[tracing::instrument(skip(self), fields(db.operation = "delete", db.table = %table, db.record_id = %id))]
    pub async fn delete(&self, table: LookupTable, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1",
            table.table_name()
        ))
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
