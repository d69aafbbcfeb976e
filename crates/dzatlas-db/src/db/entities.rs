use std::collections::HashMap;

use dzatlas_core::models::{
    AdminEntityRow, AdminUpsertEntity, Category, Entity, EntityRow, EntityStatus, EntityTypeSlug,
    MediaType, SubmitEntity, Wilaya,
};
use dzatlas_core::slug::submission_slug;
use dzatlas_core::AppError;
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

/// Attempts at inserting a submission before giving up on slug conflicts.
const SLUG_INSERT_ATTEMPTS: u32 = 4;

const ENTITY_COLUMNS: &str = "id, slug, type_id, wilaya_id, name, description, website, \
     linkedin, founded_year, map_location, image_url, status, created_at";

/// Join row: a category together with the entity it is linked to.
#[derive(Debug, FromRow)]
struct CategoryLink {
    entity_id: Uuid,
    id: Uuid,
    slug: String,
    name: String,
}

/// Join row: a media type together with the entity it is linked to.
#[derive(Debug, FromRow)]
struct MediaTypeLink {
    entity_id: Uuid,
    id: Uuid,
    slug: String,
    name: String,
    icon_url: Option<String>,
    icon_emoji: Option<String>,
}

/// Repository for the entities table and its classification joins.
#[derive(Clone)]
pub struct EntityRepository {
    pool: PgPool,
}

impl EntityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Public listing: approved entities only, optionally narrowed to one
    /// type, with wilaya/category/media-type relations resolved in batched
    /// queries. The status pin is not caller-controllable.
    #[tracing::instrument(skip(self), fields(db.table = "entities", db.operation = "select"))]
    pub async fn list_approved(&self, type_id: Option<Uuid>) -> Result<Vec<Entity>, AppError> {
        let rows = match type_id {
            Some(tid) => {
                sqlx::query_as::<Postgres, EntityRow>(&format!(
                    "SELECT {ENTITY_COLUMNS} FROM entities WHERE status = $1 AND type_id = $2"
                ))
                .bind(EntityStatus::Approved)
                .bind(tid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<Postgres, EntityRow>(&format!(
                    "SELECT {ENTITY_COLUMNS} FROM entities WHERE status = $1"
                ))
                .bind(EntityStatus::Approved)
                .fetch_all(&self.pool)
                .await?
            }
        };

        self.assemble(rows).await
    }

    /// Resolve the joined relations for a batch of rows and build the
    /// tagged domain records. One query per relation table, no per-row
    /// round trips.
    async fn assemble(&self, rows: Vec<EntityRow>) -> Result<Vec<Entity>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let type_slugs: HashMap<Uuid, String> =
            sqlx::query_as::<Postgres, (Uuid, String)>("SELECT id, slug FROM entity_types")
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .collect();

        let wilaya_ids: Vec<Uuid> = rows.iter().filter_map(|r| r.wilaya_id).collect();
        let wilayas: HashMap<Uuid, Wilaya> = if wilaya_ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<Postgres, Wilaya>(
                "SELECT id, code, name, slug FROM wilayas WHERE id = ANY($1)",
            )
            .bind(&wilaya_ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|w| (w.id, w))
            .collect()
        };

        let mut categories: HashMap<Uuid, Vec<Category>> = HashMap::new();
        let category_links = sqlx::query_as::<Postgres, CategoryLink>(
            "SELECT ec.entity_id, c.id, c.slug, c.name \
             FROM entity_categories ec JOIN categories c ON c.id = ec.category_id \
             WHERE ec.entity_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        for link in category_links {
            categories.entry(link.entity_id).or_default().push(Category {
                id: link.id,
                slug: link.slug,
                name: link.name,
            });
        }

        let mut media_types: HashMap<Uuid, Vec<MediaType>> = HashMap::new();
        let media_links = sqlx::query_as::<Postgres, MediaTypeLink>(
            "SELECT emt.entity_id, m.id, m.slug, m.name, m.icon_url, m.icon_emoji \
             FROM entity_media_types emt JOIN media_types m ON m.id = emt.media_type_id \
             WHERE emt.entity_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        for link in media_links {
            media_types.entry(link.entity_id).or_default().push(MediaType {
                id: link.id,
                slug: link.slug,
                name: link.name,
                icon_url: link.icon_url,
                icon_emoji: link.icon_emoji,
            });
        }

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(type_slug) = type_slugs
                .get(&row.type_id)
                .and_then(|s| EntityTypeSlug::parse(s))
            else {
                // taxonomy is fixed and seeded; a row pointing at an unknown
                // type slug is bad reference data, not a listing failure
                tracing::warn!(entity_id = %row.id, type_id = %row.type_id, "Skipping entity with unknown type slug");
                continue;
            };
            let wilaya = row.wilaya_id.and_then(|id| wilayas.get(&id).cloned());
            let cats = categories.remove(&row.id).unwrap_or_default();
            let mtypes = media_types.remove(&row.id).unwrap_or_default();
            entities.push(Entity::from_row(row, type_slug, wilaya, cats, mtypes));
        }

        Ok(entities)
    }

    /// Public submission insert. The stored status is pinned to `pending`
    /// no matter what the caller sent; the slug is name-derived with a
    /// random suffix, retried with a fresh suffix on a uniqueness conflict.
    #[tracing::instrument(skip(self, payload), fields(db.table = "entities", db.operation = "insert"))]
    pub async fn insert_submission(&self, payload: &SubmitEntity) -> Result<EntityRow, AppError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let slug = submission_slug(&payload.name);

            let result = sqlx::query_as::<Postgres, EntityRow>(&format!(
                "INSERT INTO entities \
                 (slug, type_id, wilaya_id, name, description, website, linkedin, \
                  founded_year, map_location, image_url, status) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
                 RETURNING {ENTITY_COLUMNS}"
            ))
            .bind(&slug)
            .bind(payload.type_id)
            .bind(payload.wilaya_id)
            .bind(&payload.name)
            .bind(&payload.description)
            .bind(&payload.website)
            .bind(&payload.linkedin)
            .bind(payload.founded_year_parsed())
            .bind(&payload.map_location)
            .bind(&payload.image_url)
            .bind(EntityStatus::Pending)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(row) => return Ok(row),
                Err(err) if is_unique_violation(&err) && attempt < SLUG_INSERT_ATTEMPTS => {
                    tracing::warn!(slug = %slug, attempt, "Slug collision, retrying with a fresh suffix");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Admin listing: every entity regardless of status, joined with the
    /// wilaya and type display names, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "entities", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<AdminEntityRow>, AppError> {
        let rows = sqlx::query_as::<Postgres, AdminEntityRow>(
            "SELECT e.id, e.slug, e.type_id, e.wilaya_id, e.name, e.description, \
                    e.website, e.linkedin, e.founded_year, e.map_location, e.image_url, \
                    e.status, e.created_at, \
                    w.name AS wilaya_name, t.name AS type_name \
             FROM entities e \
             LEFT JOIN wilayas w ON w.id = e.wilaya_id \
             LEFT JOIN entity_types t ON t.id = e.type_id \
             ORDER BY e.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Admin insert-or-update, returning the row id. Inserts default to
    /// approved when no status is supplied; updates leave the stored status
    /// untouched unless the payload names one. Last write wins, no version
    /// check.
    #[tracing::instrument(skip(self, payload), fields(db.table = "entities", db.operation = "upsert"))]
    pub async fn upsert(&self, payload: &AdminUpsertEntity) -> Result<Uuid, AppError> {
        match payload.id {
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE entities SET \
                       slug = $2, type_id = $3, wilaya_id = $4, name = $5, description = $6, \
                       website = $7, linkedin = $8, founded_year = $9, map_location = $10, \
                       image_url = $11, status = COALESCE($12, status) \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(&payload.slug)
                .bind(payload.type_id)
                .bind(payload.wilaya_id)
                .bind(&payload.name)
                .bind(&payload.description)
                .bind(&payload.website)
                .bind(&payload.linkedin)
                .bind(payload.founded_year)
                .bind(&payload.map_location)
                .bind(&payload.image_url)
                .bind(payload.status)
                .execute(&self.pool)
                .await?;
                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound("Entity not found".to_string()));
                }
                Ok(id)
            }
            None => {
                let id = sqlx::query_scalar::<Postgres, Uuid>(
                    "INSERT INTO entities \
                     (slug, type_id, wilaya_id, name, description, website, linkedin, \
                      founded_year, map_location, image_url, status) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
                     RETURNING id",
                )
                .bind(&payload.slug)
                .bind(payload.type_id)
                .bind(payload.wilaya_id)
                .bind(&payload.name)
                .bind(&payload.description)
                .bind(&payload.website)
                .bind(&payload.linkedin)
                .bind(payload.founded_year)
                .bind(&payload.map_location)
                .bind(&payload.image_url)
                .bind(payload.status_or_default())
                .fetch_one(&self.pool)
                .await?;
                Ok(id)
            }
        }
    }

    /// Approve by id. Idempotent: re-approving an approved entity still
    /// reports success. Returns false when the id matches nothing.
    #[tracing::instrument(skip(self), fields(db.table = "entities", db.operation = "update", db.record_id = %id))]
    pub async fn approve(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE entities SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(EntityStatus::Approved)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard delete, allowed from any status; join rows go with the FK
    /// cascade. Returns false when the id matches nothing.
    #[tracing::instrument(skip(self), fields(db.table = "entities", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM entities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Single wide row by id.
    #[tracing::instrument(skip(self), fields(db.table = "entities", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<EntityRow>, AppError> {
        let row = sqlx::query_as::<Postgres, EntityRow>(&format!(
            "SELECT {ENTITY_COLUMNS} FROM entities WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace the category links for an entity. Two separate statements,
    /// not transactional; a partial failure is the caller's to log.
    #[tracing::instrument(skip(self), fields(db.table = "entity_categories", db.operation = "upsert"))]
    pub async fn set_categories(
        &self,
        entity_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM entity_categories WHERE entity_id = $1")
            .bind(entity_id)
            .execute(&self.pool)
            .await?;
        for category_id in category_ids {
            sqlx::query(
                "INSERT INTO entity_categories (entity_id, category_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(entity_id)
            .bind(category_id)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    /// Replace the media-type links for an entity.
    #[tracing::instrument(skip(self), fields(db.table = "entity_media_types", db.operation = "upsert"))]
    pub async fn set_media_types(
        &self,
        entity_id: Uuid,
        media_type_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM entity_media_types WHERE entity_id = $1")
            .bind(entity_id)
            .execute(&self.pool)
            .await?;
        for media_type_id in media_type_ids {
            sqlx::query(
                "INSERT INTO entity_media_types (entity_id, media_type_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(entity_id)
            .bind(media_type_id)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection_ignores_other_errors() {
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
