//! Reference-data seeding.
//!
//! Upserts the fixed entity type taxonomy, the 58-wilaya table, and the
//! seeded media types. Row-by-row and non-atomic: an individual failure is
//! logged and the remaining rows still go in.

use dzatlas_core::models::EntityTypeSlug;
use dzatlas_core::wilayas::WILAYAS;
use dzatlas_core::AppError;
use sqlx::PgPool;

const MEDIA_TYPES: [(&str, &str, &str); 3] = [
    ("podcast", "Podcast", "\u{1F399}\u{FE0F}"),
    ("video", "Video", "\u{1F3A5}"),
    ("newsletter", "Newsletter", "\u{1F4F0}"),
];

/// Seed the fixed reference data, keyed on slug so re-runs are idempotent.
pub async fn seed_reference_data(pool: &PgPool) -> Result<(), AppError> {
    tracing::info!("Seeding reference data");

    for entity_type in EntityTypeSlug::ALL {
        let result = sqlx::query(
            "INSERT INTO entity_types (slug, name) VALUES ($1, $2) \
             ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name",
        )
        .bind(entity_type.as_str())
        .bind(entity_type.display_name())
        .execute(pool)
        .await;
        if let Err(err) = result {
            tracing::error!(slug = %entity_type, error = %err, "Failed to seed entity type");
        }
    }

    for wilaya in &WILAYAS {
        let result = sqlx::query(
            "INSERT INTO wilayas (code, name, slug) VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO UPDATE SET code = EXCLUDED.code, name = EXCLUDED.name",
        )
        .bind(wilaya.code)
        .bind(wilaya.name)
        .bind(wilaya.slug)
        .execute(pool)
        .await;
        if let Err(err) = result {
            tracing::error!(slug = %wilaya.slug, error = %err, "Failed to seed wilaya");
        }
    }

    for (slug, name, icon_emoji) in MEDIA_TYPES {
        let result = sqlx::query(
            "INSERT INTO media_types (slug, name, icon_emoji) VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name, \
             icon_emoji = EXCLUDED.icon_emoji",
        )
        .bind(slug)
        .bind(name)
        .bind(icon_emoji)
        .execute(pool)
        .await;
        if let Err(err) = result {
            tracing::error!(slug = slug, error = %err, "Failed to seed media type");
        }
    }

    tracing::info!("Reference data seeded");
    Ok(())
}
