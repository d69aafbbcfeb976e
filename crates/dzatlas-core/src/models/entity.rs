use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::lookup::{Category, MediaType, Wilaya};

/// Moderation status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "entity_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityStatus::Pending => write!(f, "pending"),
            EntityStatus::Approved => write!(f, "approved"),
            EntityStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The nine seeded entity type slugs. Closed set; the lookup table carries
/// the display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EntityTypeSlug {
    #[serde(rename = "startup")]
    Startup,
    #[serde(rename = "incubator")]
    Incubator,
    #[serde(rename = "accelerator")]
    Accelerator,
    #[serde(rename = "coworking-space")]
    CoworkingSpace,
    #[serde(rename = "media")]
    Media,
    #[serde(rename = "community")]
    Community,
    #[serde(rename = "event")]
    Event,
    #[serde(rename = "resource")]
    Resource,
    #[serde(rename = "job_portal")]
    JobPortal,
}

impl EntityTypeSlug {
    pub const ALL: [EntityTypeSlug; 9] = [
        EntityTypeSlug::Startup,
        EntityTypeSlug::Incubator,
        EntityTypeSlug::Accelerator,
        EntityTypeSlug::CoworkingSpace,
        EntityTypeSlug::Media,
        EntityTypeSlug::Community,
        EntityTypeSlug::Event,
        EntityTypeSlug::Resource,
        EntityTypeSlug::JobPortal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityTypeSlug::Startup => "startup",
            EntityTypeSlug::Incubator => "incubator",
            EntityTypeSlug::Accelerator => "accelerator",
            EntityTypeSlug::CoworkingSpace => "coworking-space",
            EntityTypeSlug::Media => "media",
            EntityTypeSlug::Community => "community",
            EntityTypeSlug::Event => "event",
            EntityTypeSlug::Resource => "resource",
            EntityTypeSlug::JobPortal => "job_portal",
        }
    }

    /// Seeded display name for the type.
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityTypeSlug::Startup => "Startup",
            EntityTypeSlug::Incubator => "Incubator",
            EntityTypeSlug::Accelerator => "Accelerator",
            EntityTypeSlug::CoworkingSpace => "Coworking Space",
            EntityTypeSlug::Media => "Media",
            EntityTypeSlug::Community => "Community",
            EntityTypeSlug::Event => "Event",
            EntityTypeSlug::Resource => "Resource",
            EntityTypeSlug::JobPortal => "Job Portal",
        }
    }

    pub fn parse(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == slug)
    }
}

impl std::fmt::Display for EntityTypeSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database row for the entities table (wide form; relations live in the
/// join tables and are fetched separately). Serialized as-is in the
/// submit-entity response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct EntityRow {
    pub id: Uuid,
    pub slug: String,
    pub type_id: Uuid,
    pub wilaya_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub founded_year: Option<i32>,
    pub map_location: Option<String>,
    pub image_url: Option<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
}

/// Type-specific relations, tagged by entity type. Only startups carry
/// category links and only media entries carry media-type links; every other
/// type is a bare variant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum EntityKind {
    #[serde(rename = "startup")]
    Startup { categories: Vec<Category> },
    #[serde(rename = "incubator")]
    Incubator,
    #[serde(rename = "accelerator")]
    Accelerator,
    #[serde(rename = "coworking-space")]
    CoworkingSpace,
    #[serde(rename = "media")]
    Media { media_types: Vec<MediaType> },
    #[serde(rename = "community")]
    Community,
    #[serde(rename = "event")]
    Event,
    #[serde(rename = "resource")]
    Resource,
    #[serde(rename = "job_portal")]
    JobPortal,
}

impl EntityKind {
    /// Build the variant for a type, keeping only the relations legal for it.
    pub fn from_parts(
        type_slug: EntityTypeSlug,
        categories: Vec<Category>,
        media_types: Vec<MediaType>,
    ) -> Self {
        match type_slug {
            EntityTypeSlug::Startup => EntityKind::Startup { categories },
            EntityTypeSlug::Incubator => EntityKind::Incubator,
            EntityTypeSlug::Accelerator => EntityKind::Accelerator,
            EntityTypeSlug::CoworkingSpace => EntityKind::CoworkingSpace,
            EntityTypeSlug::Media => EntityKind::Media { media_types },
            EntityTypeSlug::Community => EntityKind::Community,
            EntityTypeSlug::Event => EntityKind::Event,
            EntityTypeSlug::Resource => EntityKind::Resource,
            EntityTypeSlug::JobPortal => EntityKind::JobPortal,
        }
    }

    pub fn type_slug(&self) -> EntityTypeSlug {
        match self {
            EntityKind::Startup { .. } => EntityTypeSlug::Startup,
            EntityKind::Incubator => EntityTypeSlug::Incubator,
            EntityKind::Accelerator => EntityTypeSlug::Accelerator,
            EntityKind::CoworkingSpace => EntityTypeSlug::CoworkingSpace,
            EntityKind::Media { .. } => EntityTypeSlug::Media,
            EntityKind::Community => EntityTypeSlug::Community,
            EntityKind::Event => EntityTypeSlug::Event,
            EntityKind::Resource => EntityTypeSlug::Resource,
            EntityKind::JobPortal => EntityTypeSlug::JobPortal,
        }
    }

    pub fn categories(&self) -> &[Category] {
        match self {
            EntityKind::Startup { categories } => categories,
            _ => &[],
        }
    }

    pub fn media_types(&self) -> &[MediaType] {
        match self {
            EntityKind::Media { media_types } => media_types,
            _ => &[],
        }
    }
}

/// Public entity record: the shared base fields plus the type-tagged
/// relations, with the wilaya joined in for display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Entity {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub founded_year: Option<i32>,
    pub map_location: Option<String>,
    pub image_url: Option<String>,
    pub wilaya: Option<Wilaya>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl Entity {
    /// Assemble the domain record from a wide row plus its resolved
    /// relations.
    pub fn from_row(
        row: EntityRow,
        type_slug: EntityTypeSlug,
        wilaya: Option<Wilaya>,
        categories: Vec<Category>,
        media_types: Vec<MediaType>,
    ) -> Self {
        Entity {
            id: row.id,
            slug: row.slug,
            name: row.name,
            description: row.description,
            website: row.website,
            linkedin: row.linkedin,
            founded_year: row.founded_year,
            map_location: row.map_location,
            image_url: row.image_url,
            wilaya,
            status: row.status,
            created_at: row.created_at,
            kind: EntityKind::from_parts(type_slug, categories, media_types),
        }
    }

    pub fn wilaya_id(&self) -> Option<Uuid> {
        self.wilaya.as_ref().map(|w| w.id)
    }
}

/// Admin listing row: the wide entity row joined with the wilaya and type
/// display names, ordered newest-first by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct AdminEntityRow {
    pub id: Uuid,
    pub slug: String,
    pub type_id: Uuid,
    pub wilaya_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub founded_year: Option<i32>,
    pub map_location: Option<String>,
    pub image_url: Option<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub wilaya_name: Option<String>,
    pub type_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> Category {
        Category {
            id: Uuid::new_v4(),
            slug: name.to_lowercase(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_kind_keeps_only_legal_relations() {
        let cats = vec![category("Fintech")];
        let kind = EntityKind::from_parts(EntityTypeSlug::Incubator, cats.clone(), vec![]);
        assert!(kind.categories().is_empty());

        let kind = EntityKind::from_parts(EntityTypeSlug::Startup, cats, vec![]);
        assert_eq!(kind.categories().len(), 1);
        assert!(kind.media_types().is_empty());
    }

    #[test]
    fn test_entity_serializes_with_type_tag() {
        let entity = Entity {
            id: Uuid::new_v4(),
            slug: "acme-robotics-a1b2".to_string(),
            name: "Acme Robotics".to_string(),
            description: None,
            website: None,
            linkedin: None,
            founded_year: Some(2022),
            map_location: None,
            image_url: None,
            wilaya: None,
            status: EntityStatus::Pending,
            created_at: Utc::now(),
            kind: EntityKind::Startup {
                categories: vec![category("Robotics")],
            },
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "startup");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["categories"][0]["name"], "Robotics");

        let back: Entity = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind.type_slug(), EntityTypeSlug::Startup);
    }

    #[test]
    fn test_type_slug_round_trip() {
        for slug in EntityTypeSlug::ALL {
            assert_eq!(EntityTypeSlug::parse(slug.as_str()), Some(slug));
        }
        assert_eq!(EntityTypeSlug::parse("bank"), None);
    }
}
