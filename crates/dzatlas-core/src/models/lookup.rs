use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::error::AppError;

/// Entity type reference row (startup, incubator, ...).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct EntityType {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

/// Startup category reference row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

/// Administrative region reference row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Wilaya {
    pub id: Uuid,
    pub code: i32,
    pub name: String,
    pub slug: String,
}

/// Media type reference row (podcast, video, newsletter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaType {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub icon_url: Option<String>,
    pub icon_emoji: Option<String>,
}

/// Allow-listed generic lookup tables. Any other table name is rejected
/// before a query is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LookupTable {
    EntityTypes,
    Wilayas,
    Categories,
    MediaTypes,
}

impl LookupTable {
    pub const ALL: [LookupTable; 4] = [
        LookupTable::EntityTypes,
        LookupTable::Wilayas,
        LookupTable::Categories,
        LookupTable::MediaTypes,
    ];

    /// SQL table name. Only ever one of the four allow-listed tables, so it
    /// is safe to splice into query strings.
    pub fn table_name(&self) -> &'static str {
        match self {
            LookupTable::EntityTypes => "entity_types",
            LookupTable::Wilayas => "wilayas",
            LookupTable::Categories => "categories",
            LookupTable::MediaTypes => "media_types",
        }
    }

    /// Parse a client-supplied table name against the allow-list.
    pub fn parse(table: &str) -> Result<Self, AppError> {
        match table {
            "entity_types" => Ok(LookupTable::EntityTypes),
            "wilayas" => Ok(LookupTable::Wilayas),
            "categories" => Ok(LookupTable::Categories),
            "media_types" => Ok(LookupTable::MediaTypes),
            other => Err(AppError::InvalidTable(other.to_string())),
        }
    }
}

impl std::fmt::Display for LookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Upsert payload for the generic lookup manager: the shared {slug, name}
/// shape plus the per-table extra display fields. Columns irrelevant to the
/// target table are ignored by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LookupUpsert {
    pub id: Option<Uuid>,
    pub slug: String,
    pub name: String,
    /// Wilayas only
    pub code: Option<i32>,
    /// Media types only
    pub icon_url: Option<String>,
    /// Media types only
    pub icon_emoji: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_accepts_the_four_tables() {
        for table in LookupTable::ALL {
            assert_eq!(LookupTable::parse(table.table_name()).unwrap(), table);
        }
    }

    #[test]
    fn test_allow_list_rejects_other_tables() {
        for name in ["invoices", "entities", "users", "", "wilayas; DROP TABLE"] {
            let err = LookupTable::parse(name).unwrap_err();
            match err {
                AppError::InvalidTable(t) => assert_eq!(t, name),
                other => panic!("expected InvalidTable, got {other:?}"),
            }
        }
    }
}
