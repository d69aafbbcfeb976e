//! The listing pipeline: search, filter, sort, paginate.
//!
//! Pure and synchronous; the caller re-runs it on every relevant state
//! change. The input slice is already status-filtered upstream (the public
//! query path only ever returns approved rows), so this module never looks
//! at moderation status.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Entity;

/// Fixed page size for listing pages.
pub const PAGE_SIZE: usize = 9;

/// Sort direction over founded_year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first (the default in the UI).
    Desc,
}

/// Which classification a page filters on. Startup pages filter by category,
/// most other pages by wilaya, media pages by media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterAxis {
    Category,
    Wilaya,
    MediaType,
    None,
}

/// Listing inputs. `filter: None` means "all".
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub search: String,
    pub axis: FilterAxis,
    pub filter: Option<Uuid>,
    pub sort: SortOrder,
    /// 1-based page number. Out-of-range pages yield empty rows; clamping is
    /// the caller's job.
    pub page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            axis: FilterAxis::None,
            filter: None,
            sort: SortOrder::Desc,
            page: 1,
        }
    }
}

/// One computed page of a listing.
#[derive(Debug, Clone)]
pub struct ListingPage<'a> {
    pub rows: Vec<&'a Entity>,
    /// ceil(matching / PAGE_SIZE); 0 when nothing matches.
    pub total_pages: usize,
    /// Count of rows surviving search+filter, before paging.
    pub total_count: usize,
    pub page: usize,
}

/// Case-insensitive substring match on the NAME field only. A type-specific
/// page elsewhere also matched description and wilaya name; the generic
/// pipeline deliberately does not (see DESIGN.md).
fn matches_search(entity: &Entity, query: &str) -> bool {
    entity.name.to_lowercase().contains(query)
}

fn matches_filter(entity: &Entity, axis: FilterAxis, filter: Uuid) -> bool {
    match axis {
        FilterAxis::Category => entity.kind.categories().iter().any(|c| c.id == filter),
        FilterAxis::Wilaya => entity.wilaya_id() == Some(filter),
        FilterAxis::MediaType => entity.kind.media_types().iter().any(|m| m.id == filter),
        FilterAxis::None => true,
    }
}

/// Search + filter + sort, without paging. Missing founded_year sorts as 0,
/// so unset-year rows come last in descending order and first in ascending.
/// The sort is stable: equal years keep the input (store) order.
pub fn filter_and_sort<'a>(entities: &'a [Entity], query: &ListingQuery) -> Vec<&'a Entity> {
    let search = query.search.trim().to_lowercase();

    let mut result: Vec<&Entity> = entities
        .iter()
        .filter(|e| search.is_empty() || matches_search(e, &search))
        .filter(|e| match query.filter {
            Some(id) => matches_filter(e, query.axis, id),
            None => true,
        })
        .collect();

    result.sort_by_key(|e| {
        let year = e.founded_year.unwrap_or(0);
        match query.sort {
            SortOrder::Asc => year,
            SortOrder::Desc => -year,
        }
    });

    result
}

/// Total page count for a result set size.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Run the full pipeline and slice out the requested 1-based page.
pub fn paginate<'a>(entities: &'a [Entity], query: &ListingQuery) -> ListingPage<'a> {
    let filtered = filter_and_sort(entities, query);
    let total_count = filtered.len();
    let pages = total_pages(total_count);

    let start = query.page.saturating_sub(1) * PAGE_SIZE;
    let rows = if start >= total_count {
        Vec::new()
    } else {
        filtered[start..total_count.min(start + PAGE_SIZE)].to_vec()
    };

    ListingPage {
        rows,
        total_pages: pages,
        total_count,
        page: query.page,
    }
}
