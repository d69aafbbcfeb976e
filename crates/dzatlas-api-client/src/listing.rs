//! Listing state for the browsing pages.
//!
//! Holds the user-chosen search/filter/sort/page inputs and applies the
//! page-reset rules: changing search or filter jumps back to page 1 so an
//! out-of-range empty page is never shown; changing sort keeps the page.

use dzatlas_core::listing::{self, FilterAxis, ListingPage, ListingQuery, SortOrder};
use dzatlas_core::models::Entity;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ListingState {
    query: ListingQuery,
}

impl ListingState {
    /// Fresh state for a page filtering along the given axis.
    pub fn new(axis: FilterAxis) -> Self {
        Self {
            query: ListingQuery {
                axis,
                ..ListingQuery::default()
            },
        }
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.query.page = 1;
    }

    /// `None` selects "all".
    pub fn set_filter(&mut self, filter: Option<Uuid>) {
        self.query.filter = filter;
        self.query.page = 1;
    }

    /// Sort changes keep the current page.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    pub fn clear_filters(&mut self) {
        self.query.search.clear();
        self.query.filter = None;
        self.query.page = 1;
    }

    /// Run the pure pipeline over a fetched entity set.
    pub fn page<'a>(&self, entities: &'a [Entity]) -> ListingPage<'a> {
        listing::paginate(entities, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dzatlas_core::models::{EntityKind, EntityStatus};

    fn entity(name: &str) -> Entity {
        Entity {
            id: Uuid::new_v4(),
            slug: name.to_lowercase(),
            name: name.to_string(),
            description: None,
            website: None,
            linkedin: None,
            founded_year: None,
            map_location: None,
            image_url: None,
            wilaya: None,
            status: EntityStatus::Approved,
            created_at: chrono::Utc::now(),
            kind: EntityKind::Community,
        }
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut state = ListingState::new(FilterAxis::None);
        state.set_page(4);
        state.set_search("hub");
        assert_eq!(state.query().page, 1);
        assert_eq!(state.query().search, "hub");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = ListingState::new(FilterAxis::Wilaya);
        state.set_page(3);
        state.set_filter(Some(Uuid::new_v4()));
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn test_sort_change_keeps_page() {
        let mut state = ListingState::new(FilterAxis::None);
        state.set_page(3);
        state.set_sort(SortOrder::Asc);
        assert_eq!(state.query().page, 3);
    }

    #[test]
    fn test_clear_filters_resets_everything() {
        let mut state = ListingState::new(FilterAxis::None);
        state.set_search("hub");
        state.set_filter(Some(Uuid::new_v4()));
        state.set_page(2);
        state.clear_filters();
        assert!(state.query().search.is_empty());
        assert!(state.query().filter.is_none());
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn test_page_floor_is_one() {
        let mut state = ListingState::new(FilterAxis::None);
        state.set_page(0);
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn test_page_runs_the_pipeline() {
        let entities: Vec<Entity> = (0..12).map(|i| entity(&format!("E{i}"))).collect();
        let state = ListingState::new(FilterAxis::None);
        let page = state.page(&entities);
        assert_eq!(page.rows.len(), 9);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total_count, 12);
    }
}
