//! Request/response types for the HTTP API.

use serde::{Deserialize, Serialize};

use forkful_core::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use forkful_core::types::{FilterRequest, MealSummary};

/// Query parameters for `GET /api/v1/meals`.
#[derive(Debug, Default, Deserialize)]
pub struct MealsQuery {
    /// Name search text
    pub q: Option<String>,
    /// Comma-separated category names
    pub categories: Option<String>,
    /// Comma-separated area names
    pub areas: Option<String>,
    /// 1-based page number
    pub page: Option<usize>,
    /// Page size
    pub per_page: Option<usize>,
}

impl MealsQuery {
    /// Builds the filter request. Blank list items are ignored.
    pub fn filter(&self) -> FilterRequest {
        let mut request = FilterRequest::new()
            .with_categories(split_list(self.categories.as_deref()))
            .with_areas(split_list(self.areas.as_deref()));
        if let Some(q) = &self.q {
            request = request.with_search(q.as_str());
        }
        request
    }

    /// Page window after clamping.
    pub fn page(&self) -> Page {
        Page::new(self.page.unwrap_or(1), self.per_page.unwrap_or(DEFAULT_PAGE_SIZE))
    }
}

fn split_list(raw: Option<&str>) -> Vec<&str> {
    raw.map(|s| s.split(',').collect()).unwrap_or_default()
}

/// A clamped page window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number, at least 1
    pub number: usize,
    /// Items per page, between 1 and `MAX_PAGE_SIZE`
    pub size: usize,
}

impl Page {
    /// Clamps `number` to at least 1 and `size` into `1..=MAX_PAGE_SIZE`.
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of pages needed for `total` items.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.size)
    }

    /// The slice of `items` this page covers; empty past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.number - 1).saturating_mul(self.size).min(items.len());
        let end = start.saturating_add(self.size).min(items.len());
        &items[start..end]
    }
}

/// Response for `GET /api/v1/meals`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealsResponse {
    /// Meals on this page
    pub meals: Vec<MealSummary>,
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub per_page: usize,
    /// Total matching meals
    pub total: usize,
    /// Total pages
    pub total_pages: usize,
    /// False when no search, category or area was given
    pub filters_active: bool,
}

impl MealsResponse {
    /// Paginates a full resolution.
    pub fn paginate(all: &[MealSummary], page: Page, filters_active: bool) -> Self {
        Self {
            meals: page.slice(all).to_vec(),
            page: page.number,
            per_page: page.size,
            total: all.len(),
            total_pages: page.total_pages(all.len()),
            filters_active,
        }
    }
}

/// Response for `GET /api/v1/categories`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    /// Category names
    pub categories: Vec<String>,
}

/// Response for `GET /api/v1/areas`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AreasResponse {
    /// Area names
    pub areas: Vec<String>,
}

/// Response for `DELETE /api/v1/cache`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    /// Entries dropped
    pub cleared: usize,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Entries currently stored in the cache
    pub cache_entries: usize,
    /// Whether the cache sweeper is running
    pub sweeper_running: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meals(n: usize) -> Vec<MealSummary> {
        (1..=n)
            .map(|i| MealSummary {
                id: i.to_string(),
                name: format!("Meal {i}"),
                thumbnail_url: String::new(),
                category: None,
                area: None,
            })
            .collect()
    }

    #[test]
    fn test_page_clamping() {
        assert_eq!(Page::new(0, 0), Page { number: 1, size: 1 });
        assert_eq!(Page::new(3, 1000).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_paginate_windows() {
        let all = meals(25);

        let first = MealsResponse::paginate(&all, Page::new(1, 12), true);
        assert_eq!(first.meals.len(), 12);
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages, 3);

        let last = MealsResponse::paginate(&all, Page::new(3, 12), true);
        assert_eq!(last.meals.len(), 1);
        assert_eq!(last.meals[0].id, "25");

        let past_end = MealsResponse::paginate(&all, Page::new(9, 12), true);
        assert!(past_end.meals.is_empty());
        assert_eq!(past_end.page, 9);
    }

    #[test]
    fn test_paginate_empty() {
        let response = MealsResponse::paginate(&[], Page::new(1, 12), false);
        assert_eq!(response.total_pages, 0);
        assert!(!response.filters_active);
    }

    #[test]
    fn test_query_to_filter() {
        let query = MealsQuery {
            q: Some("  ".into()),
            categories: Some("Beef, Chicken,,".into()),
            areas: Some("Italian".into()),
            ..Default::default()
        };
        let request = query.filter();

        assert_eq!(request.search_term(), None);
        assert_eq!(request.categories.len(), 2);
        assert!(request.categories.contains("Chicken"));
        assert!(request.areas.contains("Italian"));
    }

    #[test]
    fn test_response_is_camel_case() {
        let response = MealsResponse::paginate(&meals(1), Page::new(1, 12), true);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["perPage"], 12);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["filtersActive"], true);
    }
}
