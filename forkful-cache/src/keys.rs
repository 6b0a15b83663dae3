//! Cache key grammar.
//!
//! ```text
//! categories
//! areas
//! search:<lowercased query>
//! meal:<id>
//! filter:category:<name, exact case>
//! filter:area:<name, exact case>
//! filtered|q:<query as given>|c:<sorted,comma,joined>|a:<sorted,comma,joined>
//! ```
//!
//! Any process sharing a cache namespace must produce these strings
//! byte-for-byte.

use forkful_core::FilterRequest;

/// Builders for every cache key the resolver uses.
pub struct CacheKeys;

impl CacheKeys {
    /// Key for the category name list.
    pub const CATEGORIES: &'static str = "categories";
    /// Key for the area name list.
    pub const AREAS: &'static str = "areas";

    /// Key for a name search. Case and surrounding whitespace are ignored.
    pub fn search(query: &str) -> String {
        format!("search:{}", query.trim().to_lowercase())
    }

    /// Key for a single meal looked up by id.
    pub fn meal(id: &str) -> String {
        format!("meal:{}", id)
    }

    /// Key for the meals of one category.
    pub fn filter_category(category: &str) -> String {
        format!("filter:category:{}", category)
    }

    /// Key for the meals of one area.
    pub fn filter_area(area: &str) -> String {
        format!("filter:area:{}", area)
    }

    /// Key for a whole resolution.
    ///
    /// Segments without data are left out; the rest appear in q, c, a order.
    /// The query is written verbatim once its trimmed form is non-empty.
    /// Categories and areas are sorted, so selection order does not matter.
    pub fn filtered(request: &FilterRequest) -> String {
        let mut key = String::from("filtered");

        let query = request.search_query.as_deref();
        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            key.push_str("|q:");
            key.push_str(query);
        }
        if !request.categories.is_empty() {
            key.push_str("|c:");
            key.push_str(&join_sorted(request.categories.iter()));
        }
        if !request.areas.is_empty() {
            key.push_str("|a:");
            key.push_str(&join_sorted(request.areas.iter()));
        }

        key
    }
}

fn join_sorted<'a>(names: impl Iterator<Item = &'a String>) -> String {
    let mut names: Vec<&str> = names.map(String::as_str).collect();
    names.sort_unstable();
    names.join(",")
}
