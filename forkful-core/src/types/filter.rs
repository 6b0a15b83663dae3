//! Filter request value object.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::MealSummary;

/// Search text plus the selected categories and areas.
///
/// Sets are ordered, so two requests built from the same selections in a
/// different order compare equal and iterate identically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    /// Free-text name search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// Selected category names (exact case)
    #[serde(default)]
    pub categories: BTreeSet<String>,
    /// Selected area names (exact case)
    #[serde(default)]
    pub areas: BTreeSet<String>,
}

impl FilterRequest {
    /// Creates an empty request (no filters active).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Adds categories. Blank names are ignored.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(clean(categories));
        self
    }

    /// Adds areas. Blank names are ignored.
    pub fn with_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas.extend(clean(areas));
        self
    }

    /// Trimmed search text, or `None` when empty or whitespace-only.
    pub fn search_term(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Returns true if any of search, categories or areas is set.
    pub fn has_filters(&self) -> bool {
        self.search_term().is_some() || !self.categories.is_empty() || !self.areas.is_empty()
    }

    /// Conjunctive client-side check: an empty set admits everything.
    pub fn matches(&self, meal: &MealSummary) -> bool {
        self.matches_category(meal) && self.matches_area(meal)
    }

    /// Category half of [`matches`](Self::matches).
    pub fn matches_category(&self, meal: &MealSummary) -> bool {
        self.categories.is_empty()
            || meal
                .category
                .as_ref()
                .is_some_and(|c| self.categories.contains(c))
    }

    /// Area half of [`matches`](Self::matches).
    pub fn matches_area(&self, meal: &MealSummary) -> bool {
        self.areas.is_empty() || meal.area.as_ref().is_some_and(|a| self.areas.contains(a))
    }
}

fn clean<I, S>(names: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(|n| n.into().trim().to_string())
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(category: Option<&str>, area: Option<&str>) -> MealSummary {
        MealSummary {
            id: "1".into(),
            name: "Dish".into(),
            thumbnail_url: String::new(),
            category: category.map(Into::into),
            area: area.map(Into::into),
        }
    }

    #[test]
    fn test_empty_request_has_no_filters() {
        assert!(!FilterRequest::new().has_filters());
        assert!(!FilterRequest::new().with_search("   ").has_filters());
    }

    #[test]
    fn test_order_independent_equality() {
        let a = FilterRequest::new().with_categories(["Chicken", "Beef"]);
        let b = FilterRequest::new().with_categories(["Beef", "Chicken"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_names_ignored() {
        let request = FilterRequest::new().with_categories(["", "  ", " Beef "]);
        assert_eq!(request.categories.len(), 1);
        assert!(request.categories.contains("Beef"));
    }

    #[test]
    fn test_search_term_trimmed() {
        let request = FilterRequest::new().with_search("  pasta ");
        assert_eq!(request.search_term(), Some("pasta"));
    }

    #[test]
    fn test_matches_conjunctive() {
        let request = FilterRequest::new()
            .with_categories(["Chicken"])
            .with_areas(["Japanese"]);

        assert!(request.matches(&meal(Some("Chicken"), Some("Japanese"))));
        assert!(!request.matches(&meal(Some("Chicken"), Some("Italian"))));
        assert!(!request.matches(&meal(Some("Beef"), Some("Japanese"))));
        assert!(!request.matches(&meal(None, Some("Japanese"))));
    }

    #[test]
    fn test_empty_sets_admit_everything() {
        let request = FilterRequest::new().with_search("pie");
        assert!(request.matches(&meal(None, None)));
    }
}
