//! Common traits for Forkful.
//!
//! The resolver only ever talks to the recipe API through [`RecipeSource`],
//! so tests and alternative backends can stand in for the HTTP client.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{MealRecord, PartialMeal};

// ═══════════════════════════════════════════════════════════════════════════════
// RECIPE SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Fetch contract for the upstream recipe API.
///
/// Implementations must normalize a `null` payload list to an empty `Vec`.
/// None of these calls are cached here; caching lives in the resolver.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Searches meals by (partial) name. Returns full records.
    async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>>;

    /// Looks up a single full record by id.
    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>>;

    /// Lists all category names.
    async fn list_categories(&self) -> Result<Vec<String>>;

    /// Lists all area (cuisine) names.
    async fn list_areas(&self) -> Result<Vec<String>>;

    /// Lists meals in a category. Records carry id, name and thumbnail only.
    async fn filter_by_category(&self, category: &str) -> Result<Vec<PartialMeal>>;

    /// Lists meals from an area. Records carry id, name and thumbnail only.
    async fn filter_by_area(&self, area: &str) -> Result<Vec<PartialMeal>>;
}
