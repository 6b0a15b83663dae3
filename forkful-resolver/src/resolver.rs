//! Cached meal resolver.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use futures::future::try_join_all;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, instrument};

use forkful_cache::{CacheKeys, TtlCache};
use forkful_core::error::{ForkfulError, Result};
use forkful_core::traits::RecipeSource;
use forkful_core::types::{FilterRequest, Meal, MealRecord, MealSummary, PartialMeal};

use crate::config::{ResolverConfig, TtlPolicy};

/// The filter endpoint used as the fetch axis.
#[derive(Clone, Copy, Debug)]
enum Axis {
    Category,
    Area,
}

impl Axis {
    fn cache_key(self, name: &str) -> String {
        match self {
            Axis::Category => CacheKeys::filter_category(name),
            Axis::Area => CacheKeys::filter_area(name),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Axis::Category => "category",
            Axis::Area => "area",
        }
    }
}

/// Resolves filter requests into deduplicated meal summaries.
///
/// Resolution picks one fetch axis:
/// 1. No search, categories or areas: empty list, no upstream call
/// 2. Search text: name search, then categories/areas filtered client-side
/// 3. Categories: one listing per category, full record per meal to recover
///    its area, dedup by id, then the area filter
/// 4. Areas only: symmetric to 3, the full record recovers the category
///
/// Any upstream failure aborts the whole resolution; nothing partial is
/// returned and the combined cache entry is not written.
pub struct MealResolver {
    source: Arc<dyn RecipeSource>,
    cache: TtlCache,
    config: ResolverConfig,
}

impl MealResolver {
    /// Creates a resolver with default configuration.
    pub fn new(source: Arc<dyn RecipeSource>, cache: TtlCache) -> Self {
        Self {
            source,
            cache,
            config: ResolverConfig::default(),
        }
    }

    /// Creates a resolver with custom configuration.
    pub fn with_config(
        source: Arc<dyn RecipeSource>,
        cache: TtlCache,
        config: ResolverConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            cache,
            config,
        })
    }

    /// The cache this resolver memoizes into.
    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// The TTL tiers in use.
    pub fn ttl(&self) -> &TtlPolicy {
        &self.config.ttl
    }

    /// Drops every cached entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolves a filter request.
    #[instrument(skip(self))]
    pub async fn resolve(&self, request: &FilterRequest) -> Result<Vec<MealSummary>> {
        if !request.has_filters() {
            debug!("No filters active");
            return Ok(Vec::new());
        }

        let key = CacheKeys::filtered(request);
        let meals = self
            .cache
            .with_cache(&key, self.config.ttl.medium(), || self.resolve_uncached(request))
            .await?;

        info!(key = %key, count = meals.len(), "Resolved meals");
        Ok(meals)
    }

    /// All category names.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>> {
        self.cache
            .with_cache(CacheKeys::CATEGORIES, self.config.ttl.long(), || {
                self.source.list_categories()
            })
            .await
    }

    /// All area names.
    #[instrument(skip(self))]
    pub async fn areas(&self) -> Result<Vec<String>> {
        self.cache
            .with_cache(CacheKeys::AREAS, self.config.ttl.long(), || self.source.list_areas())
            .await
    }

    /// Name search. Blank queries return an empty list without a fetch.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<MealSummary>> {
        let term = query.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        self.cache
            .with_cache(&CacheKeys::search(term), self.config.ttl.short(), || async {
                let records = self.source.search_by_name(term).await?;
                Ok::<_, ForkfulError>(records.iter().map(MealRecord::summary).collect())
            })
            .await
    }

    /// Full meal by id, with extracted ingredients.
    #[instrument(skip(self))]
    pub async fn meal(&self, id: &str) -> Result<Option<Meal>> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ForkfulError::ValidationError("Meal id cannot be empty".into()));
        }

        Ok(self.lookup_record(id).await?.map(Meal::from))
    }

    async fn resolve_uncached(&self, request: &FilterRequest) -> Result<Vec<MealSummary>> {
        if let Some(term) = request.search_term() {
            let results = self.search(term).await?;
            return Ok(dedup_by_id(
                results.into_iter().filter(|meal| request.matches(meal)),
            ));
        }

        if !request.categories.is_empty() {
            let meals = self.resolve_axis(Axis::Category, &request.categories).await?;
            return Ok(meals
                .into_iter()
                .filter(|meal| request.matches_area(meal))
                .collect());
        }

        self.resolve_axis(Axis::Area, &request.areas).await
    }

    async fn resolve_axis(&self, axis: Axis, names: &BTreeSet<String>) -> Result<Vec<MealSummary>> {
        let listings = try_join_all(names.iter().map(|name| self.listing(axis, name))).await?;

        // First occurrence wins, in sorted name order.
        let mut seen = HashSet::new();
        let candidates: Vec<(String, PartialMeal)> = names
            .iter()
            .zip(listings)
            .flat_map(|(name, meals)| meals.into_iter().map(move |meal| (name.clone(), meal)))
            .filter(|(_, meal)| seen.insert(meal.id_meal.clone()))
            .collect();

        debug!(
            axis = axis.as_str(),
            lists = names.len(),
            meals = candidates.len(),
            "Looking up full records"
        );

        stream::iter(candidates)
            .map(|(name, partial)| async move { self.complete(axis, &name, partial).await })
            .buffered(self.config.max_concurrent_lookups)
            .try_collect()
            .await
    }

    async fn listing(&self, axis: Axis, name: &str) -> Result<Vec<PartialMeal>> {
        self.cache
            .with_cache(&axis.cache_key(name), self.config.ttl.medium(), || async {
                match axis {
                    Axis::Category => self.source.filter_by_category(name).await,
                    Axis::Area => self.source.filter_by_area(name).await,
                }
            })
            .await
    }

    /// Fills in the field the listing endpoint leaves out.
    async fn complete(
        &self,
        axis: Axis,
        listed_under: &str,
        partial: PartialMeal,
    ) -> Result<MealSummary> {
        let record = self.lookup_record(&partial.id_meal).await?;

        let mut summary = MealSummary {
            id: partial.id_meal,
            name: partial.str_meal,
            thumbnail_url: partial.str_meal_thumb.unwrap_or_default(),
            category: None,
            area: None,
        };

        match &record {
            Some(record) => {
                summary.category = record.category().map(str::to_string);
                summary.area = record.area().map(str::to_string);
                if summary.thumbnail_url.is_empty() {
                    summary.thumbnail_url = record.str_meal_thumb.clone().unwrap_or_default();
                }
            }
            None => debug!(id = %summary.id, "Listed meal has no full record"),
        }

        match axis {
            Axis::Category if summary.category.is_none() => {
                summary.category = Some(listed_under.to_string());
            }
            Axis::Area if summary.area.is_none() => {
                summary.area = Some(listed_under.to_string());
            }
            _ => {}
        }

        Ok(summary)
    }

    /// Cached lookup by id. Misses upstream are not cached.
    async fn lookup_record(&self, id: &str) -> Result<Option<MealRecord>> {
        let key = CacheKeys::meal(id);
        if let Some(record) = self.cache.get::<MealRecord>(&key) {
            debug!(id, "Cache hit");
            return Ok(Some(record));
        }

        let record = self.source.lookup_by_id(id).await?;
        match &record {
            Some(record) => self.cache.set_with_ttl(key, record, self.config.ttl.long()),
            None => debug!(id, "Meal not found upstream"),
        }
        Ok(record)
    }
}

fn dedup_by_id(meals: impl IntoIterator<Item = MealSummary>) -> Vec<MealSummary> {
    let mut seen = HashSet::new();
    meals
        .into_iter()
        .filter(|meal| seen.insert(meal.id.clone()))
        .collect()
}
