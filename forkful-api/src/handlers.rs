//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{debug, info};

use forkful_cache::CacheStats;
use forkful_core::error::ForkfulError;
use forkful_core::types::Meal;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /api/v1/meals
pub async fn list_meals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MealsQuery>,
) -> Result<Json<MealsResponse>> {
    let request = query.filter();
    let page = query.page();

    let meals = state.resolver.resolve(&request).await?;

    debug!(
        total = meals.len(),
        page = page.number,
        per_page = page.size,
        "Paginating meals"
    );

    Ok(Json(MealsResponse::paginate(&meals, page, request.has_filters())))
}

/// GET /api/v1/meals/:id
pub async fn get_meal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Meal>> {
    let meal = state
        .resolver
        .meal(&id)
        .await?
        .ok_or_else(|| ForkfulError::NotFound(format!("meal {}", id)))?;

    Ok(Json(meal))
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>> {
    let categories = state.resolver.categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// GET /api/v1/areas
pub async fn list_areas(State(state): State<Arc<AppState>>) -> Result<Json<AreasResponse>> {
    let areas = state.resolver.areas().await?;
    Ok(Json(AreasResponse { areas }))
}

/// GET /api/v1/cache/stats
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.cache().stats())
}

/// DELETE /api/v1/cache
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<ClearCacheResponse> {
    let cleared = state.cache().len();
    state.resolver.clear_cache();

    info!(cleared, "Cache cleared");
    Json(ClearCacheResponse { cleared })
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.uptime_seconds(),
        cache_entries: state.cache().len(),
        sweeper_running: state.sweeper_running(),
    })
}
