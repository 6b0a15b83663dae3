//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Meals
        .route("/api/v1/meals", get(handlers::list_meals))
        .route("/api/v1/meals/:id", get(handlers::get_meal))

        // Reference lists
        .route("/api/v1/categories", get(handlers::list_categories))
        .route("/api/v1/areas", get(handlers::list_areas))

        // Cache
        .route("/api/v1/cache/stats", get(handlers::cache_stats))
        .route("/api/v1/cache", axum::routing::delete(handlers::clear_cache))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use forkful_core::error::{ForkfulError, Result};
    use forkful_core::traits::RecipeSource;
    use forkful_core::types::{MealRecord, PartialMeal};

    use crate::state::ApiConfig;

    /// Two Beef meals, one British and one Vietnamese.
    #[derive(Default)]
    struct StubSource {
        calls: AtomicUsize,
        down: bool,
        garbled: bool,
    }

    impl StubSource {
        fn record(id: &str) -> Option<MealRecord> {
            let (name, area) = match id {
                "1" => ("Beef Wellington", "British"),
                "2" => ("Beef Pho", "Vietnamese"),
                _ => return None,
            };
            let mut record = MealRecord::new(id, name);
            record.str_category = Some("Beef".into());
            record.str_area = Some(area.into());
            record.str_ingredient1 = Some("Beef Fillet".into());
            record.str_measure1 = Some("600g".into());
            Some(record)
        }

        fn hit(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.down {
                return Err(ForkfulError::UpstreamStatus {
                    status: 503,
                    message: "Service Unavailable".into(),
                });
            }
            if self.garbled {
                return Err(ForkfulError::Unknown(
                    "expected value at line 1 column 1".into(),
                ));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RecipeSource for StubSource {
        async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>> {
            self.hit()?;
            Ok(["1", "2"]
                .iter()
                .filter_map(|id| Self::record(id))
                .filter(|r| r.str_meal.to_lowercase().contains(&name.to_lowercase()))
                .collect())
        }

        async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>> {
            self.hit()?;
            Ok(Self::record(id))
        }

        async fn list_categories(&self) -> Result<Vec<String>> {
            self.hit()?;
            Ok(vec!["Beef".into()])
        }

        async fn list_areas(&self) -> Result<Vec<String>> {
            self.hit()?;
            Ok(vec!["British".into(), "Vietnamese".into()])
        }

        async fn filter_by_category(&self, category: &str) -> Result<Vec<PartialMeal>> {
            self.hit()?;
            if category != "Beef" {
                return Ok(Vec::new());
            }
            Ok(vec![
                PartialMeal::new("1", "Beef Wellington", "https://img/1.jpg"),
                PartialMeal::new("2", "Beef Pho", "https://img/2.jpg"),
            ])
        }

        async fn filter_by_area(&self, area: &str) -> Result<Vec<PartialMeal>> {
            self.hit()?;
            Ok(match area {
                "British" => vec![PartialMeal::new("1", "Beef Wellington", "https://img/1.jpg")],
                "Vietnamese" => vec![PartialMeal::new("2", "Beef Pho", "https://img/2.jpg")],
                _ => Vec::new(),
            })
        }
    }

    fn test_state(source: StubSource) -> (Arc<AppState>, Arc<StubSource>) {
        let source = Arc::new(source);
        let config = ApiConfig {
            enable_sweep: false,
            ..Default::default()
        };
        let state = AppState::with_source(config, source.clone()).unwrap();
        (Arc::new(state), source)
    }

    async fn send(state: &Arc<AppState>, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (state, _) = test_state(StubSource::default());
        let (status, body) = send(&state, "GET", "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sweeper_running"], false);
    }

    #[tokio::test]
    async fn test_meals_without_filters() {
        let (state, source) = test_state(StubSource::default());
        let (status, body) = send(&state, "GET", "/api/v1/meals").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filtersActive"], false);
        assert_eq!(body["total"], 0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_meals_by_category_and_area() {
        let (state, _) = test_state(StubSource::default());
        let (status, body) =
            send(&state, "GET", "/api/v1/meals?categories=Beef&areas=Vietnamese").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["meals"][0]["id"], "2");
        assert_eq!(body["meals"][0]["area"], "Vietnamese");
        assert_eq!(body["filtersActive"], true);
    }

    #[tokio::test]
    async fn test_meals_pagination() {
        let (state, _) = test_state(StubSource::default());
        let uri = "/api/v1/meals?categories=Beef&page=2&per_page=1";
        let (_, body) = send(&state, "GET", uri).await;

        assert_eq!(body["page"], 2);
        assert_eq!(body["perPage"], 1);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["meals"][0]["id"], "2");
    }

    #[tokio::test]
    async fn test_meal_detail_and_not_found() {
        let (state, _) = test_state(StubSource::default());

        let (status, body) = send(&state, "GET", "/api/v1/meals/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Beef Wellington");
        assert_eq!(body["ingredients"][0]["measure"], "600g");

        let (status, body) = send(&state, "GET", "/api/v1/meals/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Not found: meal 999");
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_bad_gateway() {
        let (state, _) = test_state(StubSource {
            down: true,
            ..Default::default()
        });
        let (status, body) = send(&state, "GET", "/api/v1/categories").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert_eq!(body["error"]["statusCode"], 503);
    }

    #[tokio::test]
    async fn test_unreadable_upstream_maps_to_bad_gateway() {
        let (state, _) = test_state(StubSource {
            garbled: true,
            ..Default::default()
        });
        let (status, body) = send(&state, "GET", "/api/v1/meals?areas=British").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("expected value")));
        assert!(body["error"].get("statusCode").is_none());
    }

    #[tokio::test]
    async fn test_reference_lists() {
        let (state, _) = test_state(StubSource::default());

        let (_, body) = send(&state, "GET", "/api/v1/categories").await;
        assert_eq!(body["categories"][0], "Beef");

        let (_, body) = send(&state, "GET", "/api/v1/areas").await;
        assert_eq!(body["areas"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_cache_stats_and_clear() {
        let (state, source) = test_state(StubSource::default());
        send(&state, "GET", "/api/v1/categories").await;

        let (_, body) = send(&state, "GET", "/api/v1/cache/stats").await;
        assert_eq!(body["size"], 1);
        assert_eq!(body["keys"][0], "categories");

        let (status, body) = send(&state, "DELETE", "/api/v1/cache").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cleared"], 1);
        assert!(state.cache().is_empty());

        send(&state, "GET", "/api/v1/categories").await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
