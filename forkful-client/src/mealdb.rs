//! TheMealDB client implementation.
//!
//! Every endpoint answers with `{ "meals": [...] }`, where the list is `null`
//! when nothing matched. The client turns that into an empty `Vec`.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use forkful_core::constants::{MEALDB_API_ROOT, MEALDB_TEST_API_KEY, MEALDB_TIMEOUT_SECONDS};
use forkful_core::error::{ForkfulError, Result};
use forkful_core::traits::RecipeSource;
use forkful_core::types::{MealRecord, PartialMeal};

/// Client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MealDbConfig {
    /// API key path segment
    pub api_key: String,
    /// Full base URL; overrides the one derived from `api_key` when set
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self {
            api_key: MEALDB_TEST_API_KEY.into(),
            base_url: None,
            timeout_seconds: MEALDB_TIMEOUT_SECONDS,
        }
    }
}

impl MealDbConfig {
    /// Creates a config for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Points the client at a different server (mirror, test double).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Resolved base URL without a trailing slash.
    pub fn endpoint(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/{}", MEALDB_API_ROOT, self.api_key),
        }
    }

    /// Checks that the base URL parses and uses http(s).
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint();
        let parsed = url::Url::parse(&endpoint).map_err(|e| {
            ForkfulError::ConfigError(format!("Invalid base URL '{}': {}", endpoint, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ForkfulError::ConfigError(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }
        if self.base_url.is_none() && self.api_key.trim().is_empty() {
            return Err(ForkfulError::ConfigError("API key cannot be empty".into()));
        }

        Ok(())
    }
}

/// TheMealDB client.
pub struct MealDbClient {
    endpoint: String,
    http_client: reqwest::Client,
}

impl MealDbClient {
    /// Creates a client for the public API with the test key.
    pub fn new() -> Result<Self> {
        Self::with_config(MealDbConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: MealDbConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                ForkfulError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            endpoint: config.endpoint(),
            http_client,
        })
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GETs `<endpoint>/<path>?<query>` and unwraps the `meals` envelope.
    async fn fetch_meals<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.endpoint, path);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ForkfulError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown status").to_string()
            } else {
                text
            };
            return Err(ForkfulError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ForkfulError::Unknown(format!("Failed to decode {}: {}", path, e)))?;

        let meals = envelope.meals.unwrap_or_default();
        debug!(path, count = meals.len(), "Fetched from TheMealDB");
        Ok(meals)
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    #[instrument(skip(self))]
    async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>> {
        self.fetch_meals("search.php", &[("s", name)]).await
    }

    #[instrument(skip(self))]
    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>> {
        let meals: Vec<MealRecord> = self.fetch_meals("lookup.php", &[("i", id)]).await?;
        Ok(meals.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<String>> {
        let rows: Vec<CategoryRow> = self.fetch_meals("list.php", &[("c", "list")]).await?;
        Ok(rows.into_iter().map(|r| r.str_category).collect())
    }

    #[instrument(skip(self))]
    async fn list_areas(&self) -> Result<Vec<String>> {
        let rows: Vec<AreaRow> = self.fetch_meals("list.php", &[("a", "list")]).await?;
        Ok(rows.into_iter().map(|r| r.str_area).collect())
    }

    #[instrument(skip(self))]
    async fn filter_by_category(&self, category: &str) -> Result<Vec<PartialMeal>> {
        self.fetch_meals("filter.php", &[("c", category)]).await
    }

    #[instrument(skip(self))]
    async fn filter_by_area(&self, area: &str) -> Result<Vec<PartialMeal>> {
        self.fetch_meals("filter.php", &[("a", area)]).await
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Option::default")]
    meals: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRow {
    str_category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AreaRow {
    str_area: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> MealDbClient {
        MealDbClient::with_config(MealDbConfig::default().with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn test_default_endpoint() {
        let config = MealDbConfig::default();
        assert_eq!(config.endpoint(), "https://www.themealdb.com/api/json/v1/1");
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let config = MealDbConfig::new("abc").with_base_url("http://localhost:9000/api/");
        assert_eq!(config.endpoint(), "http://localhost:9000/api");
    }

    #[test]
    fn test_config_validation() {
        assert!(MealDbConfig::default().validate().is_ok());
        assert!(MealDbConfig::new("  ").validate().is_err());
        assert!(MealDbConfig::default().with_base_url("ftp://mirror").validate().is_err());
        assert!(MealDbConfig::default().with_base_url("not a url").validate().is_err());
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.php"))
            .and(query_param("s", "pasta"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meals": [
                    {
                        "idMeal": "1",
                        "strMeal": "Pasta Bake",
                        "strCategory": "Pasta",
                        "strArea": "Italian"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let meals = client_for(&server).await.search_by_name("pasta").await.unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].str_area.as_deref(), Some("Italian"));
    }

    #[tokio::test]
    async fn test_null_meals_normalized_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": null })))
            .mount(&server)
            .await;

        let meals = client_for(&server).await.search_by_name("zzz").await.unwrap();
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_missing_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lookup.php"))
            .and(query_param("i", "999"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": null })))
            .mount(&server)
            .await;

        let meal = client_for(&server).await.lookup_by_id("999").await.unwrap();
        assert!(meal.is_none());
    }

    #[tokio::test]
    async fn test_list_categories_and_areas() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list.php"))
            .and(query_param("c", "list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meals": [{ "strCategory": "Beef" }, { "strCategory": "Chicken" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/list.php"))
            .and(query_param("a", "list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meals": [{ "strArea": "Thai" }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.list_categories().await.unwrap(), vec!["Beef", "Chicken"]);
        assert_eq!(client.list_areas().await.unwrap(), vec!["Thai"]);
    }

    #[tokio::test]
    async fn test_filter_by_category_partial_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/filter.php"))
            .and(query_param("c", "Seafood"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meals": [{
                    "idMeal": "52959",
                    "strMeal": "Baked salmon",
                    "strMealThumb": "https://img/s.jpg"
                }]
            })))
            .mount(&server)
            .await;

        let meals = client_for(&server).await.filter_by_category("Seafood").await.unwrap();
        assert_eq!(meals, vec![PartialMeal::new("52959", "Baked salmon", "https://img/s.jpg")]);
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/filter.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).await.filter_by_area("Thai").await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
        assert!(err.message().contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.search_by_name("x").await.unwrap_err();
        assert!(matches!(err, ForkfulError::Unknown(_)));
        assert_eq!(err.status_code(), None);
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_network_failure() {
        let config = MealDbConfig::default()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(2);
        let client = MealDbClient::with_config(config).unwrap();

        let err = client.list_areas().await.unwrap_err();
        assert!(matches!(err, ForkfulError::NetworkFailure(_)));
        assert!(err.is_recoverable());
    }
}
