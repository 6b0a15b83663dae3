//! App state: resolver, shared cache, sweeper, config.

use std::sync::Arc;
use std::time::Instant;

use forkful_cache::{CacheConfig, SweeperHandle, TtlCache};
use forkful_client::{MealDbClient, MealDbConfig};
use forkful_core::constants::{MEALDB_TEST_API_KEY, MEALDB_TIMEOUT_SECONDS, SWEEP_INTERVAL_SECONDS};
use forkful_core::error::Result;
use forkful_core::traits::RecipeSource;
use forkful_resolver::{MealResolver, ResolverConfig};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// TheMealDB API key
    pub api_key: String,
    /// Upstream base URL override
    pub base_url: Option<String>,
    /// Upstream request timeout in seconds
    pub timeout_seconds: u64,
    /// Seconds between cache sweeps; 0 disables the sweeper
    pub sweep_interval_seconds: u64,
    /// Run the background sweeper
    pub enable_sweep: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: MEALDB_TEST_API_KEY.into(),
            base_url: None,
            timeout_seconds: MEALDB_TIMEOUT_SECONDS,
            sweep_interval_seconds: SWEEP_INTERVAL_SECONDS,
            enable_sweep: true,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from the environment, loading `.env` first.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            api_key: std::env::var("MEALDB_API_KEY").unwrap_or(defaults.api_key),
            base_url: std::env::var("MEALDB_BASE_URL").ok().filter(|v| !v.trim().is_empty()),
            timeout_seconds: env_u64("MEALDB_TIMEOUT_SECS").unwrap_or(defaults.timeout_seconds),
            sweep_interval_seconds: env_u64("CACHE_SWEEP_SECS")
                .unwrap_or(defaults.sweep_interval_seconds),
            enable_sweep: std::env::var("ENABLE_CACHE_SWEEP")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Whether a background sweeper should run.
    pub fn sweep_enabled(&self) -> bool {
        self.enable_sweep && self.sweep_interval_seconds > 0
    }

    /// Upstream client configuration derived from this config.
    pub fn mealdb(&self) -> MealDbConfig {
        let mut config = MealDbConfig::new(&self.api_key).with_timeout(self.timeout_seconds);
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        config
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Shared handler state.
pub struct AppState {
    /// Configuration the state was built from
    pub config: ApiConfig,
    /// Cached meal resolver
    pub resolver: MealResolver,
    started_at: Instant,
    sweeper: Option<SweeperHandle>,
}

impl AppState {
    /// Builds state backed by TheMealDB.
    ///
    /// Spawns the sweeper when enabled, so it must run inside a tokio runtime.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = MealDbClient::with_config(config.mealdb())?;
        Self::with_source(config, Arc::new(client))
    }

    /// Builds state over any recipe source.
    pub fn with_source(config: ApiConfig, source: Arc<dyn RecipeSource>) -> Result<Self> {
        let cache = TtlCache::with_config(CacheConfig {
            sweep_interval_seconds: config.sweep_interval_seconds,
            ..Default::default()
        });
        let sweeper = config.sweep_enabled().then(|| cache.spawn_default_sweeper());
        let resolver = MealResolver::with_config(source, cache, ResolverConfig::default())?;

        Ok(Self {
            config,
            resolver,
            started_at: Instant::now(),
            sweeper,
        })
    }

    /// The shared cache.
    pub fn cache(&self) -> &TtlCache {
        self.resolver.cache()
    }

    /// Seconds since the state was built.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Whether the background sweeper is alive.
    pub fn sweeper_running(&self) -> bool {
        self.sweeper.as_ref().is_some_and(SweeperHandle::is_running)
    }

    /// Stops the sweeper and waits for it to exit.
    pub async fn shutdown(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.shutdown().await;
        }
    }
}
