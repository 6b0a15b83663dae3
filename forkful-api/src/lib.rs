//! # Forkful API Server
//!
//! REST API over the cached meal resolver.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and cache summary
//! - `GET /api/v1/meals` - Filtered, paginated meal summaries
//! - `GET /api/v1/meals/:id` - Full meal with ingredients
//! - `GET /api/v1/categories` - Category names
//! - `GET /api/v1/areas` - Area names
//! - `GET /api/v1/cache/stats` - Cache size and keys
//! - `DELETE /api/v1/cache` - Drop every cache entry
//!
//! ## Example
//!
//! ```rust,ignore
//! use forkful_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;
pub use dto::{MealsQuery, MealsResponse, Page};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use forkful_core::error::Result;

/// API server for Forkful.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    ///
    /// Must be called inside a tokio runtime when the sweeper is enabled.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            upstream = %self.state.config.mealdb().endpoint(),
            "Forkful API server listening on {}",
            addr
        );

        axum::serve(listener, self.router()).await
    }
}
