//! # HTTP Server
//!
//! Combines the route groups into one axum router and runs it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::notify::EmailConfig;

use super::admin_travel_routes::admin_travel_routes;
use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::state::AppState;
use super::user_travel_routes::user_travel_routes;

/// HTTP server for the travel-request backend
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration and the mock mailer
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default(), None)
    }

    /// Create a server with custom configuration
    ///
    /// `smtp` of `None` uses the mock email sender.
    pub fn with_config(config: HttpServerConfig, smtp: Option<EmailConfig>) -> Self {
        let state = Arc::new(AppState::new(&config, smtp));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router over an existing state
    pub fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            // Permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .merge(auth_routes(state.clone()))
            .merge(user_travel_routes(state.clone()))
            .merge(admin_travel_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        tracing::info!(%addr, "tripdesk listening");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
