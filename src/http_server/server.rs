//! # HTTP Server
//!
//! Combines the health and metrics routers into one Axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;

use super::config::HttpServerConfig;
use super::metrics_routes::{metrics_routes, MetricsState};

/// HTTP server for the metrics service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server from a config and an explicitly constructed state.
    pub fn new(config: HttpServerConfig, state: Arc<MetricsState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<MetricsState>) -> Router {
        // Permissive CORS when no origins are configured
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
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
            // Health check at root level
            .route("/health", get(health_handler))
            // Metrics routes under /api
            .nest("/api", metrics_routes(state))
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

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .expect("Invalid socket address");

        Logger::info("HTTP_SERVER_STARTED", &[("addr", &addr.to_string())]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "hitstore",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricsRepository, MetricsService};
    use crate::store::MetricsStore;
    use tempfile::TempDir;

    fn temp_state() -> (TempDir, Arc<MetricsState>) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = Arc::new(MetricsStore::open(dir.path()).unwrap());
        let service = MetricsService::new(MetricsRepository::new(store));
        (dir, Arc::new(MetricsState::new(service)))
    }

    #[test]
    fn test_server_default_addr() {
        let (_dir, state) = temp_state();
        let server = HttpServer::new(HttpServerConfig::default(), state);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_custom_port() {
        let (_dir, state) = temp_state();
        let server = HttpServer::new(HttpServerConfig::with_port(9090), state);
        assert_eq!(server.socket_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_router_builds() {
        let (_dir, state) = temp_state();
        let server = HttpServer::new(HttpServerConfig::default(), state);
        let _router = server.router();
    }
}
