//! # HTTP Server Module
//!
//! Axum-based HTTP surface for the metrics service.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/metrics/*` - Metrics CRUD and scalar counter lookups

pub mod config;
pub mod metrics_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use metrics_routes::{metrics_routes, MetricsState};
pub use server::HttpServer;
