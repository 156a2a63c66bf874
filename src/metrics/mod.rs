//! Metrics repository and service layers
//!
//! Thin, strictly layered glue between the HTTP surface and the store.

mod repository;
mod service;

pub use repository::MetricsRepository;
pub use service::MetricsService;
