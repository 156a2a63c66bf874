//! hitstore - a small self-hostable API hit-counter service
//!
//! Layered leaf-first: store -> repository -> service -> HTTP routes.

pub mod cli;
pub mod http_server;
pub mod metrics;
pub mod observability;
pub mod store;
