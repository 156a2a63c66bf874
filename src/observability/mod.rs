//! Observability: structured logging
//!
//! One-line JSON events with deterministic key ordering, written
//! synchronously. Logging must never affect request handling.

mod logger;

pub use logger::{Logger, Severity};
