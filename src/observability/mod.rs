//! Observability subsystem.
//!
//! # Responsibilities
//! - Structured logging via `tracing` (logging.rs)
//! - Request metrics with a Prometheus scrape endpoint (metrics.rs)

pub mod logging;
pub mod metrics;
