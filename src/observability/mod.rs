//! Observability module for monitoring and metrics.
//!
//! Structured logging goes through `tracing`; this module adds the counters
//! the server reports on shutdown.

pub mod metrics;

pub use metrics::{MetricsTracker, Timer};
