//! # sortd-observability
//!
//! OpenTelemetry-based observability for sortd.
//!
//! ## Built-in metrics
//! - `sortd.requests`          — counter, tagged with route + status
//! - `sortd.sequences_sorted`  — counter, tagged with route
//! - `sortd.batch_size`        — histogram
//! - `sortd.sort_latency_ms`   — histogram, tagged with route
//!
//! ## Structured logging
//! JSON-structured or human-readable logs, with per-component levels.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{RequestCounts, SortdMetrics};
pub use tracing_setup::{init_tracing, LogConfig, LogInitError};
