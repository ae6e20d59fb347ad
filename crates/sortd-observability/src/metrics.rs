//! sortd metrics definitions.
//!
//! All metrics use OpenTelemetry conventions. Until a meter provider is
//! installed they are recorded against the global no-op provider.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// In-process request tallies by status class.
///
/// The OpenTelemetry instruments cannot be read back, so these mirror
/// `sortd.requests` for callers that need the numbers locally.
#[derive(Debug, Default)]
pub struct RequestCounts {
    total: AtomicU64,
    success: AtomicU64,
    client_error: AtomicU64,
    server_error: AtomicU64,
}

impl RequestCounts {
    fn record(&self, status: u16) {
        self.total.fetch_add(1, Ordering::Relaxed);
        let class = match status {
            200..=299 => &self.success,
            400..=499 => &self.client_error,
            500..=599 => &self.server_error,
            _ => return,
        };
        class.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Requests answered with a 2xx status.
    pub fn success(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    /// Requests answered with a 4xx status.
    pub fn client_error(&self) -> u64 {
        self.client_error.load(Ordering::Relaxed)
    }

    /// Requests answered with a 5xx status.
    pub fn server_error(&self) -> u64 {
        self.server_error.load(Ordering::Relaxed)
    }
}

/// Central metrics handle for sortd.
///
/// Clones share the same [`RequestCounts`].
#[derive(Clone)]
pub struct SortdMetrics {
    pub requests: Counter<u64>,
    pub sequences_sorted: Counter<u64>,
    pub batch_size: Histogram<u64>,
    pub sort_latency_ms: Histogram<f64>,
    counts: Arc<RequestCounts>,
}

impl SortdMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            requests: meter
                .u64_counter("sortd.requests")
                .with_description("Sort requests handled, by route and response status")
                .build(),
            sequences_sorted: meter
                .u64_counter("sortd.sequences_sorted")
                .with_description("Integer sequences sorted")
                .build(),
            batch_size: meter
                .u64_histogram("sortd.batch_size")
                .with_description("Number of sequences in a batch sort request")
                .build(),
            sort_latency_ms: meter
                .f64_histogram("sortd.sort_latency_ms")
                .with_description("Time spent sorting one request in milliseconds")
                .build(),
            counts: Arc::new(RequestCounts::default()),
        }
    }

    /// Metrics bound to the global meter provider.
    pub fn global() -> Self {
        Self::new(&global::meter("sortd"))
    }

    pub fn record_request(&self, route: &str, status: u16) {
        self.counts.record(status);
        self.requests.add(
            1,
            &[
                KeyValue::new("route", route.to_string()),
                KeyValue::new("status", i64::from(status)),
            ],
        );
    }

    pub fn request_counts(&self) -> &RequestCounts {
        &self.counts
    }

    pub fn record_sorted(&self, route: &str, sequences: usize) {
        self.sequences_sorted
            .add(sequences as u64, &[KeyValue::new("route", route.to_string())]);
    }

    pub fn record_batch_size(&self, sequences: usize) {
        self.batch_size.record(sequences as u64, &[]);
    }

    pub fn record_latency(&self, ms: f64, route: &str) {
        self.sort_latency_ms
            .record(ms, &[KeyValue::new("route", route.to_string())]);
    }
}

impl Default for SortdMetrics {
    fn default() -> Self {
        Self::global()
    }
}
