//! Shared state handed to every handler.

use std::sync::Arc;

use sortd_batch::{BatchEngine, ResultOrder};
use sortd_observability::SortdMetrics;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Worker pool for batch sorts.
    pub engine: Arc<BatchEngine>,
    /// Result order applied to every batch request.
    pub order: ResultOrder,
    pub metrics: SortdMetrics,
}

impl AppState {
    /// Creates state that uses the engine's configured result order.
    pub fn new(engine: Arc<BatchEngine>) -> Self {
        let order = engine.default_order();
        Self {
            engine,
            order,
            metrics: SortdMetrics::global(),
        }
    }

    pub fn with_order(mut self, order: ResultOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_metrics(mut self, metrics: SortdMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}
