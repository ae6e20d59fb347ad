//! HTTP route definitions and handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, MatchedPath, Request, State},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use sortd_batch::BatchJob;
use sortd_core::{BatchRequest, BatchResponse, SortError, SortRequest};

use super::error::ApiError;
use super::extract::JsonBody;
use super::state::AppState;

pub const SINGLE_ROUTE: &str = "/sort/single";
pub const CONCURRENT_ROUTE: &str = "/sort/concurrent";

/// Creates the HTTP router for both sort routes.
///
/// Both routes accept any method. `body_limit` caps request bodies; larger
/// bodies are answered with 413.
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    let shared_state = Arc::new(state);
    Router::new()
        .route(SINGLE_ROUTE, any(sort_single))
        .route(CONCURRENT_ROUTE, any(sort_concurrent))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&shared_state),
            record_request,
        ))
        .with_state(shared_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

/// Sorts one sequence inline on the request task.
async fn sort_single(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<SortRequest>,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    debug!(len = request.len(), "sorting single sequence");

    let response = request.into_sorted();

    state
        .metrics
        .record_latency(start.elapsed().as_secs_f64() * 1_000.0, SINGLE_ROUTE);
    state.metrics.record_sorted(SINGLE_ROUTE, 1);

    json_response(&response)
}

/// Sorts every sequence of a batch concurrently on the engine's worker pool.
///
/// The engine blocks until the whole batch has been collected, so it runs on
/// a blocking thread rather than on the async runtime.
async fn sort_concurrent(
    State(state): State<Arc<AppState>>,
    JsonBody(batch): JsonBody<BatchRequest>,
) -> Result<Response, ApiError> {
    let sequences = batch.len();
    debug!(
        sequences,
        numbers = batch.total_numbers(),
        order = %state.order,
        "dispatching batch"
    );
    state.metrics.record_batch_size(sequences);

    let engine = Arc::clone(&state.engine);
    let job = BatchJob::from(batch).order(state.order);
    let result = tokio::task::spawn_blocking(move || engine.sort_batch(job))
        .await
        .map_err(|e| {
            error!("batch worker failed: {e}");
            SortError::Worker {
                reason: e.to_string(),
            }
        })?;

    state
        .metrics
        .record_latency(result.elapsed.as_secs_f64() * 1_000.0, CONCURRENT_ROUTE);
    state.metrics.record_sorted(CONCURRENT_ROUTE, result.total_input);

    json_response(&BatchResponse::new(result.sorted))
}

/// Serialize `value` as the JSON response body. Serialization failures are
/// 500s, reported only after all sorting work is done.
fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = sortd_core::encode(value).map_err(|e| {
        error!("{e}");
        e
    })?;
    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response())
}

/// Counts every routed request by route and final status, including
/// requests rejected while decoding.
async fn record_request(
    State(state): State<Arc<AppState>>,
    matched: MatchedPath,
    req: Request,
    next: Next,
) -> Response {
    let route = matched.as_str().to_owned();
    let response = next.run(req).await;
    state
        .metrics
        .record_request(&route, response.status().as_u16());
    response
}
