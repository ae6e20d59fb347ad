//! Error types for the sortd request pipeline.

use thiserror::Error;

/// Errors that can occur while handling a sort request.
///
/// Sorting itself never fails; every variant here belongs to the decode or
/// encode boundary, or to the machinery that runs batch workers.
#[derive(Debug, Error)]
pub enum SortError {
    #[error("Invalid JSON request: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("Error encoding JSON response: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Sort worker failed: {reason}")]
    Worker { reason: String },
}

impl SortError {
    /// `true` when the caller sent something we could not use.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SortError::MalformedInput(_))
    }
}
