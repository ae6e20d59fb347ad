//! API error type and its mapping onto HTTP responses.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sortd_core::SortError;

/// Error body returned by every route: `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400: the body could not be decoded into the expected shape.
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_json", message)
    }

    /// 413: the body exceeded the configured limit.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", message)
    }

    /// 500: the response could not be serialized.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "encoding_failed", message)
    }

    /// 500: anything else on our side.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    /// Map a failure to read the request body. Body-limit errors keep their
    /// 413; everything else is treated as a bad request.
    pub fn from_body_rejection(rejection: BytesRejection) -> Self {
        let message = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::payload_too_large(message)
        } else {
            Self::invalid_json(message)
        }
    }
}

impl From<SortError> for ApiError {
    fn from(err: SortError) -> Self {
        match err {
            SortError::MalformedInput(_) => ApiError::invalid_json(err.to_string()),
            SortError::Encoding(_) => ApiError::encoding_failed(err.to_string()),
            SortError::Worker { .. } => ApiError::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_errors_map_to_statuses() {
        let bad = serde_json::from_str::<Vec<i64>>("[").unwrap_err();
        let err = ApiError::from(SortError::MalformedInput(bad));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "invalid_json");
        assert!(err.message.starts_with("Invalid JSON request"));

        let enc = serde_json::from_str::<Vec<i64>>("{").unwrap_err();
        let err = ApiError::from(SortError::Encoding(enc));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "encoding_failed");

        let err = ApiError::from(SortError::Worker {
            reason: "joined a cancelled task".into(),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "internal_error");
    }

    #[test]
    fn error_body_omits_status() {
        let json = serde_json::to_value(ApiError::invalid_json("nope")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "invalid_json", "message": "nope" })
        );
    }
}
