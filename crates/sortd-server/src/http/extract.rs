//! Request body extractor.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body extractor that answers 400 for anything it cannot decode.
///
/// Unlike `axum::Json` it does not look at `Content-Type`, and a
/// deserialization failure is a 400 rather than a 422. A body over the
/// configured limit stays a 413.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(ApiError::from_body_rejection)?;
        let value = sortd_core::decode(&body)?;
        Ok(JsonBody(value))
    }
}
