//! HTTP layer: router, handlers, extractors, and error mapping.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use extract::JsonBody;
pub use routes::{create_router, CONCURRENT_ROUTE, SINGLE_ROUTE};
pub use state::AppState;
