//! # sortd-core
//!
//! Wire types, the single-sequence sort, and the error taxonomy shared by
//! every sortd crate. The batch engine, the HTTP server, and the CLI are all
//! built on the types defined here.

pub mod codec;
pub mod error;
pub mod sequence;

pub use codec::{decode, encode};
pub use error::SortError;
pub use sequence::{BatchRequest, BatchResponse, SortRequest, SortResponse};
