//! # sortd-server
//!
//! HTTP transport for sortd. Exposes two routes:
//!
//! - `/sort/single` — sort one sequence inline on the request task
//! - `/sort/concurrent` — sort a batch of sequences on the [`BatchEngine`]
//!   worker pool, one task per sequence
//!
//! The process-wide pieces (route table, listener) are built from an explicit
//! [`ServerConfig`] and handed to [`serve`].
//!
//! [`BatchEngine`]: sortd_batch::BatchEngine

pub mod config;
pub mod http;
pub mod server;

pub use config::{ConfigLoadError, ServerConfig};
pub use http::{create_router, AppState};
pub use server::{bind, serve, shutdown_signal, ServeError};
