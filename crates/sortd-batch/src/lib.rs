//! # sortd-batch
//!
//! Fan-out/fan-in batch sort engine.
//!
//! ## Features
//! - One task per sequence on a dedicated Rayon worker pool
//! - Completion channel sized to the batch, so no worker blocks on publish
//! - Scope-based join barrier: the channel closes only after the last task
//! - Two result orders: `Completion` (race-determined) and `Input`
//!
//! ## Usage
//! ```no_run
//! use sortd_batch::{BatchConfig, BatchEngine, BatchJob};
//! use sortd_core::SortRequest;
//!
//! let engine = BatchEngine::new(&BatchConfig::default()).unwrap();
//! let job = BatchJob::new(vec![SortRequest::new(vec![5, 4]), SortRequest::new(vec![2, 1, 3])]);
//! let result = engine.sort_batch(job);
//! assert_eq!(result.sorted.len(), 2);
//! ```

pub mod engine;
pub mod request;

pub use engine::{BatchConfig, BatchEngine, BatchError, BatchResult};
pub use request::{BatchJob, ResultOrder};
