//! `BatchEngine`: fans a batch out to one task per sequence and fans the
//! sorted results back in.

use crate::request::{BatchJob, ResultOrder};
use serde::{Deserialize, Serialize};
use sortd_core::SortResponse;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Worker pool settings for a [`BatchEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of Rayon workers (0 = use all available CPUs)
    #[serde(default)]
    pub workers: usize,
    /// Result order for jobs that do not pick one
    #[serde(default)]
    pub order: ResultOrder,
}

/// Errors from building a batch engine.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Result of a batch sort job.
#[derive(Debug)]
pub struct BatchResult {
    /// One sorted sequence per input sequence, ordered per the job's policy
    pub sorted: Vec<SortResponse>,
    /// Number of sequences in the job
    pub total_input: usize,
    /// Wall time from dispatch to the end of the drain
    pub elapsed: Duration,
}

/// Batch sort engine backed by a dedicated Rayon pool.
pub struct BatchEngine {
    pool: rayon::ThreadPool,
    order: ResultOrder,
}

impl BatchEngine {
    pub fn new(config: &BatchConfig) -> Result<Self, BatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("sortd-worker-{i}"))
            .build()?;
        info!(
            "BatchEngine: started {} workers (order={})",
            pool.current_num_threads(),
            config.order
        );
        Ok(Self {
            pool,
            order: config.order,
        })
    }

    /// Number of threads in the worker pool.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// The configured default result order.
    pub fn default_order(&self) -> ResultOrder {
        self.order
    }

    /// Sort every sequence of `job` concurrently and collect the results.
    ///
    /// Blocks the calling thread until the whole batch is done. Async callers
    /// should run this on a blocking thread.
    pub fn sort_batch(&self, job: BatchJob) -> BatchResult {
        let start = Instant::now();
        let total_input = job.sequences.len();
        let order = job.order.unwrap_or(self.order);

        if total_input == 0 {
            debug!("BatchEngine: empty batch, nothing dispatched");
            return BatchResult {
                sorted: Vec::new(),
                total_input,
                elapsed: start.elapsed(),
            };
        }

        debug!(
            "BatchEngine: dispatching {} sequences (order={})",
            total_input, order
        );

        // Capacity matches the batch so a send never blocks.
        let (tx, rx) = mpsc::sync_channel::<(usize, SortResponse)>(total_input);

        // The scope is the join barrier: it returns only after every
        // spawned task has published its result.
        self.pool.scope(|scope| {
            for (index, request) in job.sequences.into_iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let sorted = request.into_sorted();
                    // rx outlives the scope, so the send cannot fail
                    let _ = tx.send((index, sorted));
                });
            }
        });

        // Last sender gone: the channel is closed and the drain below ends
        // once the buffered results are consumed.
        drop(tx);

        let sorted: Vec<SortResponse> = match order {
            ResultOrder::Completion => rx.into_iter().map(|(_, sorted)| sorted).collect(),
            ResultOrder::Input => {
                let mut slots: Vec<Option<SortResponse>> = vec![None; total_input];
                for (index, sorted) in rx {
                    slots[index] = Some(sorted);
                }
                slots.into_iter().flatten().collect::<Vec<_>>()
            }
        };
        debug_assert_eq!(sorted.len(), total_input);

        let elapsed = start.elapsed();
        info!(
            "BatchEngine: complete, {} sequences sorted in {:.3}ms",
            total_input,
            elapsed.as_secs_f64() * 1_000.0
        );

        BatchResult {
            sorted,
            total_input,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortd_core::SortRequest;

    fn engine(workers: usize) -> BatchEngine {
        BatchEngine::new(&BatchConfig {
            workers,
            order: ResultOrder::Completion,
        })
        .unwrap()
    }

    fn input_order_engine(workers: usize) -> BatchEngine {
        BatchEngine::new(&BatchConfig {
            workers,
            order: ResultOrder::Input,
        })
        .unwrap()
    }

    fn sorted_key(mut v: Vec<Vec<i64>>) -> Vec<Vec<i64>> {
        v.sort();
        v
    }

    fn make_job(n: usize) -> BatchJob {
        let sequences = (0..n)
            .map(|i| {
                let len = (i % 17) as i64;
                SortRequest::new((0..len).map(|j| (j * 31 + i as i64 * 7) % 23 - 11).collect())
            })
            .collect();
        BatchJob::new(sequences)
    }

    #[test]
    fn empty_batch_dispatches_nothing() {
        let result = engine(2).sort_batch(BatchJob::new(vec![]));
        assert!(result.sorted.is_empty());
        assert_eq!(result.total_input, 0);
    }

    #[test]
    fn example_batch_contains_both_sequences() {
        let job = BatchJob::new(vec![
            SortRequest::new(vec![5, 4]),
            SortRequest::new(vec![2, 1, 3]),
        ]);
        let result = engine(4).sort_batch(job);
        let got: Vec<Vec<i64>> = result.sorted.into_iter().map(|r| r.sorted_numbers).collect();
        assert_eq!(sorted_key(got), vec![vec![1, 2, 3], vec![4, 5]]);
    }

    #[test]
    fn every_sequence_is_sorted_and_none_lost() {
        let job = make_job(1_000);
        let expected: Vec<Vec<i64>> = job
            .sequences
            .iter()
            .map(|r| r.clone().into_sorted().sorted_numbers)
            .collect();

        let result = engine(8).sort_batch(job);
        assert_eq!(result.total_input, 1_000);
        assert_eq!(result.sorted.len(), 1_000);
        assert!(result.sorted.iter().all(SortResponse::is_sorted));

        let got: Vec<Vec<i64>> = result.sorted.into_iter().map(|r| r.sorted_numbers).collect();
        assert_eq!(sorted_key(got), sorted_key(expected));
    }

    #[test]
    fn input_order_matches_request_positions() {
        let job = make_job(300).order(ResultOrder::Input);
        let expected: Vec<SortResponse> =
            job.sequences.iter().map(|r| r.clone().into_sorted()).collect();

        let result = engine(8).sort_batch(job);
        assert_eq!(result.sorted, expected);
    }

    #[test]
    fn configured_order_applies_when_job_sets_none() {
        let job = make_job(300);
        assert_eq!(job.order, None);
        let expected: Vec<SortResponse> =
            job.sequences.iter().map(|r| r.clone().into_sorted()).collect();

        let result = input_order_engine(8).sort_batch(job);
        assert_eq!(result.sorted, expected);
    }

    #[test]
    fn single_worker_pool_still_completes() {
        let result = engine(1).sort_batch(make_job(64));
        assert_eq!(result.sorted.len(), 64);
    }

    #[test]
    fn empty_and_singleton_sequences_survive() {
        let job = BatchJob::new(vec![
            SortRequest::new(vec![]),
            SortRequest::new(vec![7]),
            SortRequest::new(vec![]),
        ])
        .order(ResultOrder::Input);
        let result = engine(2).sort_batch(job);
        let got: Vec<Vec<i64>> = result.sorted.into_iter().map(|r| r.sorted_numbers).collect();
        assert_eq!(got, vec![vec![], vec![7], vec![]]);
    }

    #[test]
    fn reports_configured_workers() {
        let engine = engine(3);
        assert_eq!(engine.workers(), 3);
        assert_eq!(engine.default_order(), ResultOrder::Completion);
    }
}
