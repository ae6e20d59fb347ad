//! `sortd batch` — run a batch file through the concurrent engine locally.

use anyhow::{Context, Result};
use sortd_batch::{BatchConfig, BatchEngine, BatchJob, ResultOrder};
use sortd_core::{BatchRequest, BatchResponse};

pub fn run(file: &str, order: ResultOrder, workers: usize) -> Result<()> {
    let body = std::fs::read(file).with_context(|| format!("read batch file '{file}'"))?;
    let output = sort_file_contents(&body, order, workers)?;
    println!("{output}");
    Ok(())
}

fn sort_file_contents(body: &[u8], order: ResultOrder, workers: usize) -> Result<String> {
    let batch: BatchRequest = sortd_core::decode(body)?;

    let engine = BatchEngine::new(&BatchConfig { workers, order })?;
    let result = engine.sort_batch(BatchJob::from(batch).order(order));

    let encoded = sortd_core::encode(&BatchResponse::new(result.sorted))?;
    Ok(String::from_utf8(encoded)?)
}
