//! Fan-out of one fetch task per chunk, fan-in of their results.

use super::worker::fetch_chunk;
use super::{FileVersionRecord, WorkItem};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::telemetry::worker::start_worker_span;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{Instrument, info};

/// Spawn one fetch task per chunk. Tasks share `catalog` and nothing else.
pub fn spawn_workers(
    catalog: Arc<dyn Catalog>,
    chunks: Vec<Vec<WorkItem>>,
) -> JoinSet<Vec<FileVersionRecord>> {
    let mut workers = JoinSet::new();
    for (index, chunk) in chunks.into_iter().enumerate() {
        let worker_id = index + 1;
        let span = start_worker_span(worker_id, chunk.len());
        workers.spawn(fetch_chunk(Arc::clone(&catalog), chunk, worker_id).instrument(span));
    }
    workers
}

/// Wait for every worker and concatenate their lists in completion order.
///
/// Each list keeps its internal order. A worker that panicked or was
/// cancelled fails the whole collection.
pub async fn collect(
    mut workers: JoinSet<Vec<FileVersionRecord>>,
) -> Result<Vec<FileVersionRecord>> {
    let mut results = Vec::new();

    while let Some(joined) = workers.join_next().await {
        let records = joined.map_err(|e| Error::Other(format!("fetch worker failed: {e}")))?;
        info!(count = records.len(), "adding {} fvs to fv list", records.len());
        results.extend(records);
    }

    Ok(results)
}
