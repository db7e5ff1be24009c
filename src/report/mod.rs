//! The report run: enumerate, partition, fetch in parallel, merge, write.
//!
//! Data flows one way through the submodules:
//! [`partition`] splits the work list, [`collect`] runs one [`worker`] per
//! chunk and merges their output, and [`writer`] appends it to the TSV file.

pub mod collect;
pub mod host;
pub mod partition;
pub mod worker;
pub mod writer;

pub use collect::{collect, spawn_workers};
pub use partition::partition;
pub use host::file_version_host;
pub use worker::{extract_records, fetch_chunk};
pub use writer::{format_line, write_report};

use crate::catalog::Catalog;
use crate::config::ReportConfig;
use crate::error::Result;
use std::sync::Arc;
use tracing::info;

/// One digital object to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub object_id: i64,
    pub repository_id: i64,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileVersionRecord {
    pub object_uri: String,
    pub file_version_host: String,
    pub usage_statement: String,
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub work_items: usize,
    pub chunks: usize,
    pub records: usize,
}

/// List every digital object ID in `repositories`, in repository order.
///
/// # Errors
/// Any listing failure is returned; the run can't proceed without the full
/// work list.
pub async fn enumerate_work_items(
    catalog: &dyn Catalog,
    repositories: &[i64],
) -> Result<Vec<WorkItem>> {
    let mut items = Vec::new();
    for &repository_id in repositories {
        let ids = catalog.list_digital_object_ids(repository_id).await?;
        info!(repository_id, count = ids.len(), "listed digital objects");
        items.extend(ids.into_iter().map(|object_id| WorkItem {
            object_id,
            repository_id,
        }));
    }
    Ok(items)
}

/// Run the whole report against `catalog` and append it to
/// `config.output_path`.
///
/// Per-object failures are logged and skipped. Errors returned here are
/// startup-phase failures (bad config, listing failure) or output I/O
/// errors; nothing is written when enumeration fails.
pub async fn run_report(
    catalog: Arc<dyn Catalog>,
    config: &ReportConfig,
) -> Result<ReportSummary> {
    config.validate()?;

    let items = enumerate_work_items(catalog.as_ref(), &config.repositories).await?;
    let chunks = partition(&items, config.workers);
    let chunk_count = chunks.len();
    info!(
        work_items = items.len(),
        chunks = chunk_count,
        "partitioned digital objects"
    );

    let records = collect(spawn_workers(catalog, chunks)).await?;
    let written = write_report(&config.output_path, &records).await?;
    info!(
        records = written,
        output = %config.output_path.display(),
        "report written"
    );

    Ok(ReportSummary {
        work_items: items.len(),
        chunks: chunk_count,
        records: written,
    })
}
