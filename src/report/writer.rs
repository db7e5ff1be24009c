//! Tab-separated report output.
//!
//! One line per record: `object_uri<TAB>file_version_host<TAB>usage_statement`.
//! Field values are written as-is; a tab or newline inside a value breaks the
//! line structure.

use super::FileVersionRecord;
use crate::error::Result;
use crate::telemetry::metrics;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt as _, BufWriter};

/// Render one record as a report line, newline included.
pub fn format_line(record: &FileVersionRecord) -> String {
    format!(
        "{}\t{}\t{}\n",
        record.object_uri, record.file_version_host, record.usage_statement
    )
}

/// Append `records` to the file at `path`, creating it if needed.
///
/// Existing content is kept. Every line is flushed as soon as it is
/// written. Returns the number of lines written.
pub async fn write_report(path: &Path, records: &[FileVersionRecord]) -> Result<usize> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    let mut writer = BufWriter::new(file);

    for record in records {
        writer.write_all(format_line(record).as_bytes()).await?;
        writer.flush().await?;
    }
    metrics::records_written().add(records.len() as u64, &[]);

    Ok(records.len())
}
