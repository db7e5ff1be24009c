//! Per-chunk fetch loop.
//!
//! A worker walks its chunk in order, fetches each digital object, and turns
//! every parseable file version into a [`FileVersionRecord`]. Failures are
//! logged and skipped; nothing here aborts the run.

use super::host::file_version_host;
use super::{FileVersionRecord, WorkItem};
use crate::catalog::{Catalog, DigitalObject};
use crate::error::ItemError;
use crate::telemetry::metrics;
use crate::telemetry::worker::record_worker_output;
use std::io::Write as _;
use std::sync::Arc;
use tracing::{Span, error};

/// A progress marker goes to stdout every this many items.
pub const PROGRESS_INTERVAL: usize = 100;

/// Fetch every object in `chunk` and return the records found, in chunk
/// order. `worker_id` is 1-based and only used for display.
pub async fn fetch_chunk(
    catalog: Arc<dyn Catalog>,
    chunk: Vec<WorkItem>,
    worker_id: usize,
) -> Vec<FileVersionRecord> {
    println!("starting worker {worker_id}");
    let mut records = Vec::new();

    for (index, item) in chunk.iter().enumerate() {
        if index % PROGRESS_INTERVAL == 0 {
            print!("*");
            let _ = std::io::stdout().flush();
        }

        match catalog
            .get_digital_object(item.repository_id, item.object_id)
            .await
        {
            Ok(object) => {
                metrics::objects_fetched().add(1, &[]);
                records.extend(extract_records(&object));
            }
            Err(source) => {
                metrics::fetch_errors().add(1, &[]);
                let err = ItemError::Fetch {
                    repository_id: item.repository_id,
                    object_id: item.object_id,
                    source,
                };
                error!(worker = worker_id, "{err}");
            }
        }
    }

    record_worker_output(&Span::current(), records.len());
    records
}

/// Build one record per file version whose URI parses. Unparseable URIs are
/// logged and skipped without affecting their siblings.
pub fn extract_records(object: &DigitalObject) -> Vec<FileVersionRecord> {
    let mut records = Vec::with_capacity(object.file_versions.len());

    for version in &object.file_versions {
        match file_version_host(&version.file_uri) {
            Ok(host) => records.push(FileVersionRecord {
                object_uri: object.uri.clone(),
                file_version_host: host,
                usage_statement: version.use_statement.clone(),
            }),
            Err(source) => {
                metrics::uri_parse_errors().add(1, &[]);
                let err = ItemError::UriParse {
                    object_uri: object.uri.clone(),
                    source,
                };
                error!("{err}");
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FileVersion;

    fn version(file_uri: &str, use_statement: &str) -> FileVersion {
        FileVersion {
            file_uri: file_uri.to_string(),
            use_statement: use_statement.to_string(),
        }
    }

    #[test]
    fn object_without_file_versions_yields_nothing() {
        let object = DigitalObject {
            uri: "/repositories/2/digital_objects/1".to_string(),
            file_versions: Vec::new(),
        };
        assert!(extract_records(&object).is_empty());
    }

    #[test]
    fn bad_file_uri_skips_only_that_version() {
        let object = DigitalObject {
            uri: "/repositories/3/digital_objects/9".to_string(),
            file_versions: vec![
                version("https://webarchives.cdlib.org/a", "master"),
                version("http://[broken/", "service"),
                version(" https://archive-it.org/b", " reference "),
            ],
        };

        let records = extract_records(&object);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file_version_host, "webarchives.cdlib.org");
        assert_eq!(records[0].usage_statement, "master");
        assert_eq!(records[1].file_version_host, "archive-it.org");
        assert_eq!(records[1].usage_statement, " reference ");
        assert!(records.iter().all(|r| r.object_uri == object.uri));
    }
}
