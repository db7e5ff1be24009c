//! Metric instrument factories for webarchives-report.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without an OTLP endpoint the global provider is a no-op.

use opentelemetry::metrics::{Counter, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("webarchives-report")
}

/// Counter: digital objects fetched successfully.
pub fn objects_fetched() -> Counter<u64> {
    meter()
        .u64_counter("webarchives.objects.fetched")
        .with_description("Digital objects fetched from the catalog")
        .build()
}

/// Counter: digital object fetches that failed and were skipped.
pub fn fetch_errors() -> Counter<u64> {
    meter()
        .u64_counter("webarchives.objects.fetch_errors")
        .with_description("Digital object fetches that failed")
        .build()
}

/// Counter: file versions skipped because their URI didn't parse.
pub fn uri_parse_errors() -> Counter<u64> {
    meter()
        .u64_counter("webarchives.file_versions.uri_parse_errors")
        .with_description("File versions with an unparseable file URI")
        .build()
}

/// Counter: report lines written.
pub fn records_written() -> Counter<u64> {
    meter()
        .u64_counter("webarchives.records.written")
        .with_description("Report lines written to the output file")
        .build()
}
