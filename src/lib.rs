//! # webarchives-report
//!
//! Audits where ArchivesSpace digital-object file versions are hosted.
//!
//! Lists digital objects across a set of repositories, fetches them with a
//! fixed pool of concurrent workers, and appends one
//! `(object URI, file-version host, usage statement)` line per file version
//! to a TSV report.

pub mod catalog;
pub mod config;
pub mod error;
pub mod report;
pub mod telemetry;
