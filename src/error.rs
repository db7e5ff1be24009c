//! Error types for webarchives-report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A failure confined to one work item or one file version.
///
/// These never abort a worker; the worker logs them and moves on.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("fetching digital object {object_id} in repository {repository_id}: {source}")]
    Fetch {
        repository_id: i64,
        object_id: i64,
        #[source]
        source: Error,
    },

    #[error("{object_uri} {source}")]
    UriParse {
        object_uri: String,
        #[source]
        source: crate::report::host::HostError,
    },
}
