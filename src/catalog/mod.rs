//! Catalog access: the two ArchivesSpace operations the report needs.
//!
//! The report pipeline only sees the [`Catalog`] trait, so tests can swap in
//! a fake and the HTTP client stays an implementation detail.

pub mod client;

pub use client::AspaceClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A digital object as returned by the catalog, reduced to the fields the
/// report reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigitalObject {
    /// The object's own URI, e.g. `/repositories/2/digital_objects/17`.
    pub uri: String,

    #[serde(default)]
    pub file_versions: Vec<FileVersion>,
}

/// One stored copy of a digital object's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileVersion {
    /// Location of the stored copy. Not guaranteed to be a valid URL.
    pub file_uri: String,

    /// Role of this copy (e.g. "master", "service").
    #[serde(default)]
    pub use_statement: String,
}

/// Read-only access to digital objects, shared by all fetch workers.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All digital object IDs in a repository.
    async fn list_digital_object_ids(&self, repository_id: i64) -> Result<Vec<i64>>;

    /// One digital object with its file versions.
    async fn get_digital_object(&self, repository_id: i64, object_id: i64)
    -> Result<DigitalObject>;
}
