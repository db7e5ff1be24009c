//! Typed configuration for the catalog connection and the report run.
//!
//! Catalog credentials come from a TOML file with one table per environment,
//! e.g.
//!
//! ```toml
//! [dev]
//! url = "http://localhost:8089"
//! username = "admin"
//! password = "admin"
//! timeout_secs = 20
//! ```
//!
//! `ASPACE_URL`, `ASPACE_USERNAME` and `ASPACE_PASSWORD` override the file's
//! values for the selected environment. Passwords are wrapped in
//! `secrecy::SecretString` to keep them out of logs.

use crate::error::{Error, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-request timeout used when a profile doesn't set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Repositories scanned by a report run unless overridden.
pub const DEFAULT_REPOSITORIES: [i64; 3] = [2, 3, 6];

/// Number of concurrent fetch workers unless overridden.
pub const DEFAULT_WORKERS: usize = 8;

/// Connection settings for one catalog environment.
#[derive(Debug)]
pub struct CatalogConfig {
    pub url: String,
    pub username: String,
    pub password: SecretString,
    pub timeout: Duration,
}

/// One environment table as it appears in the file. Every field is optional
/// so environment variables can fill the gaps.
#[derive(Debug, Default, Deserialize)]
struct Profile {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout_secs: Option<u64>,
}

impl CatalogConfig {
    /// Load the profile named `environment` from `path`, then apply
    /// `ASPACE_*` environment variable overrides.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn load(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let mut profile = parse_profile(&content, environment)?;

        if let Ok(url) = std::env::var("ASPACE_URL") {
            profile.url = Some(url);
        }
        if let Ok(username) = std::env::var("ASPACE_USERNAME") {
            profile.username = Some(username);
        }
        if let Ok(password) = std::env::var("ASPACE_PASSWORD") {
            profile.password = Some(password);
        }

        Self::from_profile(profile, environment)
    }

    /// Parse the profile named `environment` from TOML text, without
    /// consulting the process environment.
    pub fn from_toml_str(content: &str, environment: &str) -> Result<Self> {
        let profile = parse_profile(content, environment)?;
        Self::from_profile(profile, environment)
    }

    fn from_profile(profile: Profile, environment: &str) -> Result<Self> {
        let url = required(profile.url, "url", environment)?;
        let url = url.trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(Error::Config(format!(
                "profile '{environment}' has an empty url"
            )));
        }

        Ok(Self {
            url,
            username: required(profile.username, "username", environment)?,
            password: SecretString::from(required(profile.password, "password", environment)?),
            timeout: Duration::from_secs(profile.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

fn parse_profile(content: &str, environment: &str) -> Result<Profile> {
    let mut profiles: HashMap<String, Profile> =
        toml::from_str(content).map_err(|e| Error::Config(format!("bad config file: {e}")))?;
    Ok(profiles.remove(environment).unwrap_or_default())
}

fn required(value: Option<String>, field: &str, environment: &str) -> Result<String> {
    value.ok_or_else(|| {
        Error::Config(format!(
            "profile '{environment}' is missing required field '{field}'"
        ))
    })
}

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Repositories whose digital objects are enumerated, in order.
    pub repositories: Vec<i64>,
    /// Target number of concurrent fetch workers.
    pub workers: usize,
    /// TSV file the report is appended to.
    pub output_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            repositories: DEFAULT_REPOSITORIES.to_vec(),
            workers: DEFAULT_WORKERS,
            output_path: PathBuf::from("output.tsv"),
        }
    }
}

impl ReportConfig {
    /// Reject settings the run can't work with.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("worker count must be at least 1".to_string()));
        }
        Ok(())
    }
}
