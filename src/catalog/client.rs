//! ArchivesSpace REST client.
//!
//! Authenticates once with username/password and sends the returned session
//! token on every later request. The underlying `reqwest::Client` is pooled
//! and cheap to share, so one `AspaceClient` serves every worker.

use super::{Catalog, DigitalObject};
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Response;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Header ArchivesSpace reads the session token from.
pub const SESSION_HEADER: &str = "X-ArchivesSpace-Session";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    session: String,
}

/// Authenticated ArchivesSpace client.
pub struct AspaceClient {
    http: reqwest::Client,
    base_url: Url,
    session: SecretString,
}

impl AspaceClient {
    /// Build the HTTP client and log in.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid, the server is
    /// unreachable, or the credentials are rejected.
    pub async fn connect(config: &CatalogConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "catalog url {} cannot be used as a base",
                config.url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let login_url = endpoint(&base_url, &["users", &config.username, "login"]);
        debug!(url = %login_url, "authenticating");
        let response = http
            .post(login_url)
            .form(&[("password", config.password.expose_secret())])
            .send()
            .await?;
        let login: LoginResponse = check_status(response).await?.json().await?;

        Ok(Self {
            http,
            base_url,
            session: SecretString::from(login.session),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = endpoint(&self.base_url, segments);
        let response = self
            .http
            .get(url)
            .header(SESSION_HEADER, self.session.expose_secret())
            .query(query)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}

#[async_trait]
impl Catalog for AspaceClient {
    async fn list_digital_object_ids(&self, repository_id: i64) -> Result<Vec<i64>> {
        let repo = repository_id.to_string();
        self.get_json(
            &["repositories", &repo, "digital_objects"],
            &[("all_ids", "true")],
        )
        .await
    }

    async fn get_digital_object(
        &self,
        repository_id: i64,
        object_id: i64,
    ) -> Result<DigitalObject> {
        let repo = repository_id.to_string();
        let id = object_id.to_string();
        self.get_json(&["repositories", &repo, "digital_objects", &id], &[])
            .await
    }
}

/// Append path segments to the base URL, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Turn a non-2xx response into [`Error::Api`] carrying the body text.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(Error::Api {
        status,
        message: message.trim().to_string(),
    })
}
