//! Connection settings for a Confluence instance.
//!
//! A bare hostname is served over HTTPS. Hostnames carrying an explicit scheme
//! (`http://localhost:8090`) are used verbatim, which also lets tests point the
//! client at a local mock server. Any path on the host (a context path such as
//! `/wiki`) is kept as the prefix for both the REST and download bases.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Path of the JSON REST API relative to the host URL.
pub const API_PATH: &str = "rest/api/";
/// Path of the raw attachment download endpoint relative to the host URL.
pub const DOWNLOAD_PATH: &str = "download/attachments/";
/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Validated connection settings.
#[derive(Debug)]
pub struct ClientConfig {
    host_url: Url,
    token: SecretString,
    timeout: Duration,
}

impl ClientConfig {
    /// Build a config from a hostname and bearer token.
    ///
    /// Fails when either value is empty or the hostname does not form a valid
    /// base URL.
    pub fn new(hostname: &str, token: SecretString) -> ClientResult<Self> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(ClientError::config_error("Confluence hostname is empty"));
        }
        if token.expose_secret().trim().is_empty() {
            return Err(ClientError::config_error("Confluence token is empty"));
        }

        let raw = if hostname.contains("://") {
            hostname.to_string()
        } else {
            format!("https://{hostname}")
        };

        let mut host_url = Url::parse(&raw)?;
        if host_url.cannot_be_a_base() || host_url.host_str().is_none() {
            return Err(ClientError::config_error(format!(
                "'{hostname}' is not a usable Confluence host"
            )));
        }
        host_url.set_query(None);
        host_url.set_fragment(None);
        if !host_url.path().ends_with('/') {
            let path = format!("{}/", host_url.path());
            host_url.set_path(&path);
        }

        Ok(Self {
            host_url,
            token,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Host URL with a trailing slash, e.g. `https://wiki.example.com/`.
    pub fn host_url(&self) -> &Url {
        &self.host_url
    }

    /// Base of the JSON REST API, e.g. `https://wiki.example.com/rest/api/`.
    pub fn api_base(&self) -> ClientResult<Url> {
        Ok(self.host_url.join(API_PATH)?)
    }

    /// Base of the download endpoint, e.g. `https://wiki.example.com/download/attachments/`.
    pub fn download_base(&self) -> ClientResult<Url> {
        Ok(self.host_url.join(DOWNLOAD_PATH)?)
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
