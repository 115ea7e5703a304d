//! Authenticated HTTP client for a Confluence instance.
//!
//! One client value is built at startup and shared; it owns the two bases
//! (REST API and attachment download) and attaches the bearer credential to
//! every request through the default headers. Every operation issues exactly
//! one GET and propagates failures to the caller.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{ApiRequest, Pagination};

/// Read-only Confluence client.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    http: reqwest::Client,
    host_url: Url,
    api_base: Url,
    download_base: Url,
}

impl ConfluenceClient {
    /// Build the client from validated settings.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut auth = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.token().expose_secret()
        ))
        .map_err(|_| {
            ClientError::config_error("Confluence token contains characters not valid in a header")
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .user_agent(concat!("confluence-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            host_url: config.host_url().clone(),
            api_base: config.api_base()?,
            download_base: config.download_base()?,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn download_base(&self) -> &Url {
        &self.download_base
    }

    /// List spaces visible to the credential.
    pub async fn list_spaces(&self, pagination: Option<Pagination>) -> ClientResult<Value> {
        self.execute(&ApiRequest::list_spaces(pagination)).await
    }

    /// Fetch one space.
    pub async fn space_details(
        &self,
        space_key: &str,
        expand: Option<&str>,
    ) -> ClientResult<Value> {
        self.execute(&ApiRequest::space_details(space_key, expand)).await
    }

    /// List the pages of a space.
    pub async fn space_pages(
        &self,
        space_key: &str,
        expand: Option<&str>,
        pagination: Option<Pagination>,
    ) -> ClientResult<Value> {
        self.execute(&ApiRequest::space_pages(space_key, expand, pagination)).await
    }

    /// Fetch one page, with its direct children inlined by default.
    pub async fn page_details(&self, page_id: &str, expand: Option<&str>) -> ClientResult<Value> {
        self.execute(&ApiRequest::page_details(page_id, expand)).await
    }

    /// Run a CQL query.
    pub async fn search(
        &self,
        cql: &str,
        expand: Option<&str>,
        pagination: Option<Pagination>,
    ) -> ClientResult<Value> {
        self.execute(&ApiRequest::search(cql, expand, pagination)).await
    }

    /// List the attachments of a page.
    pub async fn page_attachments(&self, page_id: &str) -> ClientResult<Value> {
        self.execute(&ApiRequest::page_attachments(page_id)).await
    }

    /// List the children of a page.
    pub async fn page_children(
        &self,
        page_id: &str,
        expand: Option<&str>,
    ) -> ClientResult<Value> {
        self.execute(&ApiRequest::page_children(page_id, expand)).await
    }

    /// Issue a shaped REST request and decode the JSON body as-is.
    pub async fn execute(&self, request: &ApiRequest) -> ClientResult<Value> {
        let url = request.resolve(&self.api_base)?;
        let response = self
            .send(self.http.get(url).header(ACCEPT, "application/json"))
            .await?;
        Ok(response.json::<Value>().await?)
    }

    /// Resolve a caller-supplied download URL.
    ///
    /// Absolute URLs must point at the configured host, so the credential is
    /// never sent elsewhere. Paths starting with `/` resolve against the host
    /// URL, keeping any context path such as `/wiki`; other relative paths
    /// resolve under the download base.
    pub fn resolve_download_url(&self, download_url: &str) -> ClientResult<Url> {
        let download_url = download_url.trim();
        if download_url.is_empty() {
            return Err(ClientError::invalid_input("download URL is empty"));
        }

        let url = match download_url.strip_prefix('/') {
            // `//host/...` is scheme-relative and left to the origin check
            Some(rooted) if !rooted.starts_with('/') => self.host_url.join(rooted)?,
            _ => self.download_base.join(download_url)?,
        };
        if url.origin() != self.host_url.origin() {
            return Err(ClientError::invalid_input(format!(
                "download URL host '{}' does not match the configured Confluence host",
                url.host_str().unwrap_or_default()
            )));
        }
        Ok(url)
    }

    /// Download raw bytes (attachments, embedded images).
    pub async fn download(&self, download_url: &str) -> ClientResult<Bytes> {
        let url = self.resolve_download_url(download_url)?;
        let response = self.send(self.http.get(url)).await?;
        Ok(response.bytes().await?)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ClientResult<reqwest::Response> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "Confluence request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Confluence request failed");
            return Err(ClientError::api_error(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown status"),
            ));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn client() -> ConfluenceClient {
        let config = ClientConfig::new(
            "wiki.example.com",
            SecretString::from("token".to_string()),
        )
        .unwrap();
        ConfluenceClient::new(&config).unwrap()
    }

    #[test]
    fn test_bases() {
        let client = client();
        assert_eq!(client.api_base().as_str(), "https://wiki.example.com/rest/api/");
        assert_eq!(
            client.download_base().as_str(),
            "https://wiki.example.com/download/attachments/"
        );
    }

    #[test]
    fn test_relative_download_url_resolves_under_download_base() {
        let url = client()
            .resolve_download_url("123/diagram.png?version=2")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://wiki.example.com/download/attachments/123/diagram.png?version=2"
        );
    }

    #[test]
    fn test_rooted_download_url_resolves_against_host() {
        let url = client()
            .resolve_download_url("/download/attachments/123/diagram.png?version=2&api=v2")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://wiki.example.com/download/attachments/123/diagram.png?version=2&api=v2"
        );
    }

    #[test]
    fn test_rooted_download_url_keeps_context_path() {
        let config = ClientConfig::new(
            "https://wiki.example.com/wiki",
            SecretString::from("token".to_string()),
        )
        .unwrap();
        let client = ConfluenceClient::new(&config).unwrap();

        let url = client
            .resolve_download_url("/download/attachments/1/a.png?version=1&api=v2")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://wiki.example.com/wiki/download/attachments/1/a.png?version=1&api=v2"
        );

        let url = client.resolve_download_url("1/a.png").unwrap();
        assert_eq!(url.as_str(), "https://wiki.example.com/wiki/download/attachments/1/a.png");
    }

    #[test]
    fn test_absolute_download_url_on_same_host() {
        let url = client()
            .resolve_download_url("https://wiki.example.com/download/attachments/9/a.pdf")
            .unwrap();
        assert_eq!(url.path(), "/download/attachments/9/a.pdf");
    }

    #[test]
    fn test_absolute_download_url_on_foreign_host_rejected() {
        let err = client()
            .resolve_download_url("https://attacker.example.net/steal.png")
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn test_scheme_relative_download_url_rejected() {
        let err = client()
            .resolve_download_url("//attacker.example.net/steal.png")
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_download_url_rejected() {
        let err = client().resolve_download_url("  ").unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn test_token_with_newline_is_config_error() {
        let config = ClientConfig::new(
            "wiki.example.com",
            SecretString::from("bad\ntoken".to_string()),
        )
        .unwrap();
        let err = ConfluenceClient::new(&config).unwrap_err();
        assert!(matches!(err, ClientError::ConfigError(_)));
    }
}
