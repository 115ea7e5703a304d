//! # Confluence Client
//!
//! Read-only client for the Confluence REST API (spaces, pages, CQL search,
//! attachments) and its attachment download endpoint, authenticated with a
//! static bearer token.
//!
//! ```no_run
//! use confluence_client::{ClientConfig, ConfluenceClient};
//! use secrecy::SecretString;
//!
//! # async fn example() -> confluence_client::ClientResult<()> {
//! let config = ClientConfig::new("wiki.example.com", SecretString::from("token".to_string()))?;
//! let client = ConfluenceClient::new(&config)?;
//! let spaces = client.list_spaces(None).await?;
//! println!("{spaces:#}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;

pub use client::ConfluenceClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use request::{ApiRequest, Pagination};
