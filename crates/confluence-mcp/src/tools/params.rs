//! Parameter structs for all MCP tools.
//!
//! Wire names are camelCase (`spaceKey`, `pageId`, `downloadUrl`).

use confluence_client::Pagination;
use schemars::JsonSchema;
use serde::Deserialize;

// ── shared ──

/// Offset window passed through to Confluence.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct PaginationParam {
    /// Index of the first result.
    #[schemars(description = "Index of the first result (0-based)")]
    pub start: u32,
    /// Maximum number of results.
    #[schemars(description = "Maximum number of results to return")]
    pub limit: u32,
}

impl From<PaginationParam> for Pagination {
    fn from(p: PaginationParam) -> Self {
        Pagination {
            start: p.start,
            limit: p.limit,
        }
    }
}

// ── get-confluence-spaces ──

/// Parameters for the `get-confluence-spaces` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SpacesListParams {
    #[schemars(description = "Optional result window {start, limit}")]
    pub pagination: Option<PaginationParam>,
}

// ── get-confluence-space-details ──

/// Parameters for the `get-confluence-space-details` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDetailsParams {
    #[schemars(description = "Space key (e.g., 'DOCS')")]
    pub space_key: String,
    #[schemars(description = "Comma-separated expansions (defaults to 'homepage.body.view')")]
    pub expand: Option<String>,
}

// ── get-confluence-space-pages ──

/// Parameters for the `get-confluence-space-pages` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpacePagesParams {
    #[schemars(description = "Space key (e.g., 'DOCS')")]
    pub space_key: String,
    #[schemars(description = "Comma-separated expansions (none unless given)")]
    pub expand: Option<String>,
    #[schemars(description = "Optional result window {start, limit}")]
    pub pagination: Option<PaginationParam>,
}

// ── get-confluence-page-details ──

/// Parameters for the `get-confluence-page-details` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageDetailsParams {
    #[schemars(description = "Page (content) ID")]
    pub page_id: String,
    #[schemars(
        description = "Comma-separated expansions (defaults to the page body, its space and its direct child pages with bodies)"
    )]
    pub expand: Option<String>,
}

// ── search-confluence-using-cql ──

/// Parameters for the `search-confluence-using-cql` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CqlSearchParams {
    #[schemars(description = "CQL query (e.g., 'space = DOCS and title ~ \"release\"')")]
    pub cql: String,
    #[schemars(description = "Comma-separated expansions (defaults to 'body.storage')")]
    pub expand: Option<String>,
    #[schemars(description = "Optional result window {start, limit}")]
    pub pagination: Option<PaginationParam>,
}

// ── get-confluence-attachments ──

/// Parameters for the `get-confluence-attachments` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentsParams {
    #[schemars(description = "Page (content) ID whose attachments to list")]
    pub page_id: String,
}

// ── get-confluence-page-children ──

/// Parameters for the `get-confluence-page-children` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageChildrenParams {
    #[schemars(description = "Parent page (content) ID")]
    pub page_id: String,
    #[schemars(description = "Comma-separated expansions (defaults to 'page')")]
    pub expand: Option<String>,
}

// ── get-confluence-image ──

/// Parameters for the `get-confluence-image` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageDownloadParams {
    #[schemars(
        description = "Download link of the image, relative (as returned in attachment '_links.download') or absolute on the same host"
    )]
    pub download_url: String,
}

// ── download-confluence-attachment ──

/// Parameters for the `download-confluence-attachment` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDownloadParams {
    #[schemars(
        description = "Download link of the attachment, relative (as returned in attachment '_links.download') or absolute on the same host"
    )]
    pub download_url: String,
    #[schemars(description = "File name to save as (defaults to the last path segment of the URL)")]
    pub file_name: Option<String>,
}
