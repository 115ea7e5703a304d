//! Tool implementations backed by the Confluence client.
//!
//! Async functions that take the shared `ConfluenceClient` and a param struct
//! and always produce a `CallToolResult`. Remote failures become the tool's
//! fixed failure text; the detail is logged.

use std::path::{Path, PathBuf};

use confluence_client::ConfluenceClient;
use rmcp::model::CallToolResult;

use super::attachments::{self, inline_image, save_attachment};
use super::helpers::{failure_result, json_result, text_result};
use super::names;
use super::params::{
    AttachmentDownloadParams, AttachmentsParams, CqlSearchParams, ImageDownloadParams,
    PageChildrenParams, PageDetailsParams, SpaceDetailsParams, SpacePagesParams, SpacesListParams,
};

pub async fn list_spaces(client: &ConfluenceClient, params: SpacesListParams) -> CallToolResult {
    let result = client.list_spaces(params.pagination.map(Into::into)).await;
    json_result(names::LIST_SPACES, "Error fetching spaces", result)
}

pub async fn space_details(
    client: &ConfluenceClient,
    params: SpaceDetailsParams,
) -> CallToolResult {
    let result = client
        .space_details(&params.space_key, params.expand.as_deref())
        .await;
    json_result(names::SPACE_DETAILS, "Error fetching space details", result)
}

pub async fn space_pages(client: &ConfluenceClient, params: SpacePagesParams) -> CallToolResult {
    let result = client
        .space_pages(
            &params.space_key,
            params.expand.as_deref(),
            params.pagination.map(Into::into),
        )
        .await;
    json_result(names::SPACE_PAGES, "Error fetching space pages", result)
}

pub async fn page_details(client: &ConfluenceClient, params: PageDetailsParams) -> CallToolResult {
    let result = client
        .page_details(&params.page_id, params.expand.as_deref())
        .await;
    json_result(names::PAGE_DETAILS, "Error fetching page details", result)
}

pub async fn search(client: &ConfluenceClient, params: CqlSearchParams) -> CallToolResult {
    let result = client
        .search(
            &params.cql,
            params.expand.as_deref(),
            params.pagination.map(Into::into),
        )
        .await;
    json_result(names::CQL_SEARCH, "Error searching using CQL", result)
}

pub async fn page_attachments(
    client: &ConfluenceClient,
    params: AttachmentsParams,
) -> CallToolResult {
    let result = client.page_attachments(&params.page_id).await;
    json_result(names::ATTACHMENTS, "Error fetching attachments", result)
}

pub async fn page_children(
    client: &ConfluenceClient,
    params: PageChildrenParams,
) -> CallToolResult {
    let result = client
        .page_children(&params.page_id, params.expand.as_deref())
        .await;
    json_result(names::PAGE_CHILDREN, "Error fetching page children", result)
}

pub async fn image(client: &ConfluenceClient, params: ImageDownloadParams) -> CallToolResult {
    match client.download(&params.download_url).await {
        Ok(bytes) => CallToolResult::success(vec![inline_image(&bytes)]),
        Err(e) => failure_result(names::IMAGE, "Error downloading image", &e),
    }
}

pub async fn download_attachment(
    client: &ConfluenceClient,
    params: AttachmentDownloadParams,
    output_dir: &Path,
) -> CallToolResult {
    match fetch_and_save(client, params, output_dir).await {
        Ok(path) => text_result(path.display().to_string()),
        Err(e) => failure_result(
            names::DOWNLOAD_ATTACHMENT,
            "Error downloading attachment",
            &e,
        ),
    }
}

/// The file name is settled before any bytes are fetched. A blank name falls
/// back to the one in the URL.
async fn fetch_and_save(
    client: &ConfluenceClient,
    params: AttachmentDownloadParams,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let file_name = match params.file_name.filter(|name| !name.trim().is_empty()) {
        Some(name) => name,
        None => attachments::file_name_from_url(&params.download_url)?,
    };
    attachments::validate_file_name(&file_name)?;

    let bytes = client.download(&params.download_url).await?;
    Ok(save_attachment(&bytes, &file_name, output_dir).await?)
}
