//! MCP ServerHandler implementation for Confluence.
//!
//! Read-only tools over a single Confluence instance:
//!
//! **Spaces**
//! - `get-confluence-spaces`: List spaces (optional pagination)
//! - `get-confluence-space-details`: Space detail with its homepage body
//! - `get-confluence-space-pages`: Pages of a space (optional expand/pagination)
//!
//! **Pages & search**
//! - `get-confluence-page-details`: Page with body and direct children
//! - `get-confluence-page-children`: Children of a page
//! - `search-confluence-using-cql`: CQL search
//!
//! **Attachments**
//! - `get-confluence-attachments`: Attachment metadata of a page
//! - `get-confluence-image`: Download an image and return it inline
//! - `download-confluence-attachment`: Download an attachment to local disk
//!
//! Any tool may be disabled at startup. Disabled tools stay in `tools/list`;
//! calls to them are rejected before the handler runs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::ToolCallContext;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_router, ErrorData as McpError, RoleServer, ServerHandler};
use tokio::sync::RwLock;

use confluence_client::ConfluenceClient;

use crate::config::ServerConfig;
use crate::tools::*;

/// Confluence MCP server handler.
#[derive(Debug, Clone)]
pub struct ConfluenceMcpServer {
    tool_router: ToolRouter<Self>,
    client: Arc<ConfluenceClient>,
    attachment_dir: PathBuf,
    disabled_tools: Arc<RwLock<HashSet<String>>>,
}

impl ConfluenceMcpServer {
    /// Create a server around an already-built client.
    pub fn new(client: ConfluenceClient, attachment_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client: Arc::new(client),
            attachment_dir: attachment_dir.into(),
            disabled_tools: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Build the client from validated settings and apply the disabled-tool list.
    pub async fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let client = ConfluenceClient::new(&config.client)?;
        let server = Self::new(client, &config.attachment_dir);
        for name in &config.disabled_tools {
            server.disable_tool(name).await?;
        }
        Ok(server)
    }

    pub fn client(&self) -> &ConfluenceClient {
        &self.client
    }

    pub fn attachment_dir(&self) -> &Path {
        &self.attachment_dir
    }

    /// Names of every registered tool, enabled or not.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }

    /// Mark a registered tool disabled. It stays in the catalog.
    pub async fn disable_tool(&self, name: &str) -> anyhow::Result<()> {
        if !self.tool_names().iter().any(|t| t == name) {
            anyhow::bail!(
                "cannot disable unknown tool '{}'. Known tools: [{}]",
                name,
                names::ALL.join(", ")
            );
        }
        self.disabled_tools.write().await.insert(name.to_string());
        tracing::info!(tool = name, "Tool disabled");
        Ok(())
    }

    pub async fn is_disabled(&self, name: &str) -> bool {
        self.disabled_tools.read().await.contains(name)
    }
}

impl ServerHandler for ConfluenceMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "confluence-mcp".to_string(),
                title: Some("Confluence MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "Read-only access to Confluence spaces, pages, CQL search and attachments"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Confluence is a team wiki organised into spaces of pages.\n\
                 Browsing: get-confluence-spaces → get-confluence-space-details → \
                 get-confluence-space-pages → get-confluence-page-details / get-confluence-page-children\n\
                 Searching: search-confluence-using-cql with a CQL query, e.g. \
                 'space = DOCS and title ~ \"release\"'.\n\
                 Attachments: get-confluence-attachments lists a page's files; pass an attachment's \
                 '_links.download' value to get-confluence-image (inline PNG) or \
                 download-confluence-attachment (saved to local disk, returns the path).\n\
                 'expand' selects nested fields to inline; 'pagination' is {start, limit}."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tool_router.list_all()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if self.is_disabled(&request.name).await {
            tracing::warn!(tool = %request.name, "Rejected call to disabled tool");
            return Err(McpError::invalid_request(
                format!("Tool '{}' is disabled", request.name),
                None,
            ));
        }

        let context = ToolCallContext::new(self, request, context);
        self.tool_router.call(context).await
    }
}

#[tool_router(router = tool_router)]
impl ConfluenceMcpServer {
    // ── Spaces ──

    #[tool(
        name = "get-confluence-spaces",
        description = "Fetch Confluence spaces. Optional pagination {start, limit}. Returns the raw Confluence JSON."
    )]
    pub async fn get_spaces(
        &self,
        Parameters(params): Parameters<SpacesListParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::list_spaces(&self.client, params).await)
    }

    #[tool(
        name = "get-confluence-space-details",
        description = "Fetch Confluence space details by space key. Expands the homepage body unless 'expand' is given."
    )]
    pub async fn get_space_details(
        &self,
        Parameters(params): Parameters<SpaceDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::space_details(&self.client, params).await)
    }

    #[tool(
        name = "get-confluence-space-pages",
        description = "Fetch the pages of a Confluence space. Optional 'expand' and pagination {start, limit}."
    )]
    pub async fn get_space_pages(
        &self,
        Parameters(params): Parameters<SpacePagesParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::space_pages(&self.client, params).await)
    }

    // ── Pages & search ──

    #[tool(
        name = "get-confluence-page-details",
        description = "Fetch Confluence page details by page ID, including the storage body, space and direct child pages unless 'expand' is given."
    )]
    pub async fn get_page_details(
        &self,
        Parameters(params): Parameters<PageDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::page_details(&self.client, params).await)
    }

    #[tool(
        name = "search-confluence-using-cql",
        description = "Search Confluence using CQL. Returns results with storage bodies unless 'expand' is given. Optional pagination {start, limit}."
    )]
    pub async fn search_using_cql(
        &self,
        Parameters(params): Parameters<CqlSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::search(&self.client, params).await)
    }

    #[tool(
        name = "get-confluence-page-children",
        description = "Fetch the children of a Confluence page by page ID. Expands child pages unless 'expand' is given."
    )]
    pub async fn get_page_children(
        &self,
        Parameters(params): Parameters<PageChildrenParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::page_children(&self.client, params).await)
    }

    // ── Attachments ──

    #[tool(
        name = "get-confluence-attachments",
        description = "Fetch the attachments of a Confluence page with their metadata properties. Each result's '_links.download' can be passed to get-confluence-image or download-confluence-attachment."
    )]
    pub async fn get_attachments(
        &self,
        Parameters(params): Parameters<AttachmentsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::page_attachments(&self.client, params).await)
    }

    #[tool(
        name = "get-confluence-image",
        description = "Download a Confluence image attachment and return it inline as a base64 PNG image."
    )]
    pub async fn get_image(
        &self,
        Parameters(params): Parameters<ImageDownloadParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::image(&self.client, params).await)
    }

    #[tool(
        name = "download-confluence-attachment",
        description = "Download a Confluence attachment to the local attachment directory and return the absolute file path. The file name defaults to the last segment of the download URL."
    )]
    pub async fn download_attachment(
        &self,
        Parameters(params): Parameters<AttachmentDownloadParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(remote::download_attachment(&self.client, params, &self.attachment_dir).await)
    }
}
