//! Confluence MCP Server
//!
//! Model Context Protocol server exposing read-only Confluence tooling
//! (spaces, pages, CQL search, attachments) to LLM agents over stdio.

use clap::Parser;
use confluence_mcp::config::{Cli, ServerConfig};
use confluence_mcp::server::ConfluenceMcpServer;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real variables win over it either way.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("confluence_mcp=info".parse()?)
                .add_directive("confluence_client=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        host = %config.client.host_url(),
        attachment_dir = %config.attachment_dir.display(),
        disabled = ?config.disabled_tools,
        "confluence-mcp starting (stdio transport)"
    );

    let server = ConfluenceMcpServer::from_config(&config).await?;
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    tracing::info!("confluence-mcp stopped");
    Ok(())
}
