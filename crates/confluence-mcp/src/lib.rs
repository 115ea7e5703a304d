//! Confluence MCP Server library.
//!
//! Provides the [`server::ConfluenceMcpServer`] MCP handler, its process
//! configuration and the tool parameter types. Used by the `confluence-mcp`
//! binary and available for integration testing.

pub mod config;
pub mod server;
pub mod tools;
