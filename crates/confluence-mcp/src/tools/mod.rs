//! MCP tool parameter types and implementations.
//!
//! All parameter structs derive `Deserialize + JsonSchema` for MCP tool registration.

pub mod attachments;
pub mod helpers;
pub mod params;
pub mod remote;

pub use params::*;

/// Registered tool names.
pub mod names {
    pub const LIST_SPACES: &str = "get-confluence-spaces";
    pub const SPACE_DETAILS: &str = "get-confluence-space-details";
    pub const SPACE_PAGES: &str = "get-confluence-space-pages";
    pub const PAGE_DETAILS: &str = "get-confluence-page-details";
    pub const CQL_SEARCH: &str = "search-confluence-using-cql";
    pub const ATTACHMENTS: &str = "get-confluence-attachments";
    pub const PAGE_CHILDREN: &str = "get-confluence-page-children";
    pub const IMAGE: &str = "get-confluence-image";
    pub const DOWNLOAD_ATTACHMENT: &str = "download-confluence-attachment";

    pub const ALL: [&str; 9] = [
        LIST_SPACES,
        SPACE_DETAILS,
        SPACE_PAGES,
        PAGE_DETAILS,
        CQL_SEARCH,
        ATTACHMENTS,
        PAGE_CHILDREN,
        IMAGE,
        DOWNLOAD_ATTACHMENT,
    ];
}
