//! Request shaping for the Confluence REST API.
//!
//! Each constructor captures one REST operation: the path below the API base
//! and the ordered query parameters, including the operation's default
//! `expand`. Keeping this pure makes the wire shape testable without a server.

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default `expand` for space detail.
pub const SPACE_DETAIL_EXPAND: &str = "homepage.body.view";
/// Default `expand` for page detail; inlines direct child pages and their bodies.
pub const PAGE_DETAIL_EXPAND: &str =
    "space,body.storage,children,children.page,children.page.body.storage";
/// Default `expand` for CQL search.
pub const SEARCH_EXPAND: &str = "body.storage";
/// `expand` always sent when listing page attachments.
pub const ATTACHMENTS_EXPAND: &str = "metadata.properties";
/// Default `expand` for page children.
pub const CHILDREN_EXPAND: &str = "page";

/// Offset/size window passed through to the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub start: u32,
    pub limit: u32,
}

/// A fully shaped GET against the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Append `expand`, falling back to `default`. Blank values count as absent.
    fn expand(self, expand: Option<&str>, default: Option<&'static str>) -> Self {
        match expand.map(str::trim).filter(|e| !e.is_empty()).or(default) {
            Some(value) => self.param("expand", value),
            None => self,
        }
    }

    fn paginate(self, pagination: Option<Pagination>) -> Self {
        match pagination {
            Some(p) => self
                .param("start", p.start.to_string())
                .param("limit", p.limit.to_string()),
            None => self,
        }
    }

    /// `GET space`
    pub fn list_spaces(pagination: Option<Pagination>) -> Self {
        Self::new(["space"]).paginate(pagination)
    }

    /// `GET space/{spaceKey}`
    pub fn space_details(space_key: &str, expand: Option<&str>) -> Self {
        Self::new(["space", space_key]).expand(expand, Some(SPACE_DETAIL_EXPAND))
    }

    /// `GET space/{spaceKey}/content/page`; no `expand` unless the caller gives one.
    pub fn space_pages(
        space_key: &str,
        expand: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Self {
        Self::new(["space", space_key, "content", "page"])
            .expand(expand, None)
            .paginate(pagination)
    }

    /// `GET content/{pageId}`
    pub fn page_details(page_id: &str, expand: Option<&str>) -> Self {
        Self::new(["content", page_id]).expand(expand, Some(PAGE_DETAIL_EXPAND))
    }

    /// `GET search?cql=...`
    pub fn search(cql: &str, expand: Option<&str>, pagination: Option<Pagination>) -> Self {
        Self::new(["search"])
            .param("cql", cql)
            .expand(expand, Some(SEARCH_EXPAND))
            .paginate(pagination)
    }

    /// `GET content/{pageId}/child/attachment`
    pub fn page_attachments(page_id: &str) -> Self {
        Self::new(["content", page_id, "child", "attachment"])
            .param("expand", ATTACHMENTS_EXPAND)
    }

    /// `GET content/{pageId}/child`
    pub fn page_children(page_id: &str, expand: Option<&str>) -> Self {
        Self::new(["content", page_id, "child"]).expand(expand, Some(CHILDREN_EXPAND))
    }

    /// Path below the API base, unencoded, for diagnostics.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Value of a query parameter, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Resolve against an API base. Path segments are percent-encoded.
    pub fn resolve(&self, api_base: &Url) -> ClientResult<Url> {
        let mut url = api_base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::config_error(format!("'{api_base}' cannot be a base URL")))?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }
}
