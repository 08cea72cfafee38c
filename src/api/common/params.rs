//
//  dspace-rest-client
//  api/common/params.rs
//

//! Query Parameters for List Endpoints
//!
//! Every list endpoint of the DSpace REST API accepts the same three optional
//! query parameters: `expand` (comma-separated sub-resources to inline),
//! `limit` (page size), and `offset` (position in the server-side list).
//! [`ListParams`] collects them with a small builder and renders the query
//! pairs the HTTP layer attaches to the request.
//!
//! # Example
//!
//! ```rust
//! use dspace_rest_client::api::common::ListParams;
//!
//! let params = ListParams::new().expand("parentCommunity,logo").limit(50).offset(100);
//! let query = params.to_query();
//! assert_eq!(query[0], ("expand", "parentCommunity,logo".to_string()));
//! assert_eq!(query[1], ("limit", "50".to_string()));
//! assert_eq!(query[2], ("offset", "100".to_string()));
//!
//! // An empty ListParams produces no query parameters at all.
//! assert!(ListParams::new().to_query().is_empty());
//! ```

/// Expand / limit / offset parameters for list endpoints.
///
/// All three parts are optional; unset parts are simply omitted from the
/// request. The `expand` value is passed through verbatim, so callers control
/// the comma-separated list exactly as the remote API documents it
/// (`parentCommunity`, `subCommunities`, `collections`, `logo`, `all`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    expand: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl ListParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comma-separated `expand` list.
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Sets the maximum number of records per page.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the offset into the server-side record list.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Renders the set parts as query pairs, in `expand`, `limit`, `offset`
    /// order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(expand) = &self.expand {
            if !expand.is_empty() {
                query.push(("expand", expand.clone()));
            }
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        query
    }

    /// Convenience constructor for endpoints that only page, never expand.
    pub fn paging(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            expand: None,
            limit,
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_render_nothing() {
        assert!(ListParams::new().to_query().is_empty());
    }

    #[test]
    fn test_empty_expand_is_dropped() {
        let query = ListParams::new().expand("").limit(10).to_query();
        assert_eq!(query, vec![("limit", "10".to_string())]);
    }

    #[test]
    fn test_full_params_keep_order() {
        let query = ListParams::new().expand("all").limit(5).offset(15).to_query();
        assert_eq!(
            query,
            vec![
                ("expand", "all".to_string()),
                ("limit", "5".to_string()),
                ("offset", "15".to_string()),
            ]
        );
    }

    #[test]
    fn test_paging_constructor() {
        let query = ListParams::paging(Some(25), None).to_query();
        assert_eq!(query, vec![("limit", "25".to_string())]);
    }
}
