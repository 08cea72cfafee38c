//
//  dspace-rest-client
//  api/common/mod.rs
//

//! Common API Types for the DSpace REST Client
//!
//! This module provides shared types used across all resource modules:
//! the unified [`ApiError`] type, the [`DspaceObject`] base record that every
//! repository resource embeds, the [`MetadataEntry`] key/value record, and the
//! [`ListParams`] query builder for list endpoints.
//!
//! # Error Handling
//!
//! Every operation returns [`Result`], with non-2xx HTTP statuses mapped to
//! [`ApiError`] variants:
//!
//! | Variant | HTTP Status |
//! |---------|-------------|
//! | `BadRequest` | 400 |
//! | `NotAuthorized` | 401 |
//! | `NotFound` | 404 |
//! | `InternalServer` | 500 |
//! | `ServiceUnavailable` | 503 |
//! | `Server` | other 5xx |
//! | `Client` | other 4xx |
//! | `Redirection` | 3xx |
//! | `Unexpected` | anything else |
//! | `Network` | transport failure (no response) |
//!
//! # Example
//!
//! ```rust
//! use dspace_rest_client::api::common::{ApiError, ListParams};
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     match err {
//!         ApiError::NotFound(_) => "no such resource",
//!         ApiError::NotAuthorized(_) => "log in first",
//!         _ => "something else went wrong",
//!     }
//! }
//!
//! let params = ListParams::new().expand("logo,collections").limit(20).offset(40);
//! assert_eq!(params.to_query().len(), 3);
//! ```

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod params;

pub use params::ListParams;

/// Result alias used by every client operation.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Unified error type for all DSpace REST operations.
///
/// Each variant corresponds to the HTTP status the server answered with; the
/// `String` payload carries the response body, which DSpace uses for
/// human-readable diagnostics. The `Network` variant wraps transport failures
/// where no response was received at all, and `InvalidEndpoint` is produced
/// at construction time when the configured endpoint URL does not parse.
///
/// # Example
///
/// ```rust
/// use dspace_rest_client::api::common::ApiError;
///
/// let err = ApiError::from_status(reqwest::StatusCode::NOT_FOUND, "no community 7".into());
/// assert!(matches!(err, ApiError::NotFound(_)));
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request was malformed or contained invalid parameters (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authentication is missing, invalid, or expired (401).
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// The requested resource does not exist (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The server failed while handling the request (500).
    #[error("Internal server error: {0}")]
    InternalServer(String),

    /// The server is temporarily unable to handle requests (503).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other 5xx response.
    #[error("Server error ({status}): {body}")]
    Server {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Any other 4xx response.
    #[error("Client error ({status}): {body}")]
    Client {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 3xx response reached error handling; redirects are not followed
    /// into the error path.
    #[error("Unexpected redirection ({status})")]
    Redirection {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// A status outside every recognised class.
    #[error("Unexpected response ({status})")]
    Unexpected {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// A network-level failure: connection refused, timeout, DNS, TLS.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured endpoint URL could not be parsed.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl ApiError {
    /// Maps a non-success HTTP status to the matching error variant.
    ///
    /// The well-known statuses (400, 401, 404, 500, 503) get dedicated
    /// variants, everything else falls into its status class.
    ///
    /// # Parameters
    ///
    /// * `status` - The HTTP status code of the response
    /// * `body` - The response body, kept for diagnostics
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(body),
            401 => Self::NotAuthorized(body),
            404 => Self::NotFound(body),
            500 => Self::InternalServer(body),
            503 => Self::ServiceUnavailable(body),
            s if s >= 500 => Self::Server { status: s, body },
            s if s >= 400 => Self::Client { status: s, body },
            s if s >= 300 => Self::Redirection { status: s },
            s => Self::Unexpected { status: s },
        }
    }

    /// Returns `true` for the 404 variant.
    ///
    /// Lookup operations use this to turn "not found" into `Ok(None)` where
    /// the API treats absence as a normal outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Base record shared by every repository resource.
///
/// Communities, collections, items, and bitstreams all carry these fields;
/// the concrete types embed this struct via `#[serde(flatten)]` so the JSON
/// stays flat, matching the wire format.
///
/// # Fields
///
/// * `id` - Numeric database identifier, absent on outgoing create payloads
/// * `name` - Display name of the resource
/// * `handle` - Persistent handle (e.g. `123456789/42`), assigned by the server
/// * `kind` - Resource type discriminator (`community`, `collection`, ...)
/// * `link` - Server-relative link to the resource
/// * `expand` - Names of sub-resources the server could inline on request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DspaceObject {
    /// Numeric database identifier.
    pub id: Option<i32>,

    /// Display name of the resource.
    pub name: Option<String>,

    /// Persistent handle assigned by the server.
    pub handle: Option<String>,

    /// Resource type discriminator.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Server-relative link to the resource.
    pub link: Option<String>,

    /// Sub-resources the server could inline via the `expand` parameter.
    pub expand: Vec<String>,
}

impl DspaceObject {
    /// Creates a base record carrying just a name, as used in create payloads.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A single metadata field on an item.
///
/// Keys use the flat dotted schema notation (`dc.title`,
/// `dc.contributor.author`). The optional `language` is an ISO code such as
/// `en` or `cze`; `authority` links the value to an authority record.
///
/// # Example
///
/// ```rust
/// use dspace_rest_client::api::common::MetadataEntry;
///
/// let title = MetadataEntry::new("dc.title", "A thesis about REST", Some("en"));
/// assert_eq!(title.key, "dc.title");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataEntry {
    /// Dotted metadata field key (`dc.title`, `dc.date.issued`, ...).
    pub key: String,

    /// Field value.
    pub value: String,

    /// Optional ISO language code of the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Optional authority key tying the value to an authority record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
}

impl MetadataEntry {
    /// Creates a metadata entry from key, value, and optional language.
    pub fn new(key: impl Into<String>, value: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            language: language.map(str::to_owned),
            authority: None,
        }
    }
}
