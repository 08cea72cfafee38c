//
//  dspace-rest-client
//  lib.rs
//

//! # dspace-rest-client
//!
//! A typed async client for the REST API of a DSpace document repository,
//! covering the repository hierarchy (communities → collections → items →
//! bitstreams), bitstream access policies, and the authority-person identity
//! sub-API.
//!
//! ## Design
//!
//! The remote API is stateless apart from a login token, and this client
//! mirrors that: every operation logs in, attaches the token as the
//! `rest-dspace-token` header, performs one request (two transports are
//! available, stock and connection-pooled), and maps any non-2xx status to a
//! typed [`ApiError`]. There is no caching, retry, or background state.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dspace_rest_client::{
//!     Collection, Configuration, DspaceClient, ListParams, MetadataEntry,
//! };
//!
//! # async fn example() -> dspace_rest_client::api::common::Result<()> {
//! let config = Configuration::from_file("dspace-restapi.toml")
//!     .expect("configuration file");
//! let client = DspaceClient::basic(config)?;
//!
//! // Walk the hierarchy.
//! for community in client.read_top_communities(&ListParams::new().limit(20)).await? {
//!     println!("community {:?}", community.base.name);
//! }
//!
//! // Archive an item.
//! let collection = client
//!     .find_collection_by_name("Bachelor theses")
//!     .await?
//!     .expect("collection exists");
//! let metadata = vec![MetadataEntry::new("dc.title", "A thesis about REST", Some("en"))];
//! let item = client.create_item(collection.base.id.unwrap(), &metadata).await?;
//! println!("archived as {:?}", item.base.handle);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See [`Configuration`] for the TOML file format and the connection-pool
//! settings honoured by the pooled transport.

pub mod api;
pub mod config;

pub use api::client::{DspaceClient, Transport};
pub use api::common::{ApiError, DspaceObject, ListParams, MetadataEntry};
pub use api::{
    Action, Authority, AuthorityPerson, Bitstream, Checksum, Collection, Community, Item,
    ResourcePolicy,
};
pub use config::Configuration;

/// Crate version, sent in the User-Agent header of every request.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
