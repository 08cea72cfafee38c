//
//  dspace-rest-client
//  api/mod.rs
//

//! # DSpace REST API Surface
//!
//! This module groups the HTTP client core and the typed resource modules.
//! Every operation lives as a method on [`DspaceClient`], grouped by
//! resource:
//!
//! - [`communities`] - Top-level and nested organizational containers
//! - [`collections`] - Item containers inside communities
//! - [`items`] - Metadata records and their collection mappings
//! - [`bitstreams`] - Binary payloads and their access policies
//! - [`authority`] - The authority-person identity sub-API
//!
//! Shared plumbing (errors, the flattened base record, list parameters)
//! lives in [`common`].

pub mod authority;
pub mod bitstreams;
pub mod client;
pub mod collections;
pub mod common;
pub mod communities;
pub mod items;

pub use authority::{Authority, AuthorityPerson};
pub use bitstreams::{Action, Bitstream, Checksum, ResourcePolicy};
pub use client::{DspaceClient, Transport};
pub use collections::Collection;
pub use common::{ApiError, DspaceObject, ListParams, MetadataEntry};
pub use communities::Community;
pub use items::Item;
