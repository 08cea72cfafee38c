//
//  dspace-rest-client
//  api/communities.rs
//

//! # Community Operations
//!
//! Communities are the top organizational containers of a repository. They
//! nest (a community can hold subcommunities) and hold collections, which in
//! turn hold items. This module provides the [`Community`] model and all
//! community endpoints.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | `/communities` | [`create_community`](DspaceClient::create_community) |
//! | GET | `/communities/{id}` | [`find_community_by_id`](DspaceClient::find_community_by_id) |
//! | PUT | `/communities/{id}` | [`update_community`](DspaceClient::update_community) |
//! | DELETE | `/communities/{id}` | [`delete_community`](DspaceClient::delete_community) |
//! | GET | `/communities` | [`read_all_communities`](DspaceClient::read_all_communities) |
//! | GET | `/communities/top-communities` | [`read_top_communities`](DspaceClient::read_top_communities) |
//! | POST | `/communities/{id}/communities` | [`create_subcommunity`](DspaceClient::create_subcommunity) |
//! | GET | `/communities/{id}/communities` | [`read_subcommunities`](DspaceClient::read_subcommunities) |
//! | DELETE | `/communities/{id}/communities/{id}` | [`delete_subcommunity`](DspaceClient::delete_subcommunity) |
//! | GET | `/communities/{id}/collections` | [`read_subcollections`](DspaceClient::read_subcollections) |
//! | DELETE | `/communities/{id}/collections/{id}` | [`delete_subcollection`](DspaceClient::delete_subcollection) |
//!
//! ## Example
//!
//! ```rust,no_run
//! use dspace_rest_client::{Community, Configuration, DspaceClient};
//!
//! # async fn example() -> dspace_rest_client::api::common::Result<()> {
//! let client = DspaceClient::basic(Configuration::new(
//!     "https://repo.example.org/rest",
//!     "admin@example.org",
//!     "secret",
//! ))?;
//!
//! let theses = client.create_community(&Community::named("Theses")).await?;
//! println!("created community {:?}", theses.base.handle);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::client::{DspaceClient, COMMUNITIES};
use crate::api::collections::Collection;
use crate::api::common::{DspaceObject, ListParams, Result};
use crate::api::bitstreams::Bitstream;

/// A community: a top-level or nested organizational container.
///
/// The shared resource fields (id, name, handle, ...) live in `base` and are
/// flattened into the JSON, so the wire format stays flat. The nested
/// `logo`, `parent_community`, `subcommunities`, and `collections` fields are
/// only populated when the matching `expand` values were requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Community {
    /// Shared resource fields, flattened into the JSON object.
    #[serde(flatten)]
    pub base: DspaceObject,

    /// Copyright text shown on the community page.
    pub copyright_text: Option<String>,

    /// Introductory text shown on the community page.
    pub introductory_text: Option<String>,

    /// Short description of the community.
    pub short_description: Option<String>,

    /// Sidebar text shown on the community page.
    pub sidebar_text: Option<String>,

    /// Number of items in the community, recursive over sub-containers.
    pub count_items: Option<i64>,

    /// Logo bitstream, present with `expand=logo`.
    pub logo: Option<Bitstream>,

    /// Parent community, present with `expand=parentCommunity`.
    pub parent_community: Option<Box<Community>>,

    /// Child communities, present with `expand=subCommunities`.
    pub subcommunities: Vec<Community>,

    /// Child collections, present with `expand=collections`.
    pub collections: Vec<Collection>,
}

impl Community {
    /// Creates a community carrying just a name, as used in create payloads.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            base: DspaceObject::named(name),
            ..Self::default()
        }
    }
}

impl DspaceClient {
    /// Creates a top-level community.
    ///
    /// # Parameters
    ///
    /// * `community` - The community to create; `base.name` is the only field
    ///   the server requires
    ///
    /// # Returns
    ///
    /// The created community with its server-assigned id and handle.
    pub async fn create_community(&self, community: &Community) -> Result<Community> {
        debug!("creating community");
        let token = self.login().await?;
        let created: Community = self
            .post_json(COMMUNITIES, &[], &token, community)
            .await
            .map_err(|err| {
                error!(%err, "creating community failed");
                err
            })?;
        info!(handle = ?created.base.handle, "community created");
        Ok(created)
    }

    /// Reads a single community by id.
    ///
    /// # Parameters
    ///
    /// * `community_id` - Numeric id of the community
    /// * `expand` - Optional comma-separated sub-resources to inline
    ///   (`parentCommunity`, `subCommunities`, `collections`, `logo`, `all`)
    pub async fn find_community_by_id(
        &self,
        community_id: i32,
        expand: Option<&str>,
    ) -> Result<Community> {
        debug!(community_id, "reading community");
        let token = self.login().await?;
        let mut params = ListParams::new();
        if let Some(expand) = expand {
            params = params.expand(expand);
        }
        let community = self
            .get_json(
                &format!("{COMMUNITIES}/{community_id}"),
                &params.to_query(),
                &token,
            )
            .await
            .map_err(|err| {
                error!(community_id, %err, "reading community failed");
                err
            })?;
        info!(community_id, "community read");
        Ok(community)
    }

    /// Updates a community in place.
    pub async fn update_community(&self, community_id: i32, community: &Community) -> Result<()> {
        debug!(community_id, "updating community");
        let token = self.login().await?;
        self.put_unit(&format!("{COMMUNITIES}/{community_id}"), &token, community)
            .await
            .map_err(|err| {
                error!(community_id, %err, "updating community failed");
                err
            })?;
        info!(community_id, "community updated");
        Ok(())
    }

    /// Deletes a community and everything under it.
    pub async fn delete_community(&self, community_id: i32) -> Result<()> {
        debug!(community_id, "deleting community");
        let token = self.login().await?;
        self.delete_unit(&format!("{COMMUNITIES}/{community_id}"), &token)
            .await
            .map_err(|err| {
                error!(community_id, %err, "deleting community failed");
                err
            })?;
        info!(community_id, "community deleted");
        Ok(())
    }

    /// Reads all communities, paged.
    pub async fn read_all_communities(&self, params: &ListParams) -> Result<Vec<Community>> {
        debug!("reading all communities");
        let token = self.login().await?;
        let communities: Vec<Community> = self
            .get_json(COMMUNITIES, &params.to_query(), &token)
            .await
            .map_err(|err| {
                error!(%err, "reading all communities failed");
                err
            })?;
        info!(count = communities.len(), "communities read");
        Ok(communities)
    }

    /// Reads the top-level communities, paged.
    pub async fn read_top_communities(&self, params: &ListParams) -> Result<Vec<Community>> {
        debug!("reading top communities");
        let token = self.login().await?;
        let communities: Vec<Community> = self
            .get_json(
                &format!("{COMMUNITIES}/top-communities"),
                &params.to_query(),
                &token,
            )
            .await
            .map_err(|err| {
                error!(%err, "reading top communities failed");
                err
            })?;
        info!(count = communities.len(), "top communities read");
        Ok(communities)
    }

    /// Creates a subcommunity under a parent community.
    pub async fn create_subcommunity(
        &self,
        parent_community_id: i32,
        community: &Community,
    ) -> Result<Community> {
        debug!(parent_community_id, "creating subcommunity");
        let token = self.login().await?;
        let created: Community = self
            .post_json(
                &format!("{COMMUNITIES}/{parent_community_id}/communities"),
                &[],
                &token,
                community,
            )
            .await
            .map_err(|err| {
                error!(parent_community_id, %err, "creating subcommunity failed");
                err
            })?;
        info!(
            parent_community_id,
            handle = ?created.base.handle,
            "subcommunity created"
        );
        Ok(created)
    }

    /// Reads the subcommunities of a community, paged.
    pub async fn read_subcommunities(
        &self,
        parent_community_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Community>> {
        debug!(parent_community_id, "reading subcommunities");
        let token = self.login().await?;
        let communities: Vec<Community> = self
            .get_json(
                &format!("{COMMUNITIES}/{parent_community_id}/communities"),
                &params.to_query(),
                &token,
            )
            .await
            .map_err(|err| {
                error!(parent_community_id, %err, "reading subcommunities failed");
                err
            })?;
        info!(
            parent_community_id,
            count = communities.len(),
            "subcommunities read"
        );
        Ok(communities)
    }

    /// Removes a subcommunity from its parent, deleting it.
    pub async fn delete_subcommunity(
        &self,
        parent_community_id: i32,
        community_id: i32,
    ) -> Result<()> {
        debug!(parent_community_id, community_id, "deleting subcommunity");
        let token = self.login().await?;
        self.delete_unit(
            &format!("{COMMUNITIES}/{parent_community_id}/communities/{community_id}"),
            &token,
        )
        .await
        .map_err(|err| {
            error!(parent_community_id, community_id, %err, "deleting subcommunity failed");
            err
        })?;
        info!(parent_community_id, community_id, "subcommunity deleted");
        Ok(())
    }

    /// Reads the collections of a community, paged.
    pub async fn read_subcollections(
        &self,
        parent_community_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Collection>> {
        debug!(parent_community_id, "reading community collections");
        let token = self.login().await?;
        let collections: Vec<Collection> = self
            .get_json(
                &format!("{COMMUNITIES}/{parent_community_id}/collections"),
                &params.to_query(),
                &token,
            )
            .await
            .map_err(|err| {
                error!(parent_community_id, %err, "reading community collections failed");
                err
            })?;
        info!(
            parent_community_id,
            count = collections.len(),
            "community collections read"
        );
        Ok(collections)
    }

    /// Removes a collection from its parent community, deleting it.
    pub async fn delete_subcollection(
        &self,
        parent_community_id: i32,
        collection_id: i32,
    ) -> Result<()> {
        debug!(parent_community_id, collection_id, "deleting community collection");
        let token = self.login().await?;
        self.delete_unit(
            &format!("{COMMUNITIES}/{parent_community_id}/collections/{collection_id}"),
            &token,
        )
        .await
        .map_err(|err| {
            error!(parent_community_id, collection_id, %err, "deleting community collection failed");
            err
        })?;
        info!(parent_community_id, collection_id, "community collection deleted");
        Ok(())
    }
}
