//
//  dspace-rest-client
//  api/collections.rs
//

//! # Collection Operations
//!
//! Collections sit between communities and items: every collection belongs to
//! a community and holds the items themselves. Besides the usual CRUD this
//! module carries the name lookup (`/collections/find-collection`), which is
//! the one collection endpoint that treats absence as a normal outcome.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | `/communities/{id}/collections` | [`create_collection`](DspaceClient::create_collection) |
//! | GET | `/collections/{id}` | [`find_collection_by_id`](DspaceClient::find_collection_by_id) |
//! | PUT | `/collections/{id}` | [`update_collection`](DspaceClient::update_collection) |
//! | DELETE | `/collections/{id}` | [`delete_collection`](DspaceClient::delete_collection) |
//! | GET | `/collections` | [`read_all_collections`](DspaceClient::read_all_collections) |
//! | POST | `/collections/find-collection` | [`find_collection_by_name`](DspaceClient::find_collection_by_name) |
//! | GET | `/collections/{id}/items` | [`read_collection_items`](DspaceClient::read_collection_items) |

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::bitstreams::Bitstream;
use crate::api::client::{DspaceClient, COLLECTIONS, COMMUNITIES};
use crate::api::common::{DspaceObject, ListParams, Result};
use crate::api::communities::Community;
use crate::api::items::Item;

/// A collection: a container of items inside a community.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Collection {
    /// Shared resource fields, flattened into the JSON object.
    #[serde(flatten)]
    pub base: DspaceObject,

    /// Logo bitstream, present with `expand=logo`.
    pub logo: Option<Bitstream>,

    /// Owning community, present with `expand=parentCommunity`.
    pub parent_community: Option<Box<Community>>,

    /// Full ancestor chain, present with `expand=parentCommunityList`.
    pub parent_community_list: Vec<Community>,

    /// Items of the collection, present with `expand=items`.
    pub items: Vec<Item>,

    /// Deposit license text of the collection.
    pub license: Option<String>,

    /// Copyright text shown on the collection page.
    pub copyright_text: Option<String>,

    /// Introductory text shown on the collection page.
    pub introductory_text: Option<String>,

    /// Short description of the collection.
    pub short_description: Option<String>,

    /// Sidebar text shown on the collection page.
    pub sidebar_text: Option<String>,

    /// Number of items in the collection.
    pub number_items: Option<i64>,
}

impl Collection {
    /// Creates a collection carrying just a name, as used in create payloads.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            base: DspaceObject::named(name),
            ..Self::default()
        }
    }
}

impl DspaceClient {
    /// Creates a collection inside a community.
    ///
    /// # Parameters
    ///
    /// * `parent_community_id` - Id of the community that will own the collection
    /// * `collection` - The collection to create
    ///
    /// # Returns
    ///
    /// The created collection with its server-assigned id and handle.
    pub async fn create_collection(
        &self,
        parent_community_id: i32,
        collection: &Collection,
    ) -> Result<Collection> {
        debug!(parent_community_id, "creating collection");
        let token = self.login().await?;
        let created: Collection = self
            .post_json(
                &format!("{COMMUNITIES}/{parent_community_id}/collections"),
                &[],
                &token,
                collection,
            )
            .await
            .map_err(|err| {
                error!(parent_community_id, %err, "creating collection failed");
                err
            })?;
        info!(
            parent_community_id,
            handle = ?created.base.handle,
            "collection created"
        );
        Ok(created)
    }

    /// Reads a single collection by id.
    ///
    /// # Parameters
    ///
    /// * `collection_id` - Numeric id of the collection
    /// * `expand` - Optional comma-separated sub-resources to inline
    ///   (`parentCommunity`, `parentCommunityList`, `items`, `license`, `logo`, `all`)
    pub async fn find_collection_by_id(
        &self,
        collection_id: i32,
        expand: Option<&str>,
    ) -> Result<Collection> {
        debug!(collection_id, "reading collection");
        let token = self.login().await?;
        let mut params = ListParams::new();
        if let Some(expand) = expand {
            params = params.expand(expand);
        }
        let collection = self
            .get_json(
                &format!("{COLLECTIONS}/{collection_id}"),
                &params.to_query(),
                &token,
            )
            .await
            .map_err(|err| {
                error!(collection_id, %err, "reading collection failed");
                err
            })?;
        info!(collection_id, "collection read");
        Ok(collection)
    }

    /// Updates a collection in place.
    pub async fn update_collection(
        &self,
        collection_id: i32,
        collection: &Collection,
    ) -> Result<()> {
        debug!(collection_id, "updating collection");
        let token = self.login().await?;
        self.put_unit(
            &format!("{COLLECTIONS}/{collection_id}"),
            &token,
            collection,
        )
        .await
        .map_err(|err| {
            error!(collection_id, %err, "updating collection failed");
            err
        })?;
        info!(collection_id, "collection updated");
        Ok(())
    }

    /// Deletes a collection and its items.
    pub async fn delete_collection(&self, collection_id: i32) -> Result<()> {
        debug!(collection_id, "deleting collection");
        let token = self.login().await?;
        self.delete_unit(&format!("{COLLECTIONS}/{collection_id}"), &token)
            .await
            .map_err(|err| {
                error!(collection_id, %err, "deleting collection failed");
                err
            })?;
        info!(collection_id, "collection deleted");
        Ok(())
    }

    /// Reads all collections, paged.
    pub async fn read_all_collections(&self, params: &ListParams) -> Result<Vec<Collection>> {
        debug!("reading all collections");
        let token = self.login().await?;
        let collections: Vec<Collection> = self
            .get_json(COLLECTIONS, &params.to_query(), &token)
            .await
            .map_err(|err| {
                error!(%err, "reading all collections failed");
                err
            })?;
        info!(count = collections.len(), "collections read");
        Ok(collections)
    }

    /// Looks a collection up by its exact name.
    ///
    /// The name travels in the request body, not the URL, so names with
    /// slashes or spaces need no escaping.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no collection carries that name; other failures are
    /// errors as usual.
    pub async fn find_collection_by_name(&self, name: &str) -> Result<Option<Collection>> {
        debug!(name, "looking up collection by name");
        let token = self.login().await?;
        match self
            .post_json::<Collection, str>(
                &format!("{COLLECTIONS}/find-collection"),
                &[],
                &token,
                name,
            )
            .await
        {
            Ok(collection) => {
                info!(name, collection_id = ?collection.base.id, "collection found by name");
                Ok(Some(collection))
            }
            Err(err) if err.is_not_found() => {
                info!(name, "no collection with that name");
                Ok(None)
            }
            Err(err) => {
                error!(name, %err, "looking up collection by name failed");
                Err(err)
            }
        }
    }

    /// Reads the items of a collection, paged.
    pub async fn read_collection_items(
        &self,
        collection_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Item>> {
        debug!(collection_id, "reading collection items");
        let token = self.login().await?;
        let items: Vec<Item> = self
            .get_json(
                &format!("{COLLECTIONS}/{collection_id}/items"),
                &params.to_query(),
                &token,
            )
            .await
            .map_err(|err| {
                error!(collection_id, %err, "reading collection items failed");
                err
            })?;
        info!(collection_id, count = items.len(), "collection items read");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::{mock_login, test_client};

    #[tokio::test]
    async fn test_create_collection_under_community() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("POST", "/communities/7/collections")
            .match_header("rest-dspace-token", "test-token")
            .with_status(200)
            .with_body(r#"{"id":11,"name":"Articles","handle":"123456789/11"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let created = client
            .create_collection(7, &Collection::named("Articles"))
            .await
            .unwrap();
        assert_eq!(created.base.id, Some(11));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_collection_by_name_found() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("POST", "/collections/find-collection")
            .match_body(mockito::Matcher::Json(serde_json::json!("Articles")))
            .with_status(200)
            .with_body(r#"{"id":11,"name":"Articles"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let found = client.find_collection_by_name("Articles").await.unwrap();
        assert_eq!(found.unwrap().base.id, Some(11));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_collection_by_name_missing_is_none() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("POST", "/collections/find-collection")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let client = test_client(&server);
        let found = client.find_collection_by_name("Missing").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_read_collection_items() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("GET", "/collections/11/items")
            .match_query(mockito::Matcher::UrlEncoded("limit".into(), "100".into()))
            .with_status(200)
            .with_body(r#"[{"id":21},{"id":22},{"id":23}]"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let items = client
            .read_collection_items(11, &ListParams::new().limit(100))
            .await
            .unwrap();
        assert_eq!(items.len(), 3);
        mock.assert_async().await;
    }

    #[test]
    fn test_collection_deserializes_nested_parent() {
        let json = r#"{
            "id": 11,
            "name": "Articles",
            "license": "CC-BY",
            "numberItems": 3,
            "parentCommunity": {"id": 7, "name": "Theses"}
        }"#;
        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.number_items, Some(3));
        assert_eq!(
            collection.parent_community.unwrap().base.name.as_deref(),
            Some("Theses")
        );
    }
}
