//
//  dspace-rest-client
//  api/items.rs
//

//! # Item Operations
//!
//! Items are the metadata records of the repository: each one lives in a
//! collection, carries a list of [`MetadataEntry`] fields, and owns the
//! bitstreams with the actual payloads. Item content is manipulated through
//! its metadata (`/items/{id}/metadata`), not by replacing the item record.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/items/{id}` | [`find_item_by_id`](DspaceClient::find_item_by_id) |
//! | POST | `/items/find-by-metadata-field` | [`find_items_by_metadata_entry`](DspaceClient::find_items_by_metadata_entry) |
//! | POST | `/collections/{id}/items` | [`create_item`](DspaceClient::create_item) |
//! | PUT | `/items/{id}/metadata` | [`update_item`](DspaceClient::update_item) |
//! | DELETE | `/items/{id}` | [`delete_item`](DspaceClient::delete_item) |
//! | GET | `/items` | [`read_all_items`](DspaceClient::read_all_items) |
//! | POST | `/collections/{id}/addItem/{id}` | [`add_item_to_collection`](DspaceClient::add_item_to_collection) |
//! | DELETE | `/collections/{id}/items/{id}` | [`delete_item_from_collection`](DspaceClient::delete_item_from_collection) |
//!
//! ## Example
//!
//! ```rust,no_run
//! use dspace_rest_client::{Configuration, DspaceClient, MetadataEntry};
//!
//! # async fn example() -> dspace_rest_client::api::common::Result<()> {
//! let client = DspaceClient::basic(Configuration::new(
//!     "https://repo.example.org/rest",
//!     "admin@example.org",
//!     "secret",
//! ))?;
//!
//! let metadata = vec![
//!     MetadataEntry::new("dc.title", "A thesis about REST", Some("en")),
//!     MetadataEntry::new("dc.contributor.author", "Novak, Jan", None),
//! ];
//! let item = client.create_item(11, &metadata).await?;
//! println!("archived item {:?}", item.base.handle);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::bitstreams::Bitstream;
use crate::api::client::{DspaceClient, COLLECTIONS, ITEMS, METADATA};
use crate::api::collections::Collection;
use crate::api::common::{DspaceObject, ListParams, MetadataEntry, Result};
use crate::api::communities::Community;

/// A metadata record owned by a collection.
///
/// The server reports `is_archived`, `is_withdrawn`, and `last_modified` as
/// strings, not booleans or timestamps; they are passed through verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    /// Shared resource fields, flattened into the JSON object.
    #[serde(flatten)]
    pub base: DspaceObject,

    /// `"true"` when the item is archived.
    pub is_archived: Option<String>,

    /// `"true"` when the item has been withdrawn from the repository.
    pub is_withdrawn: Option<String>,

    /// Last modification timestamp, as reported by the server.
    pub last_modified: Option<String>,

    /// Owning collection, present with `expand=parentCollection`.
    pub parent_collection: Option<Box<Collection>>,

    /// All collections holding the item, present with `expand=parentCollectionList`.
    pub parent_collection_list: Vec<Collection>,

    /// Ancestor communities, present with `expand=parentCommunityList`.
    pub parent_community_list: Vec<Community>,

    /// Metadata fields, present with `expand=metadata`.
    pub metadata: Vec<MetadataEntry>,

    /// Bitstreams, present with `expand=bitstreams`.
    pub bitstreams: Vec<Bitstream>,
}

impl DspaceClient {
    /// Reads a single item by id, optionally pulling in its metadata and
    /// bitstream lists with follow-up requests.
    ///
    /// The initial read expands `parentCollectionList`, `parentCollection`,
    /// `metadata`, and `bitstreams`, so the returned item knows where it
    /// lives; the follow-up fetches re-read metadata and bitstreams from
    /// their own endpoints.
    ///
    /// # Parameters
    ///
    /// * `item_id` - Numeric id of the item
    /// * `include_metadata` - Also fetch `/items/{id}/metadata`
    /// * `include_bitstreams` - Also fetch `/items/{id}/bitstreams`
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the item does not exist.
    pub async fn find_item_by_id(
        &self,
        item_id: i32,
        include_metadata: bool,
        include_bitstreams: bool,
    ) -> Result<Option<Item>> {
        debug!(item_id, "reading item");
        let token = self.login().await?;
        let query = ListParams::new()
            .expand("parentCollectionList,parentCollection,metadata,bitstreams")
            .to_query();
        let mut item: Item = match self
            .get_json(&format!("{ITEMS}/{item_id}"), &query, &token)
            .await
        {
            Ok(item) => item,
            Err(err) if err.is_not_found() => {
                info!(item_id, "no such item");
                return Ok(None);
            }
            Err(err) => {
                error!(item_id, %err, "reading item failed");
                return Err(err);
            }
        };
        if include_metadata {
            item.metadata = self
                .get_json(&format!("{ITEMS}/{item_id}{METADATA}"), &[], &token)
                .await
                .map_err(|err| {
                    error!(item_id, %err, "reading item metadata failed");
                    err
                })?;
        }
        if include_bitstreams {
            item.bitstreams = self
                .get_json(&format!("{ITEMS}/{item_id}/bitstreams"), &[], &token)
                .await
                .map_err(|err| {
                    error!(item_id, %err, "reading item bitstreams failed");
                    err
                })?;
        }
        info!(item_id, "item read");
        Ok(Some(item))
    }

    /// Finds the items carrying an exact metadata field value.
    ///
    /// The response inlines `parentCollection` and `parentCollectionList` so
    /// callers can tell where each hit lives without extra requests.
    ///
    /// # Returns
    ///
    /// The matching items; an empty `Vec` when nothing matches.
    pub async fn find_items_by_metadata_entry(
        &self,
        entry: &MetadataEntry,
    ) -> Result<Vec<Item>> {
        debug!(key = %entry.key, "finding items by metadata field");
        let token = self.login().await?;
        let query = ListParams::new()
            .expand("parentCollectionList,parentCollection")
            .to_query();
        let items: Vec<Item> = self
            .post_json(
                &format!("{ITEMS}/find-by-metadata-field"),
                &query,
                &token,
                entry,
            )
            .await
            .map_err(|err| {
                error!(key = %entry.key, %err, "finding items by metadata field failed");
                err
            })?;
        if items.is_empty() {
            info!(key = %entry.key, "no items with that metadata field");
        } else {
            info!(key = %entry.key, count = items.len(), "items found by metadata field");
        }
        Ok(items)
    }

    /// Creates an item in a collection from its metadata.
    ///
    /// # Parameters
    ///
    /// * `collection_id` - Id of the collection that will own the item
    /// * `metadata` - Metadata fields of the new item
    ///
    /// # Returns
    ///
    /// The created item with its server-assigned id and handle.
    pub async fn create_item(
        &self,
        collection_id: i32,
        metadata: &[MetadataEntry],
    ) -> Result<Item> {
        debug!(collection_id, "creating item");
        let token = self.login().await?;
        let payload = Item {
            metadata: metadata.to_vec(),
            ..Item::default()
        };
        let created: Item = self
            .post_json(
                &format!("{COLLECTIONS}/{collection_id}/items"),
                &[],
                &token,
                &payload,
            )
            .await
            .map_err(|err| {
                error!(collection_id, %err, "creating item failed");
                err
            })?;
        info!(collection_id, handle = ?created.base.handle, "item created");
        Ok(created)
    }

    /// Replaces the metadata of an item.
    pub async fn update_item(&self, item_id: i32, metadata: &[MetadataEntry]) -> Result<()> {
        debug!(item_id, "updating item metadata");
        let token = self.login().await?;
        self.put_unit(&format!("{ITEMS}/{item_id}{METADATA}"), &token, metadata)
            .await
            .map_err(|err| {
                error!(item_id, %err, "updating item metadata failed");
                err
            })?;
        info!(item_id, "item metadata updated");
        Ok(())
    }

    /// Deletes an item and its bitstreams.
    pub async fn delete_item(&self, item_id: i32) -> Result<()> {
        debug!(item_id, "deleting item");
        let token = self.login().await?;
        self.delete_unit(&format!("{ITEMS}/{item_id}"), &token)
            .await
            .map_err(|err| {
                error!(item_id, %err, "deleting item failed");
                err
            })?;
        info!(item_id, "item deleted");
        Ok(())
    }

    /// Reads all items, paged.
    pub async fn read_all_items(&self, params: &ListParams) -> Result<Vec<Item>> {
        debug!("reading all items");
        let token = self.login().await?;
        let items: Vec<Item> = self
            .get_json(ITEMS, &params.to_query(), &token)
            .await
            .map_err(|err| {
                error!(%err, "reading all items failed");
                err
            })?;
        info!(count = items.len(), "items read");
        Ok(items)
    }

    /// Maps an existing item into an additional collection.
    ///
    /// The item id travels both in the path and as the request body.
    pub async fn add_item_to_collection(&self, item_id: i32, collection_id: i32) -> Result<()> {
        debug!(item_id, collection_id, "mapping item into collection");
        let token = self.login().await?;
        self.post_unit(
            &format!("{COLLECTIONS}/{collection_id}/addItem/{item_id}"),
            &token,
            &item_id,
        )
        .await
        .map_err(|err| {
            error!(item_id, collection_id, %err, "mapping item into collection failed");
            err
        })?;
        info!(item_id, collection_id, "item mapped into collection");
        Ok(())
    }

    /// Removes an item from a collection.
    pub async fn delete_item_from_collection(
        &self,
        item_id: i32,
        collection_id: i32,
    ) -> Result<()> {
        debug!(item_id, collection_id, "removing item from collection");
        let token = self.login().await?;
        self.delete_unit(
            &format!("{COLLECTIONS}/{collection_id}/items/{item_id}"),
            &token,
        )
        .await
        .map_err(|err| {
            error!(item_id, collection_id, %err, "removing item from collection failed");
            err
        })?;
        info!(item_id, collection_id, "item removed from collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::{mock_login, test_client};

    #[tokio::test]
    async fn test_find_item_by_id_with_metadata_and_bitstreams() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("GET", "/items/21")
            .match_query(mockito::Matcher::UrlEncoded(
                "expand".into(),
                "parentCollectionList,parentCollection,metadata,bitstreams".into(),
            ))
            .with_status(200)
            .with_body(
                r#"{"id":21,"handle":"123456789/21","isArchived":"true","parentCollection":{"id":11}}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/items/21/metadata")
            .with_status(200)
            .with_body(r#"[{"key":"dc.title","value":"A thesis","language":"en"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/items/21/bitstreams")
            .with_status(200)
            .with_body(r#"[{"id":31,"name":"thesis.pdf"}]"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let item = client.find_item_by_id(21, true, true).await.unwrap().unwrap();
        assert_eq!(item.is_archived.as_deref(), Some("true"));
        assert_eq!(item.parent_collection.unwrap().base.id, Some(11));
        assert_eq!(item.metadata[0].key, "dc.title");
        assert_eq!(item.bitstreams[0].base.id, Some(31));
    }

    #[tokio::test]
    async fn test_find_item_by_id_missing_is_none() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("GET", "/items/999")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = test_client(&server);
        assert!(client.find_item_by_id(999, false, false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_items_by_metadata_entry_expands_parents() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("POST", "/items/find-by-metadata-field")
            .match_query(mockito::Matcher::UrlEncoded(
                "expand".into(),
                "parentCollectionList,parentCollection".into(),
            ))
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "key": "dc.identifier.isbn",
                "value": "978-80-01-00000-0",
            })))
            .with_status(200)
            .with_body(r#"[{"id":21,"parentCollection":{"id":11}}]"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let entry = MetadataEntry::new("dc.identifier.isbn", "978-80-01-00000-0", None);
        let items = client.find_items_by_metadata_entry(&entry).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].parent_collection.as_ref().unwrap().base.id, Some(11));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_items_by_metadata_entry_no_match_is_empty() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("POST", "/items/find-by-metadata-field")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = test_client(&server);
        let entry = MetadataEntry::new("dc.title", "Nothing", None);
        assert!(client.find_items_by_metadata_entry(&entry).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_items_by_metadata_entry_propagates_not_found() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("POST", "/items/find-by-metadata-field")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .with_body("no such endpoint")
            .create_async()
            .await;

        let client = test_client(&server);
        let entry = MetadataEntry::new("dc.title", "Nothing", None);
        let err = client.find_items_by_metadata_entry(&entry).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_item_posts_metadata() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("POST", "/collections/11/items")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "metadata": [{"key": "dc.title", "value": "A thesis", "language": "en"}],
            })))
            .with_status(200)
            .with_body(r#"{"id":21,"handle":"123456789/21"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let metadata = vec![MetadataEntry::new("dc.title", "A thesis", Some("en"))];
        let item = client.create_item(11, &metadata).await.unwrap();
        assert_eq!(item.base.id, Some(21));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_item_to_collection() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("POST", "/collections/12/addItem/21")
            .match_header("rest-dspace-token", "test-token")
            .match_body(mockito::Matcher::Json(serde_json::json!(21)))
            .with_status(200)
            .create_async()
            .await;

        let client = test_client(&server);
        client.add_item_to_collection(21, 12).await.unwrap();
        mock.assert_async().await;
    }
}
