//
//  dspace-rest-client
//  api/bitstreams.rs
//

//! # Bitstream and Resource-Policy Operations
//!
//! Bitstreams carry the binary payloads of items (the PDF of a thesis, a
//! logo image). Each bitstream has descriptive fields, a checksum, and a list
//! of [`ResourcePolicy`] access rules that gate who may read it and from
//! when.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/bitstreams/{id}` | [`find_bitstream_by_id`](DspaceClient::find_bitstream_by_id) |
//! | POST | `/items/{id}/bitstreams` | [`add_bitstream`](DspaceClient::add_bitstream) |
//! | PUT | `/bitstreams/{id}/data` + `/bitstreams/{id}` | [`update_bitstream`](DspaceClient::update_bitstream) |
//! | DELETE | `/items/{id}/bitstreams/{id}` | [`delete_bitstream`](DspaceClient::delete_bitstream) |
//! | GET | `/bitstreams` | [`read_all_bitstreams`](DspaceClient::read_all_bitstreams) |
//! | GET | `/bitstreams/{id}/policy` | [`bitstream_policies`](DspaceClient::bitstream_policies) |
//! | POST | `/bitstreams/{id}/policy` | [`add_bitstream_policy`](DspaceClient::add_bitstream_policy) |
//! | DELETE | `/bitstreams/{id}/policy/{id}` | [`delete_bitstream_policy`](DspaceClient::delete_bitstream_policy) |
//!
//! ## Upload Quirk
//!
//! The upload endpoint takes the payload as the raw request body; the
//! bitstream's name, description, and the group plus start date of its first
//! policy travel as query parameters (`name`, `description`, `groupId`,
//! `year`, `month`, `day`). [`add_bitstream`](DspaceClient::add_bitstream)
//! renders that query string from the descriptor so callers only fill the
//! model.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::client::{DspaceClient, BITSTREAMS, ITEMS};
use crate::api::common::{DspaceObject, ListParams, Result};

/// Checksum of a bitstream payload as computed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Checksum {
    /// Hex digest of the payload.
    pub value: Option<String>,

    /// Digest algorithm, usually `MD5`.
    pub check_sum_algorithm: Option<String>,
}

/// Access-control action a policy grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Permission to read the resource.
    Read,
    /// Permission to modify the resource.
    Write,
    /// Permission to delete the resource.
    Delete,
}

/// An access-control rule attached to a bitstream.
///
/// A policy grants an [`Action`] to either an e-person (`eperson_id`) or a
/// group (`group_id`), optionally bounded by a validity window. A policy
/// whose `start_date` lies in the future embargoes the bitstream until that
/// day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourcePolicy {
    /// Server-assigned policy id.
    pub id: Option<i32>,

    /// Granted action.
    pub action: Option<Action>,

    /// E-person the policy applies to, if person-scoped.
    pub eperson_id: Option<i32>,

    /// Group the policy applies to, if group-scoped.
    pub group_id: Option<i32>,

    /// Id of the resource the policy is attached to.
    pub resource_id: Option<i32>,

    /// Type of the resource the policy is attached to.
    pub resource_type: Option<String>,

    /// Free-text description of the policy.
    pub rp_description: Option<String>,

    /// Name of the policy.
    pub rp_name: Option<String>,

    /// Policy type discriminator used by the server.
    pub rp_type: Option<String>,

    /// First day the policy is in force.
    pub start_date: Option<NaiveDate>,

    /// Last day the policy is in force.
    pub end_date: Option<NaiveDate>,
}

impl ResourcePolicy {
    /// Creates a group-scoped policy for an action, optionally embargoed
    /// until a start date.
    pub fn for_group(action: Action, group_id: i32, start_date: Option<NaiveDate>) -> Self {
        Self {
            action: Some(action),
            group_id: Some(group_id),
            start_date,
            ..Self::default()
        }
    }
}

/// A binary payload attached to an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bitstream {
    /// Shared resource fields, flattened into the JSON object.
    #[serde(flatten)]
    pub base: DspaceObject,

    /// Bundle the bitstream lives in, usually `ORIGINAL`.
    pub bundle_name: Option<String>,

    /// Free-text description of the payload.
    pub description: Option<String>,

    /// Server-side format name.
    pub format: Option<String>,

    /// MIME type of the payload.
    pub mime_type: Option<String>,

    /// Payload size in bytes.
    pub size_bytes: Option<i64>,

    /// Resource the bitstream is attached to, present with `expand=parent`.
    pub parent_object: Option<DspaceObject>,

    /// Server-relative link to the raw payload.
    pub retrieve_link: Option<String>,

    /// Checksum of the payload.
    pub check_sum: Option<Checksum>,

    /// Position of the bitstream within its bundle.
    pub sequence_id: Option<i32>,

    /// Access policies, present with `expand=policies`.
    pub policies: Vec<ResourcePolicy>,
}

impl Bitstream {
    /// Creates an upload descriptor from a file name, description, and
    /// access policies.
    pub fn descriptor(
        name: impl Into<String>,
        description: Option<&str>,
        policies: Vec<ResourcePolicy>,
    ) -> Self {
        Self {
            base: DspaceObject::named(name),
            description: description.map(str::to_owned),
            policies,
            ..Self::default()
        }
    }

    /// Query parameters the upload endpoint expects instead of a JSON body.
    /// `name` and `description` are always present, empty when unset.
    fn upload_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("name", self.base.name.clone().unwrap_or_default()),
            ("description", self.description.clone().unwrap_or_default()),
        ];
        if let Some(policy) = self.policies.first() {
            if let Some(group_id) = policy.group_id {
                query.push(("groupId", group_id.to_string()));
            }
            if let Some(start) = policy.start_date {
                query.push(("year", start.year().to_string()));
                query.push(("month", start.month().to_string()));
                query.push(("day", start.day().to_string()));
            }
        }
        query
    }
}

impl DspaceClient {
    /// Reads a single bitstream by id.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the bitstream does not exist.
    pub async fn find_bitstream_by_id(&self, bitstream_id: i32) -> Result<Option<Bitstream>> {
        debug!(bitstream_id, "reading bitstream");
        let token = self.login().await?;
        match self
            .get_json(&format!("{BITSTREAMS}/{bitstream_id}"), &[], &token)
            .await
        {
            Ok(bitstream) => {
                info!(bitstream_id, "bitstream read");
                Ok(Some(bitstream))
            }
            Err(err) if err.is_not_found() => {
                info!(bitstream_id, "no such bitstream");
                Ok(None)
            }
            Err(err) => {
                error!(bitstream_id, %err, "reading bitstream failed");
                Err(err)
            }
        }
    }

    /// Uploads a payload as a new bitstream of an item.
    ///
    /// The descriptor's name, description, and first policy (group id plus
    /// start date) travel as query parameters; the payload is the raw body.
    ///
    /// # Parameters
    ///
    /// * `item_id` - Id of the item that will own the bitstream
    /// * `descriptor` - Name, description, and access policies
    /// * `data` - The raw payload
    ///
    /// # Returns
    ///
    /// The created bitstream with its server-assigned id and checksum.
    pub async fn add_bitstream(
        &self,
        item_id: i32,
        descriptor: &Bitstream,
        data: Vec<u8>,
    ) -> Result<Bitstream> {
        debug!(item_id, size = data.len(), "adding bitstream");
        let token = self.login().await?;
        let created: Bitstream = self
            .post_bytes(
                &format!("{ITEMS}/{item_id}/bitstreams"),
                &descriptor.upload_query(),
                &token,
                data,
            )
            .await
            .map_err(|err| {
                error!(item_id, %err, "adding bitstream failed");
                err
            })?;
        info!(item_id, bitstream_id = ?created.base.id, "bitstream added");
        Ok(created)
    }

    /// Updates a bitstream's payload, descriptor, or both.
    ///
    /// The payload goes to `/bitstreams/{id}/data`, the descriptor to
    /// `/bitstreams/{id}`; each part is skipped when `None`.
    pub async fn update_bitstream(
        &self,
        bitstream_id: i32,
        descriptor: Option<&Bitstream>,
        data: Option<Vec<u8>>,
    ) -> Result<()> {
        debug!(bitstream_id, "updating bitstream");
        let token = self.login().await?;
        if let Some(data) = data {
            self.put_bytes(&format!("{BITSTREAMS}/{bitstream_id}/data"), &token, data)
                .await
                .map_err(|err| {
                    error!(bitstream_id, %err, "updating bitstream data failed");
                    err
                })?;
        }
        if let Some(descriptor) = descriptor {
            self.put_unit(&format!("{BITSTREAMS}/{bitstream_id}"), &token, descriptor)
                .await
                .map_err(|err| {
                    error!(bitstream_id, %err, "updating bitstream descriptor failed");
                    err
                })?;
        }
        info!(bitstream_id, "bitstream updated");
        Ok(())
    }

    /// Deletes a bitstream from an item.
    pub async fn delete_bitstream(&self, item_id: i32, bitstream_id: i32) -> Result<()> {
        debug!(item_id, bitstream_id, "deleting bitstream");
        let token = self.login().await?;
        self.delete_unit(
            &format!("{ITEMS}/{item_id}/bitstreams/{bitstream_id}"),
            &token,
        )
        .await
        .map_err(|err| {
            error!(item_id, bitstream_id, %err, "deleting bitstream failed");
            err
        })?;
        info!(item_id, bitstream_id, "bitstream deleted");
        Ok(())
    }

    /// Reads all bitstreams, paged.
    pub async fn read_all_bitstreams(&self, params: &ListParams) -> Result<Vec<Bitstream>> {
        debug!("reading all bitstreams");
        let token = self.login().await?;
        let bitstreams: Vec<Bitstream> = self
            .get_json(BITSTREAMS, &params.to_query(), &token)
            .await
            .map_err(|err| {
                error!(%err, "reading all bitstreams failed");
                err
            })?;
        info!(count = bitstreams.len(), "bitstreams read");
        Ok(bitstreams)
    }

    /// Reads the access policies of a bitstream.
    pub async fn bitstream_policies(&self, bitstream_id: i32) -> Result<Vec<ResourcePolicy>> {
        debug!(bitstream_id, "reading bitstream policies");
        let token = self.login().await?;
        let policies: Vec<ResourcePolicy> = self
            .get_json(&format!("{BITSTREAMS}/{bitstream_id}/policy"), &[], &token)
            .await
            .map_err(|err| {
                error!(bitstream_id, %err, "reading bitstream policies failed");
                err
            })?;
        info!(bitstream_id, count = policies.len(), "bitstream policies read");
        Ok(policies)
    }

    /// Attaches an access policy to a bitstream.
    pub async fn add_bitstream_policy(
        &self,
        bitstream_id: i32,
        policy: &ResourcePolicy,
    ) -> Result<()> {
        debug!(bitstream_id, "adding bitstream policy");
        let token = self.login().await?;
        self.post_unit(
            &format!("{BITSTREAMS}/{bitstream_id}/policy"),
            &token,
            policy,
        )
        .await
        .map_err(|err| {
            error!(bitstream_id, %err, "adding bitstream policy failed");
            err
        })?;
        info!(bitstream_id, "bitstream policy added");
        Ok(())
    }

    /// Removes an access policy from a bitstream.
    pub async fn delete_bitstream_policy(
        &self,
        bitstream_id: i32,
        policy_id: i32,
    ) -> Result<()> {
        debug!(bitstream_id, policy_id, "deleting bitstream policy");
        let token = self.login().await?;
        self.delete_unit(
            &format!("{BITSTREAMS}/{bitstream_id}/policy/{policy_id}"),
            &token,
        )
        .await
        .map_err(|err| {
            error!(bitstream_id, policy_id, %err, "deleting bitstream policy failed");
            err
        })?;
        info!(bitstream_id, policy_id, "bitstream policy deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::{mock_login, test_client};

    #[test]
    fn test_action_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Action::Read).unwrap(), r#""READ""#);
        let action: Action = serde_json::from_str(r#""WRITE""#).unwrap();
        assert_eq!(action, Action::Write);
    }

    #[test]
    fn test_policy_dates_use_iso_format() {
        let policy = ResourcePolicy::for_group(
            Action::Read,
            0,
            Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
        );
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains(r#""startDate":"2026-09-01""#));
    }

    #[test]
    fn test_upload_query_from_first_policy() {
        let descriptor = Bitstream::descriptor(
            "thesis.pdf",
            Some("Full text"),
            vec![ResourcePolicy::for_group(
                Action::Read,
                3,
                Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
            )],
        );
        assert_eq!(
            descriptor.upload_query(),
            vec![
                ("name", "thesis.pdf".to_string()),
                ("description", "Full text".to_string()),
                ("groupId", "3".to_string()),
                ("year", "2026".to_string()),
                ("month", "9".to_string()),
                ("day", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_upload_query_defaults_name_and_description_to_empty() {
        let descriptor = Bitstream::default();
        assert_eq!(
            descriptor.upload_query(),
            vec![
                ("name", String::new()),
                ("description", String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_bitstream_sends_raw_body_and_query() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("POST", "/items/21/bitstreams")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("name".into(), "thesis.pdf".into()),
                mockito::Matcher::UrlEncoded("groupId".into(), "0".into()),
                mockito::Matcher::UrlEncoded("year".into(), "2026".into()),
            ]))
            .match_body("%PDF-1.4")
            .with_status(200)
            .with_body(r#"{"id":31,"name":"thesis.pdf","checkSum":{"value":"abc","checkSumAlgorithm":"MD5"}}"#)
            .create_async()
            .await;

        let descriptor = Bitstream::descriptor(
            "thesis.pdf",
            None,
            vec![ResourcePolicy::for_group(
                Action::Read,
                0,
                Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            )],
        );
        let client = test_client(&server);
        let created = client
            .add_bitstream(21, &descriptor, b"%PDF-1.4".to_vec())
            .await
            .unwrap();
        assert_eq!(created.base.id, Some(31));
        assert_eq!(
            created.check_sum.unwrap().check_sum_algorithm.as_deref(),
            Some("MD5")
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_bitstream_both_parts() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let data_mock = server
            .mock("PUT", "/bitstreams/31/data")
            .with_status(200)
            .create_async()
            .await;
        let descriptor_mock = server
            .mock("PUT", "/bitstreams/31")
            .with_status(200)
            .create_async()
            .await;

        let descriptor = Bitstream::descriptor("thesis-v2.pdf", None, Vec::new());
        let client = test_client(&server);
        client
            .update_bitstream(31, Some(&descriptor), Some(b"%PDF-1.5".to_vec()))
            .await
            .unwrap();
        data_mock.assert_async().await;
        descriptor_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_bitstream_missing_is_none() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("GET", "/bitstreams/999")
            .with_status(404)
            .create_async()
            .await;

        let client = test_client(&server);
        assert!(client.find_bitstream_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bitstream_policies_roundtrip() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("GET", "/bitstreams/31/policy")
            .with_status(200)
            .with_body(
                r#"[{"id":41,"action":"READ","groupId":0,"startDate":"2026-09-01"}]"#,
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let policies = client.bitstream_policies(31).await.unwrap();
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].action, Some(Action::Read));
        assert_eq!(
            policies[0].start_date,
            Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
        );
    }
}
