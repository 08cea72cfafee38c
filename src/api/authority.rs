//
//  dspace-rest-client
//  api/authority.rs
//

//! # Authority-Person Operations
//!
//! Authority persons are external identity records used to disambiguate
//! names across items: one person record carries a set of [`Authority`]
//! entries, each pairing an authority name (`orcid`, `researcherid`, an
//! institutional scheme) with that person's key in it. This sub-API lives
//! beside the repository resources under `/authoritypersons` and works on
//! string uids rather than numeric ids.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/authoritypersons` | [`read_authority_persons`](DspaceClient::read_authority_persons) |
//! | GET | `/authoritypersons/{uid}` | [`read_authority_person`](DspaceClient::read_authority_person) |
//! | GET | `/authoritypersons/{uid}/authorities` | [`read_authority_person_authorities`](DspaceClient::read_authority_person_authorities) |
//! | GET | `/authoritypersons/{uid}/authorities/{name}` | [`read_authority_key`](DspaceClient::read_authority_key) |
//! | POST | `/authoritypersons` | [`create_authority_person`](DspaceClient::create_authority_person) |
//! | POST | `/authoritypersons/{uid}/authorities` | [`create_authority`](DspaceClient::create_authority) |
//! | PUT | `/authoritypersons/{uid}` | [`update_authority_person`](DspaceClient::update_authority_person) |
//! | PUT | `/authoritypersons/{uid}/authorities/{name}` | [`update_authority`](DspaceClient::update_authority) |
//! | DELETE | `/authoritypersons/{uid}` | [`delete_authority_person`](DspaceClient::delete_authority_person) |
//! | DELETE | `/authoritypersons/{uid}/authorities/{name}` | [`delete_authority`](DspaceClient::delete_authority) |
//! | POST | `/authoritypersons/search-by-authority` | [`search_person_by_authority`](DspaceClient::search_person_by_authority) |
//! | POST | `/authoritypersons/search-by-name` | [`search_persons_by_name`](DspaceClient::search_persons_by_name) |

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::client::{DspaceClient, AUTHORITIES, AUTHORITY_PERSONS};
use crate::api::common::{ListParams, Result};

/// One authority entry of a person: a scheme name and the person's key in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Authority {
    /// Name of the authority scheme (`orcid`, `researcherid`, ...).
    pub name: Option<String>,

    /// The person's key within the scheme.
    pub key: Option<String>,
}

impl Authority {
    /// Creates an authority entry from scheme name and key.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            key: Some(key.into()),
        }
    }
}

/// An identity record used for name disambiguation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorityPerson {
    /// Unique identifier of the person record.
    pub uid: Option<String>,

    /// Family name.
    pub last_name: Option<String>,

    /// Given name.
    pub first_name: Option<String>,

    /// Authority entries of the person.
    pub authorities: Vec<Authority>,

    /// Creation timestamp, as reported by the server.
    pub created: Option<String>,
}

impl DspaceClient {
    /// Reads all authority persons, paged.
    pub async fn read_authority_persons(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<AuthorityPerson>> {
        debug!("reading authority persons");
        let token = self.login().await?;
        let persons: Vec<AuthorityPerson> = self
            .get_json(
                AUTHORITY_PERSONS,
                &ListParams::paging(limit, offset).to_query(),
                &token,
            )
            .await
            .map_err(|err| {
                error!(%err, "reading authority persons failed");
                err
            })?;
        info!(count = persons.len(), "authority persons read");
        Ok(persons)
    }

    /// Reads a single authority person by uid.
    pub async fn read_authority_person(&self, uid: &str) -> Result<AuthorityPerson> {
        debug!(uid, "reading authority person");
        let token = self.login().await?;
        let person = self
            .get_json(&format!("{AUTHORITY_PERSONS}/{uid}"), &[], &token)
            .await
            .map_err(|err| {
                error!(uid, %err, "reading authority person failed");
                err
            })?;
        info!(uid, "authority person read");
        Ok(person)
    }

    /// Reads the authority entries of a person, paged.
    pub async fn read_authority_person_authorities(
        &self,
        uid: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Authority>> {
        debug!(uid, "reading person authorities");
        let token = self.login().await?;
        let authorities: Vec<Authority> = self
            .get_json(
                &format!("{AUTHORITY_PERSONS}/{uid}{AUTHORITIES}"),
                &ListParams::paging(limit, offset).to_query(),
                &token,
            )
            .await
            .map_err(|err| {
                error!(uid, %err, "reading person authorities failed");
                err
            })?;
        info!(uid, count = authorities.len(), "person authorities read");
        Ok(authorities)
    }

    /// Reads a person's key in one authority scheme, as plain text.
    pub async fn read_authority_key(&self, uid: &str, authority_name: &str) -> Result<String> {
        debug!(uid, authority_name, "reading authority key");
        let token = self.login().await?;
        let key = self
            .get_text(
                &format!("{AUTHORITY_PERSONS}/{uid}{AUTHORITIES}/{authority_name}"),
                &token,
            )
            .await
            .map_err(|err| {
                error!(uid, authority_name, %err, "reading authority key failed");
                err
            })?;
        info!(uid, authority_name, "authority key read");
        Ok(key)
    }

    /// Creates an authority person.
    pub async fn create_authority_person(&self, person: &AuthorityPerson) -> Result<()> {
        debug!(uid = ?person.uid, "creating authority person");
        let token = self.login().await?;
        self.post_unit(AUTHORITY_PERSONS, &token, person)
            .await
            .map_err(|err| {
                error!(uid = ?person.uid, %err, "creating authority person failed");
                err
            })?;
        info!(uid = ?person.uid, "authority person created");
        Ok(())
    }

    /// Adds an authority entry to a person.
    pub async fn create_authority(&self, uid: &str, authority: &Authority) -> Result<()> {
        debug!(uid, name = ?authority.name, "creating authority");
        let token = self.login().await?;
        self.post_unit(
            &format!("{AUTHORITY_PERSONS}/{uid}{AUTHORITIES}"),
            &token,
            authority,
        )
        .await
        .map_err(|err| {
            error!(uid, %err, "creating authority failed");
            err
        })?;
        info!(uid, name = ?authority.name, "authority created");
        Ok(())
    }

    /// Updates an authority person in place.
    pub async fn update_authority_person(
        &self,
        uid: &str,
        person: &AuthorityPerson,
    ) -> Result<()> {
        debug!(uid, "updating authority person");
        let token = self.login().await?;
        self.put_unit(&format!("{AUTHORITY_PERSONS}/{uid}"), &token, person)
            .await
            .map_err(|err| {
                error!(uid, %err, "updating authority person failed");
                err
            })?;
        info!(uid, "authority person updated");
        Ok(())
    }

    /// Replaces one authority entry of a person.
    pub async fn update_authority(
        &self,
        uid: &str,
        authority_name: &str,
        authority: &Authority,
    ) -> Result<()> {
        debug!(uid, authority_name, "updating authority");
        let token = self.login().await?;
        self.put_unit(
            &format!("{AUTHORITY_PERSONS}/{uid}{AUTHORITIES}/{authority_name}"),
            &token,
            authority,
        )
        .await
        .map_err(|err| {
            error!(uid, authority_name, %err, "updating authority failed");
            err
        })?;
        info!(uid, authority_name, "authority updated");
        Ok(())
    }

    /// Deletes an authority person.
    pub async fn delete_authority_person(&self, uid: &str) -> Result<()> {
        debug!(uid, "deleting authority person");
        let token = self.login().await?;
        self.delete_unit(&format!("{AUTHORITY_PERSONS}/{uid}"), &token)
            .await
            .map_err(|err| {
                error!(uid, %err, "deleting authority person failed");
                err
            })?;
        info!(uid, "authority person deleted");
        Ok(())
    }

    /// Removes one authority entry from a person.
    pub async fn delete_authority(&self, uid: &str, authority_name: &str) -> Result<()> {
        debug!(uid, authority_name, "deleting authority");
        let token = self.login().await?;
        self.delete_unit(
            &format!("{AUTHORITY_PERSONS}/{uid}{AUTHORITIES}/{authority_name}"),
            &token,
        )
        .await
        .map_err(|err| {
            error!(uid, authority_name, %err, "deleting authority failed");
            err
        })?;
        info!(uid, authority_name, "authority deleted");
        Ok(())
    }

    /// Finds the person holding an exact authority entry.
    pub async fn search_person_by_authority(
        &self,
        authority: &Authority,
    ) -> Result<AuthorityPerson> {
        debug!(name = ?authority.name, "searching person by authority");
        let token = self.login().await?;
        let person: AuthorityPerson = self
            .post_json(
                &format!("{AUTHORITY_PERSONS}/search-by-authority"),
                &[],
                &token,
                authority,
            )
            .await
            .map_err(|err| {
                error!(name = ?authority.name, %err, "searching person by authority failed");
                err
            })?;
        info!(uid = ?person.uid, "person found by authority");
        Ok(person)
    }

    /// Finds persons by name, paged.
    ///
    /// The name travels in the request body; `limit` and `offset` page the
    /// result like every other list endpoint.
    pub async fn search_persons_by_name(
        &self,
        name: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<AuthorityPerson>> {
        debug!(name, "searching persons by name");
        let token = self.login().await?;
        let persons: Vec<AuthorityPerson> = self
            .post_json(
                &format!("{AUTHORITY_PERSONS}/search-by-name"),
                &ListParams::paging(limit, offset).to_query(),
                &token,
                name,
            )
            .await
            .map_err(|err| {
                error!(name, %err, "searching persons by name failed");
                err
            })?;
        info!(name, count = persons.len(), "persons found by name");
        Ok(persons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::{mock_login, test_client};

    #[tokio::test]
    async fn test_read_authority_person() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("GET", "/authoritypersons/p-123")
            .with_status(200)
            .with_body(
                r#"{
                    "uid": "p-123",
                    "lastName": "Novak",
                    "firstName": "Jan",
                    "authorities": [{"name": "orcid", "key": "0000-0001-2345-6789"}]
                }"#,
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let person = client.read_authority_person("p-123").await.unwrap();
        assert_eq!(person.last_name.as_deref(), Some("Novak"));
        assert_eq!(person.authorities[0].name.as_deref(), Some("orcid"));
    }

    #[tokio::test]
    async fn test_read_authority_key_is_plain_text() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        server
            .mock("GET", "/authoritypersons/p-123/authorities/orcid")
            .with_status(200)
            .with_body("0000-0001-2345-6789")
            .create_async()
            .await;

        let client = test_client(&server);
        let key = client.read_authority_key("p-123", "orcid").await.unwrap();
        assert_eq!(key, "0000-0001-2345-6789");
    }

    #[tokio::test]
    async fn test_search_person_by_authority() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("POST", "/authoritypersons/search-by-authority")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "name": "orcid",
                "key": "0000-0001-2345-6789",
            })))
            .with_status(200)
            .with_body(r#"{"uid":"p-123","lastName":"Novak"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let person = client
            .search_person_by_authority(&Authority::new("orcid", "0000-0001-2345-6789"))
            .await
            .unwrap();
        assert_eq!(person.uid.as_deref(), Some("p-123"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_persons_by_name_paged() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("POST", "/authoritypersons/search-by-name")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("limit".into(), "10".into()),
                mockito::Matcher::UrlEncoded("offset".into(), "0".into()),
            ]))
            .match_body(mockito::Matcher::Json(serde_json::json!("Novak")))
            .with_status(200)
            .with_body(r#"[{"uid":"p-123"},{"uid":"p-456"}]"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let persons = client
            .search_persons_by_name("Novak", Some(10), Some(0))
            .await
            .unwrap();
        assert_eq!(persons.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_authority() {
        let mut server = mockito::Server::new_async().await;
        mock_login(&mut server).await;
        let mock = server
            .mock("DELETE", "/authoritypersons/p-123/authorities/orcid")
            .match_header("rest-dspace-token", "test-token")
            .with_status(200)
            .create_async()
            .await;

        let client = test_client(&server);
        client.delete_authority("p-123", "orcid").await.unwrap();
        mock.assert_async().await;
    }
}
