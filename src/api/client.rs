//
//  dspace-rest-client
//  api/client.rs
//

//! # HTTP Client Core for the DSpace REST API
//!
//! This module provides [`DspaceClient`], the core HTTP client every typed
//! operation runs through. It handles transport selection, authentication,
//! and request/response serialization.
//!
//! ## Features
//!
//! - Choice between a basic and a connection-pooled transport
//! - Token authentication via the `rest-dspace-token` header
//! - JSON serialization/deserialization
//! - HTTP status mapping to [`ApiError`](crate::api::common::ApiError)
//! - Custom User-Agent header
//!
//! ## Transports
//!
//! The remote API is stateless apart from the login token, so the two
//! transports differ only in how the underlying HTTP client is configured:
//!
//! | Transport | Behaviour |
//! |-----------|-----------|
//! | [`Transport::Basic`] | Stock client, library defaults |
//! | [`Transport::Pooled`] | Idle-connection cap per host, 120 s connect timeout |
//!
//! ## Example
//!
//! ```rust,no_run
//! use dspace_rest_client::{Configuration, DspaceClient, Transport};
//!
//! # async fn example() -> dspace_rest_client::api::common::Result<()> {
//! let config = Configuration::new("https://repo.example.org/rest", "user", "pass")
//!     .with_pool(Some(20), Some(10));
//! let client = DspaceClient::with_transport(config, Transport::Pooled)?;
//!
//! let token = client.login().await?;
//! client.logout(&token).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::api::common::{ApiError, Result};
use crate::config::Configuration;

/// Header carrying the authentication token on every authenticated request.
pub(crate) const HEADER_TOKEN: &str = "rest-dspace-token";

/// Path segment for community resources.
pub(crate) const COMMUNITIES: &str = "/communities";
/// Path segment for collection resources.
pub(crate) const COLLECTIONS: &str = "/collections";
/// Path segment for item resources.
pub(crate) const ITEMS: &str = "/items";
/// Path segment for bitstream resources.
pub(crate) const BITSTREAMS: &str = "/bitstreams";
/// Path segment for item metadata.
pub(crate) const METADATA: &str = "/metadata";
/// Path segment for authority-person resources.
pub(crate) const AUTHORITY_PERSONS: &str = "/authoritypersons";
/// Path segment for authorities nested under an authority person.
pub(crate) const AUTHORITIES: &str = "/authorities";

/// Connect timeout applied by the pooled transport.
const POOLED_CONNECT_TIMEOUT: Duration = Duration::from_secs(120);

/// Selects how the underlying HTTP client is configured.
///
/// # Variants
///
/// * `Basic` - Stock client with library defaults; fine for scripts and
///   low-volume use.
/// * `Pooled` - Applies the pool sizing from [`Configuration`] plus a
///   generous connect timeout; intended for batch ingest and other
///   higher-throughput callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Stock HTTP client with library defaults.
    #[default]
    Basic,

    /// Connection-pool tuning from the configuration applied to the client.
    Pooled,
}

/// Login payload sent to the `/login` endpoint.
#[derive(Serialize)]
struct Credentials<'a> {
    /// E-person e-mail address.
    email: &'a str,
    /// E-person password.
    password: &'a str,
}

/// The typed client for a DSpace REST endpoint.
///
/// A client owns its HTTP transport and configuration. Every typed operation
/// requests a fresh token via [`login`](Self::login), attaches it as the
/// `rest-dspace-token` header, dispatches the request, and maps any non-2xx
/// status to an [`ApiError`]. There is no token caching, retry, or other
/// protocol state beyond that.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use dspace_rest_client::{Configuration, DspaceClient};
///
/// let config = Configuration::new("https://repo.example.org/rest", "user", "pass");
///
/// // Stock transport
/// let client = DspaceClient::basic(config.clone())?;
///
/// // Pooled transport
/// let pooled = DspaceClient::pooled(config)?;
/// # Ok::<(), dspace_rest_client::api::common::ApiError>(())
/// ```
pub struct DspaceClient {
    /// The underlying HTTP client.
    http: Client,
    /// Normalized endpoint URL, no trailing slash.
    endpoint: String,
    /// Connection and credential settings.
    config: Configuration,
}

impl DspaceClient {
    /// Creates a client with the basic transport.
    ///
    /// Equivalent to [`with_transport`](Self::with_transport) with
    /// [`Transport::Basic`].
    pub fn basic(config: Configuration) -> Result<Self> {
        Self::with_transport(config, Transport::Basic)
    }

    /// Creates a client with the pooled transport.
    ///
    /// Equivalent to [`with_transport`](Self::with_transport) with
    /// [`Transport::Pooled`].
    pub fn pooled(config: Configuration) -> Result<Self> {
        Self::with_transport(config, Transport::Pooled)
    }

    /// Creates a client with the given transport.
    ///
    /// The endpoint URL is validated and normalized here: a trailing slash is
    /// stripped so path segments can be appended uniformly.
    ///
    /// # Parameters
    ///
    /// * `config` - Endpoint, credentials, and pool sizing
    /// * `transport` - Which transport configuration to apply
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] if the endpoint URL does not
    /// parse, or [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn with_transport(config: Configuration, transport: Transport) -> Result<Self> {
        Url::parse(&config.endpoint_url)?;
        let endpoint = config.endpoint_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder()
            .user_agent(format!("dspace-rest-client/{}", crate::VERSION))
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Transport::Pooled = transport {
            if let Some(per_route) = config.max_per_route.or(config.max_total) {
                builder = builder.pool_max_idle_per_host(per_route);
            }
            builder = builder.connect_timeout(POOLED_CONNECT_TIMEOUT);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint,
            config,
        })
    }

    /// Returns the normalized endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Authenticates against the endpoint and returns a token.
    ///
    /// Posts the configured credentials to `/login`; the server answers with
    /// the token as plain text. Typed operations call this internally before
    /// every request, but it is public so callers can drive
    /// [`logout`](Self::logout) or attach the token to out-of-band requests.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotAuthorized`] for rejected credentials, or any
    /// other status/transport error mapped as usual.
    pub async fn login(&self) -> Result<String> {
        debug!(username = %self.config.username, "requesting authentication token");
        let credentials = Credentials {
            email: &self.config.username,
            password: &self.config.password,
        };
        let response = self
            .http
            .post(self.url("/login"))
            .header(header::ACCEPT, "application/json")
            .json(&credentials)
            .send()
            .await?;
        let response = Self::check(response).await.map_err(|err| {
            error!(%err, "requesting authentication token failed");
            err
        })?;
        Ok(response.text().await?.trim().to_string())
    }

    /// Invalidates a previously issued token.
    ///
    /// # Parameters
    ///
    /// * `token` - A token obtained from [`login`](Self::login)
    pub async fn logout(&self, token: &str) -> Result<()> {
        debug!("invalidating authentication token");
        let response = self
            .http
            .post(self.url("/logout"))
            .header(HEADER_TOKEN, token)
            .send()
            .await?;
        Self::check(response).await.map_err(|err| {
            error!(%err, "invalidating authentication token failed");
            err
        })?;
        Ok(())
    }

    /// Builds a full URL from a server-relative path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Maps a non-success response to an [`ApiError`], consuming its body.
    pub(crate) async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, body))
    }

    fn authed(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header(HEADER_TOKEN, token)
            .header(header::ACCEPT, "application/json")
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: &str,
    ) -> Result<T> {
        let request = self.authed(self.http.get(self.url(path)).query(query), token);
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// GET a plain-text resource.
    pub(crate) async fn get_text(&self, path: &str, token: &str) -> Result<String> {
        let request = self.authed(self.http.get(self.url(path)), token);
        let response = Self::check(request.send().await?).await?;
        Ok(response.text().await?)
    }

    /// POST a JSON body and deserialize the JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.authed(self.http.post(self.url(path)).query(query).json(body), token);
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body, ignoring the response body.
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<()> {
        let request = self.authed(self.http.post(self.url(path)).json(body), token);
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// POST raw bytes and deserialize the JSON response.
    pub(crate) async fn post_bytes<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: &str,
        body: Vec<u8>,
    ) -> Result<T> {
        let request = self.authed(self.http.post(self.url(path)).query(query).body(body), token);
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// PUT a JSON body, ignoring the response body.
    pub(crate) async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<()> {
        let request = self.authed(self.http.put(self.url(path)).json(body), token);
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// PUT raw bytes, ignoring the response body.
    pub(crate) async fn put_bytes(&self, path: &str, token: &str, body: Vec<u8>) -> Result<()> {
        let request = self.authed(self.http.put(self.url(path)).body(body), token);
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// DELETE a resource, ignoring the response body.
    pub(crate) async fn delete_unit(&self, path: &str, token: &str) -> Result<()> {
        let request = self.authed(self.http.delete(self.url(path)), token);
        Self::check(request.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Client pointed at a mockito server, with pool sizing to exercise the
    /// pooled transport in at least one path.
    pub(crate) fn test_client(server: &mockito::Server) -> DspaceClient {
        let config = Configuration::new(server.url(), "admin@example.org", "secret");
        DspaceClient::basic(config).unwrap()
    }

    /// Standard login expectation used by operation tests.
    pub(crate) async fn mock_login(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("POST", "/login")
            .match_header("content-type", mockito::Matcher::Regex("application/json".into()))
            .with_status(200)
            .with_body("test-token")
            .create_async()
            .await
    }

    #[test]
    fn test_endpoint_is_normalized() {
        let config = Configuration::new("https://repo.example.org/rest/", "user", "pass");
        let client = DspaceClient::basic(config).unwrap();
        assert_eq!(client.endpoint(), "https://repo.example.org/rest");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = Configuration::new("not a url", "user", "pass");
        assert!(matches!(
            DspaceClient::basic(config),
            Err(ApiError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_pooled_transport_builds_with_sizing() {
        let config = Configuration::new("https://repo.example.org/rest", "user", "pass")
            .with_pool(Some(20), Some(10));
        assert!(DspaceClient::pooled(config).is_ok());
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/login")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "email": "admin@example.org",
                "password": "secret",
            })))
            .with_status(200)
            .with_body("abc123\n")
            .create_async()
            .await;

        let client = test_client(&server);
        let token = client.login().await.unwrap();
        assert_eq!(token, "abc123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_rejected_maps_to_not_authorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(401)
            .with_body("bad credentials")
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.login().await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthorized(body) if body == "bad credentials"));
    }

    #[tokio::test]
    async fn test_logout_sends_token_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/logout")
            .match_header(HEADER_TOKEN, "abc123")
            .with_status(200)
            .create_async()
            .await;

        let client = test_client(&server);
        client.logout("abc123").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_maps_to_internal_server() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = test_client(&server);
        assert!(matches!(
            client.login().await.unwrap_err(),
            ApiError::InternalServer(body) if body == "boom"
        ));
    }
}
