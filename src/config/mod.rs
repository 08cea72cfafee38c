//
//  dspace-rest-client
//  config/mod.rs
//

//! # Client Configuration
//!
//! This module provides the [`Configuration`] struct that describes how to
//! reach and authenticate against a DSpace REST endpoint, plus loading from a
//! TOML file for deployments that keep connection settings out of code.
//!
//! ## Overview
//!
//! A configuration carries:
//!
//! - `endpoint_url` - Base URL of the REST API (e.g. `https://repo.example.org/rest`)
//! - `username` / `password` - Credentials of the e-person used for `login`
//! - `max_total` / `max_per_route` - Optional connection-pool sizing, only
//!   honoured by the pooled transport
//! - `accept_invalid_certs` - Opt-in switch for self-signed server certificates
//!
//! ## Example
//!
//! ```rust
//! use dspace_rest_client::Configuration;
//!
//! let config = Configuration::new(
//!     "https://repo.example.org/rest",
//!     "admin@example.org",
//!     "secret",
//! )
//! .with_pool(Some(20), Some(10));
//!
//! assert_eq!(config.max_per_route, Some(10));
//! ```
//!
//! ## File Format
//!
//! ```toml
//! endpoint_url = "https://repo.example.org/rest"
//! username = "admin@example.org"
//! password = "secret"
//! max_total = 20
//! max_per_route = 10
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not valid TOML or misses required keys.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Connection and authentication settings for a DSpace REST endpoint.
///
/// The pool sizing fields only matter for the pooled transport; the basic
/// transport ignores them. TLS verification is on by default and must be
/// disabled explicitly for servers with self-signed certificates.
///
/// # Example
///
/// ```rust
/// use dspace_rest_client::Configuration;
///
/// let config = Configuration::new("https://repo.example.org/rest", "user", "pass");
/// assert!(!config.accept_invalid_certs);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// Base URL of the REST API, with or without a trailing slash.
    pub endpoint_url: String,

    /// E-mail address of the e-person used for authentication.
    pub username: String,

    /// Password of the e-person used for authentication.
    pub password: String,

    /// Upper bound on pooled connections kept across all routes.
    #[serde(default)]
    pub max_total: Option<usize>,

    /// Upper bound on pooled idle connections kept per host.
    #[serde(default)]
    pub max_per_route: Option<usize>,

    /// Accept TLS certificates that fail verification. Off by default.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Configuration {
    /// Creates a configuration with endpoint and credentials, no pool sizing.
    ///
    /// # Parameters
    ///
    /// * `endpoint_url` - Base URL of the REST API
    /// * `username` - E-person e-mail used for `login`
    /// * `password` - E-person password
    pub fn new(
        endpoint_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            username: username.into(),
            password: password.into(),
            max_total: None,
            max_per_route: None,
            accept_invalid_certs: false,
        }
    }

    /// Sets connection-pool sizing for the pooled transport.
    pub fn with_pool(mut self, max_total: Option<usize>, max_per_route: Option<usize>) -> Self {
        self.max_total = max_total;
        self.max_per_route = max_per_route;
        self
    }

    /// Accepts TLS certificates that fail verification.
    ///
    /// Only intended for test instances with self-signed certificates; leave
    /// this off against production endpoints.
    pub fn with_invalid_certs(mut self) -> Self {
        self.accept_invalid_certs = true;
        self
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to the TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML or lacks the required
    /// `endpoint_url`, `username`, or `password` keys.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use dspace_rest_client::Configuration;
    ///
    /// let config = Configuration::from_file("dspace-restapi.toml")?;
    /// # Ok::<(), dspace_rest_client::config::ConfigError>(())
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = Configuration::new("https://repo.example.org/rest", "user", "pass");
        assert_eq!(config.endpoint_url, "https://repo.example.org/rest");
        assert_eq!(config.max_total, None);
        assert_eq!(config.max_per_route, None);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
endpoint_url = "https://repo.example.org/rest"
username = "admin@example.org"
password = "secret"
max_total = 20
max_per_route = 10
"#
        )
        .unwrap();

        let config = Configuration::from_file(file.path()).unwrap();
        assert_eq!(config.username, "admin@example.org");
        assert_eq!(config.max_total, Some(20));
        assert_eq!(config.max_per_route, Some(10));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_from_file_missing_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"endpoint_url = "https://repo.example.org/rest""#).unwrap();

        let result = Configuration::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file_missing_file() {
        let result = Configuration::from_file("/nonexistent/dspace-restapi.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
