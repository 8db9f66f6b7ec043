//! Client configuration.
//!
//! Settings come from three layers, later ones overriding earlier ones:
//!
//! 1. A TOML file (optional):
//!
//!    ```toml
//!    base_url = "https://zentral.example.com/api/"
//!    token = "..."
//!    timeout_secs = 30
//!    connect_timeout_secs = 5
//!    ```
//!
//! 2. The `ZENTRAL_BASE_URL` and `ZENTRAL_TOKEN` environment variables.
//! 3. Explicit overrides (the CLI flags).

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::client::{
    Client, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, build_http_client,
};
use crate::error::{Error, Result};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "ZENTRAL_BASE_URL";
/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "ZENTRAL_TOKEN";

/// Connection settings for the Zentral API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// API base URL. Must end with `/`.
    #[serde(default)]
    pub base_url: String,
    /// API token.
    #[serde(default)]
    pub token: String,
    /// Overall request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// TCP + TLS connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("invalid configuration: {e}")))
    }

    /// Reads a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Loads the optional file at `path`, then applies the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overrides settings from the environment. `lookup` is `std::env::var`
    /// in production and a map in tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.token = token;
        }
    }

    /// Overall request timeout, falling back to the library default.
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Connect timeout, falling back to the library default.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT)
    }

    /// Builds the HTTP transport with the configured timeouts.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        build_http_client(self.connect_timeout(), self.timeout())
    }

    /// Builds an API client.
    ///
    /// # Errors
    ///
    /// `Error::Config` if the base URL or token is missing or invalid.
    pub fn client(&self) -> Result<Client> {
        if self.base_url.is_empty() {
            return Err(Error::Config(format!(
                "no base URL configured (set {BASE_URL_ENV} or base_url)"
            )));
        }
        if self.token.is_empty() {
            return Err(Error::Config(format!(
                "no token configured (set {TOKEN_ENV} or token)"
            )));
        }
        Client::new(Some(self.http_client()?), &self.base_url, &self.token)
    }
}
