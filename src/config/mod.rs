//
//  goinstant-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module holds the client configuration and its on-disk form.
//!
//! ## Overview
//!
//! - [`ClientConfig`]: everything a [`GoInstantClient`](crate::api::GoInstantClient)
//!   needs: endpoint, API version, credentials, extra headers, TLS and proxy settings
//! - [`ConfigFile`]: the TOML file used by the `gi` binary, wrapping a
//!   `ClientConfig` under a `[client]` table
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/goinstant/config.toml`
//! - **macOS**: `~/Library/Application Support/goinstant/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\goinstant\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [client]
//! client_id = "my-client-id"
//! client_secret = "my-client-secret"
//! endpoint = "https://api.goinstant.net"
//! version = "v1"
//! strict_ssl = true
//!
//! [client.headers]
//! X-Request-Source = "ops-scripts"
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use goinstant_api::config::ClientConfig;
//!
//! let config = ClientConfig {
//!     endpoint: Some("https://x".to_string()),
//!     version: Some("v2".to_string()),
//!     access_token: Some("token".to_string()),
//!     ..Default::default()
//! };
//!
//! config.validate().unwrap();
//! assert_eq!(config.base_url(), "https://x/v2");
//! ```

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::common::ApiError;
use crate::auth::{AccessToken, Credentials};

/// Host used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.goinstant.net";

/// API version used when none is configured.
pub const DEFAULT_VERSION: &str = "v1";

/// Configuration for a GoInstant API client.
///
/// All fields are optional in the struct so that partial configurations
/// (a file, environment variables, command-line flags) can be layered with
/// [`merge`](Self::merge); [`validate`](Self::validate) enforces the rules
/// once the final value is assembled.
///
/// # Validation Rules
///
/// | Configuration | Result |
/// |---------------|--------|
/// | `client_id` and `client_secret` | valid |
/// | `access_token` only | valid |
/// | all three | valid |
/// | `client_id` without `client_secret` | `client_secret must also be defined` |
/// | `client_secret` without `client_id` | `client_id must also be defined` |
/// | none of them | `access_token, or client_id and client_secret required` |
///
/// # Example
///
/// ```rust
/// use goinstant_api::config::ClientConfig;
///
/// let partial = ClientConfig {
///     client_id: Some("id".to_string()),
///     ..Default::default()
/// };
///
/// let err = partial.validate().unwrap_err();
/// assert_eq!(err.to_string(), "client_secret must also be defined");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OAuth client identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// OAuth client secret, paired with `client_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Pre-issued bearer token. When set, no token exchange happens until the
    /// server rejects it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// API version segment appended to the endpoint. Defaults to `v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// API host. Defaults to `https://api.goinstant.net`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Validate TLS certificates. Off unless enabled.
    #[serde(default, alias = "strictSSL")]
    pub strict_ssl: bool,

    /// Proxy URL for all requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Extra headers sent with every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Checks the credential rules and the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] describing the first rule that fails.
    pub fn validate(&self) -> Result<(), ApiError> {
        match (&self.client_id, &self.client_secret) {
            (Some(_), None) => {
                return Err(ApiError::Config(
                    "client_secret must also be defined".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(ApiError::Config(
                    "client_id must also be defined".to_string(),
                ))
            }
            (None, None) if self.initial_token().is_none() => {
                return Err(ApiError::Config(
                    "access_token, or client_id and client_secret required".to_string(),
                ))
            }
            _ => {}
        }

        Url::parse(&self.base_url()).map_err(|e| {
            ApiError::Config(format!("endpoint must be a valid URL: {}", e))
        })?;

        Ok(())
    }

    /// The credential pair, when both halves are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some(Credentials::new(id, secret)),
            _ => None,
        }
    }

    /// The pre-supplied token, if any. An empty token counts as none.
    pub fn initial_token(&self) -> Option<AccessToken> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
    }

    /// Effective base URL: endpoint and version joined by a single `/`.
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let version = self.version.as_deref().unwrap_or(DEFAULT_VERSION);
        format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            version.trim_matches('/')
        )
    }

    /// Layers `overrides` on top of `self`.
    ///
    /// Options set in `overrides` win, `strict_ssl` is enabled if either side
    /// enables it, and header maps are combined with `overrides` winning on
    /// conflicts. A plain `bool` cannot say "unset", so callers that need to
    /// turn `strict_ssl` off assign it after merging (as `gi --strict-ssl=false`
    /// does).
    pub fn merge(mut self, overrides: ClientConfig) -> Self {
        self.client_id = overrides.client_id.or(self.client_id);
        self.client_secret = overrides.client_secret.or(self.client_secret);
        self.access_token = overrides.access_token.or(self.access_token);
        self.version = overrides.version.or(self.version);
        self.endpoint = overrides.endpoint.or(self.endpoint);
        self.strict_ssl |= overrides.strict_ssl;
        self.proxy = overrides.proxy.or(self.proxy);
        self.headers.extend(overrides.headers);
        self
    }

    /// A copy safe for display, with the secret and token masked.
    pub fn redacted(&self) -> Self {
        let mask = |value: &Option<String>| value.as_ref().map(|_| "********".to_string());
        Self {
            client_secret: mask(&self.client_secret),
            access_token: mask(&self.access_token),
            ..self.clone()
        }
    }

    /// Gets a setting by key, as used by `gi config`. Headers are addressed
    /// as `headers.NAME`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "client_id" => self.client_id.clone(),
            "client_secret" => self.client_secret.clone(),
            "access_token" => self.access_token.clone(),
            "version" => self.version.clone(),
            "endpoint" => self.endpoint.clone(),
            "strict_ssl" => Some(self.strict_ssl.to_string()),
            "proxy" => self.proxy.clone(),
            _ => key
                .strip_prefix("headers.")
                .and_then(|name| self.headers.get(name).cloned()),
        }
    }

    /// Sets a setting by key. Returns `false` for unknown keys or a
    /// `strict_ssl` value that is not a boolean.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "client_id" => self.client_id = Some(value),
            "client_secret" => self.client_secret = Some(value),
            "access_token" => self.access_token = Some(value),
            "version" => self.version = Some(value),
            "endpoint" => self.endpoint = Some(value),
            "proxy" => self.proxy = Some(value),
            "strict_ssl" => match value.parse() {
                Ok(strict) => self.strict_ssl = strict,
                Err(_) => return false,
            },
            _ => match key.strip_prefix("headers.") {
                Some(name) if !name.is_empty() => {
                    self.headers.insert(name.to_string(), value);
                }
                _ => return false,
            },
        }
        true
    }

    /// Clears a setting by key. Returns `false` for unknown keys.
    pub fn unset(&mut self, key: &str) -> bool {
        match key {
            "client_id" => self.client_id = None,
            "client_secret" => self.client_secret = None,
            "access_token" => self.access_token = None,
            "version" => self.version = None,
            "endpoint" => self.endpoint = None,
            "proxy" => self.proxy = None,
            "strict_ssl" => self.strict_ssl = false,
            _ => match key.strip_prefix("headers.") {
                Some(name) => return self.headers.remove(name).is_some(),
                None => return false,
            },
        }
        true
    }
}

/// Contents of the `gi` configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub client: ClientConfig,
}

impl ConfigFile {
    /// Loads the file from the default location, or defaults if it is missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the file at `path`, or defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves the file to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Default path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "goinstant")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
