//
//  goinstant-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GoInstant API Client Library
//!
//! A client for the GoInstant REST API, plus the `gi` command-line tool
//! built on top of it.
//!
//! ## Overview
//!
//! The library wraps the API's OAuth-style client-credentials flow and its
//! body-based error reporting behind one request pipeline, and exposes the
//! API's resources (apps, rooms, developers, teams, keys and channels) as
//! small builders.
//!
//! ## Features
//!
//! - **Transparent Authentication**: tokens are fetched on first use and
//!   refreshed once when the server rejects them
//! - **Typed Errors**: every failure is an [`ApiError`](api::ApiError) with
//!   the HTTP status attached
//! - **Pluggable Transport**: a `reqwest` transport for production and an
//!   in-memory transport for tests
//! - **Scriptable CLI**: JSON in, JSON out
//!
//! ## Module Structure
//!
//! - [`api`]: request pipeline, transport, errors and v1 resource builders
//! - [`auth`]: credentials, tokens and the token cache
//! - [`config`]: client configuration and the config file
//! - [`cli`]: command-line interface definitions using clap
//! - [`interactive`]: terminal prompts
//! - [`output`]: JSON output for the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use goinstant_api::api::common::PageOptions;
//! use goinstant_api::api::v1::Version1;
//! use goinstant_api::config::ClientConfig;
//!
//! # async fn example() -> Result<(), goinstant_api::api::ApiError> {
//! let api = Version1::new(ClientConfig {
//!     client_id: Some("my-client-id".to_string()),
//!     client_secret: Some("my-client-secret".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let apps = api.apps().list(&PageOptions::new()).await?;
//! for app in apps.body.as_array().into_iter().flatten() {
//!     println!("{}", app["name"]);
//! }
//! # Ok(())
//! # }
//! ```

/// API client: pipeline, transport, shared types and v1 resources.
pub mod api;

/// Client credentials, bearer tokens and the in-memory token cache.
pub mod auth;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Client configuration and configuration file management.
///
/// The `gi` configuration file lives in a platform-specific location:
/// - Linux: `~/.config/goinstant/config.toml`
/// - macOS: `~/Library/Application Support/goinstant/config.toml`
/// - Windows: `%APPDATA%\goinstant\config.toml`
pub mod config;

/// Terminal prompts used by `gi config init`.
pub mod interactive;

/// JSON output for the CLI.
pub mod output;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

pub use api::v1::Version1;
pub use api::{ApiError, GoInstantClient};
pub use config::ClientConfig;

/// Name of the CLI binary.
pub const APP_NAME: &str = "gi";

/// Crate version, from Cargo.toml.
///
/// ```rust
/// use goinstant_api::VERSION;
///
/// println!("gi version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors, usage and configuration issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
///
/// # Example
///
/// ```rust
/// use goinstant_api::api::ApiError;
/// use goinstant_api::exit_codes;
///
/// let err = ApiError::Config("client_id must also be defined".to_string());
/// assert_eq!(exit_codes::for_error(&err), exit_codes::CONFIG);
/// ```
pub mod exit_codes {
    use crate::api::common::{ApiError, INVALID_GRANT};

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Missing or inconsistent configuration.
    ///
    /// Run `gi config show` to inspect the effective settings.
    pub const CONFIG: i32 = 3;

    /// Authentication failed or the token was rejected.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    pub const NOT_FOUND: i32 = 8;

    /// The service is unavailable or down for maintenance.
    pub const UNAVAILABLE: i32 = 32;

    /// Maps an API error to the exit code the CLI reports for it.
    ///
    /// | Error | Exit code |
    /// |-------|-----------|
    /// | `Config` | [`CONFIG`] |
    /// | `InvalidArgument` | [`USAGE`] |
    /// | `UnknownAccessToken`, `invalid_grant`, status 401/403 | [`AUTH_ERROR`] |
    /// | status 404 | [`NOT_FOUND`] |
    /// | `Maintenance`, `Transport` | [`UNAVAILABLE`] |
    /// | anything else | [`ERROR`] |
    pub fn for_error(err: &ApiError) -> i32 {
        match err {
            ApiError::Config(_) => CONFIG,
            ApiError::InvalidArgument(_) => USAGE,
            ApiError::UnknownAccessToken { .. } => AUTH_ERROR,
            ApiError::Maintenance { .. } | ApiError::Transport { .. } => UNAVAILABLE,
            ApiError::Api { message, .. } if message == INVALID_GRANT => AUTH_ERROR,
            _ => match err.status_code() {
                Some(401) | Some(403) => AUTH_ERROR,
                Some(404) => NOT_FOUND,
                _ => ERROR,
            },
        }
    }

}
