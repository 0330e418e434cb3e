//
//  goinstant-api
//  api/v1/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GoInstant API v1
//!
//! Resource builders for version 1 of the GoInstant REST API.
//!
//! ## Overview
//!
//! [`Version1`] is the entry point. It holds a shared
//! [`GoInstantClient`] and hands out short-lived builders that borrow it:
//!
//! | Builder | Paths |
//! |---------|-------|
//! | [`apps`] | `/apps`, `/apps/:app`, `/apps/:app/rooms[/:room[/users]]`, `/apps/:app/auth-settings` |
//! | [`devs`] | `/devs`, `/devs/:dev` |
//! | [`teams`] | `/teams`, `/teams/:team`, `/teams/:team/devs[/:dev]` |
//! | [`keys`] | `/keys/:app/:room/:key` |
//! | [`channels`] | `/channels/:app/:room/:channel` |
//!
//! Builders check their input before any I/O and report problems as
//! [`ApiError::InvalidArgument`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use goinstant_api::api::common::PageOptions;
//! use goinstant_api::api::v1::Version1;
//! use goinstant_api::config::ClientConfig;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), goinstant_api::api::common::ApiError> {
//! let api = Version1::new(ClientConfig {
//!     client_id: Some("id".to_string()),
//!     client_secret: Some("secret".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let apps = api.apps().list(&PageOptions::new().per_page(20)).await?;
//! let chat = api.app("chat").get().await?;
//! api.app(7u64).update(json!({"display_name": "Chat"})).await?;
//! # Ok(())
//! # }
//! ```

pub mod apps;
pub mod channels;
pub mod devs;
pub mod keys;
mod resource;
pub mod teams;

pub use apps::{App, AuthSettings, Room, RoomUsers, Rooms};
pub use channels::{ChannelPath, Channels};
pub use keys::{KeyPath, Keys};
pub use resource::{Collection, Member};
pub use teams::{Team, TeamDev, TeamDevs};

use std::fmt;
use std::sync::Arc;

use super::client::GoInstantClient;
use super::common::{ApiError, ApiRequest, ApiResponse};
use crate::config::ClientConfig;

/// Identifies a resource either by numeric id or by name.
///
/// App names are resolved by the server through a `lookup=name` query
/// parameter, which [`App`] adds automatically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    Id(u64),
    Name(String),
}

impl ResourceId {
    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    /// The id as a path segment.
    ///
    /// Names must be non-empty and must not contain `/`.
    pub(crate) fn segment(&self, noun: &str) -> Result<String, ApiError> {
        match self {
            Self::Id(id) => Ok(id.to_string()),
            Self::Name(name) => Ok(path_segment(noun, name)?.to_string()),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ResourceId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Parses a command-line style identifier: all digits is an id, anything
/// else is a name.
impl std::str::FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(Self::Id)
            .unwrap_or_else(|_| Self::Name(s.to_string())))
    }
}

/// Checks one path segment supplied by the caller.
pub(crate) fn path_segment<'s>(name: &str, value: &'s str) -> Result<&'s str, ApiError> {
    if value.is_empty() {
        return Err(ApiError::InvalidArgument(format!("{} must not be empty", name)));
    }
    if value.contains('/') {
        return Err(ApiError::InvalidArgument(format!(
            "{} must not contain '/'",
            name
        )));
    }
    Ok(value)
}

/// Entry point to the v1 API.
///
/// Cloning is cheap; clones share one client and therefore one token.
#[derive(Clone)]
pub struct Version1 {
    client: Arc<GoInstantClient>,
}

impl Version1 {
    /// Creates the facade over a new client using the production transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if `config` is invalid.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_client(Arc::new(GoInstantClient::new(config)?)))
    }

    /// Creates the facade over an existing client.
    pub fn with_client(client: Arc<GoInstantClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GoInstantClient {
        &self.client
    }

    /// Sends an arbitrary request through the client pipeline.
    pub async fn request(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.client.request(request).await
    }

    /// All apps of the authenticated developer.
    pub fn apps(&self) -> apps::Apps<'_> {
        Collection::new(&self.client, apps::APPS_PATH)
    }

    /// Alias for [`apps`](Self::apps).
    pub fn applications(&self) -> apps::Apps<'_> {
        self.apps()
    }

    /// A single app, by id or by name.
    pub fn app(&self, id: impl Into<ResourceId>) -> App<'_> {
        App::new(&self.client, id.into())
    }

    pub fn devs(&self) -> devs::Devs<'_> {
        Collection::new(&self.client, devs::DEVS_PATH)
    }

    /// Alias for [`devs`](Self::devs).
    pub fn developers(&self) -> devs::Devs<'_> {
        self.devs()
    }

    /// A single developer. `dev("self")` is the authenticated developer.
    pub fn dev(&self, id: impl Into<ResourceId>) -> devs::Dev<'_> {
        Member::new(&self.client, devs::DEVS_PATH, "Dev", id.into())
    }

    pub fn teams(&self) -> teams::Teams<'_> {
        Collection::new(&self.client, teams::TEAMS_PATH)
    }

    pub fn team(&self, id: impl Into<ResourceId>) -> Team<'_> {
        Team::new(&self.client, id.into())
    }

    pub fn keys(&self) -> Keys<'_> {
        Keys::new(&self.client)
    }

    pub fn channels(&self) -> Channels<'_> {
        Channels::new(&self.client)
    }
}
