//
//  goinstant-api
//  api/v1/apps.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Apps
//!
//! Apps and their sub-resources.
//!
//! ## Endpoints
//!
//! | Builder call | Method | Path |
//! |--------------|--------|------|
//! | `apps().list(..)` | GET | `/apps` |
//! | `apps().create(..)` | POST | `/apps` |
//! | `app(id).get()` | GET | `/apps/:app` |
//! | `app(id).update(..)` | PATCH | `/apps/:app` |
//! | `app(id).remove()` | DELETE | `/apps/:app` |
//! | `app(id).rooms().list(..)` | GET | `/apps/:app/rooms` |
//! | `app(id).rooms().create(..)` | POST | `/apps/:app/rooms` |
//! | `app(id).room(r).get()` | GET | `/apps/:app/rooms/:room` |
//! | `app(id).room(r).users().list(..)` | GET | `/apps/:app/rooms/:room/users` |
//! | `app(id).auth_settings().get()` | GET | `/apps/:app/auth-settings` |
//! | `app(id).auth_settings().update(..)` | PATCH | `/apps/:app/auth-settings` |
//! | `app(id).auth_settings().set(..)` | PUT | `/apps/:app/auth-settings` |
//!
//! ## Name Lookup
//!
//! When an app is addressed by name, `lookup=name` is added to the query of
//! the app and of every sub-resource, unless the caller already set
//! `lookup` with [`App::with_query`].

use serde_json::Value;

use super::resource::{require_object, Collection, Member};
use super::ResourceId;
use crate::api::client::GoInstantClient;
use crate::api::common::{ApiError, ApiRequest, ApiResponse, PageOptions};

pub const APPS_PATH: &str = "/apps";

/// The `/apps` collection.
pub type Apps<'a> = Collection<'a>;

/// A single app.
#[derive(Clone)]
pub struct App<'a> {
    member: Member<'a>,
}

impl<'a> App<'a> {
    pub(crate) fn new(client: &'a GoInstantClient, id: ResourceId) -> Self {
        Self {
            member: Member::new(client, APPS_PATH, "App", id),
        }
    }

    /// Adds a query parameter sent with every request for this app and its
    /// sub-resources.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.member = self.member.with_query(key, value);
        self
    }

    pub fn id(&self) -> &ResourceId {
        self.member.id()
    }

    /// The member with `lookup=name` applied where needed.
    fn scoped(&self) -> Member<'a> {
        let member = self.member.clone();
        if member.id().is_name() && !member.query().contains_key("lookup") {
            member.with_query("lookup", "name")
        } else {
            member
        }
    }

    pub async fn get(&self) -> Result<ApiResponse, ApiError> {
        self.scoped().get().await
    }

    /// `PATCH` the app. `properties` must be a non-empty JSON object.
    pub async fn update(&self, properties: Value) -> Result<ApiResponse, ApiError> {
        self.scoped().update(properties).await
    }

    pub async fn remove(&self) -> Result<ApiResponse, ApiError> {
        self.scoped().remove().await
    }

    pub fn rooms(&self) -> Rooms<'a> {
        Rooms { app: self.scoped() }
    }

    pub fn room(&self, room: impl Into<ResourceId>) -> Room<'a> {
        Room {
            app: self.scoped(),
            room: room.into(),
        }
    }

    pub fn auth_settings(&self) -> AuthSettings<'a> {
        AuthSettings {
            app: self.scoped(),
            segment: "auth-settings",
        }
    }

    /// Legacy name of [`auth_settings`](Self::auth_settings), kept for
    /// servers that still expose `/login-settings`.
    pub fn login_settings(&self) -> AuthSettings<'a> {
        AuthSettings {
            app: self.scoped(),
            segment: "login-settings",
        }
    }
}

/// Rooms of one app.
pub struct Rooms<'a> {
    app: Member<'a>,
}

impl<'a> Rooms<'a> {
    fn path(&self) -> Result<String, ApiError> {
        Ok(format!("{}/rooms", self.app.path()?))
    }

    pub async fn list(&self, options: &PageOptions) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(self.path()?)
            .with_query_map(&options.to_query())
            .with_query_map(self.app.query());
        self.app.client().request(&request).await
    }

    /// Creates a room. Unlike apps, an empty object is accepted.
    pub async fn create(&self, properties: Value) -> Result<ApiResponse, ApiError> {
        require_object(&properties, "create")?;
        let request = ApiRequest::post(self.path()?)
            .with_query_map(self.app.query())
            .with_body(properties);
        self.app.client().request(&request).await
    }
}

/// A single room of an app.
#[derive(Clone)]
pub struct Room<'a> {
    app: Member<'a>,
    room: ResourceId,
}

impl<'a> Room<'a> {
    pub fn path(&self) -> Result<String, ApiError> {
        Ok(format!(
            "{}/rooms/{}",
            self.app.path()?,
            self.room.segment("Room")?
        ))
    }

    pub async fn get(&self) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(self.path()?).with_query_map(self.app.query());
        self.app.client().request(&request).await
    }

    pub fn users(&self) -> RoomUsers<'a> {
        RoomUsers { room: self.clone() }
    }
}

/// Users currently in a room.
pub struct RoomUsers<'a> {
    room: Room<'a>,
}

impl RoomUsers<'_> {
    pub async fn list(&self, options: &PageOptions) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(format!("{}/users", self.room.path()?))
            .with_query_map(&options.to_query())
            .with_query_map(self.room.app.query());
        self.room.app.client().request(&request).await
    }
}

/// Authentication settings of one app.
pub struct AuthSettings<'a> {
    app: Member<'a>,
    segment: &'static str,
}

impl AuthSettings<'_> {
    fn path(&self) -> Result<String, ApiError> {
        Ok(format!("{}/{}", self.app.path()?, self.segment))
    }

    pub async fn get(&self) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(self.path()?).with_query_map(self.app.query());
        self.app.client().request(&request).await
    }

    /// `PATCH` the settings with the given fields.
    pub async fn update(&self, settings: Value) -> Result<ApiResponse, ApiError> {
        require_object(&settings, "update")?;
        let request = ApiRequest::patch(self.path()?)
            .with_query_map(self.app.query())
            .with_body(settings);
        self.app.client().request(&request).await
    }

    /// `PUT` the settings, replacing them.
    pub async fn set(&self, settings: Value) -> Result<ApiResponse, ApiError> {
        require_object(&settings, "set")?;
        let request = ApiRequest::put(self.path()?)
            .with_query_map(self.app.query())
            .with_body(settings);
        self.app.client().request(&request).await
    }
}
