//
//  goinstant-api
//  api/v1/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Generic collection and member builders shared by apps, devs and teams.

use std::collections::BTreeMap;

use serde_json::Value;

use super::ResourceId;
use crate::api::client::GoInstantClient;
use crate::api::common::{ApiError, ApiRequest, ApiResponse, PageOptions};

/// A listable, creatable collection such as `/apps`.
#[derive(Clone)]
pub struct Collection<'a> {
    client: &'a GoInstantClient,
    path: String,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(client: &'a GoInstantClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `GET` the collection.
    pub async fn list(&self, options: &PageOptions) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(&self.path).with_query_map(&options.to_query());
        self.client.request(&request).await
    }

    /// `POST` a new member. `properties` must be a non-empty JSON object.
    pub async fn create(&self, properties: Value) -> Result<ApiResponse, ApiError> {
        require_properties(&properties, "create")?;
        let request = ApiRequest::post(&self.path).with_body(properties);
        self.client.request(&request).await
    }
}

/// A single addressable resource such as `/apps/:app`.
#[derive(Clone)]
pub struct Member<'a> {
    client: &'a GoInstantClient,
    parent: String,
    noun: &'static str,
    id: ResourceId,
    query: BTreeMap<String, String>,
}

impl<'a> Member<'a> {
    pub(crate) fn new(
        client: &'a GoInstantClient,
        parent: impl Into<String>,
        noun: &'static str,
        id: ResourceId,
    ) -> Self {
        Self {
            client,
            parent: parent.into(),
            noun,
            id,
            query: BTreeMap::new(),
        }
    }

    /// Adds a query parameter sent with every operation on this member.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub(crate) fn client(&self) -> &'a GoInstantClient {
        self.client
    }

    pub(crate) fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Path of this member, checking the id first.
    pub fn path(&self) -> Result<String, ApiError> {
        Ok(format!("{}/{}", self.parent, self.id.segment(self.noun)?))
    }

    pub async fn get(&self) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(self.path()?).with_query_map(&self.query);
        self.client.request(&request).await
    }

    /// `PATCH` the member. `properties` must be a non-empty JSON object.
    pub async fn update(&self, properties: Value) -> Result<ApiResponse, ApiError> {
        require_properties(&properties, "update")?;
        let request = ApiRequest::patch(self.path()?)
            .with_query_map(&self.query)
            .with_body(properties);
        self.client.request(&request).await
    }

    pub async fn remove(&self) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::delete(self.path()?).with_query_map(&self.query);
        self.client.request(&request).await
    }
}

pub(crate) fn require_properties(properties: &Value, operation: &str) -> Result<(), ApiError> {
    match properties {
        Value::Object(map) if !map.is_empty() => Ok(()),
        _ => Err(ApiError::InvalidArgument(format!(
            "New properties are required for {}",
            operation
        ))),
    }
}

pub(crate) fn require_object(body: &Value, operation: &str) -> Result<(), ApiError> {
    if body.is_object() {
        Ok(())
    } else {
        Err(ApiError::InvalidArgument(format!(
            "Invalid options supplied to {}",
            operation
        )))
    }
}
