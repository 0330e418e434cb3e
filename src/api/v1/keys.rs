//
//  goinstant-api
//  api/v1/keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Keys
//!
//! Server-side access to the key/value store of a room.
//!
//! A key is addressed by app, room and key name, all carried by a
//! [`KeyPath`]:
//!
//! ```text
//! GET    /keys/:app/:room/:key
//! PUT    /keys/:app/:room/:key   {"value": ..., "options": {...}}
//! DELETE /keys/:app/:room/:key
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! # use goinstant_api::api::v1::{KeyPath, Version1};
//! # async fn example(api: Version1) -> Result<(), goinstant_api::api::common::ApiError> {
//! let path = KeyPath::new("chat", "lobby", "topic");
//! api.keys().update(&path, serde_json::json!("Welcome"), None).await?;
//! let topic = api.keys().get(&path).await?;
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::Value;

use super::path_segment;
use crate::api::client::GoInstantClient;
use crate::api::common::{ApiError, ApiRequest, ApiResponse};

const KEYS_PATH: &str = "/keys";

/// Location of a key: app, room and key name.
///
/// Numeric ids are given in their decimal string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    pub app: String,
    pub room: String,
    pub key: String,
}

impl KeyPath {
    pub fn new(app: impl Into<String>, room: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            room: room.into(),
            key: key.into(),
        }
    }

    fn to_path(&self) -> Result<String, ApiError> {
        Ok(format!(
            "{}/{}/{}/{}",
            KEYS_PATH,
            path_segment("app", &self.app)?,
            path_segment("room", &self.room)?,
            path_segment("key", &self.key)?
        ))
    }
}

#[derive(Serialize)]
struct KeyUpdate<'v> {
    value: &'v Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'v Value>,
}

/// Builder for `/keys` requests.
pub struct Keys<'a> {
    client: &'a GoInstantClient,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(client: &'a GoInstantClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, path: &KeyPath) -> Result<ApiResponse, ApiError> {
        self.client.request(&ApiRequest::get(path.to_path()?)).await
    }

    pub async fn remove(&self, path: &KeyPath) -> Result<ApiResponse, ApiError> {
        self.client
            .request(&ApiRequest::delete(path.to_path()?))
            .await
    }

    /// Sets the value of a key. `options` is passed through to the server
    /// as-is (for example `{"expire": 5000}`).
    pub async fn update(
        &self,
        path: &KeyPath,
        value: Value,
        options: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::put(path.to_path()?).with_json(&KeyUpdate {
            value: &value,
            options: options.as_ref(),
        })?;
        self.client.request(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::KeyPath;
    use crate::api::common::ApiError;
    use crate::api::transport::Method;
    use crate::api::v1::test_support::api;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_key() {
        let (api, transport) = api();
        transport.push_json(200, json!({"value": "hi"}));

        let response = api.keys().get(&KeyPath::new("1", "lobby", "topic")).await.unwrap();

        assert_eq!(response.body["value"], "hi");
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://api.test/v1/keys/1/lobby/topic");
    }

    #[tokio::test]
    async fn test_update_key_body() {
        let (api, transport) = api();
        transport.push_json(200, json!({})).push_json(200, json!({}));
        let path = KeyPath::new("chat", "lobby", "topic");

        api.keys().update(&path, json!({"a": 1}), None).await.unwrap();
        api.keys()
            .update(&path, json!(null), Some(json!({"expire": 100})))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].body, Some(json!({"value": {"a": 1}})));
        assert_eq!(
            requests[1].body,
            Some(json!({"value": null, "options": {"expire": 100}}))
        );
    }

    #[tokio::test]
    async fn test_remove_key() {
        let (api, transport) = api();
        transport.push_json(200, json!({}));

        api.keys().remove(&KeyPath::new("chat", "lobby", "topic")).await.unwrap();

        assert_eq!(transport.last_request().unwrap().method, Method::Delete);
    }

    #[tokio::test]
    async fn test_empty_segment_rejected() {
        let (api, transport) = api();

        let err = api.keys().get(&KeyPath::new("chat", "", "topic")).await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "room must not be empty");
        assert_eq!(transport.request_count(), 0);
    }
}
