//
//  goinstant-api
//  api/v1/channels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server-side channel messages: `POST /channels/:app/:room/:channel`.

use serde_json::{json, Value};

use super::path_segment;
use crate::api::client::GoInstantClient;
use crate::api::common::{ApiError, ApiRequest, ApiResponse};

/// Location of a channel: app, room and channel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPath {
    pub app: String,
    pub room: String,
    pub channel: String,
}

impl ChannelPath {
    pub fn new(
        app: impl Into<String>,
        room: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            room: room.into(),
            channel: channel.into(),
        }
    }

    fn to_path(&self) -> Result<String, ApiError> {
        Ok(format!(
            "/channels/{}/{}/{}",
            path_segment("app", &self.app)?,
            path_segment("room", &self.room)?,
            path_segment("channel", &self.channel)?
        ))
    }
}

pub struct Channels<'a> {
    client: &'a GoInstantClient,
}

impl<'a> Channels<'a> {
    pub(crate) fn new(client: &'a GoInstantClient) -> Self {
        Self { client }
    }

    /// Broadcasts `value` to every subscriber of the channel.
    pub async fn message(&self, path: &ChannelPath, value: Value) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::post(path.to_path()?).with_body(json!({ "value": value }));
        self.client.request(&request).await
    }
}
