//
//  goinstant-api
//  api/v1/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Teams
//!
//! Teams and their developer memberships.
//!
//! | Builder call | Method | Path |
//! |--------------|--------|------|
//! | `teams().list(..)` / `create(..)` | GET / POST | `/teams` |
//! | `team(t).get()` / `update(..)` / `remove()` | GET / PATCH / DELETE | `/teams/:team` |
//! | `team(t).devs().list(..)` | GET | `/teams/:team/devs` |
//! | `team(t).devs().add(dev)` | POST `{"id": dev}` | `/teams/:team/devs` |
//! | `team(t).dev(d).get()` / `remove()` | GET / DELETE | `/teams/:team/devs/:dev` |

use serde_json::{json, Value};

use super::resource::{Collection, Member};
use super::ResourceId;
use crate::api::client::GoInstantClient;
use crate::api::common::{ApiError, ApiRequest, ApiResponse, PageOptions};

pub const TEAMS_PATH: &str = "/teams";

/// The `/teams` collection.
pub type Teams<'a> = Collection<'a>;

/// A single team.
#[derive(Clone)]
pub struct Team<'a> {
    member: Member<'a>,
}

impl<'a> Team<'a> {
    pub(crate) fn new(client: &'a GoInstantClient, id: ResourceId) -> Self {
        Self {
            member: Member::new(client, TEAMS_PATH, "Team", id),
        }
    }

    pub fn id(&self) -> &ResourceId {
        self.member.id()
    }

    pub async fn get(&self) -> Result<ApiResponse, ApiError> {
        self.member.get().await
    }

    /// `PATCH` the team. `properties` must be a non-empty JSON object.
    pub async fn update(&self, properties: Value) -> Result<ApiResponse, ApiError> {
        self.member.update(properties).await
    }

    pub async fn remove(&self) -> Result<ApiResponse, ApiError> {
        self.member.remove().await
    }

    pub fn devs(&self) -> TeamDevs<'a> {
        TeamDevs {
            team: self.member.clone(),
        }
    }

    /// Alias for [`devs`](Self::devs).
    pub fn developers(&self) -> TeamDevs<'a> {
        self.devs()
    }

    pub fn dev(&self, dev: impl Into<ResourceId>) -> TeamDev<'a> {
        TeamDev {
            team: self.member.clone(),
            dev: dev.into(),
        }
    }
}

/// Developers belonging to one team.
pub struct TeamDevs<'a> {
    team: Member<'a>,
}

impl TeamDevs<'_> {
    fn path(&self) -> Result<String, ApiError> {
        Ok(format!("{}/devs", self.team.path()?))
    }

    pub async fn list(&self, options: &PageOptions) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(self.path()?).with_query_map(&options.to_query());
        self.team.client().request(&request).await
    }

    /// Adds an existing developer to the team.
    pub async fn add(&self, dev: impl Into<ResourceId>) -> Result<ApiResponse, ApiError> {
        let body = match dev.into() {
            ResourceId::Id(id) => json!({ "id": id }),
            ResourceId::Name(name) => {
                if name.is_empty() {
                    return Err(ApiError::InvalidArgument(
                        "Property id required for add".to_string(),
                    ));
                }
                json!({ "id": name })
            }
        };
        let request = ApiRequest::post(self.path()?).with_body(body);
        self.team.client().request(&request).await
    }
}

/// One developer's membership in a team.
pub struct TeamDev<'a> {
    team: Member<'a>,
    dev: ResourceId,
}

impl TeamDev<'_> {
    fn path(&self) -> Result<String, ApiError> {
        Ok(format!(
            "{}/devs/{}",
            self.team.path()?,
            self.dev.segment("Developer")?
        ))
    }

    pub async fn get(&self) -> Result<ApiResponse, ApiError> {
        self.team
            .client()
            .request(&ApiRequest::get(self.path()?))
            .await
    }

    /// Removes the developer from the team. The developer account remains.
    pub async fn remove(&self) -> Result<ApiResponse, ApiError> {
        self.team
            .client()
            .request(&ApiRequest::delete(self.path()?))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::common::{ApiError, PageOptions};
    use crate::api::transport::Method;
    use crate::api::v1::test_support::api;
    use serde_json::json;

    #[tokio::test]
    async fn test_team_crud() {
        let (api, transport) = api();
        transport
            .push_json(200, json!([]))
            .push_json(201, json!({"id": 5}))
            .push_json(200, json!({"id": 5}))
            .push_json(200, json!({}));

        api.teams().list(&PageOptions::new().page(2)).await.unwrap();
        api.teams().create(json!({"name": "ops"})).await.unwrap();
        api.team(5u64).get().await.unwrap();
        api.team(5u64).remove().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://api.test/v1/teams");
        assert_eq!(requests[0].query["page"], "2");
        assert_eq!(requests[1].body, Some(json!({"name": "ops"})));
        assert_eq!(requests[2].url, "https://api.test/v1/teams/5");
        assert_eq!(requests[3].method, Method::Delete);
    }

    #[tokio::test]
    async fn test_team_create_requires_properties() {
        let (api, transport) = api();
        let err = api.teams().create(json!(null)).await.unwrap_err();
        assert_eq!(err.to_string(), "New properties are required for create");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_add_dev_posts_id() {
        let (api, transport) = api();
        transport.push_json(201, json!({"id": 9}));

        api.team(5u64).devs().add(9u64).await.unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "https://api.test/v1/teams/5/devs");
        assert_eq!(sent.body, Some(json!({"id": 9})));
    }

    #[tokio::test]
    async fn test_add_dev_requires_id() {
        let (api, transport) = api();
        let err = api.team(5u64).devs().add("").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_team_dev_membership() {
        let (api, transport) = api();
        transport
            .push_json(200, json!([{"id": 9}]))
            .push_json(200, json!({"id": 9}))
            .push_json(200, json!({}));

        api.team(5u64).developers().list(&PageOptions::new()).await.unwrap();
        api.team(5u64).dev(9u64).get().await.unwrap();
        api.team(5u64).dev(9u64).remove().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://api.test/v1/teams/5/devs");
        assert_eq!(requests[1].url, "https://api.test/v1/teams/5/devs/9");
        assert_eq!(requests[2].method, Method::Delete);
        assert_eq!(requests[2].url, "https://api.test/v1/teams/5/devs/9");
    }
}
