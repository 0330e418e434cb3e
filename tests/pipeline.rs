//
//  goinstant-api
//  tests/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end tests of the request pipeline over real HTTP.

use goinstant_api::api::common::{ApiRequest, PageOptions, ResponseStatus};
use goinstant_api::api::v1::{KeyPath, Version1};
use goinstant_api::api::ApiError;
use goinstant_api::config::ClientConfig;
use mockito::{Matcher, Server};
use serde_json::json;

fn token_config(server: &Server) -> ClientConfig {
    ClientConfig {
        access_token: Some("abc".to_string()),
        endpoint: Some(server.url()),
        ..Default::default()
    }
}

fn credentials_config(server: &Server) -> ClientConfig {
    ClientConfig {
        client_id: Some("id".to_string()),
        client_secret: Some("secret".to_string()),
        endpoint: Some(server.url()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_get_sends_bearer_and_parses_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/apps")
        .match_header("authorization", "Bearer abc")
        .match_header("content-type", "application/json")
        .match_query(Matcher::UrlEncoded("per_page".into(), "5".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "name": "chat"}]"#)
        .create_async()
        .await;

    let api = Version1::new(token_config(&server)).unwrap();
    let response = api
        .apps()
        .list(&PageOptions::new().per_page(5))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body[0]["name"], "chat");
    assert_eq!(response.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_no_content_is_empty_object() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/v1/apps/7")
        .with_status(204)
        .create_async()
        .await;

    let api = Version1::new(token_config(&server)).unwrap();
    let response = api.app(7u64).remove().await.unwrap();

    assert_eq!(response.status, 204);
    assert_eq!(response.body, json!({}));
}

#[tokio::test]
async fn test_unavailable_without_body_is_maintenance() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/devs/self")
        .with_status(503)
        .create_async()
        .await;

    let api = Version1::new(token_config(&server)).unwrap();
    let err = api.dev("self").get().await.unwrap_err();

    assert!(matches!(err, ApiError::Maintenance { .. }));
    assert_eq!(err.status(), ResponseStatus::Code(503));
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/teams")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let api = Version1::new(token_config(&server)).unwrap();
    let err = api.teams().list(&PageOptions::new()).await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse { .. }));
    assert_eq!(err.status_code(), Some(502));
}

#[tokio::test]
async fn test_error_body_and_validation_messages() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/apps")
        .with_status(422)
        .with_body(r#"{"error": "Validation failed", "messages": ["name is required"]}"#)
        .create_async()
        .await;

    let api = Version1::new(token_config(&server)).unwrap();
    let err = api.apps().create(json!({"title": "x"})).await.unwrap_err();

    assert_eq!(err.to_string(), "Validation failed");
    assert_eq!(err.status_code(), Some(422));
    assert_eq!(err.validation().unwrap(), &["name is required".to_string()]);
}

#[tokio::test]
async fn test_credentials_exchanged_before_first_request() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/v1/oauth/access_token")
        .match_body(Matcher::Json(json!({"client_id": "id", "client_secret": "secret"})))
        .with_status(200)
        .with_body(r#"{"token": "fresh", "expires": 1700000000}"#)
        .expect(1)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/v1/devs/self")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(r#"{"id": 9}"#)
        .expect(2)
        .create_async()
        .await;

    let api = Version1::new(credentials_config(&server)).unwrap();
    api.dev("self").get().await.unwrap();
    api.dev("self").get().await.unwrap();

    token.assert_async().await;
    me.assert_async().await;
    assert_eq!(api.client().access_token().unwrap().expires, Some(1_700_000_000));
}

#[tokio::test]
async fn test_invalid_grant_refreshes_token_once() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/oauth/access_token")
        .with_status(200)
        .with_body(r#"{"token": "second"}"#)
        .expect(1)
        .create_async()
        .await;
    let rejected = server
        .mock("GET", "/v1/apps/7")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_body(r#"{"error": "invalid_grant"}"#)
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/v1/apps/7")
        .match_header("authorization", "Bearer second")
        .with_status(200)
        .with_body(r#"{"id": 7}"#)
        .expect(1)
        .create_async()
        .await;

    let config = ClientConfig {
        access_token: Some("stale".to_string()),
        ..credentials_config(&server)
    };
    let api = Version1::new(config).unwrap();
    let response = api.app(7u64).get().await.unwrap();

    rejected.assert_async().await;
    accepted.assert_async().await;
    assert_eq!(response.body["id"], 7);
}

#[tokio::test]
async fn test_app_name_adds_lookup() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/apps/chat/rooms")
        .match_query(Matcher::UrlEncoded("lookup".into(), "name".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let api = Version1::new(token_config(&server)).unwrap();
    api.app("chat")
        .rooms()
        .list(&PageOptions::new())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_key_update_and_configured_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/v1/keys/chat/lobby/topic")
        .match_header("x-trace", "t-1")
        .match_body(Matcher::Json(json!({"value": "hi", "options": {"expire": 10}})))
        .with_status(200)
        .with_body(r#"{"value": "hi"}"#)
        .create_async()
        .await;

    let mut config = token_config(&server);
    config.headers.insert("X-Trace".to_string(), "t-1".to_string());
    let api = Version1::new(config).unwrap();
    api.keys()
        .update(
            &KeyPath::new("chat", "lobby", "topic"),
            json!("hi"),
            Some(json!({"expire": 10})),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let config = ClientConfig {
        access_token: Some("abc".to_string()),
        endpoint: Some("http://127.0.0.1:1".to_string()),
        ..Default::default()
    };
    let api = Version1::new(config).unwrap();
    let err = api
        .request(&ApiRequest::get("/devs/self"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }));
}
