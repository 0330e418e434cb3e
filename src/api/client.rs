//
//  goinstant-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authenticated Request Pipeline
//!
//! [`GoInstantClient`] is the single entry point every resource builder goes
//! through. For each logical request it:
//!
//! 1. authenticates first if no token is cached
//! 2. decorates the request (bearer token, configured headers, endpoint
//!    prefix, JSON content type, TLS strictness)
//! 3. sends it through the [`HttpTransport`]
//! 4. interprets the response body
//! 5. on `invalid_grant`, drops the token and runs the request once more
//!
//! ## Example
//!
//! ```rust,no_run
//! use goinstant_api::api::GoInstantClient;
//! use goinstant_api::api::common::ApiRequest;
//! use goinstant_api::config::ClientConfig;
//!
//! # async fn example() -> Result<(), goinstant_api::api::common::ApiError> {
//! let client = GoInstantClient::new(ClientConfig {
//!     client_id: Some("id".to_string()),
//!     client_secret: Some("secret".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let apps = client.request(&ApiRequest::get("/apps")).await?;
//! println!("{}", apps.body);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::common::{interpret_response, ApiError, ApiRequest, ApiResponse, ResponseStatus};
use super::transport::{HttpRequest, HttpTransport, ReqwestTransport, TransportOptions};
use crate::auth::{parse_token_grant, AccessToken, TokenCache, TokenRequest, TOKEN_PATH};
use crate::config::ClientConfig;

/// Where a request is in its retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Fresh,
    Retried,
}

/// GoInstant REST API client.
///
/// Owns the configuration, the transport and the token cache. The client is
/// `Send + Sync` and is meant to be shared behind an [`Arc`]; the
/// [`Version1`](super::v1::Version1) facade does exactly that.
pub struct GoInstantClient {
    config: ClientConfig,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenCache,
}

impl GoInstantClient {
    /// Creates a client using the production `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the configuration is invalid or the
    /// proxy cannot be used.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let transport = ReqwestTransport::with_options(&TransportOptions {
            proxy: config.proxy.clone(),
            ..Default::default()
        })?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client that sends through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the configuration is invalid.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self {
            base_url: config.base_url(),
            tokens: TokenCache::new(config.initial_token()),
            config,
            transport,
        })
    }

    /// Versioned base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The currently cached token, if any.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.tokens.get()
    }

    /// Sends a logical request through the full pipeline.
    ///
    /// `request` is only borrowed; a retry after `invalid_grant` replays the
    /// same value.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]. An `invalid_grant` error is returned only if it
    /// occurs again on the retried attempt.
    pub async fn request(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut attempt = Attempt::Fresh;
        loop {
            if self.tokens.is_empty() {
                self.authenticate().await?;
            }

            match self.perform(request).await {
                Err(err) if err.is_invalid_grant() && attempt == Attempt::Fresh => {
                    tracing::warn!(
                        "Access token rejected for {} {}, re-authenticating",
                        request.method,
                        request.path
                    );
                    self.tokens.clear();
                    attempt = Attempt::Retried;
                }
                outcome => return outcome,
            }
        }
    }

    /// Exchanges the configured client credentials for a fresh token.
    ///
    /// The cached token is cleared before the exchange and stays cleared if
    /// it fails.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`] when no credential pair is configured; nothing
    ///   is sent
    /// - [`ApiError::UnknownAccessToken`] when the response carries no token
    /// - any error from the exchange itself
    pub async fn authenticate(&self) -> Result<(), ApiError> {
        let credentials = self.config.credentials().ok_or_else(|| {
            ApiError::Config("client_id and client_secret required to authenticate".to_string())
        })?;

        self.tokens.clear();
        tracing::debug!("Requesting access token for client {}", credentials.client_id);

        let exchange = ApiRequest::post(TOKEN_PATH).with_json(&TokenRequest::from(&credentials))?;
        let response = self.perform(&exchange).await?;

        let token = parse_token_grant(&response.body).ok_or(ApiError::UnknownAccessToken {
            status: ResponseStatus::Code(response.status),
        })?;

        tracing::info!("Authenticated as client {}", credentials.client_id);
        self.tokens.store(token);
        Ok(())
    }

    /// Decorates, sends and interprets a request exactly once.
    async fn perform(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let http = self.decorate(request);
        tracing::debug!("{} {}", http.method, http.url);

        let outcome = self.transport.send(http).await;
        if let Err(err) = &outcome {
            tracing::warn!("Request to {} failed: {}", request.path, err);
        }
        interpret_response(outcome)
    }

    /// Builds the wire request for `request` without modifying it.
    ///
    /// # Decoration Rules
    ///
    /// | Step | Effect |
    /// |------|--------|
    /// | bearer | `Authorization: Bearer <token>` if a token is cached and the caller set neither `Authorization` nor a query `access_token` |
    /// | configured headers | merged over caller headers, case-insensitively |
    /// | content type | `Content-Type: application/json`, always |
    /// | url | base URL followed by the request path |
    /// | TLS | `strict_tls` from `strict_ssl` |
    pub fn decorate(&self, request: &ApiRequest) -> HttpRequest {
        let mut headers = request.headers.clone();

        if !request.has_authorization() && !request.has_query_token() {
            if let Some(token) = self.tokens.get() {
                headers.insert("Authorization".to_string(), token.authorization_header());
            }
        }

        for (name, value) in &self.config.headers {
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
            headers.insert(name.clone(), value.clone());
        }

        headers.retain(|existing, _| !existing.eq_ignore_ascii_case("content-type"));
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        HttpRequest {
            method: request.method,
            url: self.url_for(&request.path),
            headers,
            query: request.query.clone(),
            body: request.body.clone(),
            strict_tls: self.config.strict_ssl,
        }
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Sends a GET request and deserializes the response body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(&ApiRequest::get(path)).await?.json()
    }

    /// Sends a POST request with a JSON body and deserializes the response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(&ApiRequest::post(path).with_json(body)?)
            .await?
            .json()
    }

    /// Sends a PUT request with a JSON body and deserializes the response.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(&ApiRequest::put(path).with_json(body)?)
            .await?
            .json()
    }

    /// Sends a PATCH request with a JSON body and deserializes the response.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(&ApiRequest::patch(path).with_json(body)?)
            .await?
            .json()
    }

    /// Sends a DELETE request, discarding the response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(&ApiRequest::delete(path)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{Method, MockTransport, TransportError};
    use serde_json::json;

    fn credentials_config() -> ClientConfig {
        ClientConfig {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            ..Default::default()
        }
    }

    fn token_config(token: &str) -> ClientConfig {
        ClientConfig {
            access_token: Some(token.to_string()),
            ..Default::default()
        }
    }

    fn client(config: ClientConfig) -> (GoInstantClient, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let client = GoInstantClient::with_transport(config, transport.clone()).unwrap();
        (client, transport)
    }

    #[test]
    fn test_construction_validates_config() {
        let transport = Arc::new(MockTransport::new());
        let config = ClientConfig {
            client_id: Some("id".to_string()),
            ..Default::default()
        };
        let err = GoInstantClient::with_transport(config, transport).err().unwrap();
        assert_eq!(err.to_string(), "client_secret must also be defined");
    }

    #[test]
    fn test_base_url_uses_version() {
        let mut config = token_config("t");
        config.endpoint = Some("https://x".to_string());
        config.version = Some("v2".to_string());
        let (client, _) = client(config);
        assert_eq!(client.base_url(), "https://x/v2");
        assert_eq!(client.decorate(&ApiRequest::get("/apps")).url, "https://x/v2/apps");
    }

    #[tokio::test]
    async fn test_authenticates_before_first_request() {
        let (client, transport) = client(credentials_config());
        transport
            .push_json(200, json!({"token": "T", "expires": 123}))
            .push_json(200, json!([]));

        client.request(&ApiRequest::get("/apps")).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Post);
        assert!(requests[0].url.ends_with("/oauth/access_token"));
        assert_eq!(
            requests[0].body,
            Some(json!({"client_id": "id", "client_secret": "secret"}))
        );
        assert!(requests[0].header("authorization").is_none());
        assert_eq!(requests[1].header("Authorization"), Some("Bearer T"));
        assert_eq!(client.access_token().unwrap().expires, Some(123));
    }

    #[tokio::test]
    async fn test_cached_token_skips_authentication() {
        let (client, transport) = client(token_config("abc"));
        transport.push_json(200, json!({"id": 1}));

        let response = client.request(&ApiRequest::get("/apps/1")).await.unwrap();

        assert_eq!(response.body["id"], 1);
        assert_eq!(transport.request_count(), 1);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.header("authorization"), Some("Bearer abc"));
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert!(!sent.strict_tls);
    }

    #[test]
    fn test_caller_authorization_is_kept() {
        let (client, _) = client(token_config("abc"));

        let request = ApiRequest::get("/apps").with_header("authorization", "Basic xyz");
        let sent = client.decorate(&request);
        assert_eq!(sent.header("Authorization"), Some("Basic xyz"));
        assert_eq!(sent.headers.len(), 2);

        let request = ApiRequest::get("/apps").with_query("access_token", "q");
        let sent = client.decorate(&request);
        assert!(sent.header("Authorization").is_none());
        assert_eq!(sent.query["access_token"], "q");
    }

    #[test]
    fn test_configured_headers_and_content_type() {
        let mut config = token_config("abc");
        config.strict_ssl = true;
        config
            .headers
            .insert("X-Source".to_string(), "config".to_string());
        let (client, _) = client(config);

        let request = ApiRequest::post("/apps")
            .with_header("x-source", "caller")
            .with_header("content-type", "text/plain");
        let sent = client.decorate(&request);

        assert_eq!(sent.header("x-source"), Some("config"));
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.headers.len(), 3);
        assert!(sent.strict_tls);
    }

    #[test]
    fn test_decorate_leaves_request_untouched() {
        let (client, _) = client(token_config("abc"));
        let request = ApiRequest::put("/keys/a/b/c").with_body(json!({"value": 1}));
        let before = request.clone();

        let sent = client.decorate(&request);

        assert_eq!(request, before);
        assert_eq!(sent.body, Some(json!({"value": 1})));
    }

    #[tokio::test]
    async fn test_invalid_grant_retries_once() {
        let (client, transport) = client(ClientConfig {
            access_token: Some("stale".to_string()),
            ..credentials_config()
        });
        transport
            .push_json(401, json!({"error": "invalid_grant"}))
            .push_json(200, json!({"token": "fresh"}))
            .push_json(200, json!({"ok": true}));

        let response = client.request(&ApiRequest::get("/apps")).await.unwrap();

        assert_eq!(response.body["ok"], true);
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].header("Authorization"), Some("Bearer stale"));
        assert!(requests[1].url.ends_with(TOKEN_PATH));
        assert_eq!(requests[2].header("Authorization"), Some("Bearer fresh"));
    }

    #[tokio::test]
    async fn test_second_invalid_grant_is_returned() {
        let (client, transport) = client(ClientConfig {
            access_token: Some("stale".to_string()),
            ..credentials_config()
        });
        transport
            .push_json(401, json!({"error": "invalid_grant"}))
            .push_json(200, json!({"token": "fresh"}))
            .push_json(401, json!({"error": "invalid_grant"}));

        let err = client.request(&ApiRequest::get("/apps")).await.unwrap_err();

        assert!(err.is_invalid_grant());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn test_invalid_grant_without_credentials() {
        let (client, transport) = client(token_config("stale"));
        transport.push_json(401, json!({"error": "invalid_grant"}));

        let err = client.request(&ApiRequest::get("/apps")).await.unwrap_err();

        assert!(matches!(err, ApiError::Config(_)));
        assert_eq!(transport.request_count(), 1);
        assert!(client.access_token().is_none());
    }

    #[tokio::test]
    async fn test_failed_authentication_never_sends_request() {
        let (client, transport) = client(credentials_config());
        transport.push_json(401, json!({"error": "Invalid client credentials"}));

        let err = client.request(&ApiRequest::get("/apps")).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid client credentials");
        assert_eq!(transport.request_count(), 1);
        assert!(client.access_token().is_none());
    }

    #[tokio::test]
    async fn test_grant_without_token() {
        let (client, transport) = client(credentials_config());
        transport.push_json(200, json!({"expires": 5}));

        let err = client.authenticate().await.unwrap_err();

        assert!(matches!(err, ApiError::UnknownAccessToken { .. }));
        assert_eq!(err.to_string(), "Unknown access_token error");
        assert_eq!(err.status_code(), Some(200));
    }

    #[tokio::test]
    async fn test_authenticate_requires_credentials() {
        let (client, transport) = client(token_config("abc"));

        let err = client.authenticate().await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "client_id and client_secret required to authenticate"
        );
        assert_eq!(transport.request_count(), 0);
        assert!(client.access_token().is_some());
    }

    #[tokio::test]
    async fn test_transport_error_not_retried() {
        let (client, transport) = client(token_config("abc"));
        transport.push_error(TransportError::new("connection reset"));

        let err = client.request(&ApiRequest::get("/apps")).await.unwrap_err();

        assert!(matches!(err, ApiError::Transport { .. }));
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        #[derive(serde::Deserialize)]
        struct App {
            id: u64,
        }

        let (client, transport) = client(token_config("abc"));
        transport
            .push_json(201, json!({"id": 9}))
            .push_response(crate::api::transport::HttpResponse::new(204, ""));

        let app: App = client.post("/apps", &json!({"name": "chat"})).await.unwrap();
        assert_eq!(app.id, 9);

        client.delete("/apps/9").await.unwrap();
        assert_eq!(transport.last_request().unwrap().method, Method::Delete);
    }
}
