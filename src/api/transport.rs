//
//  goinstant-api
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The transport is the only place where the client touches the network. It
//! performs exactly one HTTP exchange per call and knows nothing about tokens,
//! endpoints or API error shapes; the [`GoInstantClient`](super::GoInstantClient)
//! pipeline does all of that before and after calling [`HttpTransport::send`].
//!
//! Two implementations are provided:
//!
//! - [`ReqwestTransport`]: production transport backed by `reqwest`
//! - [`MockTransport`]: in-memory stub that replays queued responses and records
//!   every request it receives, for tests and offline use
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use goinstant_api::api::transport::{HttpResponse, MockTransport};
//! use goinstant_api::api::GoInstantClient;
//! use goinstant_api::config::ClientConfig;
//!
//! let transport = Arc::new(MockTransport::new());
//! transport.push_json(200, serde_json::json!([{"id": 1}]));
//!
//! let config = ClientConfig {
//!     access_token: Some("token".to_string()),
//!     ..Default::default()
//! };
//! let client = GoInstantClient::with_transport(config, transport.clone()).unwrap();
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use super::common::ApiError;

/// Default timeout applied by [`ReqwestTransport`] to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods used by the GoInstant API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Returns the uppercase wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ApiError::InvalidArgument(format!(
                "Unsupported HTTP method: {}",
                s
            ))),
        }
    }
}

/// A fully decorated request, ready to go on the wire.
///
/// Built by the pipeline from a logical [`ApiRequest`](super::common::ApiRequest);
/// the URL is absolute and all headers (including authorization and content
/// type) are already present.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL, without the query string.
    pub url: String,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Query string parameters.
    pub query: BTreeMap<String, String>,
    /// JSON request body.
    pub body: Option<Value>,
    /// Whether TLS certificates must be validated.
    pub strict_tls: bool,
}

impl HttpRequest {
    /// Looks up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A raw HTTP response as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, keys lowercased.
    pub headers: HashMap<String, String>,
    /// Undecoded response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }
}

/// A failure below the HTTP layer (connection, TLS, timeout, body read).
///
/// `status` is set only when the transport had already received a status line
/// before failing.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub status: Option<u16>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations must not retry, interpret bodies or add headers; the
/// pipeline relies on seeing exactly what the server returned.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Settings for building a [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Proxy URL applied to all schemes.
    pub proxy: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Production transport backed by `reqwest`.
///
/// Certificate validation is a client-level setting in `reqwest`, so two
/// clients are kept: one validating and one accepting invalid certificates.
/// [`HttpRequest::strict_tls`] selects between them per request.
pub struct ReqwestTransport {
    strict: Client,
    lenient: Client,
}

impl ReqwestTransport {
    /// Builds a transport with default options.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_options(&TransportOptions::default())
    }

    /// Builds a transport with the given proxy and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the proxy URL is invalid or the
    /// underlying TLS backend cannot be initialised.
    pub fn with_options(options: &TransportOptions) -> Result<Self, ApiError> {
        Ok(Self {
            strict: build_client(options, false)?,
            lenient: build_client(options, true)?,
        })
    }
}

fn build_client(options: &TransportOptions, accept_invalid_certs: bool) -> Result<Client, ApiError> {
    let mut builder = Client::builder()
        .user_agent(format!("gi/{}", crate::VERSION))
        .timeout(options.timeout)
        .danger_accept_invalid_certs(accept_invalid_certs);

    if let Some(proxy) = &options.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| ApiError::Config(format!("Invalid proxy '{}': {}", proxy, e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = if request.strict_tls {
            &self.strict
        } else {
            &self.lenient
        };

        let mut builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Post => client.post(&request.url),
            Method::Put => client.put(&request.url),
            Method::Patch => client.patch(&request.url),
            Method::Delete => client.delete(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(|e| TransportError::new(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!("{} {} failed: {}", request.method, request.url, e);
            TransportError::from(e)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(key, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (key.as_str().to_lowercase(), v.to_string()))
            })
            .collect();

        let body = response.text().await.map_err(|e| TransportError {
            message: e.to_string(),
            status: Some(status),
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// In-memory transport replaying queued responses in FIFO order.
///
/// Every request is recorded, so tests can assert on exactly what the
/// pipeline put on the wire. When the queue is empty the transport fails with
/// a [`TransportError`].
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response.
    pub fn push_response(&self, response: HttpResponse) -> &Self {
        lock(&self.responses).push_back(Ok(response));
        self
    }

    /// Queues a JSON response with the given status.
    pub fn push_json(&self, status: u16, body: Value) -> &Self {
        let mut response = HttpResponse::new(status, body.to_string());
        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        self.push_response(response)
    }

    /// Queues a transport-level failure.
    pub fn push_error(&self, error: TransportError) -> &Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("No mock response available")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
