//
//  goinstant-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! This module provides the types shared by the request pipeline and every
//! resource builder: the unified error type, the logical request a builder
//! hands to the pipeline, and the logical response the pipeline hands back.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ResponseStatus`] - HTTP status attached to every error
//! - [`ApiRequest`] - Logical request: method, path, headers, query, body
//! - [`ApiResponse`] - Logical response: status, headers, parsed JSON body
//! - [`interpret_response`] - Turns a raw transport outcome into one of the above
//! - Pagination options (re-exported from the `pagination` submodule)
//!
//! # Example
//!
//! ```rust
//! use goinstant_api::api::common::{ApiError, ResponseStatus};
//!
//! fn describe(err: &ApiError) -> String {
//!     match err.status() {
//!         ResponseStatus::Code(code) => format!("{} (HTTP {})", err, code),
//!         ResponseStatus::Unknown => err.to_string(),
//!     }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::transport::Method;

mod interpret;
mod pagination;

pub use interpret::*;
pub use pagination::*;

/// Error message the API uses to report an invalidated bearer token.
pub const INVALID_GRANT: &str = "invalid_grant";

/// Error message the API uses for field-level validation failures.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// HTTP status attached to an error.
///
/// `Unknown` is used when no response was received (transport failures) or
/// when the error did not come from a response at all (configuration and
/// argument errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Code(u16),
    Unknown,
}

impl ResponseStatus {
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Unknown => None,
        }
    }
}

impl From<Option<u16>> for ResponseStatus {
    fn from(status: Option<u16>) -> Self {
        status.map_or(Self::Unknown, Self::Code)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Unified error type for all GoInstant API operations.
///
/// Every failure the client can produce is one of these variants, returned as
/// the `Err` side of a `Result`; the client never panics on bad input or bad
/// responses.
///
/// # Variants
///
/// | Variant | Raised by | Retried |
/// |---------|-----------|---------|
/// | `Config` | client construction, authentication entry | never |
/// | `InvalidArgument` | resource builders, before any I/O | never |
/// | `Transport` | network or TLS failure | never |
/// | `Api` | error reported in the response body | once, for `invalid_grant` |
/// | `Maintenance` | non-JSON 503 response | never |
/// | `InvalidResponse` | non-JSON response with any other status | never |
/// | `UnknownAccessToken` | token exchange without a token | never |
/// | `Decode` | JSON (de)serialization of bodies | never |
///
/// # Example
///
/// ```rust
/// use goinstant_api::api::common::{ApiError, ResponseStatus};
///
/// let err = ApiError::Api {
///     message: "Validation failed".to_string(),
///     status: ResponseStatus::Code(400),
///     validation: Some(vec!["name is required".to_string()]),
/// };
///
/// assert_eq!(err.to_string(), "Validation failed");
/// assert_eq!(err.status_code(), Some(400));
/// assert_eq!(err.validation().unwrap().len(), 1);
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid client configuration (missing or partial credentials, bad
    /// endpoint or proxy).
    #[error("{0}")]
    Config(String),

    /// A resource builder was given input it cannot turn into a request.
    #[error("{0}")]
    InvalidArgument(String),

    /// The transport failed before a usable response was received.
    #[error("{message}")]
    Transport {
        message: String,
        status: ResponseStatus,
    },

    /// The API reported an error in the response body.
    ///
    /// `validation` holds the per-field messages when `message` is
    /// `"Validation failed"`.
    #[error("{message}")]
    Api {
        message: String,
        status: ResponseStatus,
        validation: Option<Vec<String>>,
    },

    /// The service answered 503 without a JSON body.
    #[error("Down for maintenance")]
    Maintenance { status: ResponseStatus },

    /// The service answered without a JSON body.
    #[error("Invalid response")]
    InvalidResponse { status: ResponseStatus },

    /// The token exchange succeeded but returned no token.
    #[error("Unknown access_token error")]
    UnknownAccessToken { status: ResponseStatus },

    /// A request or response body could not be (de)serialized.
    #[error("Failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status associated with this error.
    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::Transport { status, .. }
            | Self::Api { status, .. }
            | Self::Maintenance { status }
            | Self::InvalidResponse { status }
            | Self::UnknownAccessToken { status } => *status,
            Self::Config(_) | Self::InvalidArgument(_) | Self::Decode(_) => {
                ResponseStatus::Unknown
            }
        }
    }

    /// HTTP status code, if one is known.
    pub fn status_code(&self) -> Option<u16> {
        self.status().code()
    }

    /// Per-field validation messages, for `"Validation failed"` errors.
    pub fn validation(&self) -> Option<&[String]> {
        match self {
            Self::Api {
                validation: Some(messages),
                ..
            } => Some(messages),
            _ => None,
        }
    }

    /// Whether the API reported that the current token is no longer valid.
    pub fn is_invalid_grant(&self) -> bool {
        matches!(self, Self::Api { message, .. } if message == INVALID_GRANT)
    }
}

/// A logical API request, as produced by a resource builder.
///
/// `path` is relative to the configured endpoint (for example `/apps/1`).
/// The pipeline only ever borrows an `ApiRequest`; decoration produces a new
/// [`HttpRequest`](super::transport::HttpRequest) so the caller's value is
/// never modified and can be replayed on retry.
///
/// # Example
///
/// ```rust
/// use goinstant_api::api::common::ApiRequest;
/// use goinstant_api::api::transport::Method;
///
/// let request = ApiRequest::get("/apps")
///     .with_query("sort", "name")
///     .with_header("X-Trace", "abc");
///
/// assert_eq!(request.method, Method::Get);
/// assert_eq!(request.query.get("sort").map(String::as_str), Some("name"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds every pair of `query`, overwriting existing keys.
    pub fn with_query_map(mut self, query: &BTreeMap<String, String>) -> Self {
        self.query
            .extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` to JSON and attaches it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `body` cannot be represented as JSON.
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ApiError> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }

    /// Whether the caller already supplied an `Authorization` header.
    pub fn has_authorization(&self) -> bool {
        self.headers
            .keys()
            .any(|key| key.eq_ignore_ascii_case("authorization"))
    }

    /// Whether the caller already supplied an `access_token` query parameter.
    pub fn has_query_token(&self) -> bool {
        self.query
            .get("access_token")
            .is_some_and(|token| !token.is_empty())
    }
}

/// A successful API response.
///
/// `body` is the parsed JSON payload; it is an empty object for
/// `204 No Content` responses.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl ApiResponse {
    /// Deserializes the body into `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use goinstant_api::api::common::ApiResponse;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct App { id: u64, name: String }
    ///
    /// let response = ApiResponse {
    ///     status: 200,
    ///     headers: HashMap::new(),
    ///     body: serde_json::json!({"id": 7, "name": "chat"}),
    /// };
    ///
    /// let app: App = response.json().unwrap();
    /// assert_eq!(app.id, 7);
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_value(self.body.clone())?)
    }

    /// Returns a response header by lowercase name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
