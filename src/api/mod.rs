//
//  goinstant-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP client for the GoInstant REST API.
//!
//! ## Architecture
//!
//! - [`client`]: the authenticated request pipeline ([`GoInstantClient`])
//! - [`transport`]: the HTTP seam, with a `reqwest` and an in-memory implementation
//! - [`common`]: errors, logical requests/responses, response interpretation, pagination
//! - [`v1`]: resource builders for API version 1 ([`Version1`](v1::Version1))
//!
//! ## Usage
//!
//! ```rust,no_run
//! use goinstant_api::api::v1::Version1;
//! use goinstant_api::config::ClientConfig;
//!
//! # async fn example() -> Result<(), goinstant_api::api::ApiError> {
//! let api = Version1::new(ClientConfig {
//!     access_token: Some("token".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let me = api.dev("self").get().await?;
//! println!("{}", me.body["email"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. The API reports failures in the
//! response body rather than through status codes, so the status is attached
//! to the error for reference only:
//!
//! - `Api`: error message from the body, with validation details when present
//! - `Maintenance`: non-JSON 503
//! - `InvalidResponse`: any other non-JSON response
//! - `Transport`: no usable response at all

/// Authenticated request pipeline.
///
/// Provides the [`GoInstantClient`] struct which handles:
/// - Token acquisition with client credentials
/// - Bearer header injection
/// - A single retry when the token is rejected
pub mod client;

/// Shared types: errors, requests, responses and pagination.
pub mod common;

/// HTTP transport abstraction and implementations.
pub mod transport;

/// API version 1 resource builders.
pub mod v1;

pub use client::GoInstantClient;
pub use common::{ApiError, ApiRequest, ApiResponse, ResponseStatus};
