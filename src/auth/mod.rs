//
//  goinstant-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! GoInstant uses an OAuth-style client-credentials exchange: a
//! `client_id`/`client_secret` pair is posted to `/oauth/access_token` and the
//! returned bearer token is sent on every subsequent request.
//!
//! ## Module Structure
//!
//! - [`Credentials`]: the client-credential pair
//! - [`AccessToken`]: a bearer token and its optional expiry
//! - [`TokenCache`]: the client's mutable, in-memory token slot
//! - [`token`]: wire types for the token exchange
//!
//! Tokens live only in memory for the lifetime of a client; nothing here
//! touches disk.
//!
//! ## Example
//!
//! ```rust
//! use goinstant_api::auth::{AccessToken, TokenCache};
//!
//! let cache = TokenCache::new(None);
//! assert!(cache.get().is_none());
//!
//! cache.store(AccessToken::new("abc"));
//! assert_eq!(cache.bearer().as_deref(), Some("abc"));
//!
//! cache.clear();
//! assert!(cache.get().is_none());
//! ```

mod token;

pub use token::*;

use std::fmt;
use std::sync::{PoisonError, RwLock};

/// A client-credential pair.
///
/// `Debug` redacts the secret so credentials can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A bearer token issued by the token endpoint or supplied by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The opaque token string.
    pub token: String,
    /// Expiry as reported by the token endpoint, if it reported one.
    ///
    /// Stored as received; the client does not act on it and relies on the
    /// server answering `invalid_grant` instead.
    pub expires: Option<i64>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires: None,
        }
    }

    pub fn with_expires(mut self, expires: Option<i64>) -> Self {
        self.expires = expires;
        self
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires", &self.expires)
            .finish()
    }
}

/// The in-memory token slot owned by one client.
///
/// Written by the authenticator, cleared on `invalid_grant`, read when
/// decorating requests. Reads and writes are short and never span an
/// `.await`, so a plain `RwLock` is enough.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: RwLock<Option<AccessToken>>,
}

impl TokenCache {
    /// Creates a cache, seeded with a pre-supplied token if there is one.
    ///
    /// An empty token string is treated as no token.
    pub fn new(initial: Option<AccessToken>) -> Self {
        Self {
            slot: RwLock::new(initial.filter(|t| !t.token.is_empty())),
        }
    }

    pub fn get(&self) -> Option<AccessToken> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The cached token string, if any.
    pub fn bearer(&self) -> Option<String> {
        self.get().map(|t| t.token)
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    pub fn store(&self, token: AccessToken) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
