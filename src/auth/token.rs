//
//  goinstant-api
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Token exchange wire types.
//!
//! ```text
//! POST {endpoint}/oauth/access_token
//! {"client_id": "...", "client_secret": "..."}
//!
//! 200 OK
//! {"token": "...", "expires": 1400000000}
//! ```

use serde::Serialize;
use serde_json::Value;

use super::{AccessToken, Credentials};

/// Path of the token endpoint, relative to the versioned endpoint.
pub const TOKEN_PATH: &str = "/oauth/access_token";

/// Body of the token exchange request.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

impl<'a> From<&'a Credentials> for TokenRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
        }
    }
}

/// Extracts the token from a token endpoint response body.
///
/// Returns `None` when the body has no non-empty string `token`. A
/// non-numeric `expires` is ignored.
pub fn parse_token_grant(body: &Value) -> Option<AccessToken> {
    let token = body
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())?;
    let expires = body.get("expires").and_then(Value::as_i64);
    Some(AccessToken::new(token).with_expires(expires))
}

/// Validates the format of a token string.
///
/// A token must be non-empty and contain no whitespace. This does not check
/// the token with the server.
///
/// ```rust
/// use goinstant_api::auth::validate_token;
///
/// assert!(validate_token("abc123"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_grant_with_expiry() {
        let token = parse_token_grant(&json!({"token": "T", "expires": 42})).unwrap();
        assert_eq!(token.token, "T");
        assert_eq!(token.expires, Some(42));
    }

    #[test]
    fn test_parse_grant_missing_token() {
        assert!(parse_token_grant(&json!({"expires": 42})).is_none());
        assert!(parse_token_grant(&json!({"token": ""})).is_none());
        assert!(parse_token_grant(&json!({"token": 5})).is_none());
        assert!(parse_token_grant(&json!([])).is_none());
    }

    #[test]
    fn test_token_request_body() {
        let creds = Credentials::new("id", "secret");
        let body = serde_json::to_value(TokenRequest::from(&creds)).unwrap();
        assert_eq!(body, json!({"client_id": "id", "client_secret": "secret"}));
    }
}
