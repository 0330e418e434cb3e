//
//  goinstant-api
//  api/common/interpret.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response interpretation.
//!
//! The GoInstant API does not rely on HTTP status codes to signal errors: a
//! failing call usually returns a JSON body of the form
//!
//! ```json
//! {"error": "Validation failed", "messages": ["name is required"]}
//! ```
//!
//! and a body without an `error` field is a success regardless of status.
//! Only when the body is not JSON at all does the status code decide the
//! outcome.

use serde_json::{Map, Value};

use super::{ApiError, ApiResponse, ResponseStatus, VALIDATION_FAILED};
use crate::api::transport::{HttpResponse, TransportError};

/// Turns the outcome of a transport call into an API result.
///
/// | Input | Result |
/// |-------|--------|
/// | transport error | [`ApiError::Transport`] |
/// | JSON object with a truthy `error` | [`ApiError::Api`] |
/// | JSON object or array | `Ok`, body verbatim |
/// | non-JSON, status 204 | `Ok`, body `{}` |
/// | non-JSON, status 503 | [`ApiError::Maintenance`] |
/// | non-JSON, other status | [`ApiError::InvalidResponse`] |
///
/// # Example
///
/// ```rust
/// use goinstant_api::api::common::interpret_response;
/// use goinstant_api::api::transport::HttpResponse;
///
/// let ok = interpret_response(Ok(HttpResponse::new(204, ""))).unwrap();
/// assert_eq!(ok.body, serde_json::json!({}));
///
/// let err = interpret_response(Ok(HttpResponse::new(503, "<html>"))).unwrap_err();
/// assert_eq!(err.to_string(), "Down for maintenance");
/// assert_eq!(err.status_code(), Some(503));
/// ```
pub fn interpret_response(
    outcome: Result<HttpResponse, TransportError>,
) -> Result<ApiResponse, ApiError> {
    let response = outcome.map_err(|err| ApiError::Transport {
        message: err.message,
        status: err.status.into(),
    })?;

    let status = ResponseStatus::Code(response.status);

    match parse_body(&response.body) {
        Some(Value::Object(map)) => {
            if let Some(message) = error_message(&map) {
                let validation = (message == VALIDATION_FAILED)
                    .then(|| map.get("messages").and_then(validation_messages))
                    .flatten();
                return Err(ApiError::Api {
                    message,
                    status,
                    validation,
                });
            }
            Ok(ApiResponse {
                status: response.status,
                headers: response.headers,
                body: Value::Object(map),
            })
        }
        Some(body) => Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            body,
        }),
        None => match response.status {
            204 => Ok(ApiResponse {
                status: response.status,
                headers: response.headers,
                body: Value::Object(Map::new()),
            }),
            503 => Err(ApiError::Maintenance { status }),
            _ => Err(ApiError::InvalidResponse { status }),
        },
    }
}

/// Parses the body, keeping only JSON objects and arrays.
fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(value),
        _ => None,
    }
}

/// Extracts the `error` field when it is set to a truthy value.
fn error_message(body: &Map<String, Value>) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn validation_messages(messages: &Value) -> Option<Vec<String>> {
    let items = messages.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}
