//
//  goinstant-api
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends a request through the same pipeline the resource commands use, so
//! authentication, token refresh and error interpretation all apply. Useful
//! for endpoints that have no dedicated command.
//!
//! ## Examples
//!
//! ```bash
//! # Fetch the authenticated developer
//! gi api /devs/self
//!
//! # Create a room with POST
//! gi api -X POST /apps/42/rooms -F name=lobby
//!
//! # Look an app up by name
//! gi api /apps/chat -q lookup=name
//! ```

use anyhow::Result;
use clap::Args;
use console::style;

use crate::api::common::ApiRequest;
use crate::api::transport::Method;

use super::input::{self, BodyArgs};
use super::GlobalOptions;

/// Make an authenticated API request
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Path relative to the versioned base URL (e.g., /apps/42/rooms)
    pub path: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    #[command(flatten)]
    pub body: BodyArgs,

    /// Query parameter as key=value (repeatable)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Include the response status and headers in the output
    #[arg(long, short = 'i')]
    pub include: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let request = self.build_request()?;
        let api = global.api()?;

        let response = api.request(&request).await?;

        if self.include {
            println!("{} {}", style("HTTP").dim(), response.status);
            let mut headers: Vec<_> = response.headers.iter().collect();
            headers.sort();
            for (name, value) in headers {
                println!("{}: {}", name, value);
            }
            println!();
        }

        global.print(&response)
    }

    fn build_request(&self) -> Result<ApiRequest> {
        let method: Method = self.method.parse()?;
        let mut request = ApiRequest::new(method, self.path.clone());

        for (key, value) in input::parse_pairs(&self.query)? {
            request = request.with_query(key, value);
        }
        if let Some(body) = self.body.body()? {
            request = request.with_body(body);
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command(method: &str) -> ApiCommand {
        ApiCommand {
            path: "/apps/42/rooms".to_string(),
            method: method.to_string(),
            body: BodyArgs {
                field: vec!["name=lobby".to_string()],
                input: None,
            },
            query: vec!["lookup=name".to_string()],
            include: false,
        }
    }

    #[test]
    fn test_build_request() {
        let request = command("post").build_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/apps/42/rooms");
        assert_eq!(request.query["lookup"], "name");
        assert_eq!(request.body, Some(json!({"name": "lobby"})));
    }

    #[test]
    fn test_unsupported_method() {
        assert!(command("TRACE").build_request().is_err());
    }
}
