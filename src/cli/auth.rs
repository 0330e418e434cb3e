//
//  goinstant-api
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands for the GoInstant CLI.
//!
//! Credentials come from the configuration file or the global flags;
//! these commands only exercise and report on them.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::api::v1::devs::SELF;

use super::GlobalOptions;

/// Inspect authentication.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Exchange the client credentials for a token and print it
    Token(TokenArgs),

    /// Show which credentials are configured
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Print the token with its expiry as JSON
    #[arg(long)]
    pub with_expiry: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Also verify the credentials by fetching the current developer
    #[arg(long)]
    pub check: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Token(args) => token(args, global).await,
            AuthSubcommand::Status(args) => status(args, global).await,
        }
    }
}

/// Prints a fresh token, or the configured one when no client credentials
/// are available.
async fn token(args: &TokenArgs, global: &GlobalOptions) -> Result<()> {
    let api = global.api()?;
    let client = api.client();

    if client.config().credentials().is_some() {
        client.authenticate().await?;
    }

    let token = client
        .access_token()
        .ok_or_else(|| anyhow::anyhow!("No access token available"))?;

    if args.with_expiry {
        global.output().write(&json!({
            "access_token": token.token,
            "expires": token.expires,
            "expires_at": token.expires.and_then(expiry_timestamp),
        }))?;
    } else {
        // Just the token, for piping into other commands
        println!("{}", token.token);
    }

    Ok(())
}

/// Shows authentication status.
async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = global.client_config()?;
    let output = global.output();

    println!("Endpoint: {}", config.base_url());
    println!(
        "  Client credentials: {}",
        if config.credentials().is_some() {
            "configured"
        } else {
            "not configured"
        }
    );
    println!(
        "  Access token: {}",
        config
            .initial_token()
            .map(|t| mask_token(&t.token))
            .unwrap_or_else(|| "not configured".to_string())
    );

    if let Err(e) = config.validate() {
        output.write_warning(&e.to_string());
        println!();
        println!("Run 'gi config init' to configure credentials");
        return Ok(());
    }

    if args.check {
        let api = global.api()?;
        let me = api.dev(SELF).get().await?;
        let name = me
            .body
            .get("email")
            .or_else(|| me.body.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        output.write_success(&format!("Authenticated as {}", name));
    }

    Ok(())
}

/// Renders an expiry reported by the token endpoint.
///
/// Values above `1e12` are taken as milliseconds since the epoch, anything
/// else as seconds.
fn expiry_timestamp(expires: i64) -> Option<String> {
    let time = if expires > 1_000_000_000_000 {
        DateTime::<Utc>::from_timestamp_millis(expires)
    } else {
        DateTime::<Utc>::from_timestamp(expires, 0)
    };
    time.map(|t| t.to_rfc3339())
}

/// Masks a token for display (shows first and last 4 characters).
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("abcd1234efgh"), "abcd...efgh");
    }

    #[test]
    fn test_expiry_timestamp_units() {
        assert_eq!(
            expiry_timestamp(1_700_000_000).as_deref(),
            Some("2023-11-14T22:13:20+00:00")
        );
        assert_eq!(
            expiry_timestamp(1_700_000_000_000).as_deref(),
            Some("2023-11-14T22:13:20+00:00")
        );
    }
}
