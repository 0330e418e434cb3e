//
//  goinstant-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod apps;
mod auth;
mod channels;
mod completion;
mod config;
mod devs;
pub mod input;
mod keys;
mod teams;

pub use api::ApiCommand;
pub use apps::AppsCommand;
pub use auth::AuthCommand;
pub use channels::ChannelsCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use devs::DevsCommand;
pub use keys::KeysCommand;
pub use teams::TeamsCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::common::ApiResponse;
use crate::api::v1::Version1;
use crate::config::{ClientConfig, ConfigFile};
use crate::output::OutputWriter;

/// gi - Work with the GoInstant REST API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "gi",
    version,
    about = "Work with the GoInstant REST API from the command line",
    long_about = "gi is a CLI for the GoInstant REST API.\n\n\
                  It manages apps, rooms, developers, teams, keys and channels, \
                  and can send raw authenticated requests.",
    propagate_version = true,
    after_help = "Use 'gi <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API endpoint
    #[arg(long, global = true, env = "GOINSTANT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// API version
    #[arg(long, global = true, env = "GOINSTANT_API_VERSION")]
    pub api_version: Option<String>,

    /// OAuth client id
    #[arg(long, global = true, env = "GOINSTANT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true, env = "GOINSTANT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Pre-issued access token
    #[arg(long, global = true, env = "GOINSTANT_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Validate TLS certificates (--strict-ssl=false turns off a configured value)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub strict_ssl: Option<bool>,

    /// Proxy URL for all requests
    #[arg(long, global = true, env = "GOINSTANT_PROXY")]
    pub proxy: Option<String>,

    /// Extra request header as 'Name: Value' (repeatable)
    #[arg(long, short = 'H', global = true, action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Compact JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Print only part of the response, e.g. '.name' or '.[0].id'
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Configuration file to use instead of the default
    #[arg(long, global = true, env = "GOINSTANT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Path of the configuration file in effect.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => ConfigFile::config_path(),
        }
    }

    pub fn load_config_file(&self) -> Result<ConfigFile> {
        ConfigFile::load_from(&self.config_path()?)
    }

    /// Settings given on the command line or through the environment.
    pub fn overrides(&self) -> Result<ClientConfig> {
        let headers = self
            .header
            .iter()
            .map(|h| input::parse_header(h))
            .collect::<Result<_>>()?;

        Ok(ClientConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            access_token: self.access_token.clone(),
            version: self.api_version.clone(),
            endpoint: self.endpoint.clone(),
            strict_ssl: self.strict_ssl.unwrap_or(false),
            proxy: self.proxy.clone(),
            headers,
        })
    }

    /// The configuration file with command-line settings layered on top.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = self.load_config_file()?.client.merge(self.overrides()?);
        if let Some(strict) = self.strict_ssl {
            config.strict_ssl = strict;
        }
        Ok(config)
    }

    /// Builds the v1 API facade from the effective configuration.
    pub fn api(&self) -> Result<Version1> {
        let config = self.client_config()?;
        tracing::debug!("Using endpoint {}", config.base_url());
        Ok(Version1::new(config)?)
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::from_json_flag(self.json)
    }

    /// Prints a response body, honouring `--filter`.
    pub fn print(&self, response: &ApiResponse) -> Result<()> {
        self.output()
            .write_body(&response.body, self.filter.as_deref())
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make an authenticated API request
    Api(ApiCommand),

    /// Inspect authentication
    Auth(AuthCommand),

    /// Manage apps, rooms and auth settings
    #[command(visible_alias = "applications")]
    Apps(AppsCommand),

    /// Manage developer accounts
    #[command(visible_alias = "developers")]
    Devs(DevsCommand),

    /// Manage teams and team membership
    Teams(TeamsCommand),

    /// Read and write room keys
    Keys(KeysCommand),

    /// Send channel messages
    Channels(ChannelsCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::try_parse_from([
            "gi",
            "--endpoint",
            "https://x",
            "--api-version",
            "v2",
            "--access-token",
            "t",
            "-H",
            "X-Trace: 1",
            "version",
        ])
        .unwrap();

        let overrides = cli.global.overrides().unwrap();
        assert_eq!(overrides.base_url(), "https://x/v2");
        assert_eq!(overrides.access_token.as_deref(), Some("t"));
        assert_eq!(overrides.headers["X-Trace"], "1");
    }

    #[test]
    fn test_client_config_layers_file_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[client]\nclient_id = \"file-id\"\nclient_secret = \"file-secret\"\nversion = \"v2\"\n",
        )
        .unwrap();

        let global = GlobalOptions {
            config: Some(path),
            client_id: Some("flag-id".to_string()),
            ..Default::default()
        };
        let config = global.client_config().unwrap();

        assert_eq!(config.client_id.as_deref(), Some("flag-id"));
        assert_eq!(config.client_secret.as_deref(), Some("file-secret"));
        assert_eq!(config.version.as_deref(), Some("v2"));
    }

    #[test]
    fn test_strict_ssl_flag_overrides_file_both_ways() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\naccess_token = \"t\"\nstrict_ssl = true\n").unwrap();
        let config_arg = path.display().to_string();

        let parse = |extra: &[&str]| {
            let mut args = vec!["gi", "--config", config_arg.as_str()];
            args.extend_from_slice(extra);
            args.push("version");
            Cli::try_parse_from(args).unwrap().global.client_config().unwrap()
        };

        assert!(parse(&[]).strict_ssl);
        assert!(!parse(&["--strict-ssl=false"]).strict_ssl);
        assert!(parse(&["--strict-ssl"]).strict_ssl);
    }
}
