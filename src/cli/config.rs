//
//  goinstant-api
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for managing the `gi` configuration file:
//! getting, setting and showing values, and creating the file interactively.
//! Secrets are masked whenever the configuration is printed.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde_json::json;

use crate::auth::validate_token;
use crate::config::{ClientConfig, ConfigFile, DEFAULT_ENDPOINT, DEFAULT_VERSION};
use crate::interactive::{
    is_interactive, prompt_confirm_with_default, prompt_input_optional,
    prompt_input_with_default, prompt_password_optional,
};

use super::GlobalOptions;

/// Valid configuration keys, besides `headers.NAME`
const VALID_KEYS: &[&str] = &[
    "client_id",
    "client_secret",
    "access_token",
    "version",
    "endpoint",
    "strict_ssl",
    "proxy",
];

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset a configuration value
    Unset(GetArgs),

    /// Show the configuration with secrets masked
    #[command(visible_alias = "list")]
    Show(ShowArgs),

    /// Create the configuration file interactively
    Init(InitArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key (e.g., endpoint, client_id, headers.X-Trace)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., endpoint, client_id, headers.X-Trace)
    pub key: String,

    /// Configuration value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Include settings from flags and the environment
    #[arg(long)]
    pub effective: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file without asking
    #[arg(long)]
    pub force: bool,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::Show(args) => self.show(args, global),
            ConfigSubcommand::Init(args) => self.init(args, global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    /// Get a configuration value
    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;
        let file = global.load_config_file()?;

        match file.client.get(&args.key) {
            Some(value) => println!("{}", value),
            None => bail!("{} is not set", args.key),
        }

        Ok(())
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;
        if args.key == "access_token" && !validate_token(&args.value) {
            bail!("access_token must be non-empty and contain no whitespace");
        }
        let path = global.config_path()?;
        let mut file = ConfigFile::load_from(&path)?;

        if !file.client.set(&args.key, args.value.clone()) {
            bail!("Invalid value for {}: {}", args.key, args.value);
        }
        file.save_to(&path)?;

        global.output().write_success(&format!(
            "Set {} in {}",
            style(&args.key).cyan(),
            path.display()
        ));
        Ok(())
    }

    /// Unset a configuration value
    fn unset(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;
        let path = global.config_path()?;
        let mut file = ConfigFile::load_from(&path)?;

        if !file.client.unset(&args.key) {
            bail!("{} is not set", args.key);
        }
        file.save_to(&path)?;

        global
            .output()
            .write_success(&format!("Unset {}", style(&args.key).cyan()));
        Ok(())
    }

    /// Print the configuration, masking secrets
    fn show(&self, args: &ShowArgs, global: &GlobalOptions) -> Result<()> {
        let config = if args.effective {
            global.client_config()?
        } else {
            global.load_config_file()?.client
        };

        global.output().write(&json!({
            "path": global.config_path()?.display().to_string(),
            "base_url": config.base_url(),
            "client": config.redacted(),
        }))
    }

    /// Prompt for each setting and write a new configuration file
    fn init(&self, args: &InitArgs, global: &GlobalOptions) -> Result<()> {
        if !is_interactive() {
            bail!("'gi config init' needs a terminal. Use 'gi config set' instead");
        }

        let path = global.config_path()?;
        let existing = ConfigFile::load_from(&path)?;

        if path.is_file()
            && !args.force
            && !prompt_confirm_with_default(
                &format!("Overwrite {}?", path.display()),
                false,
            )?
        {
            println!("Aborted");
            return Ok(());
        }

        let current = existing.client;
        let endpoint = prompt_input_with_default(
            "API endpoint",
            current.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
        )?;
        let version = prompt_input_with_default(
            "API version",
            current.version.as_deref().unwrap_or(DEFAULT_VERSION),
        )?;
        let client_id = prompt_input_optional("Client id (leave empty to use a token)")?;
        let client_secret = match client_id {
            Some(_) => prompt_password_optional("Client secret")?,
            None => None,
        };
        let access_token = match client_id {
            Some(_) => None,
            None => prompt_password_optional("Access token")?,
        };

        let config = ClientConfig {
            client_id,
            client_secret,
            access_token,
            version: Some(version).filter(|v| v != DEFAULT_VERSION),
            endpoint: Some(endpoint).filter(|e| e != DEFAULT_ENDPOINT),
            ..current
        };
        config.validate()?;

        ConfigFile { client: config }.save_to(&path)?;
        global
            .output()
            .write_success(&format!("Configuration written to {}", path.display()));
        Ok(())
    }

    /// Show configuration file path
    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let config_path = global.config_path()?;

        if global.json {
            global.output().write(&json!({
                "path": config_path.display().to_string(),
                "exists": config_path.is_file(),
            }))?;
        } else {
            println!("{}", config_path.display());
        }

        Ok(())
    }
}

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.contains(&key) || key.starts_with("headers.") {
        return Ok(());
    }
    bail!(
        "Unknown configuration key: {}. Valid keys: {}, headers.NAME",
        key,
        VALID_KEYS.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key() {
        assert!(check_key("endpoint").is_ok());
        assert!(check_key("headers.X-Trace").is_ok());
        assert!(check_key("colour").is_err());
    }

    #[tokio::test]
    async fn test_set_rejects_malformed_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let global = GlobalOptions {
            config: Some(path.clone()),
            ..Default::default()
        };
        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "access_token".to_string(),
                value: "two words".to_string(),
            }),
        };
        assert!(set.run(&global).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_set_then_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let global = GlobalOptions {
            config: Some(path.clone()),
            ..Default::default()
        };

        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "client_id".to_string(),
                value: "abc".to_string(),
            }),
        };
        set.run(&global).await.unwrap();
        let file = ConfigFile::load_from(&path).unwrap();
        assert_eq!(file.client.client_id.as_deref(), Some("abc"));

        let unset = ConfigCommand {
            command: ConfigSubcommand::Unset(GetArgs {
                key: "client_id".to_string(),
            }),
        };
        unset.run(&global).await.unwrap();
        let file = ConfigFile::load_from(&path).unwrap();
        assert_eq!(file.client.client_id, None);
    }

    #[tokio::test]
    async fn test_set_rejects_bad_bool() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalOptions {
            config: Some(dir.path().join("config.toml")),
            ..Default::default()
        };
        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "strict_ssl".to_string(),
                value: "maybe".to_string(),
            }),
        };
        assert!(set.run(&global).await.is_err());
    }
}
