//
//  goinstant-api
//  cli/keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Room key commands.
//!
//! ```bash
//! gi keys get chat lobby topic
//! gi keys set chat lobby topic '"Welcome"' --options '{"expire": 5000}'
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::v1::KeyPath;

use super::input::parse_value;
use super::GlobalOptions;

/// Read and write room keys
#[derive(Args, Debug)]
pub struct KeysCommand {
    #[command(subcommand)]
    pub command: KeysSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum KeysSubcommand {
    /// Show the value of a key
    Get(KeyArgs),

    /// Set the value of a key
    Set(SetArgs),

    /// Delete a key
    #[command(visible_alias = "rm")]
    Delete(KeyArgs),
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// App name
    pub app: String,

    /// Room name
    pub room: String,

    /// Key name
    pub key: String,
}

impl KeyArgs {
    fn path(&self) -> KeyPath {
        KeyPath::new(&self.app, &self.room, &self.key)
    }
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// New value; parsed as JSON when it looks like JSON
    pub value: String,

    /// Options passed through to the server as a JSON object
    #[arg(long)]
    pub options: Option<String>,
}

impl SetArgs {
    fn options(&self) -> Result<Option<Value>> {
        self.options
            .as_deref()
            .map(|raw| serde_json::from_str(raw).context("--options must be valid JSON"))
            .transpose()
    }
}

impl KeysCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.api()?;
        let keys = api.keys();

        let response = match &self.command {
            KeysSubcommand::Get(args) => keys.get(&args.path()).await?,
            KeysSubcommand::Set(args) => {
                keys.update(&args.key.path(), parse_value(&args.value), args.options()?)
                    .await?
            }
            KeysSubcommand::Delete(args) => {
                keys.remove(&args.path()).await?;
                global
                    .output()
                    .write_success(&format!("Deleted key {}", args.key));
                return Ok(());
            }
        };

        global.print(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set_args(options: Option<&str>) -> SetArgs {
        SetArgs {
            key: KeyArgs {
                app: "chat".to_string(),
                room: "lobby".to_string(),
                key: "topic".to_string(),
            },
            value: "1".to_string(),
            options: options.map(String::from),
        }
    }

    #[test]
    fn test_options_parsing() {
        assert_eq!(set_args(None).options().unwrap(), None);
        assert_eq!(
            set_args(Some(r#"{"expire": 5000}"#)).options().unwrap(),
            Some(json!({"expire": 5000}))
        );
        assert!(set_args(Some("{oops")).options().is_err());
    }

    #[test]
    fn test_key_path() {
        let path = set_args(None).key.path();
        assert_eq!(path, KeyPath::new("chat", "lobby", "topic"));
    }
}
