//
//  goinstant-api
//  cli/devs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Developer account commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::v1::devs::SELF;
use crate::api::v1::ResourceId;

use super::input::{BodyArgs, ListArgs};
use super::GlobalOptions;

/// Manage developer accounts
#[derive(Args, Debug)]
pub struct DevsCommand {
    #[command(subcommand)]
    pub command: DevsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DevsSubcommand {
    /// List developers
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a developer (defaults to the authenticated one)
    #[command(visible_alias = "view")]
    Get(DevArg),

    /// Create a developer
    Create(BodyArgs),

    /// Update a developer
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete a developer
    Delete(RequiredDevArg),
}

#[derive(Args, Debug)]
pub struct DevArg {
    /// Developer id, or 'self'
    #[arg(default_value = SELF)]
    pub dev: ResourceId,
}

#[derive(Args, Debug)]
pub struct RequiredDevArg {
    /// Developer id
    pub dev: ResourceId,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Developer id, or 'self'
    pub dev: ResourceId,

    #[command(flatten)]
    pub body: BodyArgs,
}

impl DevsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.api()?;

        let response = match &self.command {
            DevsSubcommand::List(args) => api.devs().list(&args.page_options()).await?,
            DevsSubcommand::Get(args) => api.dev(args.dev.clone()).get().await?,
            DevsSubcommand::Create(body) => api.devs().create(body.object()?).await?,
            DevsSubcommand::Update(args) => {
                api.dev(args.dev.clone()).update(args.body.object()?).await?
            }
            DevsSubcommand::Delete(args) => {
                api.dev(args.dev.clone()).remove().await?;
                global
                    .output()
                    .write_success(&format!("Deleted developer {}", args.dev));
                return Ok(());
            }
        };

        global.print(&response)
    }
}
