//
//  goinstant-api
//  cli/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Team commands, including team membership.
//!
//! ```bash
//! gi teams add-dev 3 17
//! gi teams devs 3 --per-page 50
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::v1::ResourceId;

use super::input::{BodyArgs, ListArgs};
use super::GlobalOptions;

/// Manage teams
#[derive(Args, Debug)]
pub struct TeamsCommand {
    #[command(subcommand)]
    pub command: TeamsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TeamsSubcommand {
    /// List teams
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a team
    #[command(visible_alias = "view")]
    Get(TeamArg),

    /// Create a team
    Create(BodyArgs),

    /// Update a team
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete a team
    Delete(TeamArg),

    /// List the developers in a team
    Devs(DevsArgs),

    /// Add a developer to a team
    #[command(name = "add-dev")]
    AddDev(MemberArgs),

    /// Show a developer's team membership
    #[command(name = "get-dev")]
    GetDev(MemberArgs),

    /// Remove a developer from a team
    #[command(name = "remove-dev")]
    RemoveDev(MemberArgs),
}

#[derive(Args, Debug)]
pub struct TeamArg {
    /// Team id
    pub team: ResourceId,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Team id
    pub team: ResourceId,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args, Debug)]
pub struct DevsArgs {
    /// Team id
    pub team: ResourceId,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Debug)]
pub struct MemberArgs {
    /// Team id
    pub team: ResourceId,

    /// Developer id
    pub dev: ResourceId,
}

impl TeamsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.api()?;
        let output = global.output();

        let response = match &self.command {
            TeamsSubcommand::List(args) => api.teams().list(&args.page_options()).await?,
            TeamsSubcommand::Get(args) => api.team(args.team.clone()).get().await?,
            TeamsSubcommand::Create(body) => api.teams().create(body.object()?).await?,
            TeamsSubcommand::Update(args) => {
                api.team(args.team.clone())
                    .update(args.body.object()?)
                    .await?
            }
            TeamsSubcommand::Delete(args) => {
                api.team(args.team.clone()).remove().await?;
                output.write_success(&format!("Deleted team {}", args.team));
                return Ok(());
            }
            TeamsSubcommand::Devs(args) => {
                api.team(args.team.clone())
                    .devs()
                    .list(&args.list.page_options())
                    .await?
            }
            TeamsSubcommand::AddDev(args) => {
                api.team(args.team.clone())
                    .devs()
                    .add(args.dev.clone())
                    .await?
            }
            TeamsSubcommand::GetDev(args) => {
                api.team(args.team.clone())
                    .dev(args.dev.clone())
                    .get()
                    .await?
            }
            TeamsSubcommand::RemoveDev(args) => {
                api.team(args.team.clone())
                    .dev(args.dev.clone())
                    .remove()
                    .await?;
                output.write_success(&format!(
                    "Removed developer {} from team {}",
                    args.dev, args.team
                ));
                return Ok(());
            }
        };

        global.print(&response)
    }
}
