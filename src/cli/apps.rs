//
//  goinstant-api
//  cli/apps.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! App commands: apps, their rooms and their auth settings.
//!
//! Apps can be addressed by numeric id or by name; names are resolved by
//! the server.
//!
//! ```bash
//! gi apps get chat
//! gi apps create-room chat -F name=lobby
//! gi apps auth-settings chat -F guest.enabled=true
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::v1::{App, ResourceId, Version1};

use super::input::{BodyArgs, ListArgs};
use super::GlobalOptions;

/// Manage apps
#[derive(Args, Debug)]
pub struct AppsCommand {
    #[command(subcommand)]
    pub command: AppsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AppsSubcommand {
    /// List apps
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show an app
    #[command(visible_alias = "view")]
    Get(AppArg),

    /// Create an app
    Create(BodyArgs),

    /// Update an app
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete an app
    Delete(AppArg),

    /// List the rooms of an app
    Rooms(RoomsArgs),

    /// Create a room in an app
    #[command(name = "create-room")]
    CreateRoom(CreateRoomArgs),

    /// Show a room
    Room(RoomArgs),

    /// List the users in a room
    #[command(name = "room-users")]
    RoomUsers(RoomUsersArgs),

    /// Show or change the auth settings of an app
    #[command(name = "auth-settings")]
    AuthSettings(AuthSettingsArgs),
}

#[derive(Args, Debug)]
pub struct AppArg {
    /// App id or name
    pub app: ResourceId,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// App id or name
    pub app: ResourceId,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args, Debug)]
pub struct RoomsArgs {
    /// App id or name
    pub app: ResourceId,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Debug)]
pub struct CreateRoomArgs {
    /// App id or name
    pub app: ResourceId,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args, Debug)]
pub struct RoomArgs {
    /// App id or name
    pub app: ResourceId,

    /// Room id or name
    pub room: ResourceId,
}

#[derive(Args, Debug)]
pub struct RoomUsersArgs {
    /// App id or name
    pub app: ResourceId,

    /// Room id or name
    pub room: ResourceId,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Debug)]
pub struct AuthSettingsArgs {
    /// App id or name
    pub app: ResourceId,

    // Without a body the current settings are shown
    #[command(flatten)]
    pub body: BodyArgs,

    /// Replace the settings instead of merging into them
    #[arg(long)]
    pub replace: bool,

    /// Use the older login-settings endpoint
    #[arg(long)]
    pub legacy: bool,
}

impl AppsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.api()?;

        let response = match &self.command {
            AppsSubcommand::List(args) => api.apps().list(&args.page_options()).await?,
            AppsSubcommand::Get(args) => app(&api, &args.app).get().await?,
            AppsSubcommand::Create(body) => api.apps().create(body.object()?).await?,
            AppsSubcommand::Update(args) => {
                app(&api, &args.app).update(args.body.object()?).await?
            }
            AppsSubcommand::Delete(args) => {
                app(&api, &args.app).remove().await?;
                global
                    .output()
                    .write_success(&format!("Deleted app {}", args.app));
                return Ok(());
            }
            AppsSubcommand::Rooms(args) => {
                app(&api, &args.app)
                    .rooms()
                    .list(&args.list.page_options())
                    .await?
            }
            AppsSubcommand::CreateRoom(args) => {
                app(&api, &args.app)
                    .rooms()
                    .create(args.body.object()?)
                    .await?
            }
            AppsSubcommand::Room(args) => {
                app(&api, &args.app).room(args.room.clone()).get().await?
            }
            AppsSubcommand::RoomUsers(args) => {
                app(&api, &args.app)
                    .room(args.room.clone())
                    .users()
                    .list(&args.list.page_options())
                    .await?
            }
            AppsSubcommand::AuthSettings(args) => {
                let app = app(&api, &args.app);
                let settings = if args.legacy {
                    app.login_settings()
                } else {
                    app.auth_settings()
                };
                match args.body.body()? {
                    None => settings.get().await?,
                    Some(body) if args.replace => settings.set(body).await?,
                    Some(body) => settings.update(body).await?,
                }
            }
        };

        global.print(&response)
    }
}

fn app<'a>(api: &'a Version1, id: &ResourceId) -> App<'a> {
    api.app(id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: AppsSubcommand,
    }

    #[test]
    fn test_app_argument_parses_id_or_name() {
        let cli = TestCli::try_parse_from(["apps", "get", "42"]).unwrap();
        assert!(matches!(
            cli.command,
            AppsSubcommand::Get(AppArg { app: ResourceId::Id(42) })
        ));

        let cli = TestCli::try_parse_from(["apps", "get", "chat"]).unwrap();
        match cli.command {
            AppsSubcommand::Get(args) => assert_eq!(args.app, ResourceId::from("chat")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_auth_settings_flags() {
        let cli = TestCli::try_parse_from([
            "apps",
            "auth-settings",
            "chat",
            "--replace",
            "-F",
            "guest=true",
        ])
        .unwrap();
        match cli.command {
            AppsSubcommand::AuthSettings(args) => {
                assert!(args.replace);
                assert!(!args.legacy);
                assert_eq!(args.body.field, vec!["guest=true"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
