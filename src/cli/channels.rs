//
//  goinstant-api
//  cli/channels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Channel commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::v1::ChannelPath;

use super::input::parse_value;
use super::GlobalOptions;

/// Send channel messages
#[derive(Args, Debug)]
pub struct ChannelsCommand {
    #[command(subcommand)]
    pub command: ChannelsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChannelsSubcommand {
    /// Broadcast a message on a channel
    Message(MessageArgs),
}

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// App name
    pub app: String,

    /// Room name
    pub room: String,

    /// Channel name
    pub channel: String,

    /// Message value; parsed as JSON when it looks like JSON
    pub value: String,
}

impl ChannelsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let api = global.api()?;

        match &self.command {
            ChannelsSubcommand::Message(args) => {
                let path = ChannelPath::new(&args.app, &args.room, &args.channel);
                let response = api
                    .channels()
                    .message(&path, parse_value(&args.value))
                    .await?;
                global.print(&response)
            }
        }
    }
}
