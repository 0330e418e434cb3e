//
//  goinstant-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use goinstant_api::api::ApiError;
use goinstant_api::cli::{Cli, Commands};
use goinstant_api::exit_codes;
use goinstant_api::output::OutputWriter;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => std::process::exit(report(&e)),
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("GI_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Prints an error and returns the exit code for it.
fn report(err: &anyhow::Error) -> i32 {
    let output = OutputWriter::default();
    output.write_error(&format!("{err:#}"));

    match err.downcast_ref::<ApiError>() {
        Some(api_err) => {
            for message in api_err.validation().unwrap_or_default() {
                eprintln!("  - {}", message);
            }
            exit_codes::for_error(api_err)
        }
        None => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Apps(cmd) => cmd.run(&cli.global).await,
        Commands::Devs(cmd) => cmd.run(&cli.global).await,
        Commands::Teams(cmd) => cmd.run(&cli.global).await,
        Commands::Keys(cmd) => cmd.run(&cli.global).await,
        Commands::Channels(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("gi version {}", goinstant_api::VERSION);
            Ok(())
        }
    }
}
