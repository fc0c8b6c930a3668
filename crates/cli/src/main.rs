//! f1-telemetry - F1 UDP telemetry listener
//!
//! Receives the game's UDP telemetry, writes every datagram to a raw capture
//! file, and decodes it. Captures can be replayed and decoded offline.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod error;
mod output;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ListenArgs, ReplayArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "f1-telemetry")]
#[command(about = "F1 UDP telemetry listener - capture, decode, and replay game telemetry")]
#[command(version)]
#[command(long_about = "
f1-telemetry listens for the UDP telemetry stream broadcast by the F1 games
(default port 20777). Every datagram is appended to a raw capture file before
it is decoded, so nothing is lost to decode failures. Captures can be
replayed later with `f1-telemetry replay`.

Use --json for one JSON object per datagram, suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML file with listener defaults
    #[arg(long, global = true, env = "F1_TELEMETRY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Listen for telemetry, capture it, and decode it
    Listen(ListenArgs),

    /// Decode a raw capture file
    Replay(ReplayArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "f1_telemetry={level},f1_telemetry_capture={level}",
                    level = log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e
                .downcast_ref::<CliError>()
                .map(CliError::exit_code)
                .unwrap_or(1);
            std::process::exit(exit_code);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Listen(args) => {
            commands::listen::execute(args, cli.config.as_deref(), cli.json).await
        }
        Commands::Replay(args) => commands::replay::execute(args, cli.json),
    }
}
