//! Command implementations for the f1-telemetry CLI

pub mod listen;
pub mod replay;

use clap::Args;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ListenArgs {
    /// Local address to bind
    #[arg(long, env = "F1_TELEMETRY_BIND")]
    pub bind: Option<IpAddr>,

    /// UDP port the game sends to
    #[arg(short, long, env = "F1_TELEMETRY_PORT")]
    pub port: Option<u16>,

    /// Directory for the raw capture file
    #[arg(long, env = "F1_TELEMETRY_CAPTURE_DIR")]
    pub capture_dir: Option<PathBuf>,

    /// Stop after this many datagrams
    #[arg(short = 'n', long)]
    pub max_packets: Option<u64>,

    /// Include decoded payloads in JSON output
    #[arg(long)]
    pub payloads: bool,

    /// Only print the final summary
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Raw capture file written by `listen`
    pub file: PathBuf,

    /// Include decoded payloads in JSON output
    #[arg(long)]
    pub payloads: bool,

    /// Only print the final summary
    #[arg(short, long)]
    pub quiet: bool,
}
