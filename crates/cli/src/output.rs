//! Output formatting for CLI responses

use crate::stats::DecodeStats;
use anyhow::Error;
use colored::*;
use f1_udp_protocol::{DecodeResult, Packet, Payload};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use tracing::warn;

/// How each datagram is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One readable line per datagram.
    Human,
    /// One JSON object per line.
    Json { payloads: bool },
    /// Nothing per datagram; summary only.
    Quiet,
}

impl OutputMode {
    pub fn new(json: bool, payloads: bool, quiet: bool) -> Self {
        if quiet {
            OutputMode::Quiet
        } else if json {
            OutputMode::Json { payloads }
        } else {
            OutputMode::Human
        }
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// One-line description of a decode outcome.
pub fn packet_line(source: Option<SocketAddr>, len: usize, result: &DecodeResult<Packet>) -> String {
    let from = source
        .map(|addr| format!(" from {addr}"))
        .unwrap_or_default();
    match result {
        Ok(packet) => {
            let h = &packet.header;
            let mut line = format!(
                "{len} B{from} | {} frame {} t={:.3}s",
                packet.packet_id(),
                h.frame_identifier,
                h.session_time
            );
            if let Payload::Motion(motion) = &packet.payload
                && let Some(car) = h.player_car().and_then(|idx| motion.car(idx))
            {
                let p = car.world_position;
                line.push_str(&format!(" player pos ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
            }
            line
        }
        Err(error) => format!("{len} B{from} | {} {}", "skipped:".yellow(), error),
    }
}

/// JSON value for a decode outcome.
pub fn packet_json(
    source: Option<SocketAddr>,
    len: usize,
    result: &DecodeResult<Packet>,
    payloads: bool,
) -> serde_json::Value {
    let source = source.map(|addr| addr.to_string());
    match result {
        Ok(packet) => {
            let mut value = json!({
                "source": source,
                "len": len,
                "packet": packet.packet_id().name(),
                "header": packet.header,
            });
            if payloads {
                value["payload"] = match serde_json::to_value(&packet.payload) {
                    Ok(payload) => payload,
                    Err(error) => {
                        warn!(
                            %error,
                            packet = packet.packet_id().name(),
                            "Failed to serialize payload"
                        );
                        json!({ "error": error.to_string() })
                    }
                };
            }
            value
        }
        Err(error) => json!({
            "source": source,
            "len": len,
            "error": {
                "kind": error.kind(),
                "message": error.to_string(),
            },
            "header": error.header(),
        }),
    }
}

pub fn print_packet(
    mode: OutputMode,
    source: Option<SocketAddr>,
    len: usize,
    result: &DecodeResult<Packet>,
) {
    match mode {
        OutputMode::Human => println!("{}", packet_line(source, len, result)),
        OutputMode::Json { payloads } => {
            println!("{}", packet_json(source, len, result, payloads));
        }
        OutputMode::Quiet => {}
    }
}

/// Print a command summary; `title` is the human heading.
pub fn print_summary<T: Serialize>(summary: &T, stats: &DecodeStats, title: &str, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to format summary as JSON: {}", e),
        }
        return;
    }

    println!("{}", title.bold());
    println!("  datagrams: {}", stats.datagrams);
    println!("  bytes: {}", stats.bytes);
    println!("  decoded: {}", stats.decoded.to_string().green());
    for (name, count) in &stats.packets {
        println!("    {}: {}", name, count);
    }
    println!("  failed: {}", stats.failed().to_string().yellow());
    for (kind, count) in &stats.errors {
        println!("    {}: {}", kind, count);
    }
}
