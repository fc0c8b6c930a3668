//! Offline replay of a raw capture file.

use crate::commands::ReplayArgs;
use crate::error::CliError;
use crate::output::{self, OutputMode};
use crate::stats::DecodeStats;
use anyhow::{Context, Result};
use f1_telemetry_capture::{CaptureError, RawLogStream};
use f1_udp_protocol::decode;
use serde::Serialize;
use std::io::Read;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct ReplaySummary {
    file: String,
    file_bytes: u64,
    stats: DecodeStats,
    /// Capture bytes between datagrams that could not be framed.
    skipped_bytes: u64,
    /// Where framing stopped, if the capture could not be split to the end.
    framing_error: Option<String>,
}

/// Result of replaying one capture.
#[derive(Debug)]
pub struct ReplayOutcome {
    pub stats: DecodeStats,
    pub skipped_bytes: u64,
    pub framing_error: Option<CaptureError>,
}

/// Execute the replay command.
pub fn execute(args: &ReplayArgs, json: bool) -> Result<()> {
    let mut stream = RawLogStream::open(&args.file)
        .with_context(|| format!("failed to read capture file '{}'", args.file.display()))?;
    info!(file = %args.file.display(), "Replaying capture");

    let mode = OutputMode::new(json, args.payloads, args.quiet);
    let outcome = replay_stream(&mut stream, mode);

    let summary = ReplaySummary {
        file: args.file.display().to_string(),
        file_bytes: stream.position(),
        stats: outcome.stats,
        skipped_bytes: outcome.skipped_bytes,
        framing_error: outcome.framing_error.as_ref().map(ToString::to_string),
    };
    output::print_summary(&summary, &summary.stats, "Replay complete", json);

    match outcome.framing_error {
        Some(error) => Err(CliError::CaptureError(error).into()),
        None => Ok(()),
    }
}

/// Decode every datagram in the capture, stopping at the first framing error.
pub fn replay_stream<R: Read>(stream: &mut RawLogStream<R>, mode: OutputMode) -> ReplayOutcome {
    let mut outcome = ReplayOutcome {
        stats: DecodeStats::default(),
        skipped_bytes: 0,
        framing_error: None,
    };
    for item in stream.by_ref() {
        match item {
            Ok(item) => {
                if item.skipped > 0 {
                    warn!(
                        offset = item.offset,
                        skipped = item.skipped,
                        "Skipped unframeable capture bytes"
                    );
                    outcome.skipped_bytes =
                        outcome.skipped_bytes.saturating_add(item.skipped as u64);
                }
                let result = decode(&item.datagram);
                outcome.stats.record(item.datagram.len(), &result);
                output::print_packet(mode, None, item.datagram.len(), &result);
            }
            Err(error) => {
                warn!(%error, "Capture framing stopped");
                outcome.framing_error = Some(error);
                break;
            }
        }
    }
    outcome
}
