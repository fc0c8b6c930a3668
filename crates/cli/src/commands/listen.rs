//! Live UDP listener: capture every datagram, then decode it.

use crate::commands::ListenArgs;
use crate::config::ListenerConfig;
use crate::output::{self, OutputMode};
use crate::stats::DecodeStats;
use anyhow::{Context, Result};
use f1_telemetry_capture::{CaptureSender, CaptureStats, CaptureWriter, FileSink};
use f1_udp_protocol::{MAX_DATAGRAM_SIZE, decode};
use serde::Serialize;
use std::future::Future;
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct ListenSummary {
    listen: String,
    capture_file: String,
    duration_seconds: f64,
    stats: DecodeStats,
    capture: CaptureStats,
}

/// Options for [`receive_loop`].
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub max_packets: Option<u64>,
    pub output: OutputMode,
}

/// Execute the listen command.
pub async fn execute(args: &ListenArgs, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = ListenerConfig::resolve(config_path, args)?;
    let bind_addr = config.socket_addr();

    let socket = UdpSocket::bind(bind_addr).await.with_context(|| {
        format!(
            "failed to bind UDP socket at {} (is another process using this port?)",
            bind_addr
        )
    })?;

    let unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_millis();
    let sink = FileSink::in_dir(&config.capture_dir, unix_ms).with_context(|| {
        format!(
            "failed to open capture file in '{}'",
            config.capture_dir.display()
        )
    })?;
    let capture_file = sink.path().display().to_string();
    let writer = CaptureWriter::spawn(sink).context("failed to start capture writer")?;

    info!(listen = %bind_addr, capture = %capture_file, "Listening for F1 telemetry");
    if !json {
        println!("Listening {}", bind_addr);
    }

    let options = LoopOptions {
        max_packets: config.max_packets,
        output: OutputMode::new(json, config.payloads, args.quiet),
    };
    let start = Instant::now();
    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let stats = receive_loop(&socket, &writer.sender(), options, shutdown).await;
    let capture = writer.finish().context("capture writer failed")?;

    let summary = ListenSummary {
        listen: bind_addr.to_string(),
        capture_file,
        duration_seconds: start.elapsed().as_secs_f64(),
        stats,
        capture,
    };
    output::print_summary(&summary, &summary.stats, "Telemetry listener stopped", json);
    if !json {
        println!("  captured: {} datagrams to {}", capture.datagrams, summary.capture_file);
    }
    Ok(())
}

/// Receive datagrams until `max_packets` is reached or `shutdown` resolves.
///
/// Each datagram is queued for capture before it is decoded, so the capture
/// holds undecodable traffic too. Receive, capture, and decode failures are
/// logged and counted; none of them end the loop.
pub async fn receive_loop<F>(
    socket: &UdpSocket,
    capture: &CaptureSender,
    options: LoopOptions,
    shutdown: F,
) -> DecodeStats
where
    F: Future<Output = ()>,
{
    let mut stats = DecodeStats::default();
    let mut buf = [0u8; MAX_DATAGRAM_SIZE];
    tokio::pin!(shutdown);

    loop {
        if options.max_packets.is_some_and(|max| stats.datagrams >= max) {
            break;
        }

        let (len, source) = tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            recv = socket.recv_from(&mut buf) => match recv {
                Ok(value) => value,
                Err(error) => {
                    warn!(%error, "UDP receive failed");
                    continue;
                }
            },
        };

        let datagram = buf.get(..len).unwrap_or_default();
        if let Err(error) = capture.capture(datagram) {
            warn!(%error, len, "Failed to queue datagram for capture");
        }

        let result = decode(datagram);
        match &result {
            Ok(packet) => debug!(
                len,
                %source,
                packet = packet.packet_id().name(),
                frame = packet.header.frame_identifier,
                "Decoded datagram"
            ),
            Err(error) => debug!(len, %source, kind = error.kind(), %error, "Skipped datagram"),
        }
        stats.record(len, &result);
        output::print_packet(options.output, Some(source), len, &result);
    }

    stats
}
