//! Raw capture of F1 telemetry datagrams.
//!
//! Every received datagram is appended byte-for-byte to a capture sink,
//! independent of whether it decodes. The on-disk format is the plain
//! concatenation of datagrams with no framing; [`RawLogReader`] and
//! [`RawLogStream`] recover the boundaries from each validated header's packet
//! id, skipping bytes that cannot be framed.
//!
//! Writes happen on a dedicated thread fed by a channel, so the receive loop
//! never waits on the filesystem.

#![deny(clippy::unwrap_used)]

pub mod replay;
pub mod sink;
pub mod writer;

pub use replay::{RawLogReader, RawLogStream, ReplayDatagram, ReplayItem};
pub use sink::{CAPTURE_FILE_SUFFIX, FileSink, MemorySink, RawSink, capture_file_name};
pub use writer::{CaptureHandle, CaptureSender, CaptureStats, CaptureWriter};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capture writer is closed")]
    WriterClosed,

    #[error("Replay failed at byte offset {offset}: {reason}")]
    Replay { offset: u64, reason: String },
}

pub type CaptureResult<T> = Result<T, CaptureError>;
