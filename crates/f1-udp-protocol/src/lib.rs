//! Decoder for the F1 UDP telemetry protocol.
//!
//! The game broadcasts one self-contained, little-endian datagram per packet
//! (default port **20777**). Every datagram starts with a fixed 24-byte
//! [`PacketHeader`]; its `packet_id` selects which payload layout follows.
//!
//! This crate is I/O-free and decode-only: hand it the bytes of one datagram
//! and it returns a typed [`Packet`] or a [`DecodeError`]. It holds no state
//! between calls, so decoding can run on any thread.
//!
//! ## Supported packets
//!
//! | Packet ID | Name                 | Payload bytes |
//! |-----------|----------------------|---------------|
//! | 0         | Motion               | 1440          |
//! | 1         | Session              | 608           |
//! | 2         | Lap Data             | 948           |
//! | 3         | Event                | 16            |
//! | 4         | Participants         | 1233          |
//! | 5         | Car Setups           | 1078          |
//! | 6         | Car Telemetry        | 1323          |
//! | 7         | Car Status           | 1034          |
//! | 8         | Final Classification | 991           |
//! | 9         | Lobby Info           | 1167          |
//! | 10        | Car Damage           | 924           |
//! | 11        | Session History      | 1131          |
//!
//! Recognised schema versions are packet formats `2022` and `2023` with
//! packet version `1`. Anything else is rejected with
//! [`DecodeError::UnsupportedFormat`] rather than guessed at.
//!
//! ## Usage
//!
//! ```rust
//! use f1_udp_protocol::{DecodeError, decode};
//!
//! let datagram = [0u8; 8];
//! match decode(&datagram) {
//!     Ok(packet) => println!("{:?}", packet.packet_id()),
//!     Err(DecodeError::TruncatedBuffer { needed, actual }) => {
//!         assert_eq!((needed, actual), (24, 8));
//!     }
//!     Err(other) => println!("skipping datagram: {other}"),
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod car_damage;
pub mod car_setups;
pub mod car_status;
pub mod car_telemetry;
pub mod event;
pub mod final_classification;
pub mod header;
pub mod ids;
pub mod lap_data;
pub mod lobby_info;
pub mod motion;
pub mod packet;
pub mod participants;
pub mod reader;
pub mod session;
pub mod session_history;
pub mod types;

pub use car_damage::*;
pub use car_setups::*;
pub use car_status::*;
pub use car_telemetry::*;
pub use event::*;
pub use final_classification::*;
pub use header::*;
pub use ids::*;
pub use lap_data::*;
pub use lobby_info::*;
pub use motion::*;
pub use packet::*;
pub use participants::*;
pub use reader::ByteReader;
pub use session::*;
pub use session_history::*;
pub use types::*;

use thiserror::Error;

/// Errors returned while decoding a datagram.
///
/// Every variant is local to one datagram; a receive loop logs it and moves
/// on to the next one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Truncated buffer: need {needed} bytes, got {actual}")]
    TruncatedBuffer { needed: usize, actual: usize },

    #[error("Unsupported format: packet format {packet_format}, packet version {packet_version}")]
    UnsupportedFormat {
        packet_format: u16,
        packet_version: u8,
    },

    #[error("Unknown packet id: {packet_id}")]
    UnknownPacketId {
        packet_id: u8,
        header: PacketHeader,
    },

    #[error("Payload size mismatch for packet id {packet_id}: expected {expected} bytes, got {actual}")]
    PayloadSizeMismatch {
        packet_id: u8,
        expected: usize,
        actual: usize,
        header: PacketHeader,
    },
}

impl DecodeError {
    /// The already-decoded header, when the failure happened after it.
    pub fn header(&self) -> Option<&PacketHeader> {
        match self {
            DecodeError::UnknownPacketId { header, .. }
            | DecodeError::PayloadSizeMismatch { header, .. } => Some(header),
            DecodeError::TruncatedBuffer { .. } | DecodeError::UnsupportedFormat { .. } => None,
        }
    }

    /// Whether the receive loop can carry on with the next datagram.
    ///
    /// Always `true`: nothing in the decoder is fatal.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Short stable label for counters and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::TruncatedBuffer { .. } => "truncated_buffer",
            DecodeError::UnsupportedFormat { .. } => "unsupported_format",
            DecodeError::UnknownPacketId { .. } => "unknown_packet_id",
            DecodeError::PayloadSizeMismatch { .. } => "payload_size_mismatch",
        }
    }
}

/// Convenience result alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
