//! The 24-byte header at the start of every datagram.
//!
//! | Offset | Type | Field                          |
//! |--------|------|--------------------------------|
//! | 0      | u16  | packetFormat                   |
//! | 2      | u8   | gameMajorVersion               |
//! | 3      | u8   | gameMinorVersion               |
//! | 4      | u8   | packetVersion                  |
//! | 5      | u8   | packetId                       |
//! | 6      | u64  | sessionUID                     |
//! | 14     | f32  | sessionTime                    |
//! | 18     | u32  | frameIdentifier                |
//! | 22     | u8   | playerCarIndex                 |
//! | 23     | u8   | secondaryPlayerCarIndex        |

use crate::ids::{HEADER_SIZE, PacketId, is_supported_schema};
use crate::reader::ByteReader;
use crate::{DecodeError, DecodeResult};
use serde::Serialize;

/// Secondary player index reported when split-screen is not active.
pub const NO_SECONDARY_PLAYER: u8 = 255;

/// Header common to every packet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PacketHeader {
    /// Wire-schema epoch, e.g. `2023`.
    pub packet_format: u16,
    /// Informational only; never selects a layout.
    pub game_major_version: u8,
    pub game_minor_version: u8,
    /// Layout version of this packet type.
    pub packet_version: u8,
    /// Payload discriminator.
    pub packet_id: u8,
    /// Unique identifier for the session.
    pub session_uid: u64,
    /// Session timestamp in seconds.
    pub session_time: f32,
    /// Frame the data was retrieved on.
    pub frame_identifier: u32,
    /// Index of the player's car in per-car arrays.
    pub player_car_index: u8,
    /// Split-screen second player index, [`NO_SECONDARY_PLAYER`] if none.
    pub secondary_player_car_index: u8,
}

impl PacketHeader {
    /// Decode and validate the header at the start of `raw`.
    ///
    /// Fails with [`DecodeError::TruncatedBuffer`] when `raw` is shorter than
    /// [`HEADER_SIZE`] and with [`DecodeError::UnsupportedFormat`] when the
    /// `(packet_format, packet_version)` pair is not a recognised schema.
    pub fn decode(raw: &[u8]) -> DecodeResult<Self> {
        let header = Self::parse(raw)?;
        if !is_supported_schema(header.packet_format, header.packet_version) {
            return Err(DecodeError::UnsupportedFormat {
                packet_format: header.packet_format,
                packet_version: header.packet_version,
            });
        }
        Ok(header)
    }

    /// Read the header fields without checking the schema version.
    pub fn parse(raw: &[u8]) -> DecodeResult<Self> {
        if raw.len() < HEADER_SIZE {
            return Err(DecodeError::TruncatedBuffer {
                needed: HEADER_SIZE,
                actual: raw.len(),
            });
        }

        let mut r = ByteReader::new(raw);
        Ok(Self {
            packet_format: r.u16_le()?, // 0-1
            game_major_version: r.u8()?, // 2
            game_minor_version: r.u8()?, // 3
            packet_version: r.u8()?, // 4
            packet_id: r.u8()?, // 5
            session_uid: r.u64_le()?, // 6-13
            session_time: r.f32_le()?, // 14-17
            frame_identifier: r.u32_le()?, // 18-21
            player_car_index: r.u8()?, // 22
            secondary_player_car_index: r.u8()?, // 23
        })
    }

    /// The packet id as a known variant, if one is registered.
    pub fn packet_kind(&self) -> Option<PacketId> {
        PacketId::from_u8(self.packet_id)
    }

    /// Player car index, if it addresses a valid car slot.
    pub fn player_car(&self) -> Option<usize> {
        car_slot(self.player_car_index)
    }

    /// Second split-screen player's car index, if split-screen is active.
    pub fn secondary_player_car(&self) -> Option<usize> {
        car_slot(self.secondary_player_car_index)
    }
}

fn car_slot(index: u8) -> Option<usize> {
    let index = usize::from(index);
    (index < crate::ids::NUM_CARS).then_some(index)
}
