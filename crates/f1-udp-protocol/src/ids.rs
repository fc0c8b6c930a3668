//! Packet identifiers, schema versions, and wire-size constants.

use serde::Serialize;

/// Default UDP port the game broadcasts on.
pub const DEFAULT_PORT: u16 = 20777;

/// Upper bound on a single datagram; every packet in the schema fits.
pub const MAX_DATAGRAM_SIZE: usize = 2048;

/// Size of [`crate::PacketHeader`] on the wire.
pub const HEADER_SIZE: usize = 24;

/// Car slots carried by per-car arrays, including non-participating slots.
pub const NUM_CARS: usize = 22;

/// F1 22 packet format discriminator value.
pub const PACKET_FORMAT_2022: u16 = 2022;
/// F1 23 packet format discriminator value.
pub const PACKET_FORMAT_2023: u16 = 2023;

/// Packet formats this decoder understands.
pub const SUPPORTED_PACKET_FORMATS: [u16; 2] = [PACKET_FORMAT_2022, PACKET_FORMAT_2023];

/// The only per-packet layout version either format has shipped.
pub const SUPPORTED_PACKET_VERSION: u8 = 1;

/// Whether `(packet_format, packet_version)` is a schema this crate decodes.
pub fn is_supported_schema(packet_format: u16, packet_version: u8) -> bool {
    SUPPORTED_PACKET_FORMATS.contains(&packet_format) && packet_version == SUPPORTED_PACKET_VERSION
}

/// Payload discriminator carried in the header's `packet_id` byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum PacketId {
    Motion = 0,
    Session = 1,
    LapData = 2,
    Event = 3,
    Participants = 4,
    CarSetups = 5,
    CarTelemetry = 6,
    CarStatus = 7,
    FinalClassification = 8,
    LobbyInfo = 9,
    CarDamage = 10,
    SessionHistory = 11,
}

impl PacketId {
    /// Every id with a registered payload decoder, in wire order.
    pub const ALL: [PacketId; 12] = [
        PacketId::Motion,
        PacketId::Session,
        PacketId::LapData,
        PacketId::Event,
        PacketId::Participants,
        PacketId::CarSetups,
        PacketId::CarTelemetry,
        PacketId::CarStatus,
        PacketId::FinalClassification,
        PacketId::LobbyInfo,
        PacketId::CarDamage,
        PacketId::SessionHistory,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_u8() == value)
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PacketId::Motion => "motion",
            PacketId::Session => "session",
            PacketId::LapData => "lap_data",
            PacketId::Event => "event",
            PacketId::Participants => "participants",
            PacketId::CarSetups => "car_setups",
            PacketId::CarTelemetry => "car_telemetry",
            PacketId::CarStatus => "car_status",
            PacketId::FinalClassification => "final_classification",
            PacketId::LobbyInfo => "lobby_info",
            PacketId::CarDamage => "car_damage",
            PacketId::SessionHistory => "session_history",
        }
    }
}

impl TryFrom<u8> for PacketId {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(value)
    }
}

impl std::fmt::Display for PacketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_id_roundtrip() {
        for id in PacketId::ALL {
            assert_eq!(PacketId::from_u8(id.as_u8()), Some(id));
        }
        assert_eq!(PacketId::from_u8(12), None);
        assert_eq!(PacketId::try_from(255u8), Err(255));
    }

    #[test]
    fn test_supported_schema() {
        assert!(is_supported_schema(2022, 1));
        assert!(is_supported_schema(2023, 1));
        assert!(!is_supported_schema(2023, 2));
        assert!(!is_supported_schema(2021, 1));
        assert!(!is_supported_schema(2024, 1));
    }
}
