//! Lobby Info packet (ID 9): players waiting in a multiplayer lobby.

use crate::ids::NUM_CARS;
use crate::participants::NAME_LENGTH;
use crate::reader::ByteReader;
use crate::DecodeResult;
use serde::Serialize;

/// Size of one LobbyInfoData entry (53 bytes).
pub const LOBBY_INFO_ENTRY_SIZE: usize = 3 + NAME_LENGTH + 2;

/// Lobby Info payload size after the header.
pub const LOBBY_INFO_PAYLOAD_SIZE: usize = 1 + NUM_CARS * LOBBY_INFO_ENTRY_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LobbyInfoData {
    pub ai_controlled: u8,
    /// 255 if no team is selected yet.
    pub team_id: u8,
    pub nationality: u8,
    pub name: String,
    pub car_number: u8,
    /// 0 not ready, 1 ready, 2 spectating.
    pub ready_status: u8,
}

impl LobbyInfoData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            ai_controlled: r.u8()?,
            team_id: r.u8()?,
            nationality: r.u8()?,
            name: r.fixed_str::<NAME_LENGTH>()?,
            car_number: r.u8()?,
            ready_status: r.u8()?,
        })
    }
}

/// Lobby Info payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PacketLobbyInfoData {
    pub num_players: u8,
    pub lobby_players: [LobbyInfoData; NUM_CARS],
}

impl PacketLobbyInfoData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            num_players: r.u8()?,
            lobby_players: r.records(LobbyInfoData::decode)?,
        })
    }

    pub fn players(&self) -> &[LobbyInfoData] {
        let count = usize::from(self.num_players).min(NUM_CARS);
        self.lobby_players.get(..count).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_payload_size() {
        assert_eq!(LOBBY_INFO_ENTRY_SIZE, 53);
        assert_eq!(LOBBY_INFO_PAYLOAD_SIZE, 1167);
    }

    #[test]
    fn test_name_stops_at_nul() -> TestResult {
        let mut raw = vec![0u8; LOBBY_INFO_PAYLOAD_SIZE];
        raw[0] = 1;
        raw[4..9].copy_from_slice(b"Alice");
        raw[10] = b'X'; // after the terminator
        raw[52] = 31; // car number
        raw[53] = 1;

        let packet = PacketLobbyInfoData::decode(&mut ByteReader::new(&raw))?;
        let players = packet.players();
        assert_eq!(players.len(), 1);
        let first = players.first().ok_or("missing player")?;
        assert_eq!(first.name, "Alice");
        assert_eq!(first.car_number, 31);
        assert_eq!(first.ready_status, 1);
        Ok(())
    }
}
