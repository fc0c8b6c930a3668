//! Participants packet (ID 4): who is driving each car slot.

use crate::ids::NUM_CARS;
use crate::reader::ByteReader;
use crate::DecodeResult;
use serde::Serialize;

/// Width of the NUL-terminated driver name field.
pub const NAME_LENGTH: usize = 48;

/// Size of one ParticipantData entry (56 bytes).
pub const PARTICIPANT_ENTRY_SIZE: usize = 7 + NAME_LENGTH + 1;

/// Participants payload size after the header.
pub const PARTICIPANTS_PAYLOAD_SIZE: usize = 1 + NUM_CARS * PARTICIPANT_ENTRY_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParticipantData {
    /// 1 when the car is AI controlled.
    pub ai_controlled: u8,
    /// 255 for network humans.
    pub driver_id: u8,
    pub network_id: u8,
    pub team_id: u8,
    pub my_team: u8,
    pub race_number: u8,
    pub nationality: u8,
    /// Decoded up to the first NUL.
    pub name: String,
    /// 0 restricted, 1 public.
    pub your_telemetry: u8,
}

impl ParticipantData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            ai_controlled: r.u8()?,
            driver_id: r.u8()?,
            network_id: r.u8()?,
            team_id: r.u8()?,
            my_team: r.u8()?,
            race_number: r.u8()?,
            nationality: r.u8()?,
            name: r.fixed_str::<NAME_LENGTH>()?,
            your_telemetry: r.u8()?,
        })
    }

    pub fn is_ai(&self) -> bool {
        self.ai_controlled != 0
    }

    pub fn telemetry_public(&self) -> bool {
        self.your_telemetry != 0
    }
}

/// Participants payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PacketParticipantsData {
    pub num_active_cars: u8,
    pub participants: [ParticipantData; NUM_CARS],
}

impl PacketParticipantsData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            num_active_cars: r.u8()?,
            participants: r.records(ParticipantData::decode)?,
        })
    }

    /// Participant slots the game reports as active.
    pub fn active(&self) -> &[ParticipantData] {
        let count = usize::from(self.num_active_cars).min(NUM_CARS);
        self.participants.get(..count).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_payload_size() {
        assert_eq!(PARTICIPANT_ENTRY_SIZE, 56);
        assert_eq!(PARTICIPANTS_PAYLOAD_SIZE, 1233);
    }

    #[test]
    fn test_decode_names() -> TestResult {
        let mut raw = vec![0u8; PARTICIPANTS_PAYLOAD_SIZE];
        raw[0] = 2;
        let first = 1;
        raw[first] = 1; // ai
        raw[first + 5] = 44; // race number
        raw[first + 7..first + 7 + 8].copy_from_slice(b"HAMILTON");
        raw[first + 55] = 1;
        let second = first + PARTICIPANT_ENTRY_SIZE;
        raw[second + 7..second + 7 + 10].copy_from_slice("VERSTAPPEN".as_bytes());

        let mut r = ByteReader::new(&raw);
        let packet = PacketParticipantsData::decode(&mut r)?;
        assert!(r.is_empty());
        assert_eq!(packet.active().len(), 2);
        let [p0, p1, ..] = &packet.participants;
        assert!(p0.is_ai());
        assert_eq!(p0.race_number, 44);
        assert_eq!(p0.name, "HAMILTON");
        assert!(p0.telemetry_public());
        assert_eq!(p1.name, "VERSTAPPEN");
        Ok(())
    }
}
