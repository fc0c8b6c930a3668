//! Final Classification packet (ID 8): results once a session ends.

use crate::ids::NUM_CARS;
use crate::reader::ByteReader;
use crate::DecodeResult;
use serde::Serialize;

/// Tyre stint slots per car.
pub const MAX_TYRE_STINTS: usize = 8;

/// Size of one FinalClassificationData entry (45 bytes).
pub const FINAL_CLASSIFICATION_ENTRY_SIZE: usize = 13 + 3 * MAX_TYRE_STINTS + 8;

/// Final Classification payload size after the header.
pub const FINAL_CLASSIFICATION_PAYLOAD_SIZE: usize = 1 + NUM_CARS * FINAL_CLASSIFICATION_ENTRY_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FinalClassificationData {
    pub position: u8,
    pub num_laps: u8,
    pub grid_position: u8,
    pub points: u8,
    pub num_pit_stops: u8,
    pub result_status: u8,
    pub best_lap_time_ms: u32,
    /// Seconds, without penalties.
    pub total_race_time: f64,
    /// Seconds.
    pub penalties_time: u8,
    pub num_penalties: u8,
    pub num_tyre_stints: u8,
    pub tyre_stints_actual: [u8; MAX_TYRE_STINTS],
    pub tyre_stints_visual: [u8; MAX_TYRE_STINTS],
    /// Lap each stint ended on.
    pub tyre_stints_end_laps: [u8; MAX_TYRE_STINTS],
}

impl FinalClassificationData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            position: r.u8()?,
            num_laps: r.u8()?,
            grid_position: r.u8()?,
            points: r.u8()?,
            num_pit_stops: r.u8()?,
            result_status: r.u8()?,
            best_lap_time_ms: r.u32_le()?,
            total_race_time: r.f64_le()?,
            penalties_time: r.u8()?,
            num_penalties: r.u8()?,
            num_tyre_stints: r.u8()?,
            tyre_stints_actual: r.array()?,
            tyre_stints_visual: r.array()?,
            tyre_stints_end_laps: r.array()?,
        })
    }
}

/// Final Classification payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PacketFinalClassificationData {
    pub num_cars: u8,
    pub classification_data: [FinalClassificationData; NUM_CARS],
}

impl PacketFinalClassificationData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            num_cars: r.u8()?,
            classification_data: r.records(FinalClassificationData::decode)?,
        })
    }

    /// Classified entries, the first `num_cars` slots.
    pub fn classified(&self) -> &[FinalClassificationData] {
        let count = usize::from(self.num_cars).min(NUM_CARS);
        self.classification_data.get(..count).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_payload_size() {
        assert_eq!(FINAL_CLASSIFICATION_ENTRY_SIZE, 45);
        assert_eq!(FINAL_CLASSIFICATION_PAYLOAD_SIZE, 991);
    }

    #[test]
    fn test_decode_entry() -> TestResult {
        let mut raw = vec![0u8; FINAL_CLASSIFICATION_PAYLOAD_SIZE];
        raw[0] = 20;
        raw[1] = 1; // position
        raw[4] = 25; // points
        raw[7..11].copy_from_slice(&90_123u32.to_le_bytes());
        raw[11..19].copy_from_slice(&5_432.5f64.to_le_bytes());
        raw[21] = 2; // stints
        raw[22] = 18;
        raw[23] = 17;
        raw[38] = 21; // end lap of stint 1
        raw[39] = 57;

        let mut r = ByteReader::new(&raw);
        let packet = PacketFinalClassificationData::decode(&mut r)?;
        assert!(r.is_empty());
        assert_eq!(packet.classified().len(), 20);
        let winner = packet.classification_data[0];
        assert_eq!(winner.position, 1);
        assert_eq!(winner.points, 25);
        assert_eq!(winner.best_lap_time_ms, 90_123);
        assert!((winner.total_race_time - 5_432.5).abs() < f64::EPSILON);
        assert_eq!(winner.num_tyre_stints, 2);
        assert_eq!(winner.tyre_stints_actual[..2], [18, 17]);
        assert_eq!(winner.tyre_stints_end_laps[..2], [21, 57]);
        Ok(())
    }
}
