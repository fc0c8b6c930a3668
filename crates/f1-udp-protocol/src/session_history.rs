//! Session History packet (ID 11): lap and tyre stint history for one car.
//!
//! The game cycles through cars, sending one of these per car at a time.
//! All 100 lap slots and 8 stint slots are always on the wire; only the first
//! `num_laps` / `num_tyre_stints` carry data.

use crate::final_classification::MAX_TYRE_STINTS;
use crate::reader::ByteReader;
use crate::DecodeResult;
use serde::Serialize;

/// Lap history slots per packet.
pub const MAX_LAP_HISTORY: usize = 100;

/// Size of one LapHistoryData entry.
pub const LAP_HISTORY_ENTRY_SIZE: usize = 11;

/// Size of one TyreStintHistoryData entry.
pub const TYRE_STINT_HISTORY_ENTRY_SIZE: usize = 3;

/// Session History payload size after the header.
pub const SESSION_HISTORY_PAYLOAD_SIZE: usize =
    7 + MAX_LAP_HISTORY * LAP_HISTORY_ENTRY_SIZE + MAX_TYRE_STINTS * TYRE_STINT_HISTORY_ENTRY_SIZE;

/// `lap_valid_bit_flags` bits.
pub const LAP_VALID: u8 = 0x01;
pub const SECTOR1_VALID: u8 = 0x02;
pub const SECTOR2_VALID: u8 = 0x04;
pub const SECTOR3_VALID: u8 = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LapHistoryData {
    pub lap_time_ms: u32,
    pub sector1_time_ms: u16,
    pub sector2_time_ms: u16,
    pub sector3_time_ms: u16,
    pub lap_valid_bit_flags: u8,
}

impl LapHistoryData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            lap_time_ms: r.u32_le()?,
            sector1_time_ms: r.u16_le()?,
            sector2_time_ms: r.u16_le()?,
            sector3_time_ms: r.u16_le()?,
            lap_valid_bit_flags: r.u8()?,
        })
    }

    pub fn lap_valid(&self) -> bool {
        self.lap_valid_bit_flags & LAP_VALID != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TyreStintHistoryData {
    /// 255 while the stint is still running.
    pub end_lap: u8,
    pub tyre_actual_compound: u8,
    pub tyre_visual_compound: u8,
}

impl TyreStintHistoryData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            end_lap: r.u8()?,
            tyre_actual_compound: r.u8()?,
            tyre_visual_compound: r.u8()?,
        })
    }
}

/// Session History payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PacketSessionHistoryData {
    pub car_idx: u8,
    pub num_laps: u8,
    pub num_tyre_stints: u8,
    pub best_lap_time_lap_num: u8,
    pub best_sector1_lap_num: u8,
    pub best_sector2_lap_num: u8,
    pub best_sector3_lap_num: u8,
    /// Always [`MAX_LAP_HISTORY`] entries.
    pub lap_history_data: Vec<LapHistoryData>,
    pub tyre_stints_history_data: [TyreStintHistoryData; MAX_TYRE_STINTS],
}

impl PacketSessionHistoryData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            car_idx: r.u8()?,
            num_laps: r.u8()?,
            num_tyre_stints: r.u8()?,
            best_lap_time_lap_num: r.u8()?,
            best_sector1_lap_num: r.u8()?,
            best_sector2_lap_num: r.u8()?,
            best_sector3_lap_num: r.u8()?,
            lap_history_data: r.records_vec(MAX_LAP_HISTORY, LapHistoryData::decode)?,
            tyre_stints_history_data: r.records(TyreStintHistoryData::decode)?,
        })
    }

    /// Laps with recorded data.
    pub fn laps(&self) -> &[LapHistoryData] {
        let count = usize::from(self.num_laps).min(self.lap_history_data.len());
        self.lap_history_data.get(..count).unwrap_or_default()
    }

    /// Stints with recorded data.
    pub fn stints(&self) -> &[TyreStintHistoryData] {
        let count = usize::from(self.num_tyre_stints).min(MAX_TYRE_STINTS);
        self.tyre_stints_history_data.get(..count).unwrap_or_default()
    }

    /// Best lap entry, using the game's 1-based lap number.
    pub fn best_lap(&self) -> Option<&LapHistoryData> {
        let lap = usize::from(self.best_lap_time_lap_num).checked_sub(1)?;
        self.laps().get(lap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_payload_size() {
        assert_eq!(SESSION_HISTORY_PAYLOAD_SIZE, 1131);
    }

    #[test]
    fn test_decode_laps_and_stints() -> TestResult {
        let mut raw = vec![0u8; SESSION_HISTORY_PAYLOAD_SIZE];
        raw[0] = 5; // car
        raw[1] = 2; // laps
        raw[2] = 1; // stints
        raw[3] = 2; // best lap
        let lap2 = 7 + LAP_HISTORY_ENTRY_SIZE;
        raw[lap2..lap2 + 4].copy_from_slice(&88_500u32.to_le_bytes());
        raw[lap2 + 4..lap2 + 6].copy_from_slice(&28_100u16.to_le_bytes());
        raw[lap2 + 10] = LAP_VALID | SECTOR1_VALID;
        let stints = 7 + MAX_LAP_HISTORY * LAP_HISTORY_ENTRY_SIZE;
        raw[stints] = 255;
        raw[stints + 1] = 18;
        raw[stints + 2] = 17;

        let mut r = ByteReader::new(&raw);
        let history = PacketSessionHistoryData::decode(&mut r)?;
        assert!(r.is_empty());
        assert_eq!(history.car_idx, 5);
        assert_eq!(history.lap_history_data.len(), MAX_LAP_HISTORY);
        assert_eq!(history.laps().len(), 2);

        let best = history.best_lap().ok_or("missing best lap")?;
        assert_eq!(best.lap_time_ms, 88_500);
        assert_eq!(best.sector1_time_ms, 28_100);
        assert!(best.lap_valid());

        assert_eq!(
            history.stints(),
            &[TyreStintHistoryData {
                end_lap: 255,
                tyre_actual_compound: 18,
                tyre_visual_compound: 17,
            }]
        );
        Ok(())
    }

    #[test]
    fn test_best_lap_zero_means_none() -> TestResult {
        let raw = vec![0u8; SESSION_HISTORY_PAYLOAD_SIZE];
        let history = PacketSessionHistoryData::decode(&mut ByteReader::new(&raw))?;
        assert!(history.best_lap().is_none());
        assert!(history.laps().is_empty());
        Ok(())
    }
}
