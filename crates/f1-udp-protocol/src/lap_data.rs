//! Lap Data packet (ID 2): timing and race state for every car.

use crate::ids::NUM_CARS;
use crate::reader::ByteReader;
use crate::DecodeResult;
use serde::Serialize;

/// Size of one LapData entry (43 bytes).
pub const LAP_DATA_ENTRY_SIZE: usize = 43;

/// Lap Data payload size after the header (cars + two time-trial indices).
pub const LAP_DATA_PAYLOAD_SIZE: usize = NUM_CARS * LAP_DATA_ENTRY_SIZE + 2;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LapData {
    pub last_lap_time_ms: u32,
    pub current_lap_time_ms: u32,
    pub sector1_time_ms: u16,
    pub sector2_time_ms: u16,
    /// Metres around the current lap; negative before crossing the line.
    pub lap_distance: f32,
    /// Metres around the session.
    pub total_distance: f32,
    /// Seconds, during a safety car.
    pub safety_car_delta: f32,
    pub car_position: u8,
    pub current_lap_num: u8,
    /// 0 none, 1 pitting, 2 in pit area.
    pub pit_status: u8,
    pub num_pit_stops: u8,
    /// 0 sector1, 1 sector2, 2 sector3.
    pub sector: u8,
    pub current_lap_invalid: u8,
    /// Accumulated time penalties in seconds.
    pub penalties: u8,
    pub warnings: u8,
    pub num_unserved_drive_through_pens: u8,
    pub num_unserved_stop_go_pens: u8,
    pub grid_position: u8,
    /// 0 in garage, 1 flying lap, 2 in lap, 3 out lap, 4 on track.
    pub driver_status: u8,
    /// 0 invalid, 1 inactive, 2 active, 3 finished, 4 DNF, 5 DSQ, 6 not classified, 7 retired.
    pub result_status: u8,
    pub pit_lane_timer_active: u8,
    pub pit_lane_time_in_lane_ms: u16,
    pub pit_stop_timer_ms: u16,
    pub pit_stop_should_serve_pen: u8,
}

impl LapData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            last_lap_time_ms: r.u32_le()?, // 0-3
            current_lap_time_ms: r.u32_le()?, // 4-7
            sector1_time_ms: r.u16_le()?, // 8-9
            sector2_time_ms: r.u16_le()?, // 10-11
            lap_distance: r.f32_le()?, // 12-15
            total_distance: r.f32_le()?, // 16-19
            safety_car_delta: r.f32_le()?, // 20-23
            car_position: r.u8()?, // 24
            current_lap_num: r.u8()?, // 25
            pit_status: r.u8()?, // 26
            num_pit_stops: r.u8()?, // 27
            sector: r.u8()?, // 28
            current_lap_invalid: r.u8()?, // 29
            penalties: r.u8()?, // 30
            warnings: r.u8()?, // 31
            num_unserved_drive_through_pens: r.u8()?, // 32
            num_unserved_stop_go_pens: r.u8()?, // 33
            grid_position: r.u8()?, // 34
            driver_status: r.u8()?, // 35
            result_status: r.u8()?, // 36
            pit_lane_timer_active: r.u8()?, // 37
            pit_lane_time_in_lane_ms: r.u16_le()?, // 38-39
            pit_stop_timer_ms: r.u16_le()?, // 40-41
            pit_stop_should_serve_pen: r.u8()?, // 42
        })
    }

    pub fn is_lap_invalid(&self) -> bool {
        self.current_lap_invalid != 0
    }
}

/// Lap Data payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PacketLapData {
    pub lap_data: [LapData; NUM_CARS],
    /// 255 if no personal-best ghost is loaded.
    pub time_trial_pb_car_idx: u8,
    /// 255 if no rival ghost is loaded.
    pub time_trial_rival_car_idx: u8,
}

impl PacketLapData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            lap_data: r.records(LapData::decode)?,
            time_trial_pb_car_idx: r.u8()?,
            time_trial_rival_car_idx: r.u8()?,
        })
    }
}
