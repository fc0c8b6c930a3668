//! Car Status packet (ID 7): fuel, ERS, assists, and tyre compound per car.
//!
//! CarStatusData layout (47 bytes per car):
//! - bytes 0-28: traction/ABS/fuelMix/bias/pitLimiter/fuel/RPM/DRS/tyres/FIA flags
//! - bytes 29-32: ersStoreEnergy (f32)
//! - byte 33: ersDeployMode
//! - bytes 34-37: ersHarvestedThisLapMGUK (f32)
//! - bytes 38-41: ersHarvestedThisLapMGUH (f32)
//! - bytes 42-45: ersDeployedThisLap (f32)
//! - byte 46: networkPaused

use crate::ids::NUM_CARS;
use crate::reader::ByteReader;
use crate::DecodeResult;
use serde::Serialize;

/// Size of one CarStatusData entry (47 bytes).
pub const CAR_STATUS_ENTRY_SIZE: usize = 47;

/// Car Status payload size after the header.
pub const CAR_STATUS_PAYLOAD_SIZE: usize = NUM_CARS * CAR_STATUS_ENTRY_SIZE;

/// Battery capacity: 4 MJ.
pub const ERS_MAX_STORE_ENERGY_J: f32 = 4_000_000.0;

/// Returns the human-readable tyre compound name for a compound code.
pub fn tyre_compound_name(compound: u8) -> &'static str {
    match compound {
        7 => "Intermediate",
        8 => "Wet",
        9 => "Dry (classic)",
        10 => "Wet (classic)",
        11 => "Super Soft",
        12 => "Soft",
        13 => "Medium",
        14 => "Hard",
        15 => "Wet",
        16 => "C5",
        17 => "C4",
        18 => "C3",
        19 => "C2",
        20 => "C1",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CarStatusData {
    /// 0 off, 1 medium, 2 full.
    pub traction_control: u8,
    pub anti_lock_brakes: u8,
    /// 0 lean, 1 standard, 2 rich, 3 max.
    pub fuel_mix: u8,
    /// Percentage.
    pub front_brake_bias: u8,
    pub pit_limiter_status: u8,
    /// Kilograms.
    pub fuel_in_tank: f32,
    /// Kilograms.
    pub fuel_capacity: f32,
    /// Value on the MFD.
    pub fuel_remaining_laps: f32,
    pub max_rpm: u16,
    pub idle_rpm: u16,
    pub max_gears: u8,
    pub drs_allowed: u8,
    /// Metres until DRS can be used, 0 when unavailable.
    pub drs_activation_distance: u16,
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    pub tyres_age_laps: u8,
    /// -1 invalid/unknown, 0 none, 1 green, 2 blue, 3 yellow.
    pub vehicle_fia_flags: i8,
    /// Joules.
    pub ers_store_energy: f32,
    /// 0 none, 1 medium, 2 hotlap, 3 overtake.
    pub ers_deploy_mode: u8,
    pub ers_harvested_this_lap_mguk: f32,
    pub ers_harvested_this_lap_mguh: f32,
    pub ers_deployed_this_lap: f32,
    pub network_paused: u8,
}

impl CarStatusData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let traction_control = r.u8()?; // 0
        let anti_lock_brakes = r.u8()?; // 1
        let fuel_mix = r.u8()?; // 2
        let front_brake_bias = r.u8()?; // 3
        let pit_limiter_status = r.u8()?; // 4
        let fuel_in_tank = r.f32_le()?; // 5-8
        let fuel_capacity = r.f32_le()?; // 9-12
        let fuel_remaining_laps = r.f32_le()?; // 13-16
        let max_rpm = r.u16_le()?; // 17-18
        let idle_rpm = r.u16_le()?; // 19-20
        let max_gears = r.u8()?; // 21
        let drs_allowed = r.u8()?; // 22
        let drs_activation_distance = r.u16_le()?; // 23-24
        let actual_tyre_compound = r.u8()?; // 25
        let visual_tyre_compound = r.u8()?; // 26
        let tyres_age_laps = r.u8()?; // 27
        let vehicle_fia_flags = r.i8()?; // 28
        let ers_store_energy = r.f32_le()?; // 29-32
        let ers_deploy_mode = r.u8()?; // 33
        let ers_harvested_this_lap_mguk = r.f32_le()?; // 34-37
        let ers_harvested_this_lap_mguh = r.f32_le()?; // 38-41
        let ers_deployed_this_lap = r.f32_le()?; // 42-45
        let network_paused = r.u8()?; // 46

        Ok(Self {
            traction_control,
            anti_lock_brakes,
            fuel_mix,
            front_brake_bias,
            pit_limiter_status,
            fuel_in_tank,
            fuel_capacity,
            fuel_remaining_laps,
            max_rpm,
            idle_rpm,
            max_gears,
            drs_allowed,
            drs_activation_distance,
            actual_tyre_compound,
            visual_tyre_compound,
            tyres_age_laps,
            vehicle_fia_flags,
            ers_store_energy,
            ers_deploy_mode,
            ers_harvested_this_lap_mguk,
            ers_harvested_this_lap_mguh,
            ers_deployed_this_lap,
            network_paused,
        })
    }

    /// ERS store as a fraction of the 4 MJ battery, clamped to 0.0–1.0.
    pub fn ers_store_fraction(&self) -> f32 {
        (self.ers_store_energy / ERS_MAX_STORE_ENERGY_J).clamp(0.0, 1.0)
    }

    pub fn tyre_compound_name(&self) -> &'static str {
        tyre_compound_name(self.actual_tyre_compound)
    }
}

/// Car Status payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PacketCarStatusData {
    pub car_status_data: [CarStatusData; NUM_CARS],
}

impl PacketCarStatusData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            car_status_data: r.records(CarStatusData::decode)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_payload_size() {
        assert_eq!(CAR_STATUS_PAYLOAD_SIZE, 1034);
    }

    #[test]
    fn test_decode_entry() -> TestResult {
        let mut raw = vec![0u8; CAR_STATUS_ENTRY_SIZE];
        raw[4] = 1; // pit limiter
        raw[5..9].copy_from_slice(&32.5f32.to_le_bytes());
        raw[17..19].copy_from_slice(&13_000u16.to_le_bytes());
        raw[25] = 17;
        raw[28] = 0xFF; // FIA flag -1
        raw[29..33].copy_from_slice(&2_000_000.0f32.to_le_bytes());
        raw[33] = 3;
        raw[46] = 1;

        let mut r = ByteReader::new(&raw);
        let status = CarStatusData::decode(&mut r)?;
        assert!(r.is_empty());
        assert_eq!(status.pit_limiter_status, 1);
        assert!((status.fuel_in_tank - 32.5).abs() < f32::EPSILON);
        assert_eq!(status.max_rpm, 13_000);
        assert_eq!(status.tyre_compound_name(), "C4");
        assert_eq!(status.vehicle_fia_flags, -1);
        assert!((status.ers_store_fraction() - 0.5).abs() < 1e-6);
        assert_eq!(status.ers_deploy_mode, 3);
        assert_eq!(status.network_paused, 1);
        Ok(())
    }
}
