//! Car Setups packet (ID 5): wing, suspension, and tyre setup per car.
//!
//! Tyre pressures are stored on the wire as four named fields in RL, RR, FL,
//! FR order; they decode into a [`WheelArray`] in that same order.

use crate::ids::NUM_CARS;
use crate::reader::ByteReader;
use crate::types::WheelArray;
use crate::DecodeResult;
use serde::Serialize;

/// Size of one CarSetupData entry (49 bytes).
pub const CAR_SETUP_ENTRY_SIZE: usize = 49;

/// Car Setups payload size after the header.
pub const CAR_SETUPS_PAYLOAD_SIZE: usize = NUM_CARS * CAR_SETUP_ENTRY_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CarSetupData {
    pub front_wing: u8,
    pub rear_wing: u8,
    /// Differential adjustment on throttle (percentage).
    pub on_throttle: u8,
    /// Differential adjustment off throttle (percentage).
    pub off_throttle: u8,
    pub front_camber: f32,
    pub rear_camber: f32,
    pub front_toe: f32,
    pub rear_toe: f32,
    pub front_suspension: u8,
    pub rear_suspension: u8,
    pub front_anti_roll_bar: u8,
    pub rear_anti_roll_bar: u8,
    pub front_suspension_height: u8,
    pub rear_suspension_height: u8,
    /// Percentage.
    pub brake_pressure: u8,
    /// Percentage.
    pub brake_bias: u8,
    /// PSI.
    pub tyre_pressure: WheelArray<f32>,
    pub ballast: u8,
    pub fuel_load: f32,
}

impl CarSetupData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            front_wing: r.u8()?, // 0
            rear_wing: r.u8()?, // 1
            on_throttle: r.u8()?, // 2
            off_throttle: r.u8()?, // 3
            front_camber: r.f32_le()?, // 4-7
            rear_camber: r.f32_le()?, // 8-11
            front_toe: r.f32_le()?, // 12-15
            rear_toe: r.f32_le()?, // 16-19
            front_suspension: r.u8()?, // 20
            rear_suspension: r.u8()?, // 21
            front_anti_roll_bar: r.u8()?, // 22
            rear_anti_roll_bar: r.u8()?, // 23
            front_suspension_height: r.u8()?, // 24
            rear_suspension_height: r.u8()?, // 25
            brake_pressure: r.u8()?, // 26
            brake_bias: r.u8()?, // 27
            tyre_pressure: WheelArray(r.f32_le_array()?), // 28-43
            ballast: r.u8()?, // 44
            fuel_load: r.f32_le()?, // 45-48
        })
    }
}

/// Car Setups payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PacketCarSetupData {
    pub car_setups: [CarSetupData; NUM_CARS],
}

impl PacketCarSetupData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            car_setups: r.records(CarSetupData::decode)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_payload_size() {
        assert_eq!(CAR_SETUPS_PAYLOAD_SIZE, 1078);
    }

    #[test]
    fn test_tyre_pressure_order() -> TestResult {
        let mut raw = vec![0u8; CAR_SETUP_ENTRY_SIZE];
        raw[0] = 11;
        for (slot, psi) in [21.0f32, 21.5, 23.0, 23.5].iter().enumerate() {
            let at = 28 + slot * 4;
            raw[at..at + 4].copy_from_slice(&psi.to_le_bytes());
        }
        raw[44] = 3;
        raw[45..49].copy_from_slice(&12.5f32.to_le_bytes());

        let mut r = ByteReader::new(&raw);
        let setup = CarSetupData::decode(&mut r)?;
        assert!(r.is_empty());
        assert_eq!(setup.front_wing, 11);
        assert!((setup.tyre_pressure.rear_left() - 21.0).abs() < f32::EPSILON);
        assert!((setup.tyre_pressure.front_right() - 23.5).abs() < f32::EPSILON);
        assert_eq!(setup.ballast, 3);
        assert!((setup.fuel_load - 12.5).abs() < f32::EPSILON);
        Ok(())
    }
}
