//! Car Telemetry packet (ID 6): driver inputs, engine, brakes, and tyres.

use crate::ids::NUM_CARS;
use crate::reader::ByteReader;
use crate::types::WheelArray;
use crate::DecodeResult;
use serde::Serialize;

/// Size of one CarTelemetryData entry (60 bytes).
pub const CAR_TELEMETRY_ENTRY_SIZE: usize = 60;

/// Car Telemetry payload size after the header (cars + 3-byte trailer).
pub const CAR_TELEMETRY_PAYLOAD_SIZE: usize = NUM_CARS * CAR_TELEMETRY_ENTRY_SIZE + 3;

/// `mfd_panel_index` value when the MFD is closed.
pub const MFD_PANEL_CLOSED: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CarTelemetryData {
    /// Kilometres per hour.
    pub speed: u16,
    /// 0.0–1.0.
    pub throttle: f32,
    /// −1.0 (full lock left) to 1.0 (full lock right).
    pub steer: f32,
    /// 0.0–1.0.
    pub brake: f32,
    /// 0–100.
    pub clutch: u8,
    /// −1 reverse, 0 neutral, 1–8 forward.
    pub gear: i8,
    pub engine_rpm: u16,
    pub drs: u8,
    pub rev_lights_percent: u8,
    /// Bit 0 leftmost LED through bit 14 rightmost LED.
    pub rev_lights_bit_value: u16,
    /// Celsius.
    pub brakes_temperature: WheelArray<u16>,
    /// Celsius.
    pub tyres_surface_temperature: WheelArray<u8>,
    /// Celsius.
    pub tyres_inner_temperature: WheelArray<u8>,
    /// Celsius.
    pub engine_temperature: u16,
    /// PSI.
    pub tyres_pressure: WheelArray<f32>,
    pub surface_type: WheelArray<u8>,
}

impl CarTelemetryData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            speed: r.u16_le()?, // 0-1
            throttle: r.f32_le()?, // 2-5
            steer: r.f32_le()?, // 6-9
            brake: r.f32_le()?, // 10-13
            clutch: r.u8()?, // 14
            gear: r.i8()?, // 15
            engine_rpm: r.u16_le()?, // 16-17
            drs: r.u8()?, // 18
            rev_lights_percent: r.u8()?, // 19
            rev_lights_bit_value: r.u16_le()?, // 20-21
            brakes_temperature: WheelArray(r.u16_le_array()?), // 22-29
            tyres_surface_temperature: WheelArray(r.array()?), // 30-33
            tyres_inner_temperature: WheelArray(r.array()?), // 34-37
            engine_temperature: r.u16_le()?, // 38-39
            tyres_pressure: WheelArray(r.f32_le_array()?), // 40-55
            surface_type: WheelArray(r.array()?), // 56-59
        })
    }

    /// Speed in metres per second.
    pub fn speed_ms(&self) -> f32 {
        f32::from(self.speed) / 3.6
    }

    pub fn drs_open(&self) -> bool {
        self.drs != 0
    }
}

/// Car Telemetry payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PacketCarTelemetryData {
    pub car_telemetry_data: [CarTelemetryData; NUM_CARS],
    /// [`MFD_PANEL_CLOSED`] when closed.
    pub mfd_panel_index: u8,
    pub mfd_panel_index_secondary_player: u8,
    /// 0 if no gear is suggested.
    pub suggested_gear: i8,
}

impl PacketCarTelemetryData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            car_telemetry_data: r.records(CarTelemetryData::decode)?,
            mfd_panel_index: r.u8()?,
            mfd_panel_index_secondary_player: r.u8()?,
            suggested_gear: r.i8()?,
        })
    }

    pub fn car(&self, index: usize) -> Option<&CarTelemetryData> {
        self.car_telemetry_data.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_payload_size() {
        assert_eq!(CAR_TELEMETRY_PAYLOAD_SIZE, 1323);
    }

    #[test]
    fn test_decode_entry() -> TestResult {
        let mut raw = vec![0u8; CAR_TELEMETRY_ENTRY_SIZE];
        raw[0..2].copy_from_slice(&288u16.to_le_bytes());
        raw[2..6].copy_from_slice(&1.0f32.to_le_bytes());
        raw[15] = 0xFF; // reverse
        raw[16..18].copy_from_slice(&11_500u16.to_le_bytes());
        raw[18] = 1;
        raw[22..24].copy_from_slice(&510u16.to_le_bytes());
        raw[28..30].copy_from_slice(&620u16.to_le_bytes());
        raw[30] = 90;
        raw[33] = 96;

        let mut r = ByteReader::new(&raw);
        let car = CarTelemetryData::decode(&mut r)?;
        assert!(r.is_empty());
        assert_eq!(car.speed, 288);
        assert!((car.speed_ms() - 80.0).abs() < 1e-4);
        assert_eq!(car.gear, -1);
        assert_eq!(car.engine_rpm, 11_500);
        assert!(car.drs_open());
        assert_eq!(car.brakes_temperature.rear_left(), 510);
        assert_eq!(car.brakes_temperature.front_right(), 620);
        assert_eq!(car.tyres_surface_temperature.rear_left(), 90);
        assert_eq!(car.tyres_surface_temperature.front_right(), 96);
        Ok(())
    }
}
