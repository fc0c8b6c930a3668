//! Car Damage packet (ID 10): wear and damage percentages per car.

use crate::ids::NUM_CARS;
use crate::reader::ByteReader;
use crate::types::WheelArray;
use crate::DecodeResult;
use serde::Serialize;

/// Size of one CarDamageData entry (42 bytes).
pub const CAR_DAMAGE_ENTRY_SIZE: usize = 42;

/// Car Damage payload size after the header.
pub const CAR_DAMAGE_PAYLOAD_SIZE: usize = NUM_CARS * CAR_DAMAGE_ENTRY_SIZE;

/// Damage and wear values are percentages unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CarDamageData {
    pub tyres_wear: WheelArray<f32>,
    pub tyres_damage: WheelArray<u8>,
    pub brakes_damage: WheelArray<u8>,
    pub front_left_wing_damage: u8,
    pub front_right_wing_damage: u8,
    pub rear_wing_damage: u8,
    pub floor_damage: u8,
    pub diffuser_damage: u8,
    pub sidepod_damage: u8,
    /// 0 ok, 1 fault.
    pub drs_fault: u8,
    /// 0 ok, 1 fault.
    pub ers_fault: u8,
    pub gear_box_damage: u8,
    pub engine_damage: u8,
    pub engine_mguh_wear: u8,
    pub engine_es_wear: u8,
    pub engine_ce_wear: u8,
    pub engine_ice_wear: u8,
    pub engine_mguk_wear: u8,
    pub engine_tc_wear: u8,
    pub engine_blown: u8,
    pub engine_seized: u8,
}

impl CarDamageData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            tyres_wear: WheelArray(r.f32_le_array()?), // 0-15
            tyres_damage: WheelArray(r.array()?), // 16-19
            brakes_damage: WheelArray(r.array()?), // 20-23
            front_left_wing_damage: r.u8()?, // 24
            front_right_wing_damage: r.u8()?,
            rear_wing_damage: r.u8()?,
            floor_damage: r.u8()?,
            diffuser_damage: r.u8()?,
            sidepod_damage: r.u8()?,
            drs_fault: r.u8()?, // 30
            ers_fault: r.u8()?,
            gear_box_damage: r.u8()?,
            engine_damage: r.u8()?,
            engine_mguh_wear: r.u8()?, // 34
            engine_es_wear: r.u8()?,
            engine_ce_wear: r.u8()?,
            engine_ice_wear: r.u8()?,
            engine_mguk_wear: r.u8()?,
            engine_tc_wear: r.u8()?,
            engine_blown: r.u8()?, // 40
            engine_seized: r.u8()?, // 41
        })
    }

    /// Highest tyre wear across the four corners.
    pub fn max_tyre_wear(&self) -> f32 {
        self.tyres_wear.iter().map(|(_, wear)| wear).fold(0.0, f32::max)
    }

    pub fn engine_failed(&self) -> bool {
        self.engine_blown != 0 || self.engine_seized != 0
    }
}

/// Car Damage payload.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PacketCarDamageData {
    pub car_damage_data: [CarDamageData; NUM_CARS],
}

impl PacketCarDamageData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            car_damage_data: r.records(CarDamageData::decode)?,
        })
    }
}
