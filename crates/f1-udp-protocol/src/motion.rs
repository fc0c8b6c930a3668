//! Motion packet (ID 0): per-car physics state plus player-only extras.
//!
//! ## Layout
//!
//! - `22 × CarMotionData` (60 bytes each)
//! - player car only: suspension position/velocity/acceleration, wheel speed,
//!   wheel slip (`[f32; 4]` each, RL/RR/FL/FR), local velocity, angular
//!   velocity, angular acceleration (`3 × f32` each), front wheels angle (`f32`)
//!
//! ## Direction vectors
//!
//! Forward and right directions travel as `i16` triples. The published
//! protocol stores each normalised component multiplied by
//! [`DIRECTION_SCALE`]; [`CarMotionData`] holds the divided-back `f32`
//! vectors, never the raw integers.

use crate::ids::NUM_CARS;
use crate::reader::ByteReader;
use crate::types::{Vector3, WheelArray};
use crate::DecodeResult;
use serde::Serialize;

/// Fixed-point scale of the `i16` direction components (`i16 / 32767.0`).
pub const DIRECTION_SCALE: f32 = 32767.0;

/// Size of one CarMotionData entry (60 bytes).
pub const CAR_MOTION_ENTRY_SIZE: usize = 60;

/// Size of the player-only block after the car array (120 bytes).
pub const MOTION_EXTRA_SIZE: usize = 5 * 16 + 3 * 12 + 4;

/// Motion payload size after the header.
pub const MOTION_PAYLOAD_SIZE: usize = NUM_CARS * CAR_MOTION_ENTRY_SIZE + MOTION_EXTRA_SIZE;

/// Convert one wire direction component to its normalised value.
pub fn direction_from_raw(raw: i16) -> f32 {
    f32::from(raw) / DIRECTION_SCALE
}

/// Physics state of one car slot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CarMotionData {
    /// World space position (metres).
    pub world_position: Vector3,
    /// World space velocity (metres per second).
    pub world_velocity: Vector3,
    /// Normalised forward direction, scale already applied.
    pub world_forward_dir: Vector3,
    /// Normalised right direction, scale already applied.
    pub world_right_dir: Vector3,
    pub g_force_lateral: f32,
    pub g_force_longitudinal: f32,
    pub g_force_vertical: f32,
    /// Radians.
    pub yaw: f32,
    /// Radians.
    pub pitch: f32,
    /// Radians.
    pub roll: f32,
}

impl CarMotionData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let world_position = read_vector(r)?; // 0-11
        let world_velocity = read_vector(r)?; // 12-23
        let world_forward_dir = read_direction(r)?; // 24-29
        let world_right_dir = read_direction(r)?; // 30-35
        let g_force_lateral = r.f32_le()?; // 36-39
        let g_force_longitudinal = r.f32_le()?; // 40-43
        let g_force_vertical = r.f32_le()?; // 44-47
        let yaw = r.f32_le()?; // 48-51
        let pitch = r.f32_le()?; // 52-55
        let roll = r.f32_le()?; // 56-59

        Ok(Self {
            world_position,
            world_velocity,
            world_forward_dir,
            world_right_dir,
            g_force_lateral,
            g_force_longitudinal,
            g_force_vertical,
            yaw,
            pitch,
            roll,
        })
    }
}

/// Motion payload: every car slot plus the player's extended fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PacketMotionData {
    /// One entry per car slot, including non-participating slots.
    pub car_motion_data: [CarMotionData; NUM_CARS],
    pub suspension_position: WheelArray<f32>,
    pub suspension_velocity: WheelArray<f32>,
    pub suspension_acceleration: WheelArray<f32>,
    /// Speed of each wheel.
    pub wheel_speed: WheelArray<f32>,
    /// Slip ratio of each wheel.
    pub wheel_slip: WheelArray<f32>,
    /// Velocity in local space.
    pub local_velocity: Vector3,
    pub angular_velocity: Vector3,
    pub angular_acceleration: Vector3,
    /// Current front wheels angle in radians.
    pub front_wheels_angle: f32,
}

impl PacketMotionData {
    /// Decode the payload that follows the header.
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let car_motion_data = r.records(CarMotionData::decode)?;
        let suspension_position = WheelArray(r.f32_le_array()?);
        let suspension_velocity = WheelArray(r.f32_le_array()?);
        let suspension_acceleration = WheelArray(r.f32_le_array()?);
        let wheel_speed = WheelArray(r.f32_le_array()?);
        let wheel_slip = WheelArray(r.f32_le_array()?);
        let local_velocity = read_vector(r)?;
        let angular_velocity = read_vector(r)?;
        let angular_acceleration = read_vector(r)?;
        let front_wheels_angle = r.f32_le()?;

        Ok(Self {
            car_motion_data,
            suspension_position,
            suspension_velocity,
            suspension_acceleration,
            wheel_speed,
            wheel_slip,
            local_velocity,
            angular_velocity,
            angular_acceleration,
            front_wheels_angle,
        })
    }

    /// Motion entry for `index`, if it is a valid car slot.
    pub fn car(&self, index: usize) -> Option<&CarMotionData> {
        self.car_motion_data.get(index)
    }
}

fn read_vector(r: &mut ByteReader<'_>) -> DecodeResult<Vector3> {
    Ok(Vector3::new(r.f32_le()?, r.f32_le()?, r.f32_le()?))
}

fn read_direction(r: &mut ByteReader<'_>) -> DecodeResult<Vector3> {
    let x = direction_from_raw(r.i16_le()?);
    let y = direction_from_raw(r.i16_le()?);
    let z = direction_from_raw(r.i16_le()?);
    Ok(Vector3::new(x, y, z))
}
