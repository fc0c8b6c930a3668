//! Test-only encoder for building datagrams.
//!
//! The library is decode-only; these helpers write the same layouts back out
//! so tests can build packets field by field and check round trips.

#![allow(dead_code)]

use f1_udp_protocol::{
    CarMotionData, DIRECTION_SCALE, HEADER_SIZE, PacketHeader, PacketMotionData, Vector3,
    expected_payload_size,
};

/// Header for a recognised 2023 schema with sensible defaults.
pub fn header(packet_id: u8) -> PacketHeader {
    PacketHeader {
        packet_format: 2023,
        game_major_version: 1,
        game_minor_version: 4,
        packet_version: 1,
        packet_id,
        session_uid: 0x0123_4567_89AB_CDEF,
        session_time: 12.5,
        frame_identifier: 42,
        player_car_index: 0,
        secondary_player_car_index: 255,
    }
}

pub fn encode_header(header: &PacketHeader, out: &mut Vec<u8>) {
    out.extend_from_slice(&header.packet_format.to_le_bytes());
    out.push(header.game_major_version);
    out.push(header.game_minor_version);
    out.push(header.packet_version);
    out.push(header.packet_id);
    out.extend_from_slice(&header.session_uid.to_le_bytes());
    out.extend_from_slice(&header.session_time.to_le_bytes());
    out.extend_from_slice(&header.frame_identifier.to_le_bytes());
    out.push(header.player_car_index);
    out.push(header.secondary_player_car_index);
}

/// Header followed by `payload_len` zero bytes.
pub fn zeroed_packet(packet_id: u8, payload_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + payload_len);
    encode_header(&header(packet_id), &mut out);
    out.resize(HEADER_SIZE + payload_len, 0);
    out
}

/// Header followed by a zeroed payload of the size the dispatcher expects.
pub fn zeroed_known_packet(packet_id: u8) -> Vec<u8> {
    let len = expected_payload_size(packet_id).unwrap_or_default();
    zeroed_packet(packet_id, len)
}

pub fn direction_to_raw(value: f32) -> i16 {
    (value * DIRECTION_SCALE).round() as i16
}

fn encode_vector(v: &Vector3, out: &mut Vec<u8>) {
    for c in [v.x, v.y, v.z] {
        out.extend_from_slice(&c.to_le_bytes());
    }
}

fn encode_direction(v: &Vector3, out: &mut Vec<u8>) {
    for c in [v.x, v.y, v.z] {
        out.extend_from_slice(&direction_to_raw(c).to_le_bytes());
    }
}

pub fn encode_car_motion(car: &CarMotionData, out: &mut Vec<u8>) {
    encode_vector(&car.world_position, out);
    encode_vector(&car.world_velocity, out);
    encode_direction(&car.world_forward_dir, out);
    encode_direction(&car.world_right_dir, out);
    for v in [
        car.g_force_lateral,
        car.g_force_longitudinal,
        car.g_force_vertical,
        car.yaw,
        car.pitch,
        car.roll,
    ] {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

pub fn encode_motion_payload(motion: &PacketMotionData, out: &mut Vec<u8>) {
    for car in &motion.car_motion_data {
        encode_car_motion(car, out);
    }
    for wheels in [
        &motion.suspension_position,
        &motion.suspension_velocity,
        &motion.suspension_acceleration,
        &motion.wheel_speed,
        &motion.wheel_slip,
    ] {
        for v in wheels.0 {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
    encode_vector(&motion.local_velocity, out);
    encode_vector(&motion.angular_velocity, out);
    encode_vector(&motion.angular_acceleration, out);
    out.extend_from_slice(&motion.front_wheels_angle.to_le_bytes());
}

/// Full motion datagram: header + payload.
pub fn encode_motion_packet(header: &PacketHeader, motion: &PacketMotionData) -> Vec<u8> {
    let mut out = Vec::new();
    encode_header(header, &mut out);
    encode_motion_payload(motion, &mut out);
    out
}

/// Write an `f32` in little-endian at `offset` into `buf`.
pub fn write_f32_le(buf: &mut [u8], offset: usize, value: f32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
