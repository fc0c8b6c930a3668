//! Motion packet decoding through the public dispatcher.

mod common;

use f1_udp_protocol::{
    CarMotionData, DecodeError, HEADER_SIZE, MOTION_PAYLOAD_SIZE, NUM_CARS, PacketMotionData,
    Payload, Vector3, WheelArray, decode,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn motion_of(raw: &[u8]) -> Result<PacketMotionData, Box<dyn std::error::Error>> {
    match decode(raw)?.payload {
        Payload::Motion(motion) => Ok(*motion),
        other => Err(format!("expected motion, got {:?}", other.packet_id()).into()),
    }
}

#[test]
fn test_zeroed_motion_packet() -> TestResult {
    let raw = common::zeroed_packet(0, MOTION_PAYLOAD_SIZE);
    assert_eq!(raw.len(), 1464);

    let packet = decode(&raw)?;
    assert_eq!(packet.header.packet_format, 2023);
    assert_eq!(packet.header.packet_id, 0);

    let motion = motion_of(&raw)?;
    assert_eq!(motion.car_motion_data.len(), NUM_CARS);
    for car in &motion.car_motion_data {
        assert_eq!(*car, CarMotionData::default());
    }
    assert_eq!(motion.suspension_position, WheelArray([0.0; 4]));
    assert_eq!(motion.wheel_slip, WheelArray([0.0; 4]));
    assert_eq!(motion.local_velocity, Vector3::default());
    assert_eq!(motion.angular_acceleration, Vector3::default());
    assert_eq!(motion.front_wheels_angle.to_bits(), 0);
    Ok(())
}

#[test]
fn test_wheel_slots_are_rl_rr_fl_fr() -> TestResult {
    let mut raw = common::zeroed_packet(0, MOTION_PAYLOAD_SIZE);
    let suspension = HEADER_SIZE + NUM_CARS * 60;
    for (slot, value) in [1.0f32, 2.0, 3.0, 4.0].into_iter().enumerate() {
        common::write_f32_le(&mut raw, suspension + slot * 4, value);
    }

    let motion = motion_of(&raw)?;
    let wheels = motion.suspension_position;
    assert!((wheels.rear_left() - 1.0).abs() < f32::EPSILON);
    assert!((wheels.rear_right() - 2.0).abs() < f32::EPSILON);
    assert!((wheels.front_left() - 3.0).abs() < f32::EPSILON);
    assert!((wheels.front_right() - 4.0).abs() < f32::EPSILON);
    Ok(())
}

#[test]
fn test_off_by_one_payload_rejected() {
    for len in [MOTION_PAYLOAD_SIZE - 1, MOTION_PAYLOAD_SIZE + 1] {
        let raw = common::zeroed_packet(0, len);
        assert_eq!(
            decode(&raw),
            Err(DecodeError::PayloadSizeMismatch {
                packet_id: 0,
                expected: MOTION_PAYLOAD_SIZE,
                actual: len,
                header: common::header(0),
            })
        );
    }
}

#[test]
fn test_direction_vectors_are_scaled() -> TestResult {
    let mut raw = common::zeroed_packet(0, MOTION_PAYLOAD_SIZE);
    // second car, forward direction starts at byte 24 of the entry
    let at = HEADER_SIZE + 60 + 24;
    raw[at..at + 2].copy_from_slice(&32767i16.to_le_bytes());
    raw[at + 4..at + 6].copy_from_slice(&(-32767i16).to_le_bytes());

    let motion = motion_of(&raw)?;
    let car = motion.car(1).ok_or("missing car 1")?;
    assert_eq!(car.world_forward_dir, Vector3::new(1.0, 0.0, -1.0));
    assert!((car.world_forward_dir.magnitude() - 2f32.sqrt()).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_encode_decode_reproduces_bytes() -> TestResult {
    let mut motion = PacketMotionData::default();
    for (i, car) in motion.car_motion_data.iter_mut().enumerate() {
        let i = i as f32;
        car.world_position = Vector3::new(i, -i, 100.0 + i);
        car.world_velocity = Vector3::new(80.0, 0.5, -0.25);
        car.world_forward_dir = Vector3::new(16384.0 / 32767.0, 0.0, -1.0);
        car.world_right_dir = Vector3::new(0.0, 1.0, 0.0);
        car.yaw = 0.1 * i;
    }
    motion.wheel_speed = WheelArray([70.0, 70.5, 71.0, 71.5]);
    motion.front_wheels_angle = -0.2;

    let raw = common::encode_motion_packet(&common::header(0), &motion);
    let decoded = motion_of(&raw)?;
    assert_eq!(decoded, motion);
    assert_eq!(common::encode_motion_packet(&common::header(0), &decoded), raw);
    Ok(())
}
