//! Property-based tests for the decoder.
//!
//! Arbitrary input must never panic, short input is always reported as
//! truncated, and motion packets survive an encode/decode round trip.

mod common;

use f1_udp_protocol::{
    DecodeError, HEADER_SIZE, MOTION_PAYLOAD_SIZE, PacketHeader, PacketId, Payload, decode,
    expected_payload_size,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// decode must return (not panic) for any byte string.
    #[test]
    fn prop_decode_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let _ = decode(&raw);
    }

    /// Anything shorter than the header is a truncation, whatever the bytes.
    #[test]
    fn prop_short_buffers_truncated(raw in proptest::collection::vec(any::<u8>(), 0..HEADER_SIZE)) {
        prop_assert_eq!(
            decode(&raw),
            Err(DecodeError::TruncatedBuffer { needed: HEADER_SIZE, actual: raw.len() })
        );
    }

    /// A recognised header with a random payload length either decodes or
    /// reports a size mismatch; no other outcome.
    #[test]
    fn prop_known_id_size_gate(id in 0u8..12, len in 0usize..1600) {
        let raw = common::zeroed_packet(id, len);
        let expected = expected_payload_size(id).unwrap_or_default();
        match decode(&raw) {
            Ok(packet) => {
                prop_assert_eq!(len, expected);
                prop_assert_eq!(Some(packet.packet_id()), PacketId::from_u8(id));
            }
            Err(DecodeError::PayloadSizeMismatch { packet_id, expected: e, actual, header }) => {
                prop_assert_ne!(len, expected);
                prop_assert_eq!(header, common::header(id));
                prop_assert_eq!(packet_id, id);
                prop_assert_eq!(e, expected);
                prop_assert_eq!(actual, len);
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    /// Every id outside the table is reported with its header intact.
    #[test]
    fn prop_unknown_ids_keep_header(id in 12u8..=255, len in 0usize..64) {
        let raw = common::zeroed_packet(id, len);
        let err = decode(&raw).err();
        prop_assert_eq!(err.as_ref().map(DecodeError::kind), Some("unknown_packet_id"));
        prop_assert_eq!(
            err.as_ref().and_then(DecodeError::header).map(|h| h.packet_id),
            Some(id)
        );
    }

    /// Random motion payload bytes re-encode to the same bytes.
    #[test]
    fn prop_motion_round_trip(payload in proptest::collection::vec(any::<u8>(), MOTION_PAYLOAD_SIZE)) {
        let mut raw = common::zeroed_packet(0, 0);
        raw.extend_from_slice(&payload);

        let packet = decode(&raw);
        prop_assert!(packet.is_ok());
        if let Ok(packet) = packet {
            let Payload::Motion(motion) = packet.payload else {
                return Err(TestCaseError::fail("not a motion payload"));
            };
            let encoded = common::encode_motion_packet(&packet.header, &motion);
            prop_assert_eq!(encoded, raw);
        }
    }

    /// Header fields parse back to what was written.
    #[test]
    fn prop_header_round_trip(
        format in prop_oneof![Just(2022u16), Just(2023u16)],
        uid in any::<u64>(),
        frame in any::<u32>(),
        time in -1.0e6f32..1.0e6,
        player in 0u8..22,
    ) {
        let mut h = common::header(0);
        h.packet_format = format;
        h.session_uid = uid;
        h.frame_identifier = frame;
        h.session_time = time;
        h.player_car_index = player;
        let mut raw = Vec::new();
        common::encode_header(&h, &mut raw);
        prop_assert_eq!(PacketHeader::decode(&raw), Ok(h));
    }
}
