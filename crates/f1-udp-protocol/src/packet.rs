//! Packet dispatch: header validation, size check, and payload selection.

use crate::car_damage::{CAR_DAMAGE_PAYLOAD_SIZE, PacketCarDamageData};
use crate::car_setups::{CAR_SETUPS_PAYLOAD_SIZE, PacketCarSetupData};
use crate::car_status::{CAR_STATUS_PAYLOAD_SIZE, PacketCarStatusData};
use crate::car_telemetry::{CAR_TELEMETRY_PAYLOAD_SIZE, PacketCarTelemetryData};
use crate::event::{EVENT_PAYLOAD_SIZE, PacketEventData};
use crate::final_classification::{
    FINAL_CLASSIFICATION_PAYLOAD_SIZE, PacketFinalClassificationData,
};
use crate::header::PacketHeader;
use crate::ids::{HEADER_SIZE, PacketId};
use crate::lap_data::{LAP_DATA_PAYLOAD_SIZE, PacketLapData};
use crate::lobby_info::{LOBBY_INFO_PAYLOAD_SIZE, PacketLobbyInfoData};
use crate::motion::{MOTION_PAYLOAD_SIZE, PacketMotionData};
use crate::participants::{PARTICIPANTS_PAYLOAD_SIZE, PacketParticipantsData};
use crate::reader::ByteReader;
use crate::session::{PacketSessionData, SESSION_PAYLOAD_SIZE};
use crate::session_history::{PacketSessionHistoryData, SESSION_HISTORY_PAYLOAD_SIZE};
use crate::{DecodeError, DecodeResult};
use serde::Serialize;

/// One decoded datagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Packet {
    pub header: PacketHeader,
    pub payload: Payload,
}

impl Packet {
    /// Packet id taken from the payload variant, which always agrees with
    /// `header.packet_id`.
    pub fn packet_id(&self) -> PacketId {
        self.payload.packet_id()
    }
}

/// Decoded payload, one variant per packet id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "packet", content = "data", rename_all = "snake_case")]
pub enum Payload {
    Motion(Box<PacketMotionData>),
    Session(Box<PacketSessionData>),
    LapData(Box<PacketLapData>),
    Event(PacketEventData),
    Participants(Box<PacketParticipantsData>),
    CarSetups(Box<PacketCarSetupData>),
    CarTelemetry(Box<PacketCarTelemetryData>),
    CarStatus(Box<PacketCarStatusData>),
    FinalClassification(Box<PacketFinalClassificationData>),
    LobbyInfo(Box<PacketLobbyInfoData>),
    CarDamage(Box<PacketCarDamageData>),
    SessionHistory(Box<PacketSessionHistoryData>),
}

impl Payload {
    pub fn packet_id(&self) -> PacketId {
        match self {
            Payload::Motion(_) => PacketId::Motion,
            Payload::Session(_) => PacketId::Session,
            Payload::LapData(_) => PacketId::LapData,
            Payload::Event(_) => PacketId::Event,
            Payload::Participants(_) => PacketId::Participants,
            Payload::CarSetups(_) => PacketId::CarSetups,
            Payload::CarTelemetry(_) => PacketId::CarTelemetry,
            Payload::CarStatus(_) => PacketId::CarStatus,
            Payload::FinalClassification(_) => PacketId::FinalClassification,
            Payload::LobbyInfo(_) => PacketId::LobbyInfo,
            Payload::CarDamage(_) => PacketId::CarDamage,
            Payload::SessionHistory(_) => PacketId::SessionHistory,
        }
    }
}

type PayloadDecoder = fn(&mut ByteReader<'_>) -> DecodeResult<Payload>;

/// One row of the dispatch table.
#[derive(Clone, Copy)]
struct PacketLayout {
    id: PacketId,
    payload_size: usize,
    decode: PayloadDecoder,
}

fn motion(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketMotionData::decode(r).map(|p| Payload::Motion(Box::new(p)))
}

fn session(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketSessionData::decode(r).map(|p| Payload::Session(Box::new(p)))
}

fn lap_data(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketLapData::decode(r).map(|p| Payload::LapData(Box::new(p)))
}

fn event(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketEventData::decode(r).map(Payload::Event)
}

fn participants(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketParticipantsData::decode(r).map(|p| Payload::Participants(Box::new(p)))
}

fn car_setups(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketCarSetupData::decode(r).map(|p| Payload::CarSetups(Box::new(p)))
}

fn car_telemetry(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketCarTelemetryData::decode(r).map(|p| Payload::CarTelemetry(Box::new(p)))
}

fn car_status(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketCarStatusData::decode(r).map(|p| Payload::CarStatus(Box::new(p)))
}

fn final_classification(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketFinalClassificationData::decode(r).map(|p| Payload::FinalClassification(Box::new(p)))
}

fn lobby_info(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketLobbyInfoData::decode(r).map(|p| Payload::LobbyInfo(Box::new(p)))
}

fn car_damage(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketCarDamageData::decode(r).map(|p| Payload::CarDamage(Box::new(p)))
}

fn session_history(r: &mut ByteReader<'_>) -> DecodeResult<Payload> {
    PacketSessionHistoryData::decode(r).map(|p| Payload::SessionHistory(Box::new(p)))
}

/// Indexed by packet id.
const DISPATCH: [PacketLayout; 12] = [
    PacketLayout {
        id: PacketId::Motion,
        payload_size: MOTION_PAYLOAD_SIZE,
        decode: motion,
    },
    PacketLayout {
        id: PacketId::Session,
        payload_size: SESSION_PAYLOAD_SIZE,
        decode: session,
    },
    PacketLayout {
        id: PacketId::LapData,
        payload_size: LAP_DATA_PAYLOAD_SIZE,
        decode: lap_data,
    },
    PacketLayout {
        id: PacketId::Event,
        payload_size: EVENT_PAYLOAD_SIZE,
        decode: event,
    },
    PacketLayout {
        id: PacketId::Participants,
        payload_size: PARTICIPANTS_PAYLOAD_SIZE,
        decode: participants,
    },
    PacketLayout {
        id: PacketId::CarSetups,
        payload_size: CAR_SETUPS_PAYLOAD_SIZE,
        decode: car_setups,
    },
    PacketLayout {
        id: PacketId::CarTelemetry,
        payload_size: CAR_TELEMETRY_PAYLOAD_SIZE,
        decode: car_telemetry,
    },
    PacketLayout {
        id: PacketId::CarStatus,
        payload_size: CAR_STATUS_PAYLOAD_SIZE,
        decode: car_status,
    },
    PacketLayout {
        id: PacketId::FinalClassification,
        payload_size: FINAL_CLASSIFICATION_PAYLOAD_SIZE,
        decode: final_classification,
    },
    PacketLayout {
        id: PacketId::LobbyInfo,
        payload_size: LOBBY_INFO_PAYLOAD_SIZE,
        decode: lobby_info,
    },
    PacketLayout {
        id: PacketId::CarDamage,
        payload_size: CAR_DAMAGE_PAYLOAD_SIZE,
        decode: car_damage,
    },
    PacketLayout {
        id: PacketId::SessionHistory,
        payload_size: SESSION_HISTORY_PAYLOAD_SIZE,
        decode: session_history,
    },
];

fn layout(packet_id: u8) -> Option<&'static PacketLayout> {
    DISPATCH
        .get(usize::from(packet_id))
        .filter(|layout| layout.id.as_u8() == packet_id)
}

/// Payload size in bytes (after the header) for a known packet id.
pub fn expected_payload_size(packet_id: u8) -> Option<usize> {
    layout(packet_id).map(|layout| layout.payload_size)
}

/// Full datagram size (header + payload) for a known packet id.
pub fn expected_packet_size(packet_id: u8) -> Option<usize> {
    expected_payload_size(packet_id).map(|size| HEADER_SIZE + size)
}

/// Decode one complete datagram.
///
/// The header is validated first, then the packet id selects a payload
/// layout whose size must match the remaining bytes exactly. Either the
/// whole packet decodes or an error is returned; there is no partial result.
pub fn decode(raw: &[u8]) -> DecodeResult<Packet> {
    let header = PacketHeader::decode(raw)?;

    let Some(layout) = layout(header.packet_id) else {
        return Err(DecodeError::UnknownPacketId {
            packet_id: header.packet_id,
            header,
        });
    };

    let body = raw.get(HEADER_SIZE..).unwrap_or_default();
    if body.len() != layout.payload_size {
        return Err(DecodeError::PayloadSizeMismatch {
            packet_id: header.packet_id,
            expected: layout.payload_size,
            actual: body.len(),
            header,
        });
    }

    let mut reader = ByteReader::new(body);
    let payload = (layout.decode)(&mut reader)?;
    Ok(Packet { header, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_table_is_indexed_by_id() {
        for (slot, layout) in DISPATCH.iter().enumerate() {
            assert_eq!(usize::from(layout.id.as_u8()), slot);
        }
        assert_eq!(DISPATCH.len(), PacketId::ALL.len());
    }

    #[test]
    fn test_expected_sizes() {
        let payloads: Vec<Option<usize>> = (0..12).map(expected_payload_size).collect();
        assert_eq!(
            payloads,
            [1440, 608, 948, 16, 1233, 1078, 1323, 1034, 991, 1167, 924, 1131]
                .into_iter()
                .map(Some)
                .collect::<Vec<_>>()
        );
        assert_eq!(expected_packet_size(0), Some(1464));
        assert_eq!(expected_packet_size(12), None);
        assert_eq!(expected_packet_size(255), None);
    }
}
