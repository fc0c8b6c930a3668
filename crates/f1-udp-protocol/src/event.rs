//! Event packet (ID 3): a four-letter code plus a fixed 12-byte detail union.
//!
//! Codes without details still carry the full 12 bytes on the wire; the
//! unused tail is ignored.

use crate::reader::ByteReader;
use crate::DecodeResult;
use serde::Serialize;

/// Width of the event detail union.
pub const EVENT_DETAILS_SIZE: usize = 12;

/// Event payload size after the header (code + detail union).
pub const EVENT_PAYLOAD_SIZE: usize = 4 + EVENT_DETAILS_SIZE;

/// Decoded event detail, selected by the event string code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventDetails {
    /// `SSTA`
    SessionStarted,
    /// `SEND`
    SessionEnded,
    /// `FTLP`
    FastestLap { vehicle_idx: u8, lap_time: f32 },
    /// `RTMT`
    Retirement { vehicle_idx: u8 },
    /// `DRSE`
    DrsEnabled,
    /// `DRSD`
    DrsDisabled,
    /// `TMPT`
    TeamMateInPits { vehicle_idx: u8 },
    /// `CHQF`
    ChequeredFlag,
    /// `RCWN`
    RaceWinner { vehicle_idx: u8 },
    /// `PENA`
    Penalty {
        penalty_type: u8,
        infringement_type: u8,
        vehicle_idx: u8,
        other_vehicle_idx: u8,
        time: u8,
        lap_num: u8,
        places_gained: u8,
    },
    /// `SPTP`
    SpeedTrap {
        vehicle_idx: u8,
        /// Kilometres per hour.
        speed: f32,
        is_overall_fastest_in_session: u8,
        is_driver_fastest_in_session: u8,
        fastest_vehicle_idx_in_session: u8,
        fastest_speed_in_session: f32,
    },
    /// `STLG`
    StartLights { num_lights: u8 },
    /// `LGOT`
    LightsOut,
    /// `DTSV`
    DriveThroughServed { vehicle_idx: u8 },
    /// `SGSV`
    StopGoServed { vehicle_idx: u8 },
    /// `FLBK`
    Flashback {
        flashback_frame_identifier: u32,
        flashback_session_time: f32,
    },
    /// `BUTN`
    Buttons { button_status: u32 },
    /// Well-formed packet carrying a code this crate does not know.
    Unrecognised { code: [u8; 4] },
}

impl EventDetails {
    /// Decode the detail union for `code`. Always consumes [`EVENT_DETAILS_SIZE`] bytes.
    pub fn decode(code: [u8; 4], r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let mut d = ByteReader::new(r.bytes(EVENT_DETAILS_SIZE)?);
        let details = match &code {
            b"SSTA" => EventDetails::SessionStarted,
            b"SEND" => EventDetails::SessionEnded,
            b"FTLP" => EventDetails::FastestLap {
                vehicle_idx: d.u8()?,
                lap_time: d.f32_le()?,
            },
            b"RTMT" => EventDetails::Retirement {
                vehicle_idx: d.u8()?,
            },
            b"DRSE" => EventDetails::DrsEnabled,
            b"DRSD" => EventDetails::DrsDisabled,
            b"TMPT" => EventDetails::TeamMateInPits {
                vehicle_idx: d.u8()?,
            },
            b"CHQF" => EventDetails::ChequeredFlag,
            b"RCWN" => EventDetails::RaceWinner {
                vehicle_idx: d.u8()?,
            },
            b"PENA" => EventDetails::Penalty {
                penalty_type: d.u8()?,
                infringement_type: d.u8()?,
                vehicle_idx: d.u8()?,
                other_vehicle_idx: d.u8()?,
                time: d.u8()?,
                lap_num: d.u8()?,
                places_gained: d.u8()?,
            },
            b"SPTP" => EventDetails::SpeedTrap {
                vehicle_idx: d.u8()?,
                speed: d.f32_le()?,
                is_overall_fastest_in_session: d.u8()?,
                is_driver_fastest_in_session: d.u8()?,
                fastest_vehicle_idx_in_session: d.u8()?,
                fastest_speed_in_session: d.f32_le()?,
            },
            b"STLG" => EventDetails::StartLights {
                num_lights: d.u8()?,
            },
            b"LGOT" => EventDetails::LightsOut,
            b"DTSV" => EventDetails::DriveThroughServed {
                vehicle_idx: d.u8()?,
            },
            b"SGSV" => EventDetails::StopGoServed {
                vehicle_idx: d.u8()?,
            },
            b"FLBK" => EventDetails::Flashback {
                flashback_frame_identifier: d.u32_le()?,
                flashback_session_time: d.f32_le()?,
            },
            b"BUTN" => EventDetails::Buttons {
                button_status: d.u32_le()?,
            },
            _ => EventDetails::Unrecognised { code },
        };
        Ok(details)
    }

    /// Car slot the event is about, when it names one.
    pub fn vehicle_idx(&self) -> Option<u8> {
        match *self {
            EventDetails::FastestLap { vehicle_idx, .. }
            | EventDetails::Retirement { vehicle_idx }
            | EventDetails::TeamMateInPits { vehicle_idx }
            | EventDetails::RaceWinner { vehicle_idx }
            | EventDetails::Penalty { vehicle_idx, .. }
            | EventDetails::SpeedTrap { vehicle_idx, .. }
            | EventDetails::DriveThroughServed { vehicle_idx }
            | EventDetails::StopGoServed { vehicle_idx } => Some(vehicle_idx),
            _ => None,
        }
    }
}

/// Event payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PacketEventData {
    /// Raw four-byte ASCII code, e.g. `b"SSTA"`.
    pub event_string_code: [u8; 4],
    pub details: EventDetails,
}

impl PacketEventData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let event_string_code = r.array::<4>()?;
        let details = EventDetails::decode(event_string_code, r)?;
        Ok(Self {
            event_string_code,
            details,
        })
    }

    /// The event code as text, lossily.
    pub fn code(&self) -> String {
        String::from_utf8_lossy(&self.event_string_code).into_owned()
    }
}
