//! Session packet (ID 1): track, weather, and rules for the current session.

use crate::reader::ByteReader;
use crate::DecodeResult;
use serde::Serialize;

/// Marshal zone slots carried by every session packet.
pub const MAX_MARSHAL_ZONES: usize = 21;
/// Weather forecast slots carried by every session packet.
pub const MAX_WEATHER_FORECAST_SAMPLES: usize = 56;

/// Size of one MarshalZone entry (5 bytes).
pub const MARSHAL_ZONE_SIZE: usize = 5;
/// Size of one WeatherForecastSample entry (8 bytes).
pub const WEATHER_FORECAST_SAMPLE_SIZE: usize = 8;

/// Session payload size after the header.
pub const SESSION_PAYLOAD_SIZE: usize = 19
    + MAX_MARSHAL_ZONES * MARSHAL_ZONE_SIZE
    + 3
    + MAX_WEATHER_FORECAST_SAMPLES * WEATHER_FORECAST_SAMPLE_SIZE
    + 2
    + 12
    + 3
    + 9
    + 2
    + 4
    + 1;

/// Maps `m_trackId` to a display name. Unknown IDs (including `-1`) return `"Unknown"`.
pub fn track_name(track_id: i8) -> &'static str {
    const NAMES: &[&str] = &[
        "Melbourne",         // 0
        "Paul Ricard",       // 1
        "Shanghai",          // 2
        "Sakhir (Bahrain)",  // 3
        "Catalunya",         // 4
        "Monaco",            // 5
        "Montreal",          // 6
        "Silverstone",       // 7
        "Hockenheim",        // 8
        "Hungaroring",       // 9
        "Spa",               // 10
        "Monza",             // 11
        "Singapore",         // 12
        "Suzuka",            // 13
        "Abu Dhabi",         // 14
        "Texas",             // 15
        "Brazil",            // 16
        "Austria",           // 17
        "Sochi",             // 18
        "Mexico",            // 19
        "Baku (Azerbaijan)", // 20
        "Sakhir Short",      // 21
        "Silverstone Short", // 22
        "Texas Short",       // 23
        "Suzuka Short",      // 24
        "Hanoi",             // 25
        "Zandvoort",         // 26
        "Imola",             // 27
        "Portimao",          // 28
        "Jeddah",            // 29
        "Miami",             // 30
        "Las Vegas",         // 31
        "Losail",            // 32
    ];
    usize::try_from(track_id)
        .ok()
        .and_then(|idx| NAMES.get(idx).copied())
        .unwrap_or("Unknown")
}

/// Human-readable weather for the `weather` byte.
pub fn weather_name(weather: u8) -> &'static str {
    match weather {
        0 => "Clear",
        1 => "Light Cloud",
        2 => "Overcast",
        3 => "Light Rain",
        4 => "Heavy Rain",
        5 => "Storm",
        _ => "Unknown",
    }
}

/// Human-readable session type for the `session_type` byte.
pub fn session_type_name(session_type: u8) -> &'static str {
    match session_type {
        0 => "Unknown",
        1 => "P1",
        2 => "P2",
        3 => "P3",
        4 => "Short P",
        5 => "Q1",
        6 => "Q2",
        7 => "Q3",
        8 => "Short Q",
        9 => "OSQ",
        10 => "R",
        11 => "R2",
        12 => "R3",
        13 => "Time Trial",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MarshalZone {
    /// Fraction (0..1) of the way through the lap the zone starts.
    pub zone_start: f32,
    /// -1 invalid/unknown, 0 none, 1 green, 2 blue, 3 yellow.
    pub zone_flag: i8,
}

impl MarshalZone {
    fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            zone_start: r.f32_le()?,
            zone_flag: r.i8()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WeatherForecastSample {
    pub session_type: u8,
    /// Minutes into the future.
    pub time_offset: u8,
    pub weather: u8,
    pub track_temperature: i8,
    /// 0 up, 1 down, 2 no change.
    pub track_temperature_change: i8,
    pub air_temperature: i8,
    pub air_temperature_change: i8,
    pub rain_percentage: u8,
}

impl WeatherForecastSample {
    fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            session_type: r.u8()?,
            time_offset: r.u8()?,
            weather: r.u8()?,
            track_temperature: r.i8()?,
            track_temperature_change: r.i8()?,
            air_temperature: r.i8()?,
            air_temperature_change: r.i8()?,
            rain_percentage: r.u8()?,
        })
    }
}

/// Session payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PacketSessionData {
    pub weather: u8,
    /// Celsius.
    pub track_temperature: i8,
    /// Celsius.
    pub air_temperature: i8,
    pub total_laps: u8,
    /// Metres.
    pub track_length: u16,
    pub session_type: u8,
    /// -1 for unknown.
    pub track_id: i8,
    /// 0 F1 Modern, 1 F1 Classic, 2 F2, 3 F1 Generic, 4 Beta, 5 Supercars, 6 Esports, 7 F2 2021.
    pub formula: u8,
    /// Seconds.
    pub session_time_left: u16,
    /// Seconds.
    pub session_duration: u16,
    /// Kilometres per hour.
    pub pit_speed_limit: u8,
    pub game_paused: u8,
    pub is_spectating: u8,
    pub spectator_car_index: u8,
    pub sli_pro_native_support: u8,
    pub num_marshal_zones: u8,
    pub marshal_zones: [MarshalZone; MAX_MARSHAL_ZONES],
    pub safety_car_status: u8,
    pub network_game: u8,
    pub num_weather_forecast_samples: u8,
    /// Always [`MAX_WEATHER_FORECAST_SAMPLES`] entries; see
    /// [`PacketSessionData::active_forecast_samples`].
    pub weather_forecast_samples: Vec<WeatherForecastSample>,
    pub forecast_accuracy: u8,
    pub ai_difficulty: u8,
    pub season_link_identifier: u32,
    pub weekend_link_identifier: u32,
    pub session_link_identifier: u32,
    pub pit_stop_window_ideal_lap: u8,
    pub pit_stop_window_latest_lap: u8,
    pub pit_stop_rejoin_position: u8,
    pub steering_assist: u8,
    pub braking_assist: u8,
    pub gearbox_assist: u8,
    pub pit_assist: u8,
    pub pit_release_assist: u8,
    pub ers_assist: u8,
    pub drs_assist: u8,
    pub dynamic_racing_line: u8,
    pub dynamic_racing_line_type: u8,
    pub game_mode: u8,
    pub rule_set: u8,
    /// Minutes since midnight.
    pub time_of_day: u32,
    pub session_length: u8,
}

impl PacketSessionData {
    pub fn decode(r: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let weather = r.u8()?;
        let track_temperature = r.i8()?;
        let air_temperature = r.i8()?;
        let total_laps = r.u8()?;
        let track_length = r.u16_le()?;
        let session_type = r.u8()?;
        let track_id = r.i8()?;
        let formula = r.u8()?;
        let session_time_left = r.u16_le()?;
        let session_duration = r.u16_le()?;
        let pit_speed_limit = r.u8()?;
        let game_paused = r.u8()?;
        let is_spectating = r.u8()?;
        let spectator_car_index = r.u8()?;
        let sli_pro_native_support = r.u8()?;
        let num_marshal_zones = r.u8()?;
        let marshal_zones = r.records(MarshalZone::decode)?;
        let safety_car_status = r.u8()?;
        let network_game = r.u8()?;
        let num_weather_forecast_samples = r.u8()?;
        let weather_forecast_samples =
            r.records_vec(MAX_WEATHER_FORECAST_SAMPLES, WeatherForecastSample::decode)?;
        let forecast_accuracy = r.u8()?;
        let ai_difficulty = r.u8()?;
        let season_link_identifier = r.u32_le()?;
        let weekend_link_identifier = r.u32_le()?;
        let session_link_identifier = r.u32_le()?;
        let pit_stop_window_ideal_lap = r.u8()?;
        let pit_stop_window_latest_lap = r.u8()?;
        let pit_stop_rejoin_position = r.u8()?;
        let steering_assist = r.u8()?;
        let braking_assist = r.u8()?;
        let gearbox_assist = r.u8()?;
        let pit_assist = r.u8()?;
        let pit_release_assist = r.u8()?;
        let ers_assist = r.u8()?;
        let drs_assist = r.u8()?;
        let dynamic_racing_line = r.u8()?;
        let dynamic_racing_line_type = r.u8()?;
        let game_mode = r.u8()?;
        let rule_set = r.u8()?;
        let time_of_day = r.u32_le()?;
        let session_length = r.u8()?;

        Ok(Self {
            weather,
            track_temperature,
            air_temperature,
            total_laps,
            track_length,
            session_type,
            track_id,
            formula,
            session_time_left,
            session_duration,
            pit_speed_limit,
            game_paused,
            is_spectating,
            spectator_car_index,
            sli_pro_native_support,
            num_marshal_zones,
            marshal_zones,
            safety_car_status,
            network_game,
            num_weather_forecast_samples,
            weather_forecast_samples,
            forecast_accuracy,
            ai_difficulty,
            season_link_identifier,
            weekend_link_identifier,
            session_link_identifier,
            pit_stop_window_ideal_lap,
            pit_stop_window_latest_lap,
            pit_stop_rejoin_position,
            steering_assist,
            braking_assist,
            gearbox_assist,
            pit_assist,
            pit_release_assist,
            ers_assist,
            drs_assist,
            dynamic_racing_line,
            dynamic_racing_line_type,
            game_mode,
            rule_set,
            time_of_day,
            session_length,
        })
    }

    /// Marshal zones the game reports as populated.
    pub fn active_marshal_zones(&self) -> &[MarshalZone] {
        let count = usize::from(self.num_marshal_zones).min(MAX_MARSHAL_ZONES);
        self.marshal_zones.get(..count).unwrap_or_default()
    }

    /// Forecast samples the game reports as populated.
    pub fn active_forecast_samples(&self) -> &[WeatherForecastSample] {
        let count = usize::from(self.num_weather_forecast_samples)
            .min(self.weather_forecast_samples.len());
        self.weather_forecast_samples
            .get(..count)
            .unwrap_or_default()
    }

    pub fn track_name(&self) -> &'static str {
        track_name(self.track_id)
    }
}
