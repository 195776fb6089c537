use crate::ContrailError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fleet modelled by the platform. Every per-type constant lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    A320,
    B737,
    A350,
    B777,
    A220,
    B787,
}

impl AircraftType {
    pub const ALL: [AircraftType; 6] = [
        AircraftType::A320,
        AircraftType::B737,
        AircraftType::A350,
        AircraftType::B777,
        AircraftType::A220,
        AircraftType::B787,
    ];

    /// Type used when an aircraft code is not recognised.
    pub const FALLBACK: AircraftType = AircraftType::A320;

    pub fn code(&self) -> &'static str {
        match self {
            AircraftType::A320 => "A320",
            AircraftType::B737 => "B737",
            AircraftType::A350 => "A350",
            AircraftType::B777 => "B777",
            AircraftType::A220 => "A220",
            AircraftType::B787 => "B787",
        }
    }

    /// Cruise fuel burn in kg per km.
    pub fn base_fuel_rate(&self) -> f64 {
        match self {
            AircraftType::A320 => 3.0,
            AircraftType::B737 => 3.2,
            AircraftType::A350 => 7.5,
            AircraftType::B777 => 8.0,
            AircraftType::A220 => 2.5,
            AircraftType::B787 => 6.8,
        }
    }

    /// (min, max) takeoff weight in kg.
    pub fn weight_range(&self) -> (u32, u32) {
        match self {
            AircraftType::A320 => (65_000, 78_000),
            AircraftType::B737 => (62_000, 82_000),
            AircraftType::A350 => (185_000, 220_000),
            AircraftType::B777 => (190_000, 247_000),
            AircraftType::A220 => (45_000, 60_000),
            AircraftType::B787 => (150_000, 180_000),
        }
    }

    /// Most efficient cruise level, in flight level units (hundreds of feet).
    pub fn optimal_flight_level(&self) -> u32 {
        match self {
            AircraftType::A320 => 360,
            AircraftType::B737 => 370,
            AircraftType::A350 => 400,
            AircraftType::B777 => 390,
            AircraftType::A220 => 350,
            AircraftType::B787 => 400,
        }
    }

    /// Lenient lookup: unknown codes map to [`AircraftType::FALLBACK`] with a warning.
    pub fn resolve(code: &str) -> AircraftType {
        match code.parse() {
            Ok(aircraft) => aircraft,
            Err(_) => {
                log::warn!(
                    "Unknown aircraft type: {}, using {} as default",
                    code,
                    Self::FALLBACK
                );
                Self::FALLBACK
            }
        }
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AircraftType {
    type Err = ContrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        AircraftType::ALL
            .iter()
            .find(|a| a.code().eq_ignore_ascii_case(code))
            .copied()
            .ok_or_else(|| ContrailError::UnknownAircraft(s.to_string()))
    }
}
