use crate::aircraft::AircraftType;
use crate::emissions::FUEL_TO_CO2_RATIO;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One synthetic flight. Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_id: String,
    pub date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub distance_km: u32,
    #[serde(deserialize_with = "lenient_aircraft::deserialize")]
    pub aircraft_type: AircraftType,
    pub takeoff_weight_kg: u32,
    pub flight_level: u32,
    pub avg_speed_kmh: u32,
    /// Negative for tailwind.
    pub headwind_kmh: i32,
    /// Deviation from ISA in Celsius.
    pub temperature_deviation: i32,
    pub fuel_consumed_kg: f64,
    pub co2_emissions_kg: f64,
    #[serde(deserialize_with = "lenient_bool::deserialize")]
    pub optimal_climb_used: bool,
    pub potential_fuel_savings_kg: f64,
    #[serde(with = "departure_format")]
    pub departure_time: NaiveDateTime,
}

impl FlightRecord {
    /// `"Origin - Destination"`, the label used to group and filter routes.
    pub fn route(&self) -> String {
        format!("{} - {}", self.origin, self.destination)
    }

    pub fn is_route(&self, origin: &str, destination: &str) -> bool {
        self.origin == origin && self.destination == destination
    }

    /// Sets fuel burn and re-derives emissions so the two never drift apart.
    pub fn set_fuel(&mut self, fuel_kg: f64) {
        self.fuel_consumed_kg = fuel_kg;
        self.co2_emissions_kg = fuel_kg * FUEL_TO_CO2_RATIO;
    }
}

mod departure_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    // Some writers add fractional seconds or a 'T' separator.
    const ACCEPTED: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        ACCEPTED
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid departure_time '{}'", raw)))
    }
}

/// Unknown codes load as the fallback type instead of failing the whole file.
mod lenient_aircraft {
    use crate::aircraft::AircraftType;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<AircraftType, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(AircraftType::resolve(&raw))
    }
}

mod lenient_bool {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid boolean '{}'", other))),
        }
    }
}
