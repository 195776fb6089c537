use crate::aircraft::AircraftType;
use crate::flight::FlightRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DistanceCategory {
    Short,
    Medium,
    Long,
    UltraLong,
}

impl DistanceCategory {
    /// Right-closed bins: (0, 1000], (1000, 3000], (3000, 6000], (6000, 12000].
    pub fn from_km(km: f64) -> Option<Self> {
        match km {
            d if d <= 0.0 => None,
            d if d <= 1000.0 => Some(DistanceCategory::Short),
            d if d <= 3000.0 => Some(DistanceCategory::Medium),
            d if d <= 6000.0 => Some(DistanceCategory::Long),
            d if d <= 12000.0 => Some(DistanceCategory::UltraLong),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistanceCategory::Short => "Short",
            DistanceCategory::Medium => "Medium",
            DistanceCategory::Long => "Long",
            DistanceCategory::UltraLong => "Ultra-Long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WindCategory {
    StrongTailwind,
    LightTailwind,
    Neutral,
    LightHeadwind,
    StrongHeadwind,
}

impl WindCategory {
    /// Right-closed bins from -50 to 80 km/h; -50 itself falls outside.
    pub fn from_headwind(kmh: f64) -> Option<Self> {
        match kmh {
            w if w <= -50.0 => None,
            w if w <= -20.0 => Some(WindCategory::StrongTailwind),
            w if w <= 0.0 => Some(WindCategory::LightTailwind),
            w if w <= 20.0 => Some(WindCategory::Neutral),
            w if w <= 40.0 => Some(WindCategory::LightHeadwind),
            w if w <= 80.0 => Some(WindCategory::StrongHeadwind),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindCategory::StrongTailwind => "Strong Tailwind",
            WindCategory::LightTailwind => "Light Tailwind",
            WindCategory::Neutral => "Neutral",
            WindCategory::LightHeadwind => "Light Headwind",
            WindCategory::StrongHeadwind => "Strong Headwind",
        }
    }
}

/// A flight with the derived columns used for grouping and charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedFlight {
    #[serde(flatten)]
    pub record: FlightRecord,
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub year_month: String,
    pub route: String,
    pub distance_category: Option<DistanceCategory>,
    pub emissions_per_km: f64,
    pub fuel_per_km: f64,
    pub wind_category: Option<WindCategory>,
}

pub fn preprocess(flights: &[FlightRecord]) -> Vec<EnrichedFlight> {
    log::info!("Preprocessing {} flight records", flights.len());

    flights
        .iter()
        .map(|f| {
            let distance = f.distance_km as f64;
            EnrichedFlight {
                month: f.date.month(),
                year: f.date.year(),
                month_name: f.date.format("%b").to_string(),
                year_month: f.date.format("%Y-%m").to_string(),
                route: f.route(),
                distance_category: DistanceCategory::from_km(distance),
                emissions_per_km: f.co2_emissions_kg / distance,
                fuel_per_km: f.fuel_consumed_kg / distance,
                wind_category: WindCategory::from_headwind(f.headwind_kmh as f64),
                record: f.clone(),
            }
        })
        .collect()
}

/// Row selection. `None` fields match everything; date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightFilter {
    pub aircraft_type: Option<AircraftType>,
    pub route: Option<(String, String)>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl FlightFilter {
    pub fn matches(&self, flight: &FlightRecord) -> bool {
        if let Some(aircraft) = self.aircraft_type {
            if flight.aircraft_type != aircraft {
                return false;
            }
        }
        if let Some((origin, destination)) = &self.route {
            if !flight.is_route(origin, destination) {
                return false;
            }
        }
        if let Some((start, end)) = self.date_range {
            if flight.date < start || flight.date > end {
                return false;
            }
        }
        true
    }
}

pub fn filter(flights: &[FlightRecord], criteria: &FlightFilter) -> Vec<FlightRecord> {
    log::info!("Filtering data: {:?}", criteria);
    let filtered: Vec<FlightRecord> = flights
        .iter()
        .filter(|f| criteria.matches(f))
        .cloned()
        .collect();
    log::info!("Filtered data: {} of {} records", filtered.len(), flights.len());
    filtered
}
