use crate::aircraft::AircraftType;
use crate::dataset;
use crate::emissions::FUEL_TO_CO2_RATIO;
use crate::flight::FlightRecord;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

pub const DEFAULT_FLIGHT_COUNT: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;

/// Fixed route network: (origin, destination, distance in km).
pub const ROUTES: [(&str, &str, u32); 9] = [
    ("Paris", "London", 350),
    ("Paris", "Madrid", 1050),
    ("Paris", "Rome", 1100),
    ("Paris", "Berlin", 880),
    ("Paris", "Istanbul", 2200),
    ("Paris", "Dubai", 5200),
    ("Paris", "New York", 5800),
    ("Paris", "Tokyo", 9700),
    ("Paris", "Singapore", 10700),
];

const HISTORY_DAYS: i64 = 90;
const DEPARTURE_MINUTES: [u32; 4] = [0, 15, 30, 45];
const OPTIMAL_CLIMB_PROBABILITY: f64 = 0.4;

/// Owns the random source for one generation run.
///
/// Two contexts built with the same seed and anchor produce identical flights.
pub struct GeneratorContext {
    rng: ChaCha8Rng,
    anchor: NaiveDate,
}

impl GeneratorContext {
    /// Flights are dated within the 90 days before today.
    pub fn new(seed: u64) -> Self {
        Self::with_anchor(seed, Local::now().date_naive())
    }

    pub fn with_anchor(seed: u64, anchor: NaiveDate) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            anchor,
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn generate(&mut self, count: usize) -> Vec<FlightRecord> {
        (1..=count)
            .map(|n| self.next_flight(format!("FL{:04}", n)))
            .collect()
    }

    fn next_flight(&mut self, flight_id: String) -> FlightRecord {
        let rng = &mut self.rng;

        let (origin, destination, distance_km) = ROUTES[rng.gen_range(0..ROUTES.len())];

        let aircraft = AircraftType::ALL[rng.gen_range(0..AircraftType::ALL.len())];
        let (min_weight, max_weight) = aircraft.weight_range();
        let takeoff_weight_kg = rng.gen_range(min_weight..max_weight);

        let date = self.anchor - Duration::days(rng.gen_range(0..HISTORY_DAYS));
        let hour: u32 = rng.gen_range(0..24);
        let minute = *DEPARTURE_MINUTES.choose(rng).unwrap_or(&0);
        let departure_time = date
            .and_hms_opt(hour, minute, 0)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN));

        let flight_level: u32 = rng.gen_range(300..410) * 100;
        let avg_speed_kmh: u32 = rng.gen_range(750..900);
        let headwind_kmh: i32 = rng.gen_range(-50..80);
        let temperature_deviation: i32 = rng.gen_range(-15..15);

        // The inline burn model: no altitude or temperature term, plus per-flight scatter.
        let efficiency = 0.85 + rng.gen::<f64>() * 0.3;
        let weather_factor = 1.0 + headwind_kmh as f64 / 500.0;
        let weight_factor = 0.9
            + (takeoff_weight_kg - min_weight) as f64 / (max_weight - min_weight) as f64 * 0.2;
        let fuel = aircraft.base_fuel_rate()
            * distance_km as f64
            * efficiency
            * weather_factor
            * weight_factor;

        let optimal_climb_used = rng.gen_bool(OPTIMAL_CLIMB_PROBABILITY);
        let potential_fuel_savings_kg = if optimal_climb_used {
            0.0
        } else {
            fuel * (0.01 + rng.gen::<f64>() * 0.02)
        };

        FlightRecord {
            flight_id,
            date,
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
            aircraft_type: aircraft,
            takeoff_weight_kg,
            flight_level,
            avg_speed_kmh,
            headwind_kmh,
            temperature_deviation,
            fuel_consumed_kg: fuel,
            co2_emissions_kg: fuel * FUEL_TO_CO2_RATIO,
            optimal_climb_used,
            potential_fuel_savings_kg,
            departure_time,
        }
    }
}

/// Generates `count` flights dated relative to today.
pub fn generate_flight_data(count: usize, seed: u64) -> Vec<FlightRecord> {
    log::info!("Generating synthetic flight data: count={} seed={}", count, seed);
    let flights = GeneratorContext::new(seed).generate(count);
    log::info!("Generated {} flight records", flights.len());
    flights
}

/// Generates a dataset and writes it to `path` as CSV.
pub fn save_sample_data<P: AsRef<Path>>(
    path: P,
    count: usize,
    seed: u64,
) -> crate::Result<Vec<FlightRecord>> {
    let flights = generate_flight_data(count, seed);
    dataset::save_csv(&path, &flights)?;
    log::info!("Saved sample data to {}", path.as_ref().display());
    Ok(flights)
}
