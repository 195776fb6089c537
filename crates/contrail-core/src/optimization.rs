use crate::aircraft::AircraftType;
use crate::flight::FlightRecord;
use crate::scenario::mean;
use serde::Serialize;
use std::collections::BTreeMap;

/// Best observed cruise level for one aircraft type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightLevelOptimum {
    pub optimal_flight_level: u32,
    pub min_emissions_per_km: f64,
    /// Sum of CO2 over sum of distance across all of the type's flights.
    pub avg_emissions_per_km: f64,
    pub potential_savings_pct: f64,
}

/// Finds, per aircraft type, the flight level whose flights had the lowest mean
/// emissions per km. Ties go to the lower level.
pub fn optimize_flight_level(
    flights: &[FlightRecord],
    aircraft: Option<AircraftType>,
) -> BTreeMap<AircraftType, FlightLevelOptimum> {
    log::info!("Optimizing flight level for aircraft type: {:?}", aircraft);

    let mut by_type: BTreeMap<AircraftType, BTreeMap<u32, Vec<&FlightRecord>>> = BTreeMap::new();
    for flight in flights {
        if aircraft.is_some_and(|a| a != flight.aircraft_type) {
            continue;
        }
        by_type
            .entry(flight.aircraft_type)
            .or_default()
            .entry(flight.flight_level)
            .or_default()
            .push(flight);
    }

    if by_type.is_empty() {
        log::warn!("No data found for aircraft type: {:?}", aircraft);
        return BTreeMap::new();
    }

    let mut optima = BTreeMap::new();
    for (aircraft_type, levels) in by_type {
        let mut best: Option<(u32, f64)> = None;
        let mut total_co2 = 0.0;
        let mut total_distance = 0.0;

        for (level, group) in &levels {
            let co2: Vec<f64> = group.iter().map(|f| f.co2_emissions_kg).collect();
            let distance: Vec<f64> = group.iter().map(|f| f.distance_km as f64).collect();
            total_co2 += co2.iter().sum::<f64>();
            total_distance += distance.iter().sum::<f64>();

            let per_km = mean(&co2) / mean(&distance);
            if best.map_or(true, |(_, min)| per_km < min) {
                best = Some((*level, per_km));
            }
        }

        if let Some((optimal_flight_level, min_emissions_per_km)) = best {
            let avg_emissions_per_km = total_co2 / total_distance;
            optima.insert(
                aircraft_type,
                FlightLevelOptimum {
                    optimal_flight_level,
                    min_emissions_per_km,
                    avg_emissions_per_km,
                    potential_savings_pct: (avg_emissions_per_km - min_emissions_per_km)
                        / avg_emissions_per_km
                        * 100.0,
                },
            );
        }
    }

    log::info!(
        "Identified optimal flight levels for {} aircraft types",
        optima.len()
    );
    optima
}
