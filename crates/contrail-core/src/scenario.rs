use crate::aircraft::AircraftType;
use crate::flight::FlightRecord;
use crate::{parse_route, ContrailError};
use serde::Serialize;
use std::collections::BTreeMap;

/// Dataset totals. Averages are NaN for an empty dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaselineSummary {
    pub total_flights: usize,
    pub total_distance_km: f64,
    pub total_fuel_kg: f64,
    pub total_emissions_kg: f64,
    pub avg_emission_per_km: f64,
    pub avg_emission_per_flight: f64,
}

pub fn summarize(flights: &[FlightRecord]) -> BaselineSummary {
    let total_flights = flights.len();
    let total_distance_km: f64 = flights.iter().map(|f| f.distance_km as f64).sum();
    let total_fuel_kg: f64 = flights.iter().map(|f| f.fuel_consumed_kg).sum();
    let total_emissions_kg: f64 = flights.iter().map(|f| f.co2_emissions_kg).sum();

    // 0/0 is NaN; no special casing for empty input.
    BaselineSummary {
        total_flights,
        total_distance_km,
        total_fuel_kg,
        total_emissions_kg,
        avg_emission_per_km: total_emissions_kg / total_distance_km,
        avg_emission_per_flight: total_emissions_kg / total_flights as f64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    pub baseline: f64,
    pub scenario: f64,
    pub difference: f64,
    /// Zero when the baseline value is zero.
    pub percent: f64,
}

impl MetricDelta {
    fn new(baseline: f64, scenario: f64) -> Self {
        let difference = scenario - baseline;
        let percent = if baseline != 0.0 {
            difference / baseline * 100.0
        } else {
            0.0
        };
        Self {
            baseline,
            scenario,
            difference,
            percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub total_flights: MetricDelta,
    pub total_distance_km: MetricDelta,
    pub total_fuel_kg: MetricDelta,
    pub total_emissions_kg: MetricDelta,
    pub avg_emission_per_km: MetricDelta,
    pub avg_emission_per_flight: MetricDelta,
}

pub fn compare(baseline: &BaselineSummary, scenario: &BaselineSummary) -> ScenarioComparison {
    ScenarioComparison {
        total_flights: MetricDelta::new(
            baseline.total_flights as f64,
            scenario.total_flights as f64,
        ),
        total_distance_km: MetricDelta::new(baseline.total_distance_km, scenario.total_distance_km),
        total_fuel_kg: MetricDelta::new(baseline.total_fuel_kg, scenario.total_fuel_kg),
        total_emissions_kg: MetricDelta::new(
            baseline.total_emissions_kg,
            scenario.total_emissions_kg,
        ),
        avg_emission_per_km: MetricDelta::new(
            baseline.avg_emission_per_km,
            scenario.avg_emission_per_km,
        ),
        avg_emission_per_flight: MetricDelta::new(
            baseline.avg_emission_per_flight,
            scenario.avg_emission_per_flight,
        ),
    }
}

/// Replacements applied when none are given: newer, lighter-burning types.
pub const DEFAULT_REPLACEMENTS: [(AircraftType, AircraftType); 2] = [
    (AircraftType::B777, AircraftType::B787),
    (AircraftType::A320, AircraftType::A220),
];

/// Fuel multiplier for flights moved onto a replacement type, if it has one.
pub fn replacement_efficiency(aircraft: AircraftType) -> Option<f64> {
    match aircraft {
        AircraftType::B787 => Some(0.85),
        AircraftType::A220 => Some(0.80),
        _ => None,
    }
}

/// Parses `OLD=NEW`, e.g. `B777=B787`.
pub fn parse_replacement(raw: &str) -> crate::Result<(AircraftType, AircraftType)> {
    let (old, new) = raw
        .split_once('=')
        .ok_or_else(|| ContrailError::InvalidReplacement(raw.to_string()))?;
    Ok((old.parse()?, new.parse()?))
}

#[derive(Debug, Clone)]
pub struct FleetOptimization {
    pub flights: Vec<FlightRecord>,
    pub emission_reduction_kg: f64,
}

/// Re-flies the dataset with some aircraft types swapped out.
///
/// Replacements run in the given order, so a chain like `A=B, B=C` moves `A` flights
/// all the way to `C`.
pub fn analyze_fleet_optimization(
    flights: &[FlightRecord],
    replacements: &[(AircraftType, AircraftType)],
) -> FleetOptimization {
    log::info!("Analyzing fleet optimization scenario");

    let mut modified = flights.to_vec();
    let baseline = summarize(flights);

    for &(old, new) in replacements {
        let targets: Vec<usize> = modified
            .iter()
            .enumerate()
            .filter(|(_, f)| f.aircraft_type == old)
            .map(|(i, _)| i)
            .collect();

        if targets.is_empty() {
            continue;
        }

        log::info!("Replacing {} flights from {} to {}", targets.len(), old, new);

        let efficiency = replacement_efficiency(new);
        for i in targets {
            let flight = &mut modified[i];
            flight.aircraft_type = new;
            if let Some(factor) = efficiency {
                flight.fuel_consumed_kg *= factor;
                flight.co2_emissions_kg *= factor;
            }
        }
    }

    let emission_reduction_kg =
        baseline.total_emissions_kg - summarize(&modified).total_emissions_kg;
    log::info!(
        "Fleet optimization could reduce emissions by {:.2} kg CO2",
        emission_reduction_kg
    );

    FleetOptimization {
        flights: modified,
        emission_reduction_kg,
    }
}

/// Descriptive statistics for one origin/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub route: String,
    pub origin: String,
    pub destination: String,
    pub flight_count: usize,
    pub co2_mean_kg: f64,
    pub co2_min_kg: f64,
    pub co2_max_kg: f64,
    /// Sample standard deviation; NaN for a single flight.
    pub co2_std_kg: f64,
    pub distance_mean_km: f64,
    pub fuel_mean_kg: f64,
    pub fuel_min_kg: f64,
    pub emissions_per_km: f64,
    pub min_emissions_per_km: f64,
    /// Mean minus best observed flight.
    pub potential_savings_kg: f64,
    pub savings_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteAnalysis {
    pub routes: Vec<RouteMetrics>,
    pub total_flights: usize,
    pub total_potential_savings_kg: f64,
    pub average_savings_per_flight_kg: f64,
}

/// Per-route spread of emissions. Reports what the best flight on each route
/// already achieved; it does not search for better routes.
///
/// `route` narrows the analysis to one `"Origin - Destination"` pair. Returns
/// `Ok(None)` when nothing matches.
pub fn analyze_route_optimization(
    flights: &[FlightRecord],
    route: Option<&str>,
) -> crate::Result<Option<RouteAnalysis>> {
    log::info!("Analyzing route optimization for route: {:?}", route);

    let endpoints = route.map(parse_route).transpose()?;

    let mut groups: BTreeMap<(&str, &str), Vec<&FlightRecord>> = BTreeMap::new();
    for flight in flights {
        if let Some((origin, destination)) = &endpoints {
            if !flight.is_route(origin, destination) {
                continue;
            }
        }
        groups
            .entry((flight.origin.as_str(), flight.destination.as_str()))
            .or_default()
            .push(flight);
    }

    if groups.is_empty() {
        log::warn!("No data found for route: {:?}", route);
        return Ok(None);
    }

    let routes: Vec<RouteMetrics> = groups
        .into_iter()
        .map(|((origin, destination), group)| route_metrics(origin, destination, &group))
        .collect();

    let total_flights: usize = routes.iter().map(|r| r.flight_count).sum();
    let total_potential_savings_kg: f64 = routes
        .iter()
        .map(|r| r.potential_savings_kg * r.flight_count as f64)
        .sum();

    log::info!(
        "Route optimization could save {:.2} kg CO2 across {} flights",
        total_potential_savings_kg,
        total_flights
    );

    Ok(Some(RouteAnalysis {
        routes,
        total_flights,
        total_potential_savings_kg,
        average_savings_per_flight_kg: total_potential_savings_kg / total_flights as f64,
    }))
}

fn route_metrics(origin: &str, destination: &str, group: &[&FlightRecord]) -> RouteMetrics {
    let co2: Vec<f64> = group.iter().map(|f| f.co2_emissions_kg).collect();
    let fuel: Vec<f64> = group.iter().map(|f| f.fuel_consumed_kg).collect();
    let distance: Vec<f64> = group.iter().map(|f| f.distance_km as f64).collect();

    let co2_mean_kg = mean(&co2);
    let co2_min_kg = min(&co2);
    let distance_mean_km = mean(&distance);
    let potential_savings_kg = co2_mean_kg - co2_min_kg;

    RouteMetrics {
        route: format!("{} - {}", origin, destination),
        origin: origin.to_string(),
        destination: destination.to_string(),
        flight_count: group.len(),
        co2_mean_kg,
        co2_min_kg,
        co2_max_kg: co2.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        co2_std_kg: sample_std(&co2),
        distance_mean_km,
        fuel_mean_kg: mean(&fuel),
        fuel_min_kg: min(&fuel),
        emissions_per_km: co2_mean_kg / distance_mean_km,
        min_emissions_per_km: co2_min_kg / distance_mean_km,
        potential_savings_kg,
        savings_percentage: potential_savings_kg / co2_mean_kg * 100.0,
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::tests::sample_record;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn four_flights() -> Vec<FlightRecord> {
        let legs = [
            ("FL001", "Paris", "London", 350, 1000.0),
            ("FL002", "Paris", "Berlin", 880, 2500.0),
            ("FL003", "London", "Paris", 350, 1100.0),
            ("FL004", "Paris", "Madrid", 1050, 7000.0),
        ];
        legs.iter()
            .map(|&(id, origin, destination, km, fuel)| {
                let mut f = sample_record(id, km, fuel);
                f.origin = origin.to_string();
                f.destination = destination.to_string();
                f
            })
            .collect()
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&four_flights());
        assert_eq!(summary.total_flights, 4);
        assert_eq!(summary.total_distance_km, 2630.0);
        assert_eq!(summary.total_fuel_kg, 11600.0);
        assert_close(summary.total_emissions_kg, 36656.0);
        assert_close(summary.avg_emission_per_km, 36656.0 / 2630.0);
        assert_close(summary.avg_emission_per_flight, 9164.0);
    }

    #[test]
    fn test_summarize_empty_is_nan() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_flights, 0);
        assert_eq!(summary.total_emissions_kg, 0.0);
        assert!(summary.avg_emission_per_km.is_nan());
        assert!(summary.avg_emission_per_flight.is_nan());
    }

    #[test]
    fn test_compare() {
        let baseline = summarize(&four_flights());
        let mut reduced = four_flights();
        for f in reduced.iter_mut() {
            f.set_fuel(f.fuel_consumed_kg * 0.9);
        }
        let comparison = compare(&baseline, &summarize(&reduced));

        assert_eq!(comparison.total_flights.difference, 0.0);
        assert_close(comparison.total_fuel_kg.difference, -1160.0);
        assert_close(comparison.total_emissions_kg.percent, -10.0);
        assert_eq!(comparison.total_distance_km.percent, 0.0);
    }

    #[test]
    fn test_compare_zero_baseline_reports_zero_percent() {
        let empty = summarize(&[]);
        let comparison = compare(&empty, &summarize(&four_flights()));
        assert_eq!(comparison.total_fuel_kg.percent, 0.0);
        assert_eq!(comparison.total_fuel_kg.difference, 11600.0);
    }

    #[test]
    fn test_fleet_optimization_defaults() {
        let mut flights = four_flights();
        flights[1].aircraft_type = AircraftType::B777;
        flights[2].aircraft_type = AircraftType::A350;
        flights[3].aircraft_type = AircraftType::B737;

        let result = analyze_fleet_optimization(&flights, &DEFAULT_REPLACEMENTS);

        assert_eq!(result.flights[0].aircraft_type, AircraftType::A220);
        assert_close(result.flights[0].fuel_consumed_kg, 800.0);
        assert_eq!(result.flights[1].aircraft_type, AircraftType::B787);
        assert_close(result.flights[1].fuel_consumed_kg, 2125.0);
        assert_eq!(result.flights[2].aircraft_type, AircraftType::A350);
        assert_eq!(result.flights[3].fuel_consumed_kg, 7000.0);

        let expected = (200.0 + 375.0) * 3.16;
        assert_close(result.emission_reduction_kg, expected);
        for f in &result.flights {
            assert_close(f.co2_emissions_kg, f.fuel_consumed_kg * 3.16);
        }
    }

    #[test]
    fn test_fleet_replacement_without_efficiency_only_relabels() {
        let flights = four_flights();
        let result =
            analyze_fleet_optimization(&flights, &[(AircraftType::A320, AircraftType::B737)]);
        assert!(result
            .flights
            .iter()
            .all(|f| f.aircraft_type == AircraftType::B737));
        assert_eq!(result.emission_reduction_kg, 0.0);
    }

    #[test]
    fn test_parse_replacement() {
        assert_eq!(
            parse_replacement("b777=B787").unwrap(),
            (AircraftType::B777, AircraftType::B787)
        );
        assert!(matches!(
            parse_replacement("B777"),
            Err(ContrailError::InvalidReplacement(_))
        ));
        assert!(matches!(
            parse_replacement("B777=MD11"),
            Err(ContrailError::UnknownAircraft(_))
        ));
    }

    #[test]
    fn test_route_analysis() {
        let mut flights = four_flights();
        let mut extra = sample_record("FL005", 350, 1200.0);
        extra.origin = "Paris".to_string();
        extra.destination = "London".to_string();
        flights.push(extra);

        let analysis = analyze_route_optimization(&flights, None).unwrap().unwrap();
        assert_eq!(analysis.routes.len(), 4);
        assert_eq!(analysis.total_flights, 5);

        let london = analysis
            .routes
            .iter()
            .find(|r| r.route == "Paris - London")
            .unwrap();
        assert_eq!(london.flight_count, 2);
        assert_close(london.co2_mean_kg, 1100.0 * 3.16);
        assert_close(london.co2_min_kg, 1000.0 * 3.16);
        assert_close(london.co2_max_kg, 1200.0 * 3.16);
        assert_close(london.potential_savings_kg, 100.0 * 3.16);
        assert_close(london.emissions_per_km, 1100.0 * 3.16 / 350.0);
        assert_close(london.fuel_min_kg, 1000.0);
        assert_close(london.savings_percentage, 100.0 / 1100.0 * 100.0);

        // Single-flight routes have no spread.
        let madrid = analysis
            .routes
            .iter()
            .find(|r| r.route == "Paris - Madrid")
            .unwrap();
        assert!(madrid.co2_std_kg.is_nan());
        assert_eq!(madrid.potential_savings_kg, 0.0);

        assert_close(analysis.total_potential_savings_kg, 2.0 * 100.0 * 3.16);
        assert_close(analysis.average_savings_per_flight_kg, 2.0 * 100.0 * 3.16 / 5.0);
    }

    #[test]
    fn test_route_analysis_single_route() {
        let analysis = analyze_route_optimization(&four_flights(), Some("London - Paris"))
            .unwrap()
            .unwrap();
        assert_eq!(analysis.routes.len(), 1);
        assert_eq!(analysis.routes[0].origin, "London");
    }

    #[test]
    fn test_route_analysis_no_match() {
        assert!(analyze_route_optimization(&four_flights(), Some("Paris - Tokyo"))
            .unwrap()
            .is_none());
        assert!(analyze_route_optimization(&[], None).unwrap().is_none());
        assert!(analyze_route_optimization(&four_flights(), Some("Tokyo")).is_err());
    }

    #[test]
    fn test_summary_serializes_with_column_names() {
        let json = serde_json::to_value(summarize(&four_flights())).unwrap();
        assert_eq!(json["total_flights"], 4);
        assert_eq!(json["total_fuel_kg"], 11600.0);
    }
}
