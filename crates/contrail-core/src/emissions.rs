//! Fuel burn and CO2 model.
//!
//! Every figure is a product of simple multiplicative factors around a per-aircraft
//! base burn rate. Nothing here fails: unknown aircraft fall back to the default type.

use crate::aircraft::AircraftType;
use serde::Serialize;

/// kg of CO2 released per kg of jet fuel burned.
pub const FUEL_TO_CO2_RATIO: f64 = 3.16;

/// Share of fuel a non-optimal climb is assumed to waste.
const CLIMB_SAVING_FRACTION: f64 = 0.02;

pub const DEFAULT_CARBON_PRICE: f64 = 80.0;
pub const DEFAULT_FUEL_PRICE: f64 = 800.0;

pub fn calculate_emissions(fuel_kg: f64) -> f64 {
    fuel_kg * FUEL_TO_CO2_RATIO
}

pub fn calculate_emissions_all(fuel_kg: &[f64]) -> Vec<f64> {
    fuel_kg.iter().copied().map(calculate_emissions).collect()
}

/// Inputs to [`estimate_fuel`].
#[derive(Debug, Clone)]
pub struct FlightParams<'a> {
    pub distance_km: f64,
    pub aircraft_type: &'a str,
    pub takeoff_weight_kg: f64,
    /// Altitude in feet, e.g. 36000 for FL360.
    pub flight_level: f64,
    pub headwind_kmh: f64,
    pub temperature_deviation: f64,
    pub optimal_climb: bool,
}

impl<'a> FlightParams<'a> {
    pub fn new(
        distance_km: f64,
        aircraft_type: &'a str,
        takeoff_weight_kg: f64,
        flight_level: f64,
    ) -> Self {
        Self {
            distance_km,
            aircraft_type,
            takeoff_weight_kg,
            flight_level,
            headwind_kmh: 0.0,
            temperature_deviation: 0.0,
            optimal_climb: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelEstimate {
    pub fuel_consumed_kg: f64,
    pub co2_emissions_kg: f64,
    pub potential_fuel_savings_kg: f64,
    pub potential_co2_savings_kg: f64,
}

/// 0.9 at the bottom of the type's weight range up to 1.1 at the top.
pub fn weight_factor(aircraft: AircraftType, takeoff_weight_kg: f64) -> f64 {
    let (min, max) = aircraft.weight_range();
    let (min, max) = (min as f64, max as f64);
    let normalized = ((takeoff_weight_kg - min) / (max - min)).clamp(0.0, 1.0);
    0.9 + 0.2 * normalized
}

/// +5% per 10,000 ft away from the type's optimal level.
pub fn altitude_factor(aircraft: AircraftType, flight_level: f64) -> f64 {
    let optimal_ft = aircraft.optimal_flight_level() as f64 * 100.0;
    1.0 + 0.05 * ((flight_level - optimal_ft).abs() / 10_000.0)
}

pub fn headwind_factor(headwind_kmh: f64) -> f64 {
    1.0 + headwind_kmh / 500.0
}

pub fn temperature_factor(temperature_deviation: f64) -> f64 {
    1.0 + temperature_deviation / 100.0
}

pub fn estimate_fuel(params: &FlightParams<'_>) -> FuelEstimate {
    let aircraft = AircraftType::resolve(params.aircraft_type);

    let fuel = aircraft.base_fuel_rate()
        * params.distance_km
        * weight_factor(aircraft, params.takeoff_weight_kg)
        * altitude_factor(aircraft, params.flight_level)
        * headwind_factor(params.headwind_kmh)
        * temperature_factor(params.temperature_deviation);

    let potential_savings = if params.optimal_climb {
        0.0
    } else {
        fuel * CLIMB_SAVING_FRACTION
    };

    FuelEstimate {
        fuel_consumed_kg: fuel,
        co2_emissions_kg: calculate_emissions(fuel),
        potential_fuel_savings_kg: potential_savings,
        potential_co2_savings_kg: calculate_emissions(potential_savings),
    }
}

/// Money saved by a CO2 reduction, priced per tonne.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialImpact {
    pub fuel_savings_kg: f64,
    pub fuel_savings_tonnes: f64,
    pub carbon_savings: f64,
    pub fuel_cost_savings: f64,
    pub total_savings: f64,
}

pub fn calculate_financial_impact(
    emission_reduction_kg: f64,
    carbon_price_per_tonne: f64,
    fuel_price_per_tonne: f64,
) -> FinancialImpact {
    let fuel_savings_kg = emission_reduction_kg / FUEL_TO_CO2_RATIO;
    let carbon_savings = (emission_reduction_kg / 1000.0) * carbon_price_per_tonne;
    let fuel_cost_savings = (fuel_savings_kg / 1000.0) * fuel_price_per_tonne;

    FinancialImpact {
        fuel_savings_kg,
        fuel_savings_tonnes: fuel_savings_kg / 1000.0,
        carbon_savings,
        fuel_cost_savings,
        total_savings: carbon_savings + fuel_cost_savings,
    }
}
