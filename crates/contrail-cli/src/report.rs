use contrail_core::emissions::{FinancialImpact, FuelEstimate};
use contrail_core::format::{format_number, format_percentage, format_tonnes};
use contrail_core::intervention::{Intervention, InterventionResult};
use contrail_core::optimization::FlightLevelOptimum;
use contrail_core::scenario::{BaselineSummary, MetricDelta, RouteAnalysis, ScenarioComparison};
use contrail_core::AircraftType;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct ReductionReport<'a> {
    pub total_reduction_kg: f64,
    pub savings: &'a BTreeMap<Intervention, f64>,
    pub comparison: &'a ScenarioComparison,
    pub financial: &'a FinancialImpact,
}

pub fn print_summary(summary: &BaselineSummary) {
    println!("Flights:              {}", summary.total_flights);
    println!("Distance:             {}", format_number(summary.total_distance_km, 0, "km"));
    println!("Fuel:                 {}", format_tonnes(summary.total_fuel_kg, 1));
    println!("CO2:                  {}", format_tonnes(summary.total_emissions_kg, 1));
    println!(
        "CO2 per km:           {}",
        format_number(summary.avg_emission_per_km, 2, "kg")
    );
    println!(
        "CO2 per flight:       {}",
        format_number(summary.avg_emission_per_flight, 0, "kg")
    );
}

fn print_delta(name: &str, delta: &MetricDelta, tonnes: bool) {
    let fmt = |v: f64| {
        if tonnes {
            format_tonnes(v, 1)
        } else {
            format_number(v, 0, "")
        }
    };
    let sign = if delta.difference < 0.0 { "" } else { "+" };
    println!(
        "{:<16} {:>18} {:>18} {:>18} ({})",
        name,
        fmt(delta.baseline),
        fmt(delta.scenario),
        format!("{}{}", sign, fmt(delta.difference)),
        format_percentage(delta.percent, 1)
    );
}

pub fn print_comparison(comparison: &ScenarioComparison) {
    println!(
        "{:<16} {:>18} {:>18} {:>18}",
        "", "Baseline", "Scenario", "Difference"
    );
    print_delta("Flights", &comparison.total_flights, false);
    print_delta("Distance (km)", &comparison.total_distance_km, false);
    print_delta("Fuel", &comparison.total_fuel_kg, true);
    print_delta("CO2", &comparison.total_emissions_kg, true);
}

pub fn print_reduction(
    result: &InterventionResult,
    comparison: &ScenarioComparison,
    financial: &FinancialImpact,
) {
    print_comparison(comparison);

    println!();
    println!(
        "{:<28} {:>16} {:>14} {:>10}",
        "Intervention", "CO2 (kg)", "CO2 (tonnes)", "Share"
    );
    for (intervention, saving) in &result.savings {
        let share = result.share_of_total(*intervention).unwrap_or(f64::NAN);
        println!(
            "{:<28} {:>16} {:>14} {:>10}",
            intervention.label(),
            format_number(*saving, 1, ""),
            format_number(saving / 1000.0, 2, ""),
            format_percentage(share, 1)
        );
    }

    println!();
    println!(
        "Total reduction:      {}",
        format_number(result.total_reduction_kg, 1, "kg CO2")
    );
    println!("Fuel saved:           {}", format_number(financial.fuel_savings_kg, 0, "kg"));
    println!("Fuel cost savings:    {}", format_number(financial.fuel_cost_savings, 0, ""));
    println!("Carbon savings:       {}", format_number(financial.carbon_savings, 0, ""));
    println!("Total savings:        {}", format_number(financial.total_savings, 0, ""));
}

pub fn print_fleet(
    replacements: &[(AircraftType, AircraftType)],
    reduction_kg: f64,
    comparison: &ScenarioComparison,
) {
    for (old, new) in replacements {
        println!("Replace {} -> {}", old, new);
    }
    println!();
    print_comparison(comparison);
    println!();
    println!("Emission reduction:   {}", format_tonnes(reduction_kg, 1));
}

pub fn print_routes(analysis: &RouteAnalysis) {
    println!(
        "{:<22} {:>7} {:>12} {:>12} {:>12} {:>10}",
        "Route", "Flights", "CO2/km", "Best CO2/km", "Savings kg", "Savings"
    );
    for r in &analysis.routes {
        println!(
            "{:<22} {:>7} {:>12} {:>12} {:>12} {:>10}",
            r.route,
            r.flight_count,
            format_number(r.emissions_per_km, 2, ""),
            format_number(r.min_emissions_per_km, 2, ""),
            format_number(r.potential_savings_kg, 0, ""),
            format_percentage(r.savings_percentage, 1)
        );
    }
    println!();
    println!(
        "Potential savings:    {} across {} flights ({} per flight)",
        format_tonnes(analysis.total_potential_savings_kg, 1),
        analysis.total_flights,
        format_number(analysis.average_savings_per_flight_kg, 0, "kg")
    );
}

pub fn print_flight_levels(optima: &BTreeMap<AircraftType, FlightLevelOptimum>) {
    println!(
        "{:<8} {:>10} {:>14} {:>14} {:>10}",
        "Type", "Best FL", "Best CO2/km", "Avg CO2/km", "Savings"
    );
    for (aircraft, opt) in optima {
        println!(
            "{:<8} {:>10} {:>14} {:>14} {:>10}",
            aircraft.code(),
            format!("FL{}", opt.optimal_flight_level / 100),
            format_number(opt.min_emissions_per_km, 2, ""),
            format_number(opt.avg_emissions_per_km, 2, ""),
            format_percentage(opt.potential_savings_pct, 1)
        );
    }
}

pub fn print_estimate(estimate: &FuelEstimate) {
    println!("Fuel:                 {}", format_number(estimate.fuel_consumed_kg, 1, "kg"));
    println!("CO2:                  {}", format_number(estimate.co2_emissions_kg, 1, "kg"));
    println!(
        "Climb saving (fuel):  {}",
        format_number(estimate.potential_fuel_savings_kg, 1, "kg")
    );
    println!(
        "Climb saving (CO2):   {}",
        format_number(estimate.potential_co2_savings_kg, 1, "kg")
    );
}
