//! What-if interventions over a flight dataset.
//!
//! Each intervention lowers the running fuel column. Rules run in a fixed order and
//! each one's saving is measured against the fuel left by the rules before it, so
//! per-intervention figures depend on which other interventions were selected.

use crate::emissions::FUEL_TO_CO2_RATIO;
use crate::flight::FlightRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Declaration order is application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intervention {
    OptimizeClimb,
    WeightReduction,
    EfficientRouting,
    EngineWashing,
}

impl Intervention {
    pub const ALL: [Intervention; 4] = [
        Intervention::OptimizeClimb,
        Intervention::WeightReduction,
        Intervention::EfficientRouting,
        Intervention::EngineWashing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Intervention::OptimizeClimb => "optimize_climb",
            Intervention::WeightReduction => "weight_reduction",
            Intervention::EfficientRouting => "efficient_routing",
            Intervention::EngineWashing => "engine_washing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intervention::OptimizeClimb => "Optimize Climb Profiles",
            Intervention::WeightReduction => "Aircraft Weight Reduction",
            Intervention::EfficientRouting => "Efficient Flight Routing",
            Intervention::EngineWashing => "Regular Engine Washing",
        }
    }

    fn rule(&self) -> Rule {
        match self {
            Intervention::OptimizeClimb => Rule::RecoverClimbSavings,
            // 1% less weight is worth about 0.6% fuel
            Intervention::WeightReduction => Rule::FuelFraction(0.006),
            Intervention::EfficientRouting => Rule::FuelFraction(0.015),
            Intervention::EngineWashing => Rule::FuelFraction(0.008),
        }
    }
}

impl fmt::Display for Intervention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intervention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Intervention::ALL
            .iter()
            .find(|i| i.name().eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| format!("unknown intervention '{}'", s))
    }
}

/// Parses intervention names, silently dropping any that are not recognised.
pub fn parse_interventions<I, S>(names: I) -> Vec<Intervention>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| match name.as_ref().parse() {
            Ok(intervention) => Some(intervention),
            Err(e) => {
                log::debug!("Ignoring {}", e);
                None
            }
        })
        .collect()
}

enum Rule {
    /// Remove each non-optimal-climb flight's potential saving.
    RecoverClimbSavings,
    /// Remove this fraction of the current fuel from every flight.
    FuelFraction(f64),
}

impl Rule {
    /// Lowers fuel in place and returns the total fuel removed, in kg.
    fn apply(&self, flights: &mut [FlightRecord]) -> f64 {
        match *self {
            Rule::RecoverClimbSavings => flights
                .iter_mut()
                .filter(|f| !f.optimal_climb_used)
                .map(|f| {
                    let saved = f.potential_fuel_savings_kg;
                    f.fuel_consumed_kg -= saved;
                    saved
                })
                .sum(),
            Rule::FuelFraction(fraction) => flights
                .iter_mut()
                .map(|f| {
                    let saved = f.fuel_consumed_kg * fraction;
                    f.fuel_consumed_kg -= saved;
                    saved
                })
                .sum(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InterventionResult {
    /// Copy of the input with fuel lowered and emissions re-derived.
    pub flights: Vec<FlightRecord>,
    /// Baseline emissions minus modified emissions, kg CO2.
    pub total_reduction_kg: f64,
    /// CO2 saved by each selected intervention, kg.
    pub savings: BTreeMap<Intervention, f64>,
}

impl InterventionResult {
    /// Percentage of the total reduction credited to one intervention.
    pub fn share_of_total(&self, intervention: Intervention) -> Option<f64> {
        self.savings
            .get(&intervention)
            .map(|saving| saving / self.total_reduction_kg * 100.0)
    }
}

/// Applies the selected interventions to a copy of `flights`.
///
/// Selection order and duplicates do not matter. An empty selection returns the
/// input unchanged with a zero reduction.
pub fn apply_interventions(
    flights: &[FlightRecord],
    interventions: &[Intervention],
) -> InterventionResult {
    let mut modified = flights.to_vec();
    let mut savings = BTreeMap::new();

    let selected: Vec<Intervention> = Intervention::ALL
        .into_iter()
        .filter(|i| interventions.contains(i))
        .collect();

    if selected.is_empty() {
        return InterventionResult {
            flights: modified,
            total_reduction_kg: 0.0,
            savings,
        };
    }

    log::info!("Calculating emission reductions for interventions: {:?}", selected);

    let baseline_emissions: f64 = flights.iter().map(|f| f.co2_emissions_kg).sum();

    for intervention in selected {
        let fuel_saved = intervention.rule().apply(&mut modified);
        let co2_saved = fuel_saved * FUEL_TO_CO2_RATIO;
        log::info!("{} savings: {:.2} kg CO2", intervention.label(), co2_saved);
        savings.insert(intervention, co2_saved);
    }

    for flight in modified.iter_mut() {
        flight.set_fuel(flight.fuel_consumed_kg);
    }

    let new_emissions: f64 = modified.iter().map(|f| f.co2_emissions_kg).sum();
    let total_reduction_kg = baseline_emissions - new_emissions;

    log::info!(
        "Total emission reduction: {:.2} kg CO2 ({:.2}%)",
        total_reduction_kg,
        total_reduction_kg / baseline_emissions * 100.0
    );

    InterventionResult {
        flights: modified,
        total_reduction_kg,
        savings,
    }
}
