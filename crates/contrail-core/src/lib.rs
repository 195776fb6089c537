pub mod aircraft;
pub mod config;
pub mod dataset;
pub mod emissions;
pub mod flight;
pub mod flight_gen;
pub mod format;
pub mod intervention;
pub mod optimization;
pub mod processing;
pub mod scenario;

use thiserror::Error;

pub use aircraft::AircraftType;
pub use config::Config;
pub use emissions::{FinancialImpact, FlightParams, FuelEstimate, FUEL_TO_CO2_RATIO};
pub use flight::FlightRecord;
pub use flight_gen::GeneratorContext;
pub use intervention::{Intervention, InterventionResult};
pub use scenario::BaselineSummary;

#[derive(Error, Debug)]
pub enum ContrailError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid route '{0}': expected \"Origin - Destination\"")]
    InvalidRoute(String),
    #[error("Invalid aircraft replacement '{0}': expected OLD=NEW")]
    InvalidReplacement(String),
    #[error("Unknown aircraft type: {0}")]
    UnknownAircraft(String),
}

pub type Result<T> = std::result::Result<T, ContrailError>;

/// Splits a route label of the form `"Paris - London"` into its endpoints.
pub fn parse_route(label: &str) -> Result<(String, String)> {
    match label.split_once(" - ") {
        Some((origin, destination))
            if !origin.trim().is_empty() && !destination.trim().is_empty() =>
        {
            Ok((origin.trim().to_string(), destination.trim().to_string()))
        }
        _ => Err(ContrailError::InvalidRoute(label.to_string())),
    }
}
