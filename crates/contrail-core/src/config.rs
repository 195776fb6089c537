use crate::emissions::{DEFAULT_CARBON_PRICE, DEFAULT_FUEL_PRICE};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_APP_NAME: &str = "CO2 Emission Reduction Analytics Platform";
pub const DEFAULT_DATA_PATH: &str = "assets/data";
pub const DEFAULT_DATA_FILE: &str = "sample_flights.csv";

/// Runtime options. Unset or unparseable values keep their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app_name: String,
    pub debug: bool,
    pub data_path: PathBuf,
    pub sample_data_file: String,
    pub log_level: LevelFilter,
    /// Currency per tonne of CO2.
    pub carbon_price: f64,
    /// Currency per tonne of jet fuel.
    pub fuel_price: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            debug: false,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            sample_data_file: DEFAULT_DATA_FILE.to_string(),
            log_level: LevelFilter::Info,
            carbon_price: DEFAULT_CARBON_PRICE,
            fuel_price: DEFAULT_FUEL_PRICE,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            debug: lookup("DEBUG")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.debug),
            data_path: lookup("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            sample_data_file: lookup("SAMPLE_DATA_FILE").unwrap_or(defaults.sample_data_file),
            log_level: lookup("LOG_LEVEL")
                .and_then(|v| parse_or_warn("LOG_LEVEL", &v, parse_level))
                .unwrap_or(defaults.log_level),
            carbon_price: lookup("CARBON_PRICE")
                .and_then(|v| parse_or_warn("CARBON_PRICE", &v, |s| f64::from_str(s).ok()))
                .unwrap_or(defaults.carbon_price),
            fuel_price: lookup("FUEL_PRICE")
                .and_then(|v| parse_or_warn("FUEL_PRICE", &v, |s| f64::from_str(s).ok()))
                .unwrap_or(defaults.fuel_price),
        };

        log::debug!("Configuration loaded: {:?}", config);
        config
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_path.join(&self.sample_data_file)
    }
}

fn parse_or_warn<T>(key: &str, raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        log::warn!("Ignoring invalid {}={:?}, using default", key, raw);
    }
    parsed
}

/// Accepts `log` level names plus the spellings `WARNING` and `CRITICAL`.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "WARNING" => Some(LevelFilter::Warn),
        "CRITICAL" | "FATAL" => Some(LevelFilter::Error),
        other => LevelFilter::from_str(other).ok(),
    }
}
