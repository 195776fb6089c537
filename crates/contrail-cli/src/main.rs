// SPDX-License-Identifier: MIT

mod report;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use contrail_core::config::{parse_level, Config};
use contrail_core::dataset::load_or_generate;
use contrail_core::emissions::{calculate_financial_impact, estimate_fuel, FlightParams};
use contrail_core::flight_gen::{save_sample_data, DEFAULT_FLIGHT_COUNT, DEFAULT_SEED};
use contrail_core::intervention::{apply_interventions, parse_interventions};
use contrail_core::optimization::optimize_flight_level;
use contrail_core::processing::{filter, FlightFilter};
use contrail_core::scenario::{
    analyze_fleet_optimization, analyze_route_optimization, compare, parse_replacement, summarize,
    DEFAULT_REPLACEMENTS,
};
use contrail_core::{parse_route, AircraftType};
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the cached flight dataset
    #[arg(long, env = "DATA_PATH", global = true)]
    data_path: Option<PathBuf>,

    /// File name of the cached flight dataset
    #[arg(long, env = "SAMPLE_DATA_FILE", global = true)]
    data_file: Option<String>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, env = "LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Also write logs to <DIR>/app_YYYYMMDD.log
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic flights and save them as CSV
    Generate {
        #[arg(short, long, default_value_t = DEFAULT_FLIGHT_COUNT)]
        count: usize,
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Output path (defaults to the configured dataset file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Totals and averages for the dataset
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Apply interventions and report the CO2 and money saved
    Reduce {
        /// optimize_climb, weight_reduction, efficient_routing, engine_washing
        #[arg(short, long = "intervention", value_delimiter = ',')]
        interventions: Vec<String>,
        /// Currency per tonne of CO2 (defaults to CARBON_PRICE)
        #[arg(long)]
        carbon_price: Option<f64>,
        /// Currency per tonne of fuel (defaults to FUEL_PRICE)
        #[arg(long)]
        fuel_price: Option<f64>,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Swap aircraft types and report the emission change
    Fleet {
        /// OLD=NEW, repeatable (default: B777=B787 and A320=A220)
        #[arg(long = "replace")]
        replacements: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Emission spread per route
    Routes {
        /// "Origin - Destination"
        #[arg(long)]
        route: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Lowest-emission flight level per aircraft type
    FlightLevels {
        #[arg(long)]
        aircraft: Option<AircraftType>,
        #[arg(long)]
        json: bool,
    },
    /// Estimate fuel and CO2 for a single flight
    Estimate {
        #[arg(long)]
        distance: f64,
        #[arg(long)]
        aircraft: String,
        /// Takeoff weight in kg
        #[arg(long)]
        weight: f64,
        /// Altitude in feet
        #[arg(long)]
        flight_level: f64,
        /// km/h, negative for tailwind
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        headwind: f64,
        /// Deviation from ISA in Celsius
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        temperature: f64,
        #[arg(long)]
        optimal_climb: bool,
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    #[arg(long)]
    aircraft: Option<AircraftType>,
    /// "Origin - Destination"
    #[arg(long)]
    route: Option<String>,
    /// First departure date to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last departure date to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    fn to_filter(&self) -> Result<FlightFilter> {
        let route = self.route.as_deref().map(parse_route).transpose()?;
        let date_range = match (self.from, self.to) {
            (None, None) => None,
            (from, to) => Some((from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX))),
        };
        Ok(FlightFilter {
            aircraft_type: self.aircraft,
            route,
            date_range,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let parsed_level = log_level_from(cli.log_level.as_deref());
    let level = parsed_level.as_ref().copied().unwrap_or(LevelFilter::Info);
    init_logging(level, cli.log_dir.as_deref())?;
    if let Err(raw) = &parsed_level {
        log::warn!("Ignoring invalid log level {:?}, using info", raw);
    }

    // clap already folds LOG_LEVEL into --log-level.
    let mut config = Config::from_lookup(|key| match key {
        "LOG_LEVEL" => None,
        _ => std::env::var(key).ok(),
    });
    config.log_level = level;
    if let Some(path) = &cli.data_path {
        config.data_path = path.clone();
    }
    if let Some(file) = &cli.data_file {
        config.sample_data_file = file.clone();
    }
    log::debug!("{} starting", config.app_name);

    match cli.command {
        Commands::Generate {
            count,
            seed,
            output,
        } => {
            let path = output.unwrap_or_else(|| config.data_file());
            let flights = save_sample_data(&path, count, seed)
                .with_context(|| format!("Failed to write sample data to {}", path.display()))?;
            println!("Wrote {} flights to {}", flights.len(), path.display());
        }
        Commands::Summary { filter: args, json } => {
            let flights = filter(&load_or_generate(&config), &args.to_filter()?);
            let summary = summarize(&flights);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                report::print_summary(&summary);
            }
        }
        Commands::Reduce {
            interventions,
            carbon_price,
            fuel_price,
            filter: args,
            json,
        } => {
            let flights = filter(&load_or_generate(&config), &args.to_filter()?);
            let selected = parse_interventions(&interventions);
            let result = apply_interventions(&flights, &selected);
            let comparison = compare(&summarize(&flights), &summarize(&result.flights));
            let financial = calculate_financial_impact(
                result.total_reduction_kg,
                carbon_price.unwrap_or(config.carbon_price),
                fuel_price.unwrap_or(config.fuel_price),
            );

            if json {
                let out = report::ReductionReport {
                    total_reduction_kg: result.total_reduction_kg,
                    savings: &result.savings,
                    comparison: &comparison,
                    financial: &financial,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if selected.is_empty() {
                println!("No interventions selected; nothing to compare.");
            } else {
                report::print_reduction(&result, &comparison, &financial);
            }
        }
        Commands::Fleet { replacements, json } => {
            let replacements = if replacements.is_empty() {
                DEFAULT_REPLACEMENTS.to_vec()
            } else {
                replacements
                    .iter()
                    .map(|r| parse_replacement(r))
                    .collect::<contrail_core::Result<Vec<_>>>()?
            };
            let flights = load_or_generate(&config);
            let result = analyze_fleet_optimization(&flights, &replacements);
            let comparison = compare(&summarize(&flights), &summarize(&result.flights));

            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                report::print_fleet(&replacements, result.emission_reduction_kg, &comparison);
            }
        }
        Commands::Routes { route, json } => {
            let flights = load_or_generate(&config);
            match analyze_route_optimization(&flights, route.as_deref())? {
                Some(analysis) if json => println!("{}", serde_json::to_string_pretty(&analysis)?),
                Some(analysis) => report::print_routes(&analysis),
                None => println!("No flights found for route {}", route.unwrap_or_default()),
            }
        }
        Commands::FlightLevels { aircraft, json } => {
            let flights = load_or_generate(&config);
            let optima = optimize_flight_level(&flights, aircraft);
            if json {
                println!("{}", serde_json::to_string_pretty(&optima)?);
            } else if optima.is_empty() {
                println!("No flights found for the selected aircraft type");
            } else {
                report::print_flight_levels(&optima);
            }
        }
        Commands::Estimate {
            distance,
            aircraft,
            weight,
            flight_level,
            headwind,
            temperature,
            optimal_climb,
            json,
        } => {
            let estimate = estimate_fuel(&FlightParams {
                distance_km: distance,
                aircraft_type: &aircraft,
                takeoff_weight_kg: weight,
                flight_level,
                headwind_kmh: headwind,
                temperature_deviation: temperature,
                optimal_climb,
            });
            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                report::print_estimate(&estimate);
            }
        }
    }

    Ok(())
}

/// Level from `--log-level`/`LOG_LEVEL`, or the raw value when it is not a level.
fn log_level_from(raw: Option<&str>) -> std::result::Result<LevelFilter, String> {
    match raw {
        None => Ok(LevelFilter::Info),
        Some(raw) => parse_level(raw).ok_or_else(|| raw.to_string()),
    }
}

fn init_logging(level: LevelFilter, log_dir: Option<&Path>) -> Result<()> {
    let log_config = simplelog::Config::default();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        log_config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let path = dir.join(format!(
            "app_{}.log",
            chrono::Local::now().format("%Y%m%d")
        ));
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        loggers.push(WriteLogger::new(level, log_config, file));
    }

    CombinedLogger::init(loggers).context("Failed to initialise logging")
}
