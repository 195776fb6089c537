use crate::config::Config;
use crate::flight::FlightRecord;
use crate::flight_gen::{generate_flight_data, DEFAULT_FLIGHT_COUNT, DEFAULT_SEED};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

pub fn read_flights<R: Read>(reader: R) -> crate::Result<Vec<FlightRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut flights = Vec::new();
    for record in rdr.deserialize() {
        let record: FlightRecord = record?;
        flights.push(record);
    }
    Ok(flights)
}

pub fn write_flights<W: Write>(writer: W, flights: &[FlightRecord]) -> crate::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for flight in flights {
        wtr.serialize(flight)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> crate::Result<Vec<FlightRecord>> {
    let file = File::open(path)?;
    read_flights(file)
}

/// Writes the dataset, creating missing parent directories.
pub fn save_csv<P: AsRef<Path>>(path: P, flights: &[FlightRecord]) -> crate::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_flights(file, flights)
}

/// Loads the configured dataset, generating one when it is unavailable.
///
/// Never fails. Generated data is cached only when no file existed; an
/// unreadable file is left in place for the user to inspect.
pub fn load_or_generate(config: &Config) -> Vec<FlightRecord> {
    let path = config.data_file();

    if path.exists() {
        log::info!("Loading data from {}", path.display());
        match load_csv(&path) {
            Ok(flights) => {
                log::info!("Loaded {} records from {}", flights.len(), path.display());
                return flights;
            }
            Err(e) => {
                log::error!("Error loading data from {}: {}", path.display(), e);
                log::warn!(
                    "Using synthetic data for this run; {} is left untouched",
                    path.display()
                );
                return generate_flight_data(DEFAULT_FLIGHT_COUNT, DEFAULT_SEED);
            }
        }
    }

    log::warn!(
        "Data file {} not found, generating synthetic data",
        path.display()
    );
    let flights = generate_flight_data(DEFAULT_FLIGHT_COUNT, DEFAULT_SEED);

    match save_csv(&path, &flights) {
        Ok(()) => log::info!("Saved generated data to {}", path.display()),
        Err(e) => log::error!("Failed to cache generated data at {}: {}", path.display(), e),
    }

    flights
}
