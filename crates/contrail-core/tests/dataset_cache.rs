use contrail_core::config::Config;
use contrail_core::dataset::{load_csv, load_or_generate};
use contrail_core::flight_gen::{save_sample_data, DEFAULT_FLIGHT_COUNT};
use contrail_core::AircraftType;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Config pointing at a throwaway data directory.
struct MockDataDir {
    // Keep TempDir alive so the directory isn't deleted
    _dir: TempDir,
    pub config: Config,
}

impl MockDataDir {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config {
            data_path: dir.path().join("assets").join("data"),
            ..Config::default()
        };
        Self { _dir: dir, config }
    }

    fn data_file(&self) -> PathBuf {
        self.config.data_file()
    }
}

#[test]
fn test_missing_file_is_generated_and_cached() {
    let mock = MockDataDir::new();
    assert!(!mock.data_file().exists());

    let flights = load_or_generate(&mock.config);

    assert_eq!(flights.len(), DEFAULT_FLIGHT_COUNT);
    assert!(mock.data_file().exists(), "generated data should be persisted");
    assert_eq!(load_csv(mock.data_file()).unwrap(), flights);
}

#[test]
fn test_cached_file_is_reused() {
    let mock = MockDataDir::new();
    let saved = save_sample_data(mock.data_file(), 25, 7).unwrap();

    let loaded = load_or_generate(&mock.config);
    assert_eq!(loaded.len(), 25);
    assert_eq!(loaded, saved);
}

#[test]
fn test_corrupt_file_falls_back_without_overwriting() {
    let mock = MockDataDir::new();
    let corrupt = "flight_id,date\nFL0001,yesterday\n";
    fs::create_dir_all(&mock.config.data_path).unwrap();
    fs::write(mock.data_file(), corrupt).unwrap();

    let flights = load_or_generate(&mock.config);

    assert_eq!(flights.len(), DEFAULT_FLIGHT_COUNT);
    assert_eq!(fs::read_to_string(mock.data_file()).unwrap(), corrupt);
}

#[test]
fn test_unknown_aircraft_row_is_kept_as_fallback_type() {
    let mock = MockDataDir::new();
    let saved = save_sample_data(mock.data_file(), 2, 7).unwrap();
    let original = fs::read_to_string(mock.data_file()).unwrap();

    // Rewrite the second row's aircraft column to a type outside the catalogue.
    let mut lines: Vec<String> = original.lines().map(str::to_string).collect();
    let mut cols: Vec<&str> = lines[2].split(',').collect();
    cols[5] = "E190";
    lines[2] = cols.join(",");
    let edited = lines.join("\n") + "\n";
    fs::write(mock.data_file(), &edited).unwrap();

    let loaded = load_or_generate(&mock.config);

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], saved[0]);
    assert_eq!(loaded[1].flight_id, saved[1].flight_id);
    assert_eq!(loaded[1].aircraft_type, AircraftType::FALLBACK);
    assert_eq!(loaded[1].fuel_consumed_kg, saved[1].fuel_consumed_kg);
    assert_eq!(fs::read_to_string(mock.data_file()).unwrap(), edited);
}

#[test]
fn test_unwritable_cache_still_returns_data() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the data directory should be makes the write fail.
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, "").unwrap();
    let config = Config {
        data_path: blocker.join("data"),
        ..Config::default()
    };

    let flights = load_or_generate(&config);
    assert_eq!(flights.len(), DEFAULT_FLIGHT_COUNT);
}
