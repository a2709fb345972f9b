use agenda_core::config::{Config, ConfigError, ConfigManager};
use agenda_core::providers::SimulationSettings;
use std::time::Duration;
use tempfile::TempDir;

fn manager() -> (TempDir, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config manager");
    (temp, manager)
}

#[test]
fn missing_file_yields_defaults() {
    let (_temp, manager) = manager();
    let config = manager.load().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.submit_latency_ms, 1500);
    assert!(!manager.path().exists());
}

#[test]
fn saved_values_are_read_back() {
    let (_temp, manager) = manager();
    let config = Config {
        slot_latency_ms: 0,
        availability_ratio: 1.0,
        seed: Some(99),
        business_days_shown: 5,
        plain_mode: true,
        ..Config::default()
    };
    manager.save(&config).unwrap();

    assert_eq!(manager.load().unwrap(), config);
    let tmp = manager.path().with_extension("json.tmp");
    assert!(!tmp.exists());
}

#[test]
fn partial_files_fill_in_defaults() {
    let (_temp, manager) = manager();
    std::fs::write(manager.path(), r#"{ "availability_ratio": 0.25, "seed": 3 }"#).unwrap();

    let config = manager.load().unwrap();
    assert_eq!(config.availability_ratio, 0.25);
    assert_eq!(config.seed, Some(3));
    assert_eq!(config.first_hour, 8);
    assert_eq!(config.slot_window().slots_per_day(), 18);
}

#[test]
fn malformed_and_out_of_range_files_are_rejected() {
    let (_temp, manager) = manager();
    std::fs::write(manager.path(), "{ not json").unwrap();
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));

    std::fs::write(manager.path(), r#"{ "first_hour": 18, "last_hour": 9 }"#).unwrap();
    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));
}

#[test]
fn invalid_config_is_never_written() {
    let (_temp, manager) = manager();
    let config = Config {
        availability_ratio: -0.1,
        ..Config::default()
    };
    assert!(manager.save(&config).is_err());
    assert!(!manager.path().exists());
}

#[test]
fn simulation_settings_follow_the_config() {
    let config = Config {
        service_latency_ms: 10,
        slot_latency_ms: 20,
        submit_latency_ms: 30,
        availability_ratio: 0.5,
        slot_interval_minutes: 60,
        ..Config::default()
    };
    let settings = SimulationSettings::from_config(&config);
    assert_eq!(settings.service_latency, Duration::from_millis(10));
    assert_eq!(settings.slot_latency, Duration::from_millis(20));
    assert_eq!(settings.submit_latency, Duration::from_millis(30));
    assert_eq!(settings.availability, 0.5);
    assert_eq!(settings.window.slots_per_day(), 9);
}
