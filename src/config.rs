use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::SlotWindow;
use crate::utils::paths;

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
pub const SEED_ENV: &str = "AGENDA_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables of the simulated backend and the terminal front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service_latency_ms: u64,
    pub slot_latency_ms: u64,
    pub submit_latency_ms: u64,
    pub availability_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub first_hour: u32,
    pub last_hour: u32,
    pub slot_interval_minutes: u32,
    pub business_days_shown: usize,
    pub plain_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_latency_ms: 300,
            slot_latency_ms: 300,
            submit_latency_ms: 1500,
            availability_ratio: 0.7,
            seed: None,
            first_hour: 8,
            last_hour: 17,
            slot_interval_minutes: 30,
            business_days_shown: 10,
            plain_mode: false,
        }
    }
}

impl Config {
    pub fn slot_window(&self) -> SlotWindow {
        SlotWindow {
            first_hour: self.first_hour,
            last_hour: self.last_hour,
            interval_minutes: self.slot_interval_minutes,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.availability_ratio) {
            return Err(ConfigError::Invalid(format!(
                "availability_ratio must be between 0 and 1 (got {})",
                self.availability_ratio
            )));
        }
        if self.first_hour >= self.last_hour || self.last_hour > 24 {
            return Err(ConfigError::Invalid(format!(
                "opening hours {}..{} are not a valid range",
                self.first_hour, self.last_hour
            )));
        }
        if self.slot_interval_minutes == 0 || 60 % self.slot_interval_minutes != 0 {
            return Err(ConfigError::Invalid(format!(
                "slot_interval_minutes must divide an hour (got {})",
                self.slot_interval_minutes
            )));
        }
        if self.business_days_shown == 0 {
            return Err(ConfigError::Invalid(
                "business_days_shown must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Applies `AGENDA_SEED` on top of the stored values.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(raw) = env::var(SEED_ENV) {
            let seed = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("{SEED_ENV} must be an unsigned integer (got `{raw}`)"))
            })?;
            self.seed = Some(seed);
        }
        Ok(self)
    }
}

/// Loads and stores [`Config`] as JSON inside the application directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored configuration, falling back to defaults when absent.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str::<Config>(&data)
                .map_err(|err| ConfigError::Serde(err.to_string()))?
        } else {
            debug!(path = %self.path.display(), "no configuration file, using defaults");
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
