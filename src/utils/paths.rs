use dirs::home_dir;
use std::{env, path::PathBuf};

pub const HOME_ENV: &str = "AGENDA_HOME";
const DEFAULT_DIR_NAME: &str = ".agenda_core";

/// Returns the application-specific data directory, defaulting to `~/.agenda_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
