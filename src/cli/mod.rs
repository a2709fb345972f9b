//! Interactive terminal front-end for the booking wizard.

pub mod output;
pub mod render;
pub mod session;
pub mod ui;

use std::env;
use std::io;
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::calendar::{Clock, FixedClock, SystemClock};
use crate::config::{ConfigError, ConfigManager};
use crate::errors::BookingError;
use crate::providers::{Providers, SharedRng, SimulationSettings};
use crate::wizard::WizardController;

use output::OutputPreferences;
pub use session::{SessionOutcome, TerminalNotifier, WizardSession};

pub const TODAY_ENV: &str = "AGENDA_TODAY";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("AGENDA_TODAY must be a YYYY-MM-DD date (got `{0}`)")]
    InvalidToday(String),
}

/// Loads the configuration and runs the wizard until it is confirmed or
/// abandoned.
pub fn run_cli() -> Result<SessionOutcome, CliError> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?.with_env_overrides()?;
    output::set_preferences(OutputPreferences::resolve(config.plain_mode));
    info!(config = %manager.path().display(), seed = ?config.seed, "starting booking wizard");

    let clock = clock_from_env()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let providers = Providers::simulated(
        SimulationSettings::from_config(&config),
        SharedRng::new(config.seed),
    );
    let wizard = WizardController::new(providers, clock, TerminalNotifier);
    WizardSession::new(&runtime, wizard, config.business_days_shown).run()
}

/// `AGENDA_TODAY` pins the calendar for reproducible runs.
fn clock_from_env() -> Result<Arc<dyn Clock>, CliError> {
    match env::var(TODAY_ENV) {
        Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(|date| Arc::new(FixedClock(date)) as Arc<dyn Clock>)
            .map_err(|_| CliError::InvalidToday(raw)),
        Err(_) => Ok(Arc::new(SystemClock)),
    }
}
