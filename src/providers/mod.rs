//! Data sources behind the wizard steps.
//!
//! The traits here are the seam where a real scheduling backend would attach;
//! the bundled implementations simulate one with fixed latency and seeded
//! pseudo-randomness.

pub mod catalog;
pub mod slots;
pub mod submit;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::domain::{BookingDraft, ConfirmationCode, Service, SlotWindow, TimeSlot};
use crate::errors::Result;

pub use catalog::StaticCatalog;
pub use slots::SimulatedSlots;
pub use submit::{generate_code, SimulatedSubmitter};

/// Lists the bookable services.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn services(&self) -> Result<Vec<Service>>;

    /// Resolves a service by id without waiting on the simulated latency.
    fn lookup(&self, id: &str) -> Option<Service>;
}

/// Produces the time slots of a given day.
#[async_trait]
pub trait SlotProvider: Send + Sync {
    async fn slots_for(&self, date: NaiveDate) -> Result<Vec<TimeSlot>>;
}

/// Accepts a finished draft and hands back a booking reference.
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, draft: &BookingDraft) -> Result<ConfirmationCode>;
}

/// Random source shared by the simulated providers.
#[derive(Clone)]
pub struct SharedRng(Arc<Mutex<StdRng>>);

impl SharedRng {
    /// Seeded when `seed` is given, entropy-backed otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self(Arc::new(Mutex::new(rng)))
    }

    pub fn lock(&self) -> MutexGuard<'_, StdRng> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Timing and randomness knobs of the simulated backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub service_latency: Duration,
    pub slot_latency: Duration,
    pub submit_latency: Duration,
    pub availability: f64,
    pub window: SlotWindow,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            service_latency: Duration::from_millis(300),
            slot_latency: Duration::from_millis(300),
            submit_latency: Duration::from_millis(1500),
            availability: 0.7,
            window: SlotWindow::default(),
        }
    }
}

impl SimulationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            service_latency: Duration::from_millis(config.service_latency_ms),
            slot_latency: Duration::from_millis(config.slot_latency_ms),
            submit_latency: Duration::from_millis(config.submit_latency_ms),
            availability: config.availability_ratio,
            window: config.slot_window(),
        }
    }

    /// Same knobs with every latency removed.
    pub fn instant(self) -> Self {
        Self {
            service_latency: Duration::ZERO,
            slot_latency: Duration::ZERO,
            submit_latency: Duration::ZERO,
            ..self
        }
    }
}

/// The three providers a wizard needs.
#[derive(Clone)]
pub struct Providers {
    pub catalog: Arc<dyn ServiceCatalog>,
    pub slots: Arc<dyn SlotProvider>,
    pub submitter: Arc<dyn BookingSubmitter>,
}

impl Providers {
    /// Simulated backend sharing one random source between slots and codes.
    pub fn simulated(settings: SimulationSettings, rng: SharedRng) -> Self {
        Self {
            catalog: Arc::new(StaticCatalog::new(settings.service_latency)),
            slots: Arc::new(SimulatedSlots::new(
                settings.window,
                settings.availability,
                settings.slot_latency,
                rng.clone(),
            )),
            submitter: Arc::new(SimulatedSubmitter::new(settings.submit_latency, rng)),
        }
    }
}
