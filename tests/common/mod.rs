#![allow(dead_code)]

use std::sync::Arc;

use agenda_core::{
    calendar::FixedClock,
    domain::ContactInfo,
    providers::{Providers, SharedRng, SimulationSettings},
    wizard::{MemoryNotifier, WizardController},
};
use chrono::NaiveDate;

pub const SEED: u64 = 42;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// 2026-10-19 is a Monday.
pub fn today() -> NaiveDate {
    date(2026, 10, 19)
}

pub fn tuesday() -> NaiveDate {
    date(2026, 10, 20)
}

/// Default latencies with a fully open agenda.
pub fn open_agenda() -> SimulationSettings {
    SimulationSettings {
        availability: 1.0,
        ..SimulationSettings::default()
    }
}

pub fn wizard_with(settings: SimulationSettings, seed: u64) -> WizardController<MemoryNotifier> {
    WizardController::new(
        Providers::simulated(settings, SharedRng::new(Some(seed))),
        Arc::new(FixedClock(today())),
        MemoryNotifier::new(),
    )
}

pub fn wizard() -> WizardController<MemoryNotifier> {
    wizard_with(open_agenda(), SEED)
}

pub fn ana() -> ContactInfo {
    ContactInfo::new("Ana Silva", "ana@x.com", "11999999999")
}

/// Walks an open-agenda wizard up to the contact form.
pub async fn reach_contact_step(wizard: &mut WizardController<MemoryNotifier>) {
    wizard.select_date(tuesday()).expect("weekday is selectable");
    wizard.advance().expect("date step complete");
    wizard.settle().await;
    wizard.select_time("09:00").expect("slot is open");
    wizard.advance().expect("time step complete");
    wizard.settle().await;
    wizard.select_service("2").expect("service exists");
    wizard.advance().expect("service step complete");
}
