#![doc(test(attr(deny(warnings))))]

//! Agenda Core drives a five-step appointment booking wizard: date, time slot,
//! service, contact details and a final summary. Scheduling data comes from
//! simulated providers that stand in for a real backend.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod contact;
pub mod domain;
pub mod errors;
pub mod providers;
pub mod tasks;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Agenda Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
