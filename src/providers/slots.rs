use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::{SharedRng, SlotProvider};
use crate::domain::{SlotWindow, TimeSlot};
use crate::errors::Result;

/// Generates a fresh, randomly available slot list on every request.
#[derive(Clone)]
pub struct SimulatedSlots {
    window: SlotWindow,
    availability: f64,
    latency: Duration,
    rng: SharedRng,
}

impl SimulatedSlots {
    pub fn new(window: SlotWindow, availability: f64, latency: Duration, rng: SharedRng) -> Self {
        Self {
            window,
            availability,
            latency,
            rng,
        }
    }
}

#[async_trait]
impl SlotProvider for SimulatedSlots {
    async fn slots_for(&self, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        tokio::time::sleep(self.latency).await;
        let slots = {
            let mut rng = self.rng.lock();
            self.window.generate(self.availability, &mut *rng)
        };
        debug!(
            %date,
            total = slots.len(),
            available = slots.iter().filter(|slot| slot.available).count(),
            "time slots generated"
        );
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(seed: u64) -> SimulatedSlots {
        SimulatedSlots::new(
            SlotWindow::default(),
            0.7,
            Duration::from_millis(300),
            SharedRng::new(Some(seed)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn same_seed_same_availability() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let first = provider(5).slots_for(date).await.unwrap();
        let second = provider(5).slots_for(date).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 18);
    }

    #[tokio::test(start_paused = true)]
    async fn regenerates_on_each_request() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let slots = provider(5);
        let mut seen_difference = false;
        let baseline = slots.slots_for(date).await.unwrap();
        for _ in 0..8 {
            if slots.slots_for(date).await.unwrap() != baseline {
                seen_difference = true;
                break;
            }
        }
        assert!(seen_difference);
    }
}
