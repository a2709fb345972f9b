use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bookable interval on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub time: String,
    pub available: bool,
}

impl TimeSlot {
    pub fn new(hour: u32, minute: u32, available: bool) -> Self {
        Self {
            id: format!("slot-{hour}-{minute}"),
            time: format!("{hour:02}:{minute:02}"),
            available,
        }
    }
}

/// Opening hours used to lay out the slots of a day.
///
/// Slots start at `first_hour:00` and stop before `last_hour:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    pub first_hour: u32,
    pub last_hour: u32,
    pub interval_minutes: u32,
}

impl Default for SlotWindow {
    fn default() -> Self {
        Self {
            first_hour: 8,
            last_hour: 17,
            interval_minutes: 30,
        }
    }
}

impl SlotWindow {
    pub fn slots_per_day(&self) -> usize {
        if self.interval_minutes == 0 || self.last_hour <= self.first_hour {
            return 0;
        }
        let per_hour = 60u32.div_ceil(self.interval_minutes);
        ((self.last_hour - self.first_hour) * per_hour) as usize
    }

    /// Lays out the day's slots, marking each available with probability `availability`.
    pub fn generate<R: Rng + ?Sized>(&self, availability: f64, rng: &mut R) -> Vec<TimeSlot> {
        if self.interval_minutes == 0 {
            return Vec::new();
        }
        let ratio = availability.clamp(0.0, 1.0);
        let mut slots = Vec::with_capacity(self.slots_per_day());
        for hour in self.first_hour..self.last_hour {
            for minute in (0..60).step_by(self.interval_minutes as usize) {
                slots.push(TimeSlot::new(hour, minute, rng.gen_bool(ratio)));
            }
        }
        slots
    }
}
