use std::fmt;

use serde::{Deserialize, Serialize};

use super::Displayable;

/// Non-negative monetary amount in centavos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(u64);

impl Price {
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn from_reais(reais: u64) -> Self {
        Self(reais * 100)
    }

    pub fn cents(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    /// Renders as `R$ 180.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Bookable service offered by the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub price: Price,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: u32,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            duration_minutes,
            price,
        }
    }

    pub fn duration_label(&self) -> String {
        format!("{} min", self.duration_minutes)
    }
}

impl Displayable for Service {
    fn display_label(&self) -> String {
        format!("{} · {} · {}", self.name, self.duration_label(), self.price)
    }
}
