use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Displayable;

/// One screen of the linear booking wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Date,
    Time,
    Service,
    Info,
    Summary,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Date,
        Step::Time,
        Step::Service,
        Step::Info,
        Step::Summary,
    ];

    pub fn index(self) -> usize {
        match self {
            Step::Date => 0,
            Step::Time => 1,
            Step::Service => 2,
            Step::Info => 3,
            Step::Summary => 4,
        }
    }

    /// Maps an index onto a step, clamping out-of-range values to the last step.
    pub fn from_index(index: usize) -> Step {
        Step::ALL[index.min(Step::ALL.len() - 1)]
    }

    /// Label shown in the progress bar.
    pub fn label(self) -> &'static str {
        match self {
            Step::Date => "Data",
            Step::Time => "Horário",
            Step::Service => "Serviço",
            Step::Info => "Dados",
            Step::Summary => "Resumo",
        }
    }

    pub fn next(self) -> Step {
        Step::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Step {
        Step::from_index(self.index().saturating_sub(1))
    }

    pub fn is_first(self) -> bool {
        self == Step::Date
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contact details collected by the info step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }
}

/// In-progress booking accumulated across the wizard steps.
///
/// Every update produces a new draft; the `with_*` builders copy the remaining
/// fields unchanged so callers never patch a draft in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub date: Option<NaiveDate>,
    pub time: String,
    pub service_id: String,
    pub contact: ContactInfo,
}

impl BookingDraft {
    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..self.clone()
        }
    }

    pub fn with_time(&self, time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            ..self.clone()
        }
    }

    pub fn with_service(&self, service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            ..self.clone()
        }
    }

    pub fn with_contact(&self, contact: ContactInfo) -> Self {
        Self {
            contact,
            ..self.clone()
        }
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    pub fn has_time(&self) -> bool {
        !self.time.is_empty()
    }

    pub fn has_service(&self) -> bool {
        !self.service_id.is_empty()
    }
}

/// Client-side booking reference: six uppercase alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    pub const LENGTH: usize = 6;

    /// Accepts only codes of the expected shape.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == Self::LENGTH
            && raw
                .chars()
                .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit());
        valid.then(|| Self(raw.to_string()))
    }

    /// Wraps a code drawn from the generator's own alphabet.
    pub(crate) fn from_generated(raw: String) -> Self {
        debug_assert!(Self::parse(&raw).is_some());
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Displayable for ConfirmationCode {
    fn display_label(&self) -> String {
        format!("#{}", self.0)
    }
}
