//! Per-step state owned by the wizard controller.
//!
//! Each step mounts when it becomes current and unmounts when left. Loads a
//! step starts live in its [`Load`] slot, so unmounting drops the handle and
//! cancels any work still in flight.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::calendar::{self, Clock};
use crate::contact::{validate_contact, ContactErrors, ContactField};
use crate::domain::{BookingDraft, ConfirmationCode, ContactInfo, Service, TimeSlot};
use crate::errors::{BookingError, Result};
use crate::providers::{BookingSubmitter, ServiceCatalog, SlotProvider};
use crate::tasks::{PendingTask, TaskPoll};

/// What happened when a load settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
}

/// Asynchronously produced value of a step.
pub enum Load<T> {
    Idle,
    Loading(PendingTask<Result<T>>),
    Ready(T),
    Failed(String),
}

impl<T: Send + 'static> Load<T> {
    pub fn start<F>(label: &'static str, future: F) -> Result<Self>
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        PendingTask::spawn(label, future).map(Load::Loading)
    }

    /// Replaces the slot with a new load; a load that cannot start is kept
    /// as `Failed` and its error returned.
    fn restart<F>(&mut self, label: &'static str, future: F) -> Result<()>
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        match Self::start(label, future) {
            Ok(load) => {
                *self = load;
                Ok(())
            }
            Err(err) => {
                *self = Load::Failed(err.to_string());
                Err(err)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Moves a finished load into its final state without blocking.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let Load::Loading(task) = self else {
            return None;
        };
        let result = match task.try_take() {
            TaskPoll::Pending => return None,
            TaskPoll::Ready(result) => result,
            TaskPoll::Gone => Err(vanished(task.label())),
        };
        Some(self.finish(result))
    }

    /// Waits for an in-flight load, if any.
    pub async fn settle(&mut self) -> Option<LoadOutcome> {
        match std::mem::replace(self, Load::Idle) {
            Load::Loading(task) => {
                let label = task.label();
                let result = task.wait().await.unwrap_or_else(|| Err(vanished(label)));
                Some(self.finish(result))
            }
            other => {
                *self = other;
                None
            }
        }
    }

    fn finish(&mut self, result: Result<T>) -> LoadOutcome {
        match result {
            Ok(value) => {
                *self = Load::Ready(value);
                LoadOutcome::Loaded
            }
            Err(err) => {
                let message = err.to_string();
                *self = Load::Failed(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }
}

fn vanished(label: &str) -> BookingError {
    BookingError::Provider(format!("{label} terminou sem resultado"))
}

/// Calendar rules of the first step.
pub struct DateStep {
    clock: Arc<dyn Clock>,
}

impl DateStep {
    pub const FOOTNOTE: &'static str = "* Disponível de segunda a sexta-feira";

    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        calendar::is_selectable(date, self.today())
    }

    pub fn choose(&self, date: NaiveDate) -> Result<NaiveDate> {
        if self.is_selectable(date) {
            Ok(date)
        } else {
            Err(BookingError::DateNotSelectable(date))
        }
    }

    pub fn upcoming(&self, count: usize) -> Vec<NaiveDate> {
        calendar::upcoming_business_days(self.today(), count)
    }
}

/// Slot grid of the selected date.
pub struct TimeStep {
    slots: Load<Vec<TimeSlot>>,
}

impl TimeStep {
    pub fn new() -> Self {
        Self { slots: Load::Idle }
    }

    /// Starts loading the slots of `date`, replacing (and cancelling) any
    /// previous load.
    pub fn mount(&mut self, date: Option<NaiveDate>, provider: &Arc<dyn SlotProvider>) -> Result<()> {
        let Some(date) = date else {
            self.slots = Load::Idle;
            return Ok(());
        };
        let provider = Arc::clone(provider);
        self.slots
            .restart("time-slots", async move { provider.slots_for(date).await })
    }

    pub fn unmount(&mut self) {
        self.slots = Load::Idle;
    }

    pub fn is_loading(&self) -> bool {
        self.slots.is_loading()
    }

    pub fn slots(&self) -> &[TimeSlot] {
        self.slots.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn load_mut(&mut self) -> &mut Load<Vec<TimeSlot>> {
        &mut self.slots
    }

    pub fn choose(&self, time: &str) -> Result<String> {
        self.slots()
            .iter()
            .find(|slot| slot.time == time && slot.available)
            .map(|slot| slot.time.clone())
            .ok_or_else(|| BookingError::SlotUnavailable(time.to_string()))
    }
}

impl Default for TimeStep {
    fn default() -> Self {
        Self::new()
    }
}

/// Service list of the third step.
pub struct ServiceStep {
    services: Load<Vec<Service>>,
}

impl ServiceStep {
    pub fn new() -> Self {
        Self {
            services: Load::Idle,
        }
    }

    pub fn mount(&mut self, catalog: &Arc<dyn ServiceCatalog>) -> Result<()> {
        let catalog = Arc::clone(catalog);
        self.services
            .restart("services", async move { catalog.services().await })
    }

    pub fn unmount(&mut self) {
        self.services = Load::Idle;
    }

    pub fn is_loading(&self) -> bool {
        self.services.is_loading()
    }

    pub fn services(&self) -> &[Service] {
        self.services.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn load_mut(&mut self) -> &mut Load<Vec<Service>> {
        &mut self.services
    }
}

impl Default for ServiceStep {
    fn default() -> Self {
        Self::new()
    }
}

/// Contact form. Keeps whatever was typed last, valid or not.
#[derive(Debug, Default)]
pub struct ContactStep {
    form: ContactInfo,
    errors: ContactErrors,
}

impl ContactStep {
    pub fn mount(&mut self, defaults: ContactInfo) {
        self.form = defaults;
        self.errors = ContactErrors::default();
    }

    pub fn form(&self) -> &ContactInfo {
        &self.form
    }

    pub fn errors(&self) -> &ContactErrors {
        &self.errors
    }

    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.form.name,
            ContactField::Email => &self.form.email,
            ContactField::Phone => &self.form.phone,
            ContactField::Notes => self.form.notes.as_deref().unwrap_or(""),
        }
    }

    pub fn edit(&mut self, info: ContactInfo) {
        self.form = info;
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.form.name = value,
            ContactField::Email => self.form.email = value,
            ContactField::Phone => self.form.phone = value,
            ContactField::Notes => self.form.notes = Some(value),
        }
    }

    /// Validates the form; on success returns the cleaned values.
    pub fn submit(&mut self) -> std::result::Result<ContactInfo, ContactErrors> {
        match validate_contact(&self.form) {
            Ok(info) => {
                self.errors = ContactErrors::default();
                Ok(info)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryPhase {
    Review,
    Submitting,
    Confirmed(ConfirmationCode),
}

/// Final review and the simulated submission.
pub struct SummaryStep {
    phase: SummaryPhase,
    pending: Option<PendingTask<Result<ConfirmationCode>>>,
}

impl SummaryStep {
    pub fn new() -> Self {
        Self {
            phase: SummaryPhase::Review,
            pending: None,
        }
    }

    pub fn mount(&mut self) {
        self.phase = SummaryPhase::Review;
        self.pending = None;
    }

    pub fn unmount(&mut self) {
        self.mount();
    }

    pub fn phase(&self) -> &SummaryPhase {
        &self.phase
    }

    pub fn code(&self) -> Option<&ConfirmationCode> {
        match &self.phase {
            SummaryPhase::Confirmed(code) => Some(code),
            _ => None,
        }
    }

    /// Starts the submission; ignored unless still in review.
    pub fn begin(&mut self, submitter: &Arc<dyn BookingSubmitter>, draft: &BookingDraft) -> Result<()> {
        if self.phase != SummaryPhase::Review {
            return Ok(());
        }
        let submitter = Arc::clone(submitter);
        let draft = draft.clone();
        self.pending = Some(PendingTask::spawn("submit", async move {
            submitter.submit(&draft).await
        })?);
        self.phase = SummaryPhase::Submitting;
        Ok(())
    }

    pub fn poll(&mut self) -> Option<Result<ConfirmationCode>> {
        let task = self.pending.as_mut()?;
        let result = match task.try_take() {
            TaskPoll::Pending => return None,
            TaskPoll::Ready(result) => result,
            TaskPoll::Gone => Err(vanished(task.label())),
        };
        self.pending = None;
        Some(self.finish(result))
    }

    pub async fn settle(&mut self) -> Option<Result<ConfirmationCode>> {
        let task = self.pending.take()?;
        let label = task.label();
        let result = task.wait().await.unwrap_or_else(|| Err(vanished(label)));
        Some(self.finish(result))
    }

    fn finish(&mut self, result: Result<ConfirmationCode>) -> Result<ConfirmationCode> {
        self.phase = match &result {
            Ok(code) => SummaryPhase::Confirmed(code.clone()),
            Err(_) => SummaryPhase::Review,
        };
        result
    }
}

impl Default for SummaryStep {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::contact::PHONE_TOO_SHORT;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn date_step_rejects_weekends_and_past_days() {
        let step = DateStep::new(Arc::new(FixedClock(monday())));
        assert!(step.choose(monday()).is_ok());
        assert!(matches!(
            step.choose(NaiveDate::from_ymd_opt(2026, 10, 24).unwrap()),
            Err(BookingError::DateNotSelectable(_))
        ));
        assert!(step.choose(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()).is_err());
        assert_eq!(step.upcoming(3).len(), 3);
    }

    #[test]
    fn contact_step_keeps_invalid_values() {
        let mut step = ContactStep::default();
        step.edit(ContactInfo::new("Ana Silva", "ana@x.com", "12345"));
        let outcome = step.submit();

        assert!(outcome.is_err());
        assert_eq!(step.errors().message_for(ContactField::Phone), Some(PHONE_TOO_SHORT));
        assert_eq!(step.form().phone, "12345");
    }

    #[test]
    fn contact_step_hands_over_cleaned_values() {
        let mut step = ContactStep::default();
        step.set_field(ContactField::Name, "  Ana Silva ");
        step.set_field(ContactField::Email, "ana@x.com");
        step.set_field(ContactField::Phone, "11999999999");
        let info = step.submit().unwrap();
        assert_eq!(info.name, "Ana Silva");
        assert!(step.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn load_settles_into_ready() {
        let mut load: Load<Vec<u8>> = Load::start("unit", async {
            tokio::time::sleep(std::time::Duration::from_millis(300)).await;
            Ok(vec![1, 2])
        })
        .unwrap();
        assert!(load.is_loading());
        assert_eq!(load.poll(), None);
        assert_eq!(load.settle().await, Some(LoadOutcome::Loaded));
        assert_eq!(load.ready(), Some(&vec![1, 2]));
        assert_eq!(load.settle().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn load_records_failures() {
        let mut load: Load<Vec<u8>> =
            Load::start("unit", async { Err(BookingError::Provider("offline".into())) }).unwrap();
        let outcome = load.settle().await;
        assert!(matches!(outcome, Some(LoadOutcome::Failed(message)) if message.contains("offline")));
        assert!(load.ready().is_none());
    }

    #[test]
    fn time_step_outside_a_runtime_records_the_failure() {
        let provider: Arc<dyn SlotProvider> = Arc::new(crate::providers::SimulatedSlots::new(
            crate::domain::SlotWindow::default(),
            1.0,
            std::time::Duration::ZERO,
            crate::providers::SharedRng::new(Some(1)),
        ));
        let mut step = TimeStep::new();

        assert!(step.mount(Some(monday()), &provider).is_err());
        assert!(!step.is_loading());
        assert!(matches!(step.load_mut(), Load::Failed(_)));
    }
}
