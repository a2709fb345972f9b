//! The booking wizard: a five-step state machine over an immutable draft.

pub mod notify;
pub mod progress;
pub mod steps;

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calendar::Clock;
use crate::domain::{BookingDraft, ConfirmationCode, ContactInfo, Service, Step, TimeSlot};
use crate::errors::{BookingError, Result, ValidationError};
use crate::providers::Providers;

pub use notify::{MemoryNotifier, Notification, NotificationKind, Notifier};
pub use progress::{progress, StepStatus};
pub use steps::{
    ContactStep, DateStep, Load, LoadOutcome, ServiceStep, SummaryPhase, SummaryStep, TimeStep,
};

pub const MISSING_DATE: &str = "Por favor, selecione uma data para continuar.";
pub const MISSING_TIME: &str = "Por favor, selecione um horário para continuar.";
pub const MISSING_SERVICE: &str = "Por favor, selecione um serviço para continuar.";

pub const BOOKING_SUCCESS: &str = "Agendamento realizado com sucesso!";
pub const BOOKING_SUCCESS_DETAIL: &str = "Você receberá uma confirmação por e-mail em breve.";
const LOAD_FAILED: &str = "Não foi possível carregar os dados.";
const BOOKING_FAILED: &str = "Não foi possível concluir o agendamento.";

/// Drives the wizard: owns the current step, the draft and the state of each
/// step, and reports user-facing messages through `N`.
pub struct WizardController<N: Notifier> {
    session: Uuid,
    step: Step,
    draft: BookingDraft,
    providers: Providers,
    date: DateStep,
    time: TimeStep,
    service: ServiceStep,
    contact: ContactStep,
    summary: SummaryStep,
    notifier: N,
}

impl<N: Notifier> WizardController<N> {
    pub fn new(providers: Providers, clock: Arc<dyn Clock>, notifier: N) -> Self {
        let session = Uuid::new_v4();
        debug!(%session, "booking wizard started");
        Self {
            session,
            step: Step::Date,
            draft: BookingDraft::default(),
            providers,
            date: DateStep::new(clock),
            time: TimeStep::new(),
            service: ServiceStep::new(),
            contact: ContactStep::default(),
            summary: SummaryStep::new(),
            notifier,
        }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn date_step(&self) -> &DateStep {
        &self.date
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        self.time.slots()
    }

    pub fn slots_loading(&self) -> bool {
        self.time.is_loading()
    }

    pub fn services(&self) -> &[Service] {
        self.service.services()
    }

    pub fn services_loading(&self) -> bool {
        self.service.is_loading()
    }

    pub fn contact_step(&self) -> &ContactStep {
        &self.contact
    }

    pub fn contact_step_mut(&mut self) -> &mut ContactStep {
        &mut self.contact
    }

    pub fn summary(&self) -> &SummaryPhase {
        self.summary.phase()
    }

    pub fn progress(&self) -> Vec<(Step, StepStatus)> {
        progress(self.step)
    }

    /// Service of the draft, resolved against the shared catalog.
    pub fn resolved_service(&self) -> Option<Service> {
        if !self.draft.has_service() {
            return None;
        }
        self.providers.catalog.lookup(&self.draft.service_id)
    }

    pub fn is_confirmed(&self) -> bool {
        self.summary.code().is_some()
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        let date = self.date.choose(date)?;
        self.draft = self.draft.with_date(date);
        debug!(session = %self.session, %date, "date selected");
        if self.step == Step::Time {
            let mounted = self.time.mount(Some(date), &self.providers.slots);
            self.check_mount("time-slots", mounted)?;
        }
        Ok(())
    }

    pub fn select_time(&mut self, time: &str) -> Result<()> {
        let time = self.time.choose(time)?;
        debug!(session = %self.session, %time, "time selected");
        self.draft = self.draft.with_time(time);
        Ok(())
    }

    pub fn select_service(&mut self, id: &str) -> Result<()> {
        let service = self
            .providers
            .catalog
            .lookup(id)
            .ok_or_else(|| BookingError::UnknownService(id.to_string()))?;
        debug!(session = %self.session, service = %service.name, "service selected");
        self.draft = self.draft.with_service(service.id);
        Ok(())
    }

    /// Replaces the values held by the contact form without validating them.
    pub fn edit_contact(&mut self, info: ContactInfo) {
        self.contact.edit(info);
    }

    /// Stores already validated contact details in the draft.
    pub fn submit_contact(&mut self, info: ContactInfo) {
        self.draft = self.draft.with_contact(info);
    }

    /// Moves forward once the current step holds what it needs.
    pub fn advance(&mut self) -> Result<Step> {
        match self.step {
            Step::Date => self.require(self.draft.has_date(), MISSING_DATE)?,
            Step::Time => self.require(self.draft.has_time(), MISSING_TIME)?,
            Step::Service => self.require(self.draft.has_service(), MISSING_SERVICE)?,
            Step::Info => return self.submit_contact_form(),
            Step::Summary => return Ok(self.step),
        }
        self.go_to(self.step.next())?;
        Ok(self.step)
    }

    /// Moves back one step; the first step stays put.
    pub fn retreat(&mut self) -> Result<Step> {
        self.go_to(self.step.previous())?;
        Ok(self.step)
    }

    fn require(&mut self, present: bool, message: &'static str) -> Result<()> {
        if present {
            return Ok(());
        }
        warn!(session = %self.session, step = %self.step, "step incomplete");
        self.notifier.notify(Notification::error(message));
        Err(ValidationError::new(message).into())
    }

    fn submit_contact_form(&mut self) -> Result<Step> {
        let info = self.contact.submit().map_err(|errors| {
            warn!(session = %self.session, invalid_fields = errors.len(), "contact form rejected");
            BookingError::from(errors)
        })?;
        self.submit_contact(info);
        self.go_to(Step::Summary)?;
        Ok(self.step)
    }

    /// Changes the current step. The new step is entered even when its load
    /// cannot start; that failure is notified and returned.
    fn go_to(&mut self, next: Step) -> Result<()> {
        if next == self.step {
            return Ok(());
        }
        match self.step {
            Step::Time => self.time.unmount(),
            Step::Service => self.service.unmount(),
            Step::Summary => self.summary.unmount(),
            Step::Date | Step::Info => {}
        }
        debug!(session = %self.session, from = %self.step, to = %next, "step changed");
        self.step = next;
        match next {
            Step::Time => {
                let mounted = self.time.mount(self.draft.date, &self.providers.slots);
                self.check_mount("time-slots", mounted)
            }
            Step::Service => {
                let mounted = self.service.mount(&self.providers.catalog);
                self.check_mount("services", mounted)
            }
            Step::Info => {
                self.contact.mount(self.draft.contact.clone());
                Ok(())
            }
            Step::Summary => {
                self.summary.mount();
                Ok(())
            }
            Step::Date => Ok(()),
        }
    }

    fn check_mount(&mut self, label: &str, mounted: Result<()>) -> Result<()> {
        if let Err(err) = &mounted {
            self.report_load(label, LoadOutcome::Failed(err.to_string()));
        }
        mounted
    }

    /// Collects whatever background work has finished, without waiting.
    pub fn poll(&mut self) {
        if let Some(outcome) = self.time.load_mut().poll() {
            self.report_load("time-slots", outcome);
        }
        if let Some(outcome) = self.service.load_mut().poll() {
            self.report_load("services", outcome);
        }
        if let Some(result) = self.summary.poll() {
            self.report_confirmation(&result);
        }
    }

    /// Waits for the current step's background work, if any.
    pub async fn settle(&mut self) {
        match self.step {
            Step::Time => {
                if let Some(outcome) = self.time.load_mut().settle().await {
                    self.report_load("time-slots", outcome);
                }
            }
            Step::Service => {
                if let Some(outcome) = self.service.load_mut().settle().await {
                    self.report_load("services", outcome);
                }
            }
            Step::Summary => {
                if let Some(result) = self.summary.settle().await {
                    self.report_confirmation(&result);
                }
            }
            Step::Date | Step::Info => {}
        }
    }

    /// Starts the simulated submission without waiting for it.
    pub fn begin_confirmation(&mut self) -> Result<()> {
        if self.step != Step::Summary {
            return Err(BookingError::InvalidStep(format!(
                "confirmação disponível apenas no resumo (etapa atual: {})",
                self.step
            )));
        }
        if let Err(err) = self.summary.begin(&self.providers.submitter, &self.draft) {
            warn!(session = %self.session, error = %err, "booking could not start");
            self.notifier
                .notify(Notification::error(BOOKING_FAILED).with_description(err.to_string()));
            return Err(err);
        }
        Ok(())
    }

    /// Submits the draft and waits for the confirmation code. Calling it again
    /// after a successful confirmation returns the same code.
    pub async fn confirm_booking(&mut self) -> Result<ConfirmationCode> {
        self.begin_confirmation()?;
        if let Some(result) = self.summary.settle().await {
            self.report_confirmation(&result);
            return result;
        }
        self.summary
            .code()
            .cloned()
            .ok_or_else(|| BookingError::Provider(BOOKING_FAILED.into()))
    }

    fn report_load(&mut self, label: &str, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded => debug!(session = %self.session, load = label, "load finished"),
            LoadOutcome::Failed(message) => {
                warn!(session = %self.session, load = label, %message, "load failed");
                self.notifier
                    .notify(Notification::error(LOAD_FAILED).with_description(message));
            }
        }
    }

    fn report_confirmation(&mut self, result: &Result<ConfirmationCode>) {
        match result {
            Ok(code) => {
                info!(session = %self.session, %code, "booking confirmed");
                self.notifier.notify(
                    Notification::success(BOOKING_SUCCESS).with_description(BOOKING_SUCCESS_DETAIL),
                );
            }
            Err(err) => {
                warn!(session = %self.session, error = %err, "booking failed");
                self.notifier
                    .notify(Notification::error(BOOKING_FAILED).with_description(err.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::providers::{SharedRng, SimulationSettings};

    fn controller() -> WizardController<MemoryNotifier> {
        let settings = SimulationSettings {
            availability: 1.0,
            ..SimulationSettings::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        WizardController::new(
            Providers::simulated(settings, SharedRng::new(Some(7))),
            Arc::new(FixedClock(today)),
            MemoryNotifier::new(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn missing_date_blocks_with_one_notification() {
        let mut wizard = controller();
        let err = wizard.advance().unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
        assert_eq!(wizard.step(), Step::Date);
        assert_eq!(wizard.notifier().count(NotificationKind::Error), 1);
        assert_eq!(wizard.notifier().last().unwrap().message, MISSING_DATE);
    }

    #[tokio::test(start_paused = true)]
    async fn retreat_is_clamped_at_first_step() {
        let mut wizard = controller();
        assert_eq!(wizard.retreat().unwrap(), Step::Date);
        assert_eq!(wizard.retreat().unwrap(), Step::Date);
        assert!(wizard.notifier().entries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_time_step_cancels_slot_load() {
        let mut wizard = controller();
        wizard
            .select_date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
            .unwrap();
        wizard.advance().unwrap();
        assert!(wizard.slots_loading());

        wizard.retreat().unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        wizard.poll();
        assert!(!wizard.slots_loading());
        assert!(wizard.time_slots().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_outside_summary_is_rejected() {
        let mut wizard = controller();
        let err = wizard.confirm_booking().await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidStep(_)));
        assert_eq!(wizard.step(), Step::Date);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_service_leaves_draft_untouched() {
        let mut wizard = controller();
        assert!(matches!(
            wizard.select_service("99"),
            Err(BookingError::UnknownService(_))
        ));
        assert!(!wizard.draft().has_service());
        wizard.select_service("3").unwrap();
        assert_eq!(wizard.resolved_service().unwrap().name, "Procedimento Especializado");
    }

    #[test]
    fn advancing_without_a_runtime_reports_instead_of_panicking() {
        let mut wizard = controller();
        wizard
            .select_date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
            .unwrap();

        let err = wizard.advance().unwrap_err();
        assert!(matches!(err, BookingError::Provider(_)));
        assert_eq!(wizard.step(), Step::Time);
        assert!(!wizard.slots_loading());
        assert_eq!(wizard.notifier().last().unwrap().message, LOAD_FAILED);

        let err = wizard
            .select_date(NaiveDate::from_ymd_opt(2026, 10, 21).unwrap())
            .unwrap_err();
        assert!(matches!(err, BookingError::Provider(_)));
        assert_eq!(wizard.draft().date, NaiveDate::from_ymd_opt(2026, 10, 21));
    }
}
