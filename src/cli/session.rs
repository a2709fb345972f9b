//! Terminal loop around [`WizardController`]: one screen per step.

use chrono::NaiveDate;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::calendar;
use crate::cli::output;
use crate::cli::render;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::menu_renderer::{MenuUI, MenuUIItem};
use crate::cli::ui::prompts::{self, MenuChoice, TextPromptResult};
use crate::cli::CliError;
use crate::contact::ContactField;
use crate::domain::{ConfirmationCode, Displayable, Step};
use crate::errors::{BookingError, Result as BookingResult};
use crate::wizard::{DateStep, Notification, NotificationKind, Notifier, WizardController};

const BACK_KEY: &str = "__back";
const NEXT_KEY: &str = "__next";
const TYPE_DATE_KEY: &str = "__type_date";
const CONFIRM_KEY: &str = "__confirm";

/// Prints notifications inline, between screens.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => output::error(&notification.message),
            NotificationKind::Success => output::success(&notification.message),
        }
        if let Some(description) = &notification.description {
            output::detail(description);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Confirmed(ConfirmationCode),
    Cancelled,
}

enum Flow {
    Stay,
    Exit(SessionOutcome),
}

pub struct WizardSession<'rt, N: Notifier> {
    runtime: &'rt Runtime,
    wizard: WizardController<N>,
    days_shown: usize,
    formatter: Formatter,
}

impl<'rt, N: Notifier> WizardSession<'rt, N> {
    pub fn new(runtime: &'rt Runtime, wizard: WizardController<N>, days_shown: usize) -> Self {
        Self {
            runtime,
            wizard,
            days_shown,
            formatter: Formatter::new(),
        }
    }

    pub fn run(mut self) -> Result<SessionOutcome, CliError> {
        let runtime = self.runtime;
        let _context = runtime.enter();
        loop {
            let flow = match self.wizard.step() {
                Step::Date => self.date_screen()?,
                Step::Time => self.time_screen()?,
                Step::Service => self.service_screen()?,
                Step::Info => self.contact_screen()?,
                Step::Summary => self.summary_screen()?,
            };
            if let Flow::Exit(outcome) = flow {
                if outcome == SessionOutcome::Cancelled {
                    output::warning("Agendamento cancelado.");
                }
                debug!(session = %self.wizard.session(), ?outcome, "wizard finished");
                return Ok(outcome);
            }
        }
    }

    fn context(&self, extra: Vec<String>) -> Vec<String> {
        let mut lines = vec![
            render::progress_line(self.wizard.step(), self.formatter.is_plain()),
            String::new(),
        ];
        lines.extend(extra);
        lines
    }

    fn navigation_items(&self) -> Vec<MenuUIItem> {
        let mut items = Vec::new();
        if !self.wizard.step().is_first() {
            items.push(MenuUIItem::new(BACK_KEY, "← Voltar", "Etapa anterior"));
        }
        items.push(MenuUIItem::new(NEXT_KEY, "Próximo →", "Continuar"));
        items
    }

    /// Handles the shared back/next entries; `None` for step-specific keys.
    fn navigate(&mut self, key: &str) -> Result<Option<Flow>, CliError> {
        match key {
            BACK_KEY => {
                let outcome = self.wizard.retreat().map(|_| ());
                self.report(outcome)?;
                Ok(Some(Flow::Stay))
            }
            NEXT_KEY => {
                let outcome = self.wizard.advance().map(|_| ());
                self.report(outcome)?;
                Ok(Some(Flow::Stay))
            }
            _ => Ok(None),
        }
    }

    /// Input mistakes are shown and the screen repeats; anything else aborts.
    fn report(&self, outcome: BookingResult<()>) -> Result<(), CliError> {
        match outcome {
            Ok(()) => Ok(()),
            // Already announced through the notifier.
            Err(BookingError::Validation(_)) => Ok(()),
            Err(err) if err.is_user_facing() => {
                output::warning(err);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn leave(&self) -> Result<Flow, CliError> {
        if prompts::confirm_exit()? {
            Ok(Flow::Exit(SessionOutcome::Cancelled))
        } else {
            Ok(Flow::Stay)
        }
    }

    fn date_screen(&mut self) -> Result<Flow, CliError> {
        let days = self.wizard.date_step().upcoming(self.days_shown);
        let mut items: Vec<MenuUIItem> = days
            .iter()
            .map(|day| MenuUIItem::new(day.to_string(), calendar::format_short(*day), ""))
            .collect();
        items.push(MenuUIItem::new(
            TYPE_DATE_KEY,
            "Outra data...",
            "Digite no formato DD/MM/AAAA",
        ));
        items.extend(self.navigation_items());

        let mut extra = Vec::new();
        if let Some(line) = render::selected_date_line(self.wizard.draft()) {
            extra.push(line);
        }
        extra.push(self.formatter.detail_text(DateStep::FOOTNOTE));

        let selected = self.wizard.draft().date;
        let initial = days
            .iter()
            .position(|day| Some(*day) == selected)
            .unwrap_or(0);
        let menu = MenuUI::new(render::step_title(Step::Date), items)
            .with_context(self.context(extra))
            .with_initial_index(initial);

        let key = match prompts::menu(&menu)? {
            MenuChoice::Escape => return self.leave(),
            MenuChoice::Selected(key) => key,
        };
        if let Some(flow) = self.navigate(&key)? {
            return Ok(flow);
        }
        if key == TYPE_DATE_KEY {
            return self.typed_date();
        }
        if let Ok(date) = NaiveDate::parse_from_str(&key, "%Y-%m-%d") {
            let outcome = self.wizard.select_date(date);
            self.report(outcome)?;
        }
        Ok(Flow::Stay)
    }

    fn typed_date(&mut self) -> Result<Flow, CliError> {
        match prompts::text_input("Data (DD/MM/AAAA)", None)? {
            TextPromptResult::Value(raw) => match calendar::parse_date_input(&raw) {
                Some(date) => {
                    let outcome = self.wizard.select_date(date);
                    self.report(outcome)?;
                }
                None => output::warning("Data inválida. Use o formato DD/MM/AAAA."),
            },
            TextPromptResult::Keep | TextPromptResult::Back => {}
            TextPromptResult::Cancel => return self.leave(),
        }
        Ok(Flow::Stay)
    }

    fn time_screen(&mut self) -> Result<Flow, CliError> {
        if self.wizard.slots_loading() {
            output::info("Carregando horários...");
            self.runtime.block_on(self.wizard.settle());
        }

        let mut extra = Vec::new();
        if let Some(line) = render::slots_heading(self.wizard.draft()) {
            extra.push(line);
        }
        let slots = self.wizard.time_slots();
        if slots.is_empty() {
            extra.push(self.formatter.detail_text("Nenhum horário para exibir."));
        }
        let mut items: Vec<MenuUIItem> = slots
            .iter()
            .map(|slot| {
                let note = if slot.available { "" } else { "indisponível" };
                MenuUIItem::new(slot.time.clone(), slot.time.clone(), note)
            })
            .collect();
        let initial = slots
            .iter()
            .position(|slot| slot.time == self.wizard.draft().time)
            .unwrap_or(0);
        items.extend(self.navigation_items());

        let menu = MenuUI::new(render::step_title(Step::Time), items)
            .with_context(self.context(extra))
            .with_initial_index(initial);
        let key = match prompts::menu(&menu)? {
            MenuChoice::Escape => return self.leave(),
            MenuChoice::Selected(key) => key,
        };
        if let Some(flow) = self.navigate(&key)? {
            return Ok(flow);
        }
        let outcome = self.wizard.select_time(&key);
        self.report(outcome)?;
        Ok(Flow::Stay)
    }

    fn service_screen(&mut self) -> Result<Flow, CliError> {
        if self.wizard.services_loading() {
            output::info("Carregando serviços...");
            self.runtime.block_on(self.wizard.settle());
        }

        let mut extra = Vec::new();
        if let Some(service) = self.wizard.resolved_service() {
            extra.push(format!("Serviço selecionado: {}", service.display_label()));
        }
        let services = self.wizard.services();
        let mut items: Vec<MenuUIItem> = services
            .iter()
            .map(|service| {
                MenuUIItem::new(
                    service.id.clone(),
                    service.name.clone(),
                    render::service_description(service),
                )
            })
            .collect();
        let initial = services
            .iter()
            .position(|service| service.id == self.wizard.draft().service_id)
            .unwrap_or(0);
        items.extend(self.navigation_items());

        let menu = MenuUI::new(render::step_title(Step::Service), items)
            .with_context(self.context(extra))
            .with_initial_index(initial);
        let key = match prompts::menu(&menu)? {
            MenuChoice::Escape => return self.leave(),
            MenuChoice::Selected(key) => key,
        };
        if let Some(flow) = self.navigate(&key)? {
            return Ok(flow);
        }
        let outcome = self.wizard.select_service(&key);
        self.report(outcome)?;
        Ok(Flow::Stay)
    }

    fn contact_screen(&mut self) -> Result<Flow, CliError> {
        output::lines(self.context(vec![self
            .formatter
            .header_text(render::step_title(Step::Info))]));
        output::detail("Digite :back para voltar ou :cancel para sair.");

        let errors = self.wizard.contact_step().errors().clone();
        let mut index = 0;
        while index < ContactField::ALL.len() {
            let field = ContactField::ALL[index];
            if let Some(message) = errors.message_for(field) {
                output::error(message);
            }
            let current = self.wizard.contact_step().value(field).to_string();
            let default = (!current.is_empty()).then_some(current.as_str());
            if default.is_none() {
                output::detail(format!("Ex.: {}", field.placeholder()));
            }
            let label = if field.is_required() {
                format!("{} *", field.label())
            } else {
                field.label().to_string()
            };
            match prompts::text_input(&label, default)? {
                TextPromptResult::Value(value) => {
                    self.wizard.contact_step_mut().set_field(field, value);
                    index += 1;
                }
                TextPromptResult::Keep => index += 1,
                TextPromptResult::Back if index == 0 => {
                    let outcome = self.wizard.retreat().map(|_| ());
                    self.report(outcome)?;
                    return Ok(Flow::Stay);
                }
                TextPromptResult::Back => index -= 1,
                TextPromptResult::Cancel => return self.leave(),
            }
        }

        match self.wizard.advance() {
            Ok(_) => {}
            Err(BookingError::Contact(errors)) => {
                output::warning("Corrija os campos indicados.");
                output::lines(render::contact_error_lines(&errors));
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Stay)
    }

    fn summary_screen(&mut self) -> Result<Flow, CliError> {
        let service = self.wizard.resolved_service();
        let extra = render::summary_lines(self.wizard.draft(), service.as_ref(), &self.formatter);
        let items = vec![
            MenuUIItem::new(BACK_KEY, "← Voltar", "Editar seus dados"),
            MenuUIItem::new(CONFIRM_KEY, "Confirmar agendamento", "Enviar a reserva"),
        ];
        let menu = MenuUI::new(render::step_title(Step::Summary), items)
            .with_context(self.context(extra))
            .with_initial_index(1);

        let key = match prompts::menu(&menu)? {
            MenuChoice::Escape => return self.leave(),
            MenuChoice::Selected(key) => key,
        };
        if let Some(flow) = self.navigate(&key)? {
            return Ok(flow);
        }
        if key != CONFIRM_KEY {
            return Ok(Flow::Stay);
        }

        output::info("Processando...");
        match self.runtime.block_on(self.wizard.confirm_booking()) {
            Ok(code) => {
                output::blank_line();
                output::lines(render::confirmed_lines(
                    self.wizard.draft(),
                    &code,
                    &self.formatter,
                ));
                Ok(Flow::Exit(SessionOutcome::Confirmed(code)))
            }
            // Provider failures were reported through the notifier; the user may retry.
            Err(BookingError::Provider(_)) => Ok(Flow::Stay),
            Err(err) => Err(err.into()),
        }
    }
}
