//! Text blocks for the wizard screens. Everything here is pure so the
//! terminal loop only decides when to print.

use crate::calendar;
use crate::cli::ui::formatting::Formatter;
use crate::contact::ContactErrors;
use crate::domain::{BookingDraft, ConfirmationCode, Displayable, Service, Step};
use crate::wizard::{progress, StepStatus};

pub fn progress_line(current: Step, plain: bool) -> String {
    let separator = if plain { " > " } else { " ─ " };
    progress(current)
        .into_iter()
        .map(|(step, status)| {
            let marker = match (status, plain) {
                (StepStatus::Completed, false) => "✔".to_string(),
                (StepStatus::Completed, true) => "[x]".to_string(),
                (StepStatus::Current, false) => format!("({})", step.index() + 1),
                (StepStatus::Current, true) => format!("[{}]", step.index() + 1),
                (StepStatus::Pending, false) => format!("{}", step.index() + 1),
                (StepStatus::Pending, true) => "[ ]".to_string(),
            };
            format!("{marker} {}", step.label())
        })
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn step_title(step: Step) -> &'static str {
    match step {
        Step::Date => "Escolha uma data",
        Step::Time => "Escolha um horário",
        Step::Service => "Escolha o serviço",
        Step::Info => "Seus dados",
        Step::Summary => "Resumo do agendamento",
    }
}

pub fn selected_date_line(draft: &BookingDraft) -> Option<String> {
    draft
        .date
        .map(|date| format!("Data selecionada: {}", calendar::format_long(date)))
}

pub fn slots_heading(draft: &BookingDraft) -> Option<String> {
    draft
        .date
        .map(|date| format!("Horários disponíveis para {}", calendar::format_heading(date)))
}

pub fn service_description(service: &Service) -> String {
    format!("{} · {} · {}", service.duration_label(), service.price, service.description)
}

/// Read-only review of the draft, shown before confirming.
pub fn summary_lines(draft: &BookingDraft, service: Option<&Service>, formatter: &Formatter) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(formatter.emphasis("Data e horário"));
    let when = match draft.date {
        Some(date) => calendar::format_long(date),
        None => "-".to_string(),
    };
    lines.push(format!("  {when} às {}", draft.time));
    lines.push(String::new());

    lines.push(formatter.emphasis("Serviço"));
    match service {
        Some(service) => {
            lines.push(format!("  {}", service.name));
            lines.push(format!("  {}", formatter.detail_text(&service.description)));
            lines.push(format!("  Duração: {}", service.duration_label()));
            lines.push(format!("  {}", service.price));
        }
        None => lines.push("  Serviço não encontrado".to_string()),
    }
    lines.push(String::new());

    let contact = &draft.contact;
    lines.push(formatter.emphasis("Informações de contato"));
    lines.push(format!("  Nome: {}", contact.name));
    lines.push(format!("  E-mail: {}", contact.email));
    lines.push(format!("  Telefone: {}", contact.phone));
    if let Some(notes) = &contact.notes {
        lines.push(format!("  Observações: {notes}"));
    }
    lines
}

pub fn confirmed_lines(draft: &BookingDraft, code: &ConfirmationCode, formatter: &Formatter) -> Vec<String> {
    let when = match draft.date {
        Some(date) => calendar::format_long(date),
        None => "-".to_string(),
    };
    vec![
        formatter.header_text("Agendamento confirmado!"),
        format!(
            "Enviamos um e-mail de confirmação para {}",
            draft.contact.email
        ),
        String::new(),
        format!("CÓDIGO DA RESERVA {}", code.display_label()),
        "DATA E HORA".to_string(),
        format!("  {when} às {}", draft.time),
    ]
}

pub fn contact_error_lines(errors: &ContactErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {message}", field.label()))
        .collect()
}
