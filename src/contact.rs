//! Field validation for the contact-info step.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::ContactInfo;

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PHONE_DIGITS: usize = 10;

pub const NAME_TOO_SHORT: &str = "Nome deve ter pelo menos 3 caracteres";
pub const EMAIL_INVALID: &str = "Email inválido";
pub const PHONE_TOO_SHORT: &str = "Telefone deve ter pelo menos 10 dígitos";
pub const PHONE_NOT_NUMERIC: &str = "Apenas números são permitidos";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern compiles")
});

/// Inputs of the contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Notes,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Nome completo",
            ContactField::Email => "E-mail",
            ContactField::Phone => "Telefone",
            ContactField::Notes => "Observações (opcional)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ContactField::Name => "Seu nome completo",
            ContactField::Email => "seu@email.com",
            ContactField::Phone => "(00) 00000-0000",
            ContactField::Notes => "Informações adicionais relevantes para o atendimento",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, ContactField::Notes)
    }
}

/// Field-level messages for a rejected contact form; at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactErrors {
    entries: Vec<(ContactField, &'static str)>,
}

impl ContactErrors {
    fn push(&mut self, field: ContactField, message: &'static str) {
        if self.message_for(field).is_none() {
            self.entries.push((field, message));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn message_for(&self, field: ContactField) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, message)| *message)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

impl fmt::Display for ContactErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(field, message)| format!("{}: {}", field.label(), message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ContactErrors {}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// Checks every field and returns a normalised copy when all rules pass.
///
/// Phone length is checked before the digits-only rule, so a short input
/// always reports the length message.
pub fn validate_contact(info: &ContactInfo) -> Result<ContactInfo, ContactErrors> {
    let mut errors = ContactErrors::default();

    let name = info.name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        errors.push(ContactField::Name, NAME_TOO_SHORT);
    }

    let email = info.email.trim();
    if !is_valid_email(email) {
        errors.push(ContactField::Email, EMAIL_INVALID);
    }

    let phone = info.phone.trim();
    if phone.chars().count() < MIN_PHONE_DIGITS {
        errors.push(ContactField::Phone, PHONE_TOO_SHORT);
    } else if !phone.chars().all(|ch| ch.is_ascii_digit()) {
        errors.push(ContactField::Phone, PHONE_NOT_NUMERIC);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let notes = info
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string);

    Ok(ContactInfo {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactInfo {
        ContactInfo::new("Ana Silva", "ana@x.com", "11999999999")
    }

    #[test]
    fn accepts_well_formed_contact() {
        let validated = validate_contact(&valid()).expect("valid contact");
        assert_eq!(validated.name, "Ana Silva");
        assert_eq!(validated.notes, None);
    }

    #[test]
    fn reports_every_failing_field() {
        let info = ContactInfo::new("Al", "not-an-email", "12345");
        let errors = validate_contact(&info).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.message_for(ContactField::Name), Some(NAME_TOO_SHORT));
        assert_eq!(errors.message_for(ContactField::Email), Some(EMAIL_INVALID));
        assert_eq!(errors.message_for(ContactField::Phone), Some(PHONE_TOO_SHORT));
    }

    #[test]
    fn long_phone_with_symbols_is_rejected_as_non_numeric() {
        let mut info = valid();
        info.phone = "(11) 99999-9999".into();
        let errors = validate_contact(&info).unwrap_err();
        assert_eq!(
            errors.message_for(ContactField::Phone),
            Some(PHONE_NOT_NUMERIC)
        );
    }

    #[test]
    fn email_grammar() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@clinic.com.br"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a..b@c.com"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn blank_notes_are_dropped_and_text_is_trimmed() {
        let info = ContactInfo::new("  Ana Silva ", " ana@x.com ", "11999999999").with_notes("   ");
        let validated = validate_contact(&info).unwrap();
        assert_eq!(validated.name, "Ana Silva");
        assert_eq!(validated.email, "ana@x.com");
        assert_eq!(validated.notes, None);
    }
}
