use std::fmt;
use std::result::Result as StdResult;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::ConfigError;
use crate::contact::ContactErrors;

/// Field-level validation failure raised when a step's required value is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Unified error type for the wizard, its steps and the simulated providers.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Dados de contato inválidos: {0}")]
    Contact(#[from] ContactErrors),
    #[error("Data indisponível para agendamento: {0}")]
    DateNotSelectable(NaiveDate),
    #[error("Horário indisponível: {0}")]
    SlotUnavailable(String),
    #[error("Serviço não encontrado: {0}")]
    UnknownService(String),
    #[error("Operação inválida na etapa atual: {0}")]
    InvalidStep(String),
    #[error("Falha no provedor de dados: {0}")]
    Provider(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = StdResult<T, BookingError>;

impl BookingError {
    /// True for failures the user can fix by changing their input.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            BookingError::Validation(_)
                | BookingError::Contact(_)
                | BookingError::DateNotSelectable(_)
                | BookingError::SlotUnavailable(_)
                | BookingError::UnknownService(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_message_only() {
        let err = BookingError::from(ValidationError::new("Por favor, selecione uma data."));
        assert_eq!(err.to_string(), "Por favor, selecione uma data.");
        assert!(err.is_user_facing());
    }

    #[test]
    fn provider_errors_are_not_user_facing() {
        let err = BookingError::Provider("timeout".into());
        assert!(!err.is_user_facing());
    }
}
