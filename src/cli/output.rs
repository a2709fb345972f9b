use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Detail,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    /// ASCII markers and no colour.
    pub plain_mode: bool,
}

impl OutputPreferences {
    /// Plain mode is forced when `NO_COLOR` is set to anything non-empty.
    pub fn resolve(plain_mode: bool) -> Self {
        let no_color = std::env::var("NO_COLOR").map_or(false, |value| !value.is_empty());
        Self {
            plain_mode: plain_mode || no_color,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
    if prefs.plain_mode {
        colored::control::set_override(false);
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn marker(kind: MessageKind, plain: bool) -> &'static str {
    match (kind, plain) {
        (MessageKind::Success, false) => "✔",
        (MessageKind::Success, true) => "OK:",
        (MessageKind::Warning, false) => "⚠",
        (MessageKind::Warning, true) => "AVISO:",
        (MessageKind::Error, false) => "✖",
        (MessageKind::Error, true) => "ERRO:",
        (MessageKind::Info, false) => "ℹ",
        (MessageKind::Info, true) => "INFO:",
        (MessageKind::Detail | MessageKind::Section, _) => "",
    }
}

pub fn styled(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Detail => format!("  {text}"),
        _ => format!("{} {text}", marker(kind, prefs.plain_mode)),
    };

    if prefs.plain_mode {
        return base;
    }

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Detail => base.dimmed().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = styled(kind, message, &current_preferences());
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn detail(message: impl fmt::Display) {
    print(MessageKind::Detail, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn lines<I, S>(lines: I)
where
    I: IntoIterator<Item = S>,
    S: fmt::Display,
{
    for line in lines {
        println!("{line}");
    }
}

pub fn blank_line() {
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_uses_text_markers() {
        let prefs = OutputPreferences { plain_mode: true };
        assert_eq!(styled(MessageKind::Error, "falhou", &prefs), "ERRO: falhou");
        assert_eq!(styled(MessageKind::Section, " Resumo ", &prefs), "=== Resumo ===");
        assert_eq!(styled(MessageKind::Detail, "x", &prefs), "  x");
    }
}
