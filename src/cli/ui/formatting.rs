use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn with_preferences(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    pub fn is_plain(&self) -> bool {
        self.prefs.plain_mode
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        let text = format!("=== {} ===", title);
        if self.prefs.plain_mode {
            text
        } else {
            text.bold().to_string()
        }
    }

    pub fn detail_text(&self, message: impl fmt::Display) -> String {
        let text = message.to_string();
        if self.prefs.plain_mode {
            text
        } else {
            text.dimmed().to_string()
        }
    }

    pub fn emphasis(&self, message: impl fmt::Display) -> String {
        let text = message.to_string();
        if self.prefs.plain_mode {
            text
        } else {
            text.bold().to_string()
        }
    }

    pub fn pointer(&self) -> &'static str {
        if self.prefs.plain_mode {
            ">"
        } else {
            "▸"
        }
    }

    pub fn navigation_hint(&self) -> &'static str {
        "(Setas para navegar, Enter para selecionar, ESC para sair)"
    }

    pub fn format_two_column_row(&self, label: &str, description: &str, width: usize) -> String {
        if description.is_empty() {
            return format!("  {label}");
        }
        format!(
            "  {:<width$}  {}",
            label,
            description,
            width = width + 2
        )
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Display width in characters, so accented labels line up.
pub fn label_width(label: &str) -> usize {
    label.chars().count()
}
