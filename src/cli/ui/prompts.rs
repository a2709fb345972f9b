use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::menu_renderer::{MenuRenderError, MenuRenderer, MenuUI};
use crate::cli::ui::test_mode::{self, TextTestInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPromptResult {
    Value(String),
    Keep,
    Back,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Selected(String),
    Escape,
}

/// Single-line prompt. An empty answer keeps `default` when one is given;
/// `:back` and `:cancel` navigate instead of answering.
pub fn text_input(label: &str, default: Option<&str>) -> io::Result<TextPromptResult> {
    let formatter = Formatter::new();
    let heading = match default {
        Some(current) if !current.is_empty() => format!("{label} [{current}]"),
        _ => label.to_string(),
    };
    println!("{}", formatter.emphasis(&heading));

    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(match scripted {
            TextTestInput::Value(value) => {
                println!("> {value}");
                TextPromptResult::Value(value)
            }
            TextTestInput::Keep => TextPromptResult::Keep,
            TextTestInput::Back => TextPromptResult::Back,
            TextTestInput::Cancel => TextPromptResult::Cancel,
        });
    }

    let mut guard = RawModeGuard::activate()?;
    let mut stdout = io::stdout();
    redraw_input(&mut stdout, "")?;
    let mut buffer = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    guard.deactivate();
                    println!();
                    return Ok(TextPromptResult::Cancel);
                }
                KeyCode::Char('u') | KeyCode::Char('U') => {
                    buffer.clear();
                    redraw_input(&mut stdout, &buffer)?;
                }
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Esc => {
                guard.deactivate();
                println!();
                return Ok(TextPromptResult::Cancel);
            }
            KeyCode::Enter => {
                guard.deactivate();
                println!();
                return Ok(interpret_buffer(&buffer, default));
            }
            KeyCode::Backspace => {
                buffer.pop();
                redraw_input(&mut stdout, &buffer)?;
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                redraw_input(&mut stdout, &buffer)?;
            }
            _ => {}
        }
    }
}

pub fn menu(menu: &MenuUI) -> io::Result<MenuChoice> {
    match MenuRenderer::new().show(menu) {
        Ok(Some(key)) => Ok(MenuChoice::Selected(key)),
        Ok(None) | Err(MenuRenderError::Interrupted) => Ok(MenuChoice::Escape),
        Err(MenuRenderError::Io(err)) => Err(err),
    }
}

/// Asks before abandoning the wizard. Scripted runs never block on it.
pub fn confirm_exit() -> io::Result<bool> {
    if test_mode::is_enabled() {
        return Ok(true);
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Deseja sair sem concluir o agendamento?")
        .default(false)
        .interact()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))
}

fn redraw_input(stdout: &mut Stdout, buffer: &str) -> io::Result<()> {
    stdout.execute(cursor::MoveToColumn(0))?;
    stdout.execute(terminal::Clear(ClearType::CurrentLine))?;
    write!(stdout, "> {}", buffer)?;
    stdout.flush()
}

fn interpret_buffer(buffer: &str, default: Option<&str>) -> TextPromptResult {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return if default.is_some() {
            TextPromptResult::Keep
        } else {
            TextPromptResult::Value(String::new())
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        ":cancel" => TextPromptResult::Cancel,
        ":back" => TextPromptResult::Back,
        ":clear" => TextPromptResult::Value(String::new()),
        _ => TextPromptResult::Value(buffer.to_string()),
    }
}

/// Leaves raw mode (and shows the cursor again) on every exit path.
pub(crate) struct RawModeGuard {
    active: bool,
    cursor_hidden: bool,
}

impl RawModeGuard {
    pub(crate) fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self {
            active: true,
            cursor_hidden: false,
        })
    }

    pub(crate) fn activate_hidden() -> io::Result<Self> {
        let mut guard = Self::activate()?;
        io::stdout().execute(cursor::Hide)?;
        guard.cursor_hidden = true;
        Ok(guard)
    }

    pub(crate) fn deactivate(&mut self) {
        if self.cursor_hidden {
            let _ = io::stdout().execute(cursor::Show);
            self.cursor_hidden = false;
        }
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_keeps_default() {
        assert_eq!(interpret_buffer("  ", Some("Ana")), TextPromptResult::Keep);
        assert_eq!(
            interpret_buffer("", None),
            TextPromptResult::Value(String::new())
        );
    }

    #[test]
    fn navigation_commands_are_recognised() {
        assert_eq!(interpret_buffer(":BACK", None), TextPromptResult::Back);
        assert_eq!(interpret_buffer(":cancel", Some("x")), TextPromptResult::Cancel);
        assert_eq!(
            interpret_buffer("Ana Silva", None),
            TextPromptResult::Value("Ana Silva".into())
        );
    }
}
