use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, SetAttribute},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::ui::formatting::{label_width, Formatter};
use crate::cli::ui::prompts::RawModeGuard;
use crate::cli::ui::test_mode::{self, MenuTestEvent};

#[derive(Clone, Debug)]
pub struct MenuUI {
    pub title: String,
    pub context: Vec<String>,
    pub items: Vec<MenuUIItem>,
    pub initial_index: Option<usize>,
}

impl MenuUI {
    pub fn new(title: impl Into<String>, items: Vec<MenuUIItem>) -> Self {
        Self {
            title: title.into(),
            context: Vec::new(),
            items,
            initial_index: None,
        }
    }

    pub fn with_context(mut self, context: Vec<String>) -> Self {
        self.context = context;
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = Some(index);
        self
    }

    fn start_index(&self) -> usize {
        self.initial_index
            .unwrap_or(0)
            .min(self.items.len().saturating_sub(1))
    }

    fn label_column(&self) -> usize {
        self.items
            .iter()
            .map(|item| label_width(&item.label))
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug)]
pub struct MenuUIItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl MenuUIItem {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub enum MenuRenderError {
    Interrupted,
    Io(io::Error),
}

impl From<io::Error> for MenuRenderError {
    fn from(err: io::Error) -> Self {
        MenuRenderError::Io(err)
    }
}

/// Full-screen single-select menu. Returns the key of the chosen item, or
/// `None` when the user pressed ESC.
pub struct MenuRenderer {
    formatter: Formatter,
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self {
            formatter: Formatter::new(),
        }
    }

    pub fn show(&self, menu: &MenuUI) -> Result<Option<String>, MenuRenderError> {
        if menu.items.is_empty() {
            return Ok(None);
        }

        if let Some(events) = test_mode::next_menu_events(&menu.title) {
            return Ok(self.show_with_script(menu, events));
        }

        let mut stdout = io::stdout();
        let mut raw_mode = RawModeGuard::activate_hidden()?;

        let len = menu.items.len();
        let mut selected_index = menu.start_index();

        let result = loop {
            self.render(&mut stdout, menu, selected_index)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        break Err(MenuRenderError::Interrupted)
                    }
                    _ => continue,
                }
            }
            match key.code {
                KeyCode::Up => selected_index = selected_index.checked_sub(1).unwrap_or(len - 1),
                KeyCode::Down => selected_index = (selected_index + 1) % len,
                KeyCode::Home => selected_index = 0,
                KeyCode::End => selected_index = len - 1,
                KeyCode::PageUp => selected_index = selected_index.saturating_sub(3),
                KeyCode::PageDown => selected_index = (selected_index + 3).min(len - 1),
                KeyCode::Enter => break Ok(Some(menu.items[selected_index].key.clone())),
                KeyCode::Esc => break Ok(None),
                _ => {}
            }
        };

        let clear_status = clear_screen(&mut stdout);
        raw_mode.deactivate();
        clear_status?;

        if let Ok(Some(key)) = &result {
            if let Some(item) = menu.items.iter().find(|item| &item.key == key) {
                println!("{} {}", self.formatter.pointer(), item.label);
            }
        }
        result
    }

    fn show_with_script(&self, menu: &MenuUI, events: Vec<MenuTestEvent>) -> Option<String> {
        let len = menu.items.len();
        let mut selected_index = menu.start_index();
        for event in events {
            match event {
                MenuTestEvent::Up => selected_index = selected_index.checked_sub(1).unwrap_or(len - 1),
                MenuTestEvent::Down => selected_index = (selected_index + 1) % len,
                MenuTestEvent::Home => selected_index = 0,
                MenuTestEvent::End => selected_index = len - 1,
                MenuTestEvent::PageUp => selected_index = selected_index.saturating_sub(3),
                MenuTestEvent::PageDown => selected_index = (selected_index + 3).min(len - 1),
                MenuTestEvent::Enter => {
                    self.print_snapshot(menu, selected_index);
                    return Some(menu.items[selected_index].key.clone());
                }
                MenuTestEvent::Esc => {
                    self.print_snapshot(menu, selected_index);
                    return None;
                }
            }
        }
        // A segment without ENTER or ESC leaves the menu like ESC would.
        self.print_snapshot(menu, selected_index);
        None
    }

    fn menu_lines(&self, menu: &MenuUI, selected_index: usize) -> Vec<(bool, String)> {
        let mut lines = Vec::new();
        for line in &menu.context {
            lines.push((false, line.clone()));
        }
        if !menu.context.is_empty() {
            lines.push((false, String::new()));
        }
        lines.push((false, self.formatter.header_text(&menu.title)));
        lines.push((false, String::new()));

        let width = menu.label_column();
        for (index, item) in menu.items.iter().enumerate() {
            let selected = index == selected_index;
            let pointer = if selected { self.formatter.pointer() } else { " " };
            let row = self
                .formatter
                .format_two_column_row(&item.label, &item.description, width);
            lines.push((selected, format!(" {pointer}{row}")));
        }
        lines.push((false, String::new()));
        lines.push((false, self.formatter.detail_text(self.formatter.navigation_hint())));
        lines
    }

    fn print_snapshot(&self, menu: &MenuUI, selected_index: usize) {
        for (_, line) in self.menu_lines(menu, selected_index) {
            println!("{line}");
        }
    }

    fn render(
        &self,
        stdout: &mut Stdout,
        menu: &MenuUI,
        selected_index: usize,
    ) -> Result<(), io::Error> {
        clear_screen(stdout)?;
        // Raw mode needs explicit carriage returns.
        for (selected, line) in self.menu_lines(menu, selected_index) {
            if selected {
                stdout.execute(SetAttribute(Attribute::Reverse))?;
            }
            write!(stdout, "{line}")?;
            if selected {
                stdout.execute(SetAttribute(Attribute::Reset))?;
            }
            write!(stdout, "\r\n")?;
        }
        stdout.flush()
    }
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn clear_screen(stdout: &mut Stdout) -> Result<(), io::Error> {
    stdout.execute(terminal::Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_while_drawing() -> Result<(), MenuRenderError> {
        let _raw_mode = RawModeGuard::activate_hidden()?;
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away").into())
    }

    #[test]
    fn raw_mode_is_released_when_drawing_fails() {
        assert!(fails_while_drawing().is_err());
        assert!(!terminal::is_raw_mode_enabled().unwrap_or(false));
    }
}
