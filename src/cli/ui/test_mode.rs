//! Scripted input for non-interactive runs.
//!
//! When `AGENDA_TEST_MENU_EVENTS` or `AGENDA_TEST_TEXT_INPUTS` is set, menus
//! and text prompts consume the queued entries instead of reading the
//! terminal. Both variables hold `|`-separated segments; a menu segment is a
//! comma-separated key list such as `DOWN,DOWN,ENTER`.

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::warn;

pub const MENU_EVENTS_ENV: &str = "AGENDA_TEST_MENU_EVENTS";
pub const TEXT_INPUTS_ENV: &str = "AGENDA_TEST_TEXT_INPUTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTestEvent {
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Esc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Keep,
    Back,
    Cancel,
}

struct Queue<T> {
    enabled: bool,
    entries: VecDeque<T>,
}

impl<T> Queue<T> {
    fn from_env(var: &str, parse: fn(&str) -> VecDeque<T>) -> Self {
        match env::var(var) {
            Ok(raw) => Self {
                enabled: true,
                entries: parse(&raw),
            },
            Err(_) => Self {
                enabled: false,
                entries: VecDeque::new(),
            },
        }
    }
}

static MENU_EVENTS: Lazy<Mutex<Queue<Vec<MenuTestEvent>>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(MENU_EVENTS_ENV, parse_menu_sequences)));

static TEXT_INPUTS: Lazy<Mutex<Queue<TextTestInput>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(TEXT_INPUTS_ENV, parse_text_sequences)));

fn lock<T>(queue: &Mutex<T>) -> MutexGuard<'_, T> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn is_enabled() -> bool {
    lock(&MENU_EVENTS).enabled || lock(&TEXT_INPUTS).enabled
}

/// Next scripted key list; an exhausted script behaves like ESC.
pub fn next_menu_events(label: &str) -> Option<Vec<MenuTestEvent>> {
    let mut guard = lock(&MENU_EVENTS);
    if !guard.enabled {
        return None;
    }
    Some(guard.entries.pop_front().unwrap_or_else(|| {
        warn!(menu = label, "scripted menu events exhausted");
        vec![MenuTestEvent::Esc]
    }))
}

/// Next scripted answer; an exhausted script cancels the prompt.
pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = lock(&TEXT_INPUTS);
    if !guard.enabled {
        return None;
    }
    Some(guard.entries.pop_front().unwrap_or_else(|| {
        warn!(prompt = label, "scripted text inputs exhausted");
        TextTestInput::Cancel
    }))
}

fn parse_menu_event(token: &str) -> Option<MenuTestEvent> {
    match token.to_ascii_uppercase().as_str() {
        "UP" => Some(MenuTestEvent::Up),
        "DOWN" => Some(MenuTestEvent::Down),
        "HOME" => Some(MenuTestEvent::Home),
        "END" => Some(MenuTestEvent::End),
        "PAGEUP" | "PAGE_UP" => Some(MenuTestEvent::PageUp),
        "PAGEDOWN" | "PAGE_DOWN" => Some(MenuTestEvent::PageDown),
        "ENTER" | "RETURN" => Some(MenuTestEvent::Enter),
        "ESC" | "ESCAPE" => Some(MenuTestEvent::Esc),
        _ => None,
    }
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<CANCEL>" | "<ESC>" => TextTestInput::Cancel,
        "<BACK>" => TextTestInput::Back,
        "<KEEP>" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn parse_menu_sequences(raw: &str) -> VecDeque<Vec<MenuTestEvent>> {
    raw.split('|')
        .filter_map(|segment| {
            let events = segment
                .split(',')
                .filter_map(|token| parse_menu_event(token.trim()))
                .collect::<Vec<_>>();
            (!events.is_empty()).then_some(events)
        })
        .collect()
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_text_input)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_segments() {
        let parsed = parse_menu_sequences("ENTER| end , enter |bogus|ESC");
        assert_eq!(
            parsed,
            VecDeque::from(vec![
                vec![MenuTestEvent::Enter],
                vec![MenuTestEvent::End, MenuTestEvent::Enter],
                vec![MenuTestEvent::Esc],
            ])
        );
    }

    #[test]
    fn parses_text_markers() {
        let parsed = parse_text_sequences("Ana Silva|<blank>|<KEEP>|<back>");
        assert_eq!(
            parsed,
            VecDeque::from(vec![
                TextTestInput::Value("Ana Silva".into()),
                TextTestInput::Value(String::new()),
                TextTestInput::Keep,
                TextTestInput::Back,
            ])
        );
    }
}
