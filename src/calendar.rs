//! Business-day rules for the date step plus the small pt-BR date vocabulary
//! used by the terminal screens.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// Clock abstracts access to the current date so the date rules stay
/// deterministic in tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the user's local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A date can be booked when it is not before `today` and falls on Monday–Friday.
pub fn is_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && !is_weekend(date)
}

/// The next `count` selectable days, starting with `today` when it qualifies.
pub fn upcoming_business_days(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut cursor = today;
    while days.len() < count {
        if is_selectable(cursor, today) {
            days.push(cursor);
        }
        cursor += Duration::days(1);
    }
    days
}

/// Parses `DD/MM/AAAA` (the pt-BR convention) or ISO `YYYY-MM-DD`.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

pub fn month_name(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "janeiro",
        "fevereiro",
        "março",
        "abril",
        "maio",
        "junho",
        "julho",
        "agosto",
        "setembro",
        "outubro",
        "novembro",
        "dezembro",
    ];
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

/// `20 de outubro de 2026, terça-feira`
pub fn format_long(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}, {}",
        date.day(),
        month_name(date.month()),
        date.year(),
        weekday_name(date.weekday())
    )
}

/// `Terça-feira, 20 de outubro`
pub fn format_heading(date: NaiveDate) -> String {
    capitalize(&format!(
        "{}, {:02} de {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month())
    ))
}

/// `20/10/2026 (terça-feira)`
pub fn format_short(date: NaiveDate) -> String {
    format!(
        "{} ({})",
        date.format("%d/%m/%Y"),
        weekday_name(date.weekday())
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
