//! Shared console output helpers.
//!
//! All shell text funnels through [`print`] so plain mode can swap the
//! decorated variants for screen-reader friendly labels in one place.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use colored::Colorize;

/// Global toggles that shape every printed message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    /// Disables icons, colors, and non-ASCII rule characters.
    pub plain_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

fn preferences_cell() -> &'static RwLock<OutputPreferences> {
    PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()))
}

pub fn set_preferences(preferences: OutputPreferences) {
    if let Ok(mut slot) = preferences_cell().write() {
        *slot = preferences;
    }
}

pub fn current_preferences() -> OutputPreferences {
    preferences_cell()
        .read()
        .map(|slot| *slot)
        .unwrap_or_default()
}

/// Message categories the shell emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

pub fn print(kind: MessageKind, message: impl Display) {
    let formatted = format_message(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

/// Renders a message the way [`print`] would, without printing it.
pub fn format_message(kind: MessageKind, message: impl Display) -> String {
    let preferences = current_preferences();
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => decorate("✔", "OK:", &text, |s| s.green(), preferences),
        MessageKind::Warning => decorate("⚠", "WARNING:", &text, |s| s.yellow(), preferences),
        MessageKind::Error => decorate("✖", "ERROR:", &text, |s| s.red(), preferences),
        MessageKind::Hint => {
            if preferences.plain_mode {
                text
            } else {
                text.dimmed().to_string()
            }
        }
        MessageKind::Section => {
            let header = format!("=== {} ===", text.trim());
            if preferences.plain_mode {
                header
            } else {
                header.bold().to_string()
            }
        }
    }
}

fn decorate(
    icon: &str,
    plain_label: &str,
    text: &str,
    paint: impl Fn(&str) -> colored::ColoredString,
    preferences: OutputPreferences,
) -> String {
    if preferences.plain_mode {
        format!("{} {}", plain_label, text)
    } else {
        format!("{} {}", paint(icon), text)
    }
}

pub fn info(message: impl Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl Display) {
    print(MessageKind::Hint, message);
}

pub fn section(message: impl Display) {
    print(MessageKind::Section, message);
}

pub fn blank_line() {
    println!();
}
