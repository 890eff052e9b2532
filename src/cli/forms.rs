//! Guided prompts for entering or editing a single expense.
//!
//! The form walks date, amount, category, and notes in order, re-asking
//! on invalid input. Answers come through the [`FormInput`] seam so the
//! flow runs the same against a terminal or a scripted double.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::output;
use crate::cli::ui::test_mode::{self, TextTestInput};
use crate::expense::{parse_amount, Expense, ExpenseCategory};

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Values collected by the expense form. Identity and persistence stay
/// with the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFormData {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub notes: Option<String>,
}

/// Answer to a single text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEntry {
    Value(String),
    Cancelled,
}

/// Source of interactive answers. Production wraps dialoguer; tests swap
/// in a scripted double.
pub trait FormInput {
    fn text(&mut self, prompt: &str, initial: Option<&str>) -> TextEntry;
    fn choose(&mut self, prompt: &str, items: &[&str], default: usize) -> Option<usize>;
}

/// Terminal-backed prompts. Scripted queue answers take priority so
/// end-to-end runs can drive the form without a TTY.
pub struct PromptInput<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> PromptInput<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl FormInput for PromptInput<'_> {
    fn text(&mut self, prompt: &str, initial: Option<&str>) -> TextEntry {
        if let Some(scripted) = test_mode::next_text_input(prompt) {
            return match scripted {
                TextTestInput::Value(value) => TextEntry::Value(value),
                TextTestInput::Escape => TextEntry::Cancelled,
            };
        }
        let mut input = Input::<String>::with_theme(self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(initial) = initial {
            input = input.with_initial_text(initial);
        }
        match input.interact_text() {
            Ok(value) => TextEntry::Value(value),
            Err(_) => TextEntry::Cancelled,
        }
    }

    fn choose(&mut self, prompt: &str, items: &[&str], default: usize) -> Option<usize> {
        if let Some(choice) = test_mode::next_select(prompt) {
            return (choice < items.len()).then_some(choice);
        }
        Select::with_theme(self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()
            .ok()
            .flatten()
    }
}

/// Runs the expense prompts. `initial` pre-fills every field for edits;
/// blank answers fall back to the pre-filled date and amount.
pub fn run_expense_form(
    input: &mut dyn FormInput,
    today: NaiveDate,
    initial: Option<&Expense>,
) -> FormResult<ExpenseFormData> {
    let default_date = initial.map(|e| e.date).unwrap_or(today).to_string();
    let date = loop {
        let raw = match input.text("Date (YYYY-MM-DD)", Some(&default_date)) {
            TextEntry::Cancelled => return FormResult::Cancelled,
            TextEntry::Value(value) => value,
        };
        let candidate = if raw.trim().is_empty() {
            default_date.clone()
        } else {
            raw
        };
        match validate_date_input(&candidate, today) {
            Ok(date) => break date,
            Err(message) => output::warning(message),
        }
    };

    let default_amount = initial.map(|e| e.display_amount());
    let amount = loop {
        let raw = match input.text("Amount", default_amount.as_deref()) {
            TextEntry::Cancelled => return FormResult::Cancelled,
            TextEntry::Value(value) => value,
        };
        let candidate = if raw.trim().is_empty() {
            default_amount.clone().unwrap_or(raw)
        } else {
            raw
        };
        match validate_amount_input(&candidate) {
            Ok(amount) => break amount,
            Err(message) => output::warning(message),
        }
    };

    let labels: Vec<&str> = ExpenseCategory::ALL
        .iter()
        .map(|category| category.label())
        .collect();
    let default_index = initial
        .and_then(|e| {
            ExpenseCategory::ALL
                .iter()
                .position(|category| *category == e.category)
        })
        .unwrap_or(0);
    let category = match input.choose("Category", &labels, default_index) {
        Some(index) => ExpenseCategory::ALL[index],
        None => return FormResult::Cancelled,
    };

    let default_notes = initial.and_then(|e| e.notes.clone());
    let notes = match input.text("Notes (optional)", default_notes.as_deref()) {
        TextEntry::Cancelled => return FormResult::Cancelled,
        TextEntry::Value(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    };

    FormResult::Completed(ExpenseFormData {
        date,
        amount,
        category,
        notes,
    })
}

/// Parses a form date, enforcing the no-future rule.
pub(crate) fn validate_date_input(input: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| "Use YYYY-MM-DD format".to_string())?;
    if date > today {
        return Err(format!(
            "Date cannot be after {}",
            today.format("%Y-%m-%d")
        ));
    }
    Ok(date)
}

pub(crate) fn validate_amount_input(input: &str) -> Result<f64, String> {
    parse_amount(input).map_err(|err| err.to_string())
}
