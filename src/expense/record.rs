use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ExpenseError;

use super::category::ExpenseCategory;

/// A single dated expenditure. The id is assigned at creation and never
/// changes afterwards; edits replace every other field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Expense {
    /// Builds a validated expense. `today` caps the entry date; the caller
    /// threads it in so tests can pin the clock.
    pub fn new(
        date: NaiveDate,
        amount: f64,
        category: ExpenseCategory,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<Self, ExpenseError> {
        if date > today {
            return Err(ExpenseError::Validation(format!(
                "Date cannot be after {}",
                today.format("%Y-%m-%d")
            )));
        }
        let amount = validate_amount(amount)?;
        Ok(Self {
            id: Uuid::new_v4(),
            date,
            amount,
            category,
            notes: normalize_notes(notes),
        })
    }

    /// Amount rendered the way every surface displays it.
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.amount)
    }

    /// First eight hex characters of the id, enough to address an expense
    /// from the shell.
    pub fn short_id(&self) -> String {
        let mut short = self.id.simple().to_string();
        short.truncate(8);
        short
    }
}

/// Rejects amounts that could poison downstream sums. Non-finite input never
/// reaches the aggregation engine.
pub fn validate_amount(amount: f64) -> Result<f64, ExpenseError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ExpenseError::Validation(
            "Please enter a valid amount greater than 0".into(),
        ));
    }
    Ok(amount)
}

/// Parses user-entered amount text into the single numeric representation
/// the data model carries.
pub fn parse_amount(input: &str) -> Result<f64, ExpenseError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| {
            ExpenseError::Validation("Please enter a valid amount greater than 0".into())
        })
        .and_then(validate_amount)
}

pub(crate) fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
