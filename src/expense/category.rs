use std::{fmt, str::FromStr};

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::errors::ExpenseError;

/// Closed set of spending categories. Every expense carries exactly one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Bills,
    Other,
}

impl ExpenseCategory {
    /// All categories in their fixed display order.
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Bills,
        ExpenseCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Bills => "Bills",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Terminal accent color used by chart legends and category bars.
    pub fn color(&self) -> Color {
        match self {
            ExpenseCategory::Food => Color::Green,
            ExpenseCategory::Transport => Color::Blue,
            ExpenseCategory::Entertainment => Color::Magenta,
            ExpenseCategory::Shopping => Color::Yellow,
            ExpenseCategory::Bills => Color::Red,
            ExpenseCategory::Other => Color::White,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ExpenseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim();
        ExpenseCategory::ALL
            .iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
            .copied()
            .ok_or_else(|| ExpenseError::UnknownCategory(needle.to_string()))
    }
}
