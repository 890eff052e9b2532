use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::expense::Expense;

/// One day of the rolling trend series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: f64,
}

pub const TREND_DAYS: usize = 14;

/// Daily totals over the 14 calendar days ending on `today`, oldest first.
/// Unlike the weekly summary this scans the whole list, not just the current
/// week window.
pub fn trend_series(expenses: &[Expense], today: NaiveDate) -> Vec<TrendPoint> {
    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for expense in expenses {
        *by_day.entry(expense.date).or_insert(0.0) += expense.amount;
    }

    (0..TREND_DAYS as i64)
        .map(|offset| {
            let date = today - Duration::days(TREND_DAYS as i64 - 1 - offset);
            TrendPoint {
                date,
                total: by_day.get(&date).copied().unwrap_or(0.0),
            }
        })
        .collect()
}
