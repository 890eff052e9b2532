use std::collections::HashMap;

use chrono::NaiveDate;

use crate::expense::{Expense, ExpenseCategory};

use super::week::WeekWindow;

/// Total spent on one calendar day of the week window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Total spent in one category over the week window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
}

/// Weekly aggregation over an expense list. Pure derivation: sums are carried
/// at full precision and rounded only when displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub window: WeekWindow,
    pub day_totals: Vec<DayTotal>,
    pub category_totals: Vec<CategoryTotal>,
    pub total: f64,
}

impl WeeklySummary {
    /// Aggregates the Monday..Sunday week containing `today`. Days without
    /// expenses appear with a zero total; the day list is always 7 entries.
    pub fn for_week(expenses: &[Expense], today: NaiveDate) -> Self {
        let window = WeekWindow::containing(today);

        let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
        let mut by_category: HashMap<ExpenseCategory, f64> = HashMap::new();
        for expense in expenses {
            if !window.contains(expense.date) {
                continue;
            }
            *by_day.entry(expense.date).or_insert(0.0) += expense.amount;
            *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
        }

        let day_totals: Vec<DayTotal> = window
            .days()
            .map(|date| DayTotal {
                date,
                total: by_day.get(&date).copied().unwrap_or(0.0),
            })
            .collect();

        let category_totals: Vec<CategoryTotal> = ExpenseCategory::ALL
            .iter()
            .map(|&category| CategoryTotal {
                category,
                total: by_category.get(&category).copied().unwrap_or(0.0),
            })
            .collect();

        let total = day_totals.iter().map(|day| day.total).sum();

        Self {
            window,
            day_totals,
            category_totals,
            total,
        }
    }

    /// True when nothing was spent inside the window.
    pub fn is_empty(&self) -> bool {
        self.total == 0.0
    }

    /// Day with the maximum total. Ties keep the earliest day of the week.
    pub fn highest_day(&self) -> DayTotal {
        let mut best = self.day_totals[0];
        for day in &self.day_totals[1..] {
            if day.total > best.total {
                best = *day;
            }
        }
        best
    }

    /// Day with the smallest strictly positive total. A day with no spending
    /// only wins when every day is zero, in which case Monday at 0 is
    /// reported.
    pub fn lowest_day(&self) -> DayTotal {
        let mut best: Option<DayTotal> = None;
        for day in &self.day_totals {
            if day.total <= 0.0 {
                continue;
            }
            match best {
                Some(current) if day.total >= current.total => {}
                _ => best = Some(*day),
            }
        }
        best.unwrap_or(self.day_totals[0])
    }

    /// Category rows that actually saw spending, for breakdown-style views.
    pub fn spending_categories(&self) -> Vec<CategoryTotal> {
        self.category_totals
            .iter()
            .filter(|entry| entry.total > 0.0)
            .copied()
            .collect()
    }

    /// Percentage of the weekly total, 0 when the week is empty.
    pub fn share_of_total(&self, amount: f64) -> f64 {
        if self.total == 0.0 {
            0.0
        } else {
            amount / self.total * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::Expense;
    use chrono::Duration;

    // 2024-03-13 is a Wednesday; its week runs 03-11 (Mon)..03-17 (Sun).
    const YEAR: i32 = 2024;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(YEAR, 3, 13).unwrap()
    }

    fn expense(date: NaiveDate, amount: f64, category: ExpenseCategory) -> Expense {
        Expense::new(date, amount, category, None, date).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(YEAR, 3, 11).unwrap()
    }

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn empty_list_yields_all_zero_totals() {
        let summary = WeeklySummary::for_week(&[], today());
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.day_totals.len(), 7);
        assert!(summary.day_totals.iter().all(|day| day.total == 0.0));
        assert!(summary.category_totals.iter().all(|cat| cat.total == 0.0));
        assert_eq!(summary.highest_day().total, 0.0);
        assert_eq!(summary.lowest_day().total, 0.0);
        assert!(summary.is_empty());
    }

    #[test]
    fn day_and_category_decompositions_agree_with_the_total() {
        let expenses = vec![
            expense(monday(), 10.0, ExpenseCategory::Food),
            expense(monday() + Duration::days(1), 4.25, ExpenseCategory::Transport),
            expense(monday() + Duration::days(1), 6.0, ExpenseCategory::Food),
            expense(monday() + Duration::days(5), 19.99, ExpenseCategory::Bills),
        ];
        let summary = WeeklySummary::for_week(&expenses, today());

        let day_sum: f64 = summary.day_totals.iter().map(|day| day.total).sum();
        let category_sum: f64 = summary.category_totals.iter().map(|cat| cat.total).sum();
        assert!(approx(summary.total, 40.24));
        assert!(approx(day_sum, summary.total));
        assert!(approx(category_sum, summary.total));
    }

    #[test]
    fn expenses_outside_the_window_are_ignored() {
        let expenses = vec![
            expense(monday(), 10.0, ExpenseCategory::Food),
            expense(monday() - Duration::days(1), 99.0, ExpenseCategory::Food),
            expense(monday() - Duration::days(30), 50.0, ExpenseCategory::Bills),
        ];
        let summary = WeeklySummary::for_week(&expenses, today());
        assert!(approx(summary.total, 10.0));
    }

    #[test]
    fn highest_and_lowest_skip_zero_days() {
        // Mon=10, Tue=0, Wed=5: highest is Monday, lowest is Wednesday.
        let expenses = vec![
            expense(monday(), 10.0, ExpenseCategory::Food),
            expense(monday() + Duration::days(2), 5.0, ExpenseCategory::Transport),
        ];
        let summary = WeeklySummary::for_week(&expenses, today());
        assert_eq!(summary.highest_day().date, monday());
        assert_eq!(summary.highest_day().total, 10.0);
        assert_eq!(summary.lowest_day().date, monday() + Duration::days(2));
        assert_eq!(summary.lowest_day().total, 5.0);
    }

    #[test]
    fn ties_resolve_to_the_earliest_day() {
        let expenses = vec![
            expense(monday() + Duration::days(1), 7.0, ExpenseCategory::Food),
            expense(monday() + Duration::days(3), 7.0, ExpenseCategory::Food),
        ];
        let summary = WeeklySummary::for_week(&expenses, today());
        assert_eq!(summary.highest_day().date, monday() + Duration::days(1));
        assert_eq!(summary.lowest_day().date, monday() + Duration::days(1));
    }

    #[test]
    fn all_zero_week_falls_back_to_monday() {
        let summary = WeeklySummary::for_week(&[], today());
        assert_eq!(summary.lowest_day().date, monday());
        assert_eq!(summary.lowest_day().total, 0.0);
        assert_eq!(summary.highest_day().date, monday());
    }

    #[test]
    fn spending_categories_drop_zero_rows_but_day_summaries_keep_them() {
        let expenses = vec![
            expense(monday(), 10.0, ExpenseCategory::Food),
            expense(monday(), 3.0, ExpenseCategory::Bills),
        ];
        let summary = WeeklySummary::for_week(&expenses, today());
        let spending = summary.spending_categories();
        assert_eq!(spending.len(), 2);
        assert!(spending.iter().all(|entry| entry.total > 0.0));
        // The full category list still carries all six entries.
        assert_eq!(summary.category_totals.len(), 6);
        assert_eq!(summary.day_totals.len(), 7);
    }

    #[test]
    fn share_of_total_is_zero_for_an_empty_week() {
        let summary = WeeklySummary::for_week(&[], today());
        assert_eq!(summary.share_of_total(10.0), 0.0);

        let expenses = vec![expense(monday(), 50.0, ExpenseCategory::Food)];
        let summary = WeeklySummary::for_week(&expenses, today());
        assert!(approx(summary.share_of_total(25.0), 50.0));
    }
}
