use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::{Expense, ExpenseCategory};

/// Starter dataset used when nothing has been saved yet or storage is
/// unusable. Dates are laid out relative to `today` so the weekly views have
/// something to show on first launch.
pub fn dataset(today: NaiveDate) -> Vec<Expense> {
    let rows: [(i64, f64, ExpenseCategory, &str); 10] = [
        (0, 12.50, ExpenseCategory::Food, "Lunch at cafe"),
        (0, 5.75, ExpenseCategory::Transport, "Bus fare"),
        (1, 32.99, ExpenseCategory::Shopping, "New t-shirt"),
        (2, 8.25, ExpenseCategory::Food, "Coffee and pastry"),
        (2, 15.00, ExpenseCategory::Entertainment, "Movie ticket"),
        (3, 45.50, ExpenseCategory::Bills, "Internet bill"),
        (4, 22.75, ExpenseCategory::Food, "Dinner with friends"),
        (5, 9.99, ExpenseCategory::Entertainment, "Music subscription"),
        (6, 7.50, ExpenseCategory::Transport, "Taxi ride"),
        (6, 18.25, ExpenseCategory::Shopping, "Household items"),
    ];

    rows.into_iter()
        .map(|(days_ago, amount, category, note)| Expense {
            id: Uuid::new_v4(),
            date: today - Duration::days(days_ago),
            amount,
            category,
            notes: Some(note.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_spans_the_last_seven_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let expenses = dataset(today);
        assert_eq!(expenses.len(), 10);
        assert!(expenses.iter().all(|e| e.date <= today));
        assert!(expenses
            .iter()
            .all(|e| e.date >= today - Duration::days(6)));
        assert!(expenses.iter().all(|e| e.amount > 0.0));
    }

    #[test]
    fn dataset_ids_are_unique() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let expenses = dataset(today);
        for (idx, expense) in expenses.iter().enumerate() {
            assert!(expenses[idx + 1..].iter().all(|other| other.id != expense.id));
        }
    }
}
