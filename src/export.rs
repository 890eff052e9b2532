//! CSV export. Builds the whole document in memory so callers decide where
//! it lands; rows come out newest first with amounts fixed to two decimals.

use chrono::NaiveDate;

use crate::errors::ExpenseError;
use crate::expense::Expense;

pub const DEFAULT_EXPORT_BASE: &str = "weekly-expenses";

const CSV_HEADER: [&str; 4] = ["Date", "Category", "Amount", "Notes"];

/// Renders the expense list as a CSV document, newest date first. Fields are
/// quoted only when they need to be, so plain rows stay plain.
pub fn write_csv(expenses: &[Expense]) -> Result<String, ExpenseError> {
    let mut ordered: Vec<&Expense> = expenses.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));

    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(CSV_HEADER)?;
    for expense in ordered {
        writer.write_record(&[
            expense.date.format("%Y-%m-%d").to_string(),
            expense.category.label().to_string(),
            expense.display_amount(),
            expense.notes.clone().unwrap_or_default(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExpenseError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// File name for an export taken on `today`, e.g. `weekly-expenses-2024-03-15.csv`.
pub fn export_filename(base: &str, today: NaiveDate) -> String {
    format!("{}-{}.csv", base, today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseCategory;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn expense(
        date: NaiveDate,
        amount: f64,
        category: ExpenseCategory,
        notes: Option<&str>,
    ) -> Expense {
        Expense::new(date, amount, category, notes.map(|n| n.to_string()), date).unwrap()
    }

    #[test]
    fn single_row_renders_exactly() {
        let rows = vec![expense(day(2024, 3, 1), 12.5, ExpenseCategory::Food, Some("lunch"))];
        let csv = write_csv(&rows).unwrap();
        assert_eq!(csv, "Date,Category,Amount,Notes\n2024-03-01,Food,12.50,lunch\n");
    }

    #[test]
    fn empty_list_renders_header_only() {
        let csv = write_csv(&[]).unwrap();
        assert_eq!(csv, "Date,Category,Amount,Notes\n");
    }

    #[test]
    fn rows_come_out_newest_first() {
        let rows = vec![
            expense(day(2024, 3, 1), 1.0, ExpenseCategory::Food, None),
            expense(day(2024, 3, 3), 2.0, ExpenseCategory::Bills, None),
            expense(day(2024, 3, 2), 3.0, ExpenseCategory::Other, None),
        ];
        let csv = write_csv(&rows).unwrap();
        let dates: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-03-03", "2024-03-02", "2024-03-01"]);
    }

    #[test]
    fn missing_notes_leave_the_field_empty() {
        let rows = vec![expense(day(2024, 3, 4), 5.75, ExpenseCategory::Transport, None)];
        let csv = write_csv(&rows).unwrap();
        assert!(csv.ends_with("2024-03-04,Transport,5.75,\n"));
    }

    #[test]
    fn notes_with_commas_are_quoted() {
        let rows = vec![expense(
            day(2024, 3, 5),
            9.99,
            ExpenseCategory::Entertainment,
            Some("popcorn, soda"),
        )];
        let csv = write_csv(&rows).unwrap();
        assert!(csv.contains("\"popcorn, soda\""));
    }

    #[test]
    fn filename_carries_base_and_date() {
        assert_eq!(
            export_filename(DEFAULT_EXPORT_BASE, day(2024, 3, 15)),
            "weekly-expenses-2024-03-15.csv"
        );
    }
}
