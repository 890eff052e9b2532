//! Horizontal bar charts for the weekly and trend views.
//!
//! Renderers return plain lines so callers decide how to print them.
//! Bars scale against the largest value in the view; any nonzero total
//! keeps at least one cell so small spends stay visible.

use colored::Colorize;

use crate::report::{TrendPoint, WeeklySummary};

/// Widest bar, in character cells.
pub const CHART_WIDTH: usize = 24;

fn bar(amount: f64, max: f64, plain: bool) -> String {
    if amount <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let ratio = (amount / max).clamp(0.0, 1.0);
    let cells = ((ratio * CHART_WIDTH as f64).round() as usize).max(1);
    let cell = if plain { "#" } else { "█" };
    cell.repeat(cells)
}

/// One line per weekday, Monday first.
pub fn render_daily(summary: &WeeklySummary, plain: bool) -> Vec<String> {
    let max = summary.highest_day().total;
    summary
        .day_totals
        .iter()
        .map(|day| {
            format!(
                "{}  {:>8}  {}",
                day.date.format("%a"),
                format!("{:.2}", day.total),
                bar(day.total, max, plain)
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// One line per category that saw spending, in the fixed category order.
pub fn render_category(summary: &WeeklySummary, plain: bool) -> Vec<String> {
    let rows = summary.spending_categories();
    let max = rows
        .iter()
        .map(|row| row.total)
        .fold(0.0_f64, |acc, total| acc.max(total));

    rows.iter()
        .map(|row| {
            let label = format!("{:<13}", row.category.label());
            let label = if plain {
                label
            } else {
                label.color(row.category.color()).to_string()
            };
            let fill = bar(row.total, max, plain);
            // Pad before coloring so escape codes never skew the columns.
            let gap = " ".repeat(CHART_WIDTH.saturating_sub(fill.chars().count()));
            let fill = if plain {
                fill
            } else {
                fill.color(row.category.color()).to_string()
            };
            format!(
                "{}  {:>8}  {}{}  {:>3.0}%",
                label,
                format!("{:.2}", row.total),
                fill,
                gap,
                summary.share_of_total(row.total)
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// One line per day of the trend series, oldest first.
pub fn render_trend(series: &[TrendPoint], plain: bool) -> Vec<String> {
    let max = series
        .iter()
        .map(|point| point.total)
        .fold(0.0_f64, |acc, total| acc.max(total));

    series
        .iter()
        .map(|point| {
            format!(
                "{}  {:>8}  {}",
                point.date.format("%m-%d"),
                format!("{:.2}", point.total),
                bar(point.total, max, plain)
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::{Expense, ExpenseCategory};
    use crate::report::trend_series;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    }

    fn expense(date: NaiveDate, amount: f64, category: ExpenseCategory) -> Expense {
        Expense::new(date, amount, category, None, date).unwrap()
    }

    #[test]
    fn widest_value_fills_the_chart() {
        assert_eq!(bar(50.0, 50.0, true).chars().count(), CHART_WIDTH);
        assert_eq!(bar(25.0, 50.0, true).chars().count(), CHART_WIDTH / 2);
    }

    #[test]
    fn small_nonzero_values_keep_one_cell() {
        assert_eq!(bar(0.01, 1000.0, true), "#");
        assert!(bar(0.0, 1000.0, true).is_empty());
    }

    #[test]
    fn plain_mode_swaps_the_bar_character() {
        assert!(bar(10.0, 10.0, true).starts_with('#'));
        assert!(bar(10.0, 10.0, false).starts_with('█'));
    }

    #[test]
    fn daily_chart_covers_every_weekday() {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let summary = WeeklySummary::for_week(
            &[
                expense(monday, 40.0, ExpenseCategory::Food),
                expense(monday + Duration::days(2), 10.0, ExpenseCategory::Bills),
            ],
            today(),
        );
        let lines = render_daily(&summary, true);
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("Mon"));
        assert!(lines[6].starts_with("Sun"));
        // Monday carries the full-width bar, Wednesday a quarter of it.
        assert_eq!(lines[0].matches('#').count(), CHART_WIDTH);
        assert_eq!(lines[2].matches('#').count(), CHART_WIDTH / 4);
        assert!(!lines[1].contains('#'));
    }

    #[test]
    fn category_chart_reports_shares_of_the_total() {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let summary = WeeklySummary::for_week(
            &[
                expense(monday, 75.0, ExpenseCategory::Food),
                expense(monday, 25.0, ExpenseCategory::Transport),
            ],
            today(),
        );
        let lines = render_category(&summary, true);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[0].ends_with("75%"));
        assert!(lines[1].starts_with("Transport"));
        assert!(lines[1].ends_with("25%"));
    }

    #[test]
    fn category_chart_skips_empty_categories() {
        let summary = WeeklySummary::for_week(&[], today());
        assert!(render_category(&summary, true).is_empty());
    }

    #[test]
    fn trend_chart_runs_oldest_to_newest() {
        let expenses = vec![expense(today(), 12.0, ExpenseCategory::Food)];
        let series = trend_series(&expenses, today());
        let lines = render_trend(&series, true);
        assert_eq!(lines.len(), series.len());
        assert!(lines[0].starts_with("02-29"));
        assert!(lines[13].starts_with("03-13"));
        assert!(lines[13].contains('#'));
    }
}
