use crate::cli::core::{today, CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, current_preferences};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::chart;
use crate::report::{trend_series, WeeklySummary, TREND_DAYS};

const CHART_USAGE: &str = "usage: chart [daily|category|trend]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show totals and highlights for the current week",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "chart",
            "Draw a spending bar chart",
            "chart [daily|category|trend]",
            cmd_chart,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: summary".into()));
    }
    let summary = WeeklySummary::for_week(context.book.expenses(), today());
    output::section(format!("Week of {}", summary.window.label()));
    if summary.is_empty() {
        output::info("No expenses recorded for this week.");
        return Ok(());
    }

    let plain = current_preferences().plain_mode;
    output::info(format!("Total spent: {:.2}", summary.total));
    output::blank_line();
    print_lines(chart::render_daily(&summary, plain));
    output::blank_line();

    let highest = summary.highest_day();
    let lowest = summary.lowest_day();
    output::info(format!(
        "Highest: {} ({:.2})",
        highest.date.format("%A"),
        highest.total
    ));
    output::info(format!(
        "Lowest: {} ({:.2})",
        lowest.date.format("%A"),
        lowest.total
    ));
    output::blank_line();

    output::info("By category:");
    print_lines(chart::render_category(&summary, plain));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments(CHART_USAGE.into()));
    }
    let kind = args.first().map(|raw| raw.to_lowercase());
    match kind.as_deref().unwrap_or("daily") {
        "daily" => chart_daily(context),
        "category" => chart_category(context),
        "trend" => chart_trend(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown chart `{}` (use daily, category, or trend)",
            other
        ))),
    }
}

fn chart_daily(context: &ShellContext) -> CommandResult {
    let summary = WeeklySummary::for_week(context.book.expenses(), today());
    output::section("Daily Spending");
    if summary.is_empty() {
        output::info("No expenses recorded for this week.");
        return Ok(());
    }
    print_lines(chart::render_daily(&summary, current_preferences().plain_mode));
    Ok(())
}

fn chart_category(context: &ShellContext) -> CommandResult {
    let summary = WeeklySummary::for_week(context.book.expenses(), today());
    output::section("Spending by Category");
    if summary.is_empty() {
        output::info("No expenses recorded for this week.");
        return Ok(());
    }
    print_lines(chart::render_category(
        &summary,
        current_preferences().plain_mode,
    ));
    Ok(())
}

fn chart_trend(context: &ShellContext) -> CommandResult {
    let series = trend_series(context.book.expenses(), today());
    output::section(format!("Spending Trend ({} days)", TREND_DAYS));
    if series.iter().all(|point| point.total == 0.0) {
        output::info("No expenses recorded in the trend window.");
        return Ok(());
    }
    print_lines(chart::render_trend(&series, current_preferences().plain_mode));
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        output::info(line);
    }
}
