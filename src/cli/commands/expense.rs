use colored::Colorize;

use crate::cli::core::{
    expense_line, parse_date, today, CliMode, CommandError, CommandResult, ShellContext,
};
use crate::cli::forms::{run_expense_form, ExpenseFormData, FormResult, PromptInput};
use crate::cli::output::{self, current_preferences};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Alignment, Table, TableColumn};
use crate::expense::{parse_amount, Expense, ExpenseCategory};

const ADD_USAGE: &str = "usage: add <YYYY-MM-DD> <amount> <category> [notes...]";
const EDIT_USAGE: &str = "usage: edit <id> [<YYYY-MM-DD> <amount> <category> [notes...]]";

pub(crate) const ITEMS_PER_PAGE: usize = 5;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add [<YYYY-MM-DD> <amount> <category> [notes...]]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Change an expense's date, amount, category, or notes",
            "edit <id> [<YYYY-MM-DD> <amount> <category> [notes...]]",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete",
            "Delete the expense matching an id prefix",
            "delete <id>",
            cmd_delete,
        ),
        CommandEntry::new(
            "list",
            "List expenses newest first, optionally filtered",
            "list [query...]",
            cmd_list,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let data = if args.is_empty() {
        if !context.can_prompt() {
            return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
        }
        let mut input = PromptInput::new(&context.theme);
        match run_expense_form(&mut input, today(), None) {
            FormResult::Completed(data) => data,
            FormResult::Cancelled => {
                output::info("Expense entry cancelled.");
                return Ok(());
            }
        }
    } else {
        if args.len() < 3 {
            return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
        }
        parse_expense_args(args)?
    };

    let expense = build_expense(data)?;
    let line = expense_line(&expense);
    context.book.add(expense)?;
    context.persist_book();
    output::success(format!("Expense added: {}", line));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.book.is_empty() {
        output::warning("No expenses recorded yet.");
        return Ok(());
    }
    let Some((prefix, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(EDIT_USAGE.into()));
    };
    let existing = context.book.find_by_prefix(prefix)?.clone();

    let data = if rest.is_empty() {
        if !context.can_prompt() {
            return Err(CommandError::InvalidArguments(EDIT_USAGE.into()));
        }
        let mut input = PromptInput::new(&context.theme);
        match run_expense_form(&mut input, today(), Some(&existing)) {
            FormResult::Completed(data) => data,
            FormResult::Cancelled => {
                output::info("Edit cancelled.");
                return Ok(());
            }
        }
    } else {
        if rest.len() < 3 {
            return Err(CommandError::InvalidArguments(EDIT_USAGE.into()));
        }
        parse_expense_args(rest)?
    };

    let changes = build_expense(data)?;
    context.book.edit(existing.id, changes)?;
    let line = expense_line(
        context
            .book
            .get(existing.id)
            .expect("expense just edited should exist"),
    );
    context.persist_book();
    output::success(format!("Expense updated: {}", line));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.book.is_empty() {
        output::warning("No expenses recorded yet.");
        return Ok(());
    }
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    }
    let target = context.book.find_by_prefix(args[0])?.clone();
    let prompt = format!("Delete {}?", expense_line(&target));
    if !context.confirm(&prompt, false)? {
        output::info("Delete cancelled.");
        return Ok(());
    }
    let removed = context.book.remove(target.id)?;
    context.persist_book();
    output::success(format!("Expense deleted: {}", expense_line(&removed)));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.book.is_empty() {
        output::warning("No expenses recorded yet.");
        return Ok(());
    }
    let query = args.join(" ");
    let rows = if query.trim().is_empty() {
        context.book.by_date_desc()
    } else {
        context.book.search(&query)
    };
    if rows.is_empty() {
        output::info("No expenses match your search.");
        return Ok(());
    }

    let plain = current_preferences().plain_mode;
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|expense| table_row(expense, plain))
        .collect();

    if context.mode == CliMode::Interactive {
        list_paged(context, &rendered)?;
    } else {
        print_table(&rendered);
        let noun = if rendered.len() == 1 {
            "expense"
        } else {
            "expenses"
        };
        output::info(format!("{} {}.", rendered.len(), noun));
    }
    Ok(())
}

/// Interactive listing shows five rows at a time and asks before continuing.
fn list_paged(context: &ShellContext, rows: &[Vec<String>]) -> CommandResult {
    let total = rows.len();
    for (index, range) in page_ranges(total, ITEMS_PER_PAGE).into_iter().enumerate() {
        if index > 0 && !context.confirm("Show more?", true)? {
            return Ok(());
        }
        print_table(&rows[range.clone()]);
        output::info(format!(
            "Showing {}-{} of {}",
            range.start + 1,
            range.end,
            total
        ));
    }
    Ok(())
}

fn print_table(rows: &[Vec<String>]) {
    let mut table = Table::new(list_columns());
    for row in rows {
        table.push_row(row.clone());
    }
    output::info(table.render());
}

fn list_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("Id", Alignment::Left),
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Category", Alignment::Left),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::capped("Notes", Alignment::Left, 28),
    ]
}

fn table_row(expense: &Expense, plain: bool) -> Vec<String> {
    let label = if plain {
        expense.category.label().to_string()
    } else {
        expense
            .category
            .label()
            .color(expense.category.color())
            .to_string()
    };
    vec![
        expense.short_id(),
        expense.date.format("%b %d, %Y").to_string(),
        label,
        expense.display_amount(),
        expense.notes.clone().unwrap_or_else(|| "-".into()),
    ]
}

fn parse_expense_args(args: &[&str]) -> Result<ExpenseFormData, CommandError> {
    let date = parse_date(args[0])?;
    let amount = parse_amount(args[1])?;
    let category = args[2].parse::<ExpenseCategory>()?;
    let notes = if args.len() > 3 {
        Some(args[3..].join(" "))
    } else {
        None
    };
    Ok(ExpenseFormData {
        date,
        amount,
        category,
        notes,
    })
}

fn build_expense(data: ExpenseFormData) -> Result<Expense, CommandError> {
    Ok(Expense::new(
        data.date,
        data.amount,
        data.category,
        data.notes,
        today(),
    )?)
}

pub(crate) fn page_ranges(total: usize, per_page: usize) -> Vec<std::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < total {
        let end = (start + per_page).min(total);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::test_context;
    use crate::cli::ui::test_mode::QueuedConfirms;

    #[test]
    fn page_ranges_cover_all_rows() {
        assert_eq!(page_ranges(12, 5), vec![0..5, 5..10, 10..12]);
        assert_eq!(page_ranges(5, 5), vec![0..5]);
        assert_eq!(page_ranges(0, 5), Vec::<std::ops::Range<usize>>::new());
    }

    #[test]
    fn add_requires_three_positional_arguments() {
        let mut app = test_context();
        let err = app.process_line("add 2024-03-01").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn add_rejects_unknown_categories() {
        let mut app = test_context();
        let err = app.process_line("add 2024-03-01 5.00 groceries").unwrap_err();
        assert!(err.to_string().contains("groceries"));
    }

    #[test]
    fn notes_join_remaining_arguments() {
        let mut app = test_context();
        app.process_line("add 2024-03-01 5.00 food coffee with milk")
            .unwrap();
        let added = app
            .book
            .expenses()
            .iter()
            .find(|e| e.notes.as_deref() == Some("coffee with milk"))
            .expect("expense recorded");
        assert_eq!(added.category, ExpenseCategory::Food);
    }

    #[test]
    fn edit_preserves_the_expense_id() {
        let mut app = test_context();
        app.process_line("add 2024-03-01 9.00 bills \"Power bill\"")
            .unwrap();
        let original = app
            .book
            .expenses()
            .iter()
            .find(|e| e.notes.as_deref() == Some("Power bill"))
            .unwrap()
            .clone();
        app.process_line(&format!(
            "edit {} 2024-03-01 11.00 bills \"Power bill\"",
            original.short_id()
        ))
        .unwrap();
        let edited = app.book.get(original.id).expect("id survives edits");
        assert_eq!(edited.amount, 11.0);
    }

    #[test]
    fn delete_requires_exactly_one_argument() {
        let mut app = test_context();
        let err = app.process_line("delete").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn delete_asks_before_removing_the_match() {
        let _answers = QueuedConfirms::with_answers(vec![false, true]);
        let mut app = test_context();
        app.process_line("add 2024-03-01 9.99 bills \"Water bill\"")
            .unwrap();
        let id = app
            .book
            .expenses()
            .iter()
            .find(|e| e.notes.as_deref() == Some("Water bill"))
            .unwrap()
            .short_id();

        // Declined: the expense stays.
        app.process_line(&format!("delete {}", id)).unwrap();
        assert_eq!(app.book.len(), 11);
        assert!(app.book.find_by_prefix(&id).is_ok());

        // Accepted: exactly one record goes away.
        app.process_line(&format!("delete {}", id)).unwrap();
        assert_eq!(app.book.len(), 10);
        assert!(app.book.find_by_prefix(&id).is_err());
    }
}
