use std::fs;
use std::path::Path;

use crate::cli::core::{today, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::expense::sample;
use crate::export::{export_filename, write_csv};
use crate::storage::CURRENT_SCHEMA_VERSION;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write all expenses to a dated CSV file",
            "export [directory]",
            cmd_export,
        ),
        CommandEntry::new(
            "clear",
            "Delete every stored expense",
            "clear",
            cmd_clear,
        ),
        CommandEntry::new(
            "sample",
            "Replace the current data with the sample dataset",
            "sample",
            cmd_sample,
        ),
        CommandEntry::new(
            "storage",
            "Show where data is stored and when it was last saved",
            "storage",
            cmd_storage,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: export [directory]".into(),
        ));
    }
    if context.book.is_empty() {
        output::warning("No expenses to export.");
        return Ok(());
    }
    let directory = Path::new(args.first().copied().unwrap_or("."));
    let csv = write_csv(context.book.expenses())?;
    let path = directory.join(export_filename(&context.config.export_base, today()));
    fs::write(&path, csv)?;
    output::success(format!(
        "Exported {} expenses to {}.",
        context.book.len(),
        path.display()
    ));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: clear".into()));
    }
    if context.book.is_empty() {
        output::info("Nothing to clear.");
        return Ok(());
    }
    let prompt = format!(
        "Delete all {} expenses? This cannot be undone.",
        context.book.len()
    );
    if !context.confirm(&prompt, false)? {
        output::info("Clear cancelled.");
        return Ok(());
    }
    if context.store_available && !context.store.clear() {
        context.store_available = false;
        output::warning("Stored data could not be removed; it will reappear next session.");
    }
    context.book.clear();
    context.last_saved = None;
    output::success("All expenses deleted.");
    Ok(())
}

fn cmd_sample(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: sample".into()));
    }
    if !context.book.is_empty() {
        let prompt = format!(
            "Replace {} expenses with the sample dataset?",
            context.book.len()
        );
        if !context.confirm(&prompt, false)? {
            output::info("Sample load cancelled.");
            return Ok(());
        }
    }
    context.book.replace_all(sample::dataset(today()));
    context.persist_book();
    output::success(format!("Loaded {} sample expenses.", context.book.len()));
    Ok(())
}

fn cmd_storage(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: storage".into()));
    }
    output::section("Storage");
    output::info(format!("  Location: {}", context.store.describe()));
    let available = context.store.is_available();
    context.store_available = available;
    output::info(format!(
        "  Available: {}",
        if available { "yes" } else { "no" }
    ));
    output::info(format!("  Expenses: {}", context.book.len()));
    match context.last_saved {
        Some(stamp) => output::info(format!(
            "  Last saved: {}",
            stamp.format("%Y-%m-%d %H:%M:%S")
        )),
        None => output::info("  Last saved: never this session"),
    }
    output::info(format!("  Schema: v{}", CURRENT_SCHEMA_VERSION));
    Ok(())
}
