//! Shell context construction, dispatch, and error reporting.

use std::io;

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{self, Config, ConfigManager},
    errors::ExpenseError,
    expense::{sample, Expense, ExpenseBook},
    storage::{JsonFileStore, StorageBackend},
};

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
use super::ui::test_mode;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let store = JsonFileStore::new(config::expenses_file());
        Self::with_parts(mode, Box::new(store), ConfigManager::new())
    }

    pub(crate) fn with_parts(
        mode: CliMode,
        store: Box<dyn StorageBackend>,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "failed to load preferences from {}: {}",
                    config_manager.path().display(),
                    err
                );
                output::warning("Preferences could not be read; using defaults.");
                Config::default()
            }
        };
        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_output || mode == CliMode::Script,
        });

        let store_available = store.is_available();
        let (book, seeded) = match store.load() {
            Some(expenses) if !expenses.is_empty() => (ExpenseBook::from_expenses(expenses), false),
            _ => (ExpenseBook::from_expenses(sample::dataset(today())), true),
        };

        let mut context = ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            book,
            store,
            store_available,
            config_manager,
            config,
            last_saved: None,
            running: true,
        };
        if seeded && context.store_available {
            context.persist_book();
        }
        context.announce_startup(seeded);
        Ok(context)
    }

    fn announce_startup(&self, seeded: bool) {
        if !self.store_available {
            output::warning(
                "Storage is unavailable; changes will not persist beyond this session.",
            );
        }
        if self.mode != CliMode::Interactive {
            return;
        }
        output::section("Expense Tracker");
        output::info(format!("Storage: {}", self.store.describe()));
        if seeded {
            output::info(format!("Starting with {} sample expenses.", self.book.len()));
        } else {
            output::info(format!("Loaded {} saved expenses.", self.book.len()));
        }
        output::hint("Type `help` to see available commands.");
    }

    /// Saves the whole book. A failed save degrades the session to
    /// memory-only instead of failing the command that made the change.
    pub(crate) fn persist_book(&mut self) {
        if !self.store_available {
            return;
        }
        if self.store.save(self.book.expenses()) {
            self.last_saved = Some(Local::now());
        } else {
            self.store_available = false;
            output::warning("Saving failed; changes are kept for this session only.");
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// True when prompts may be shown: a real terminal session, or a
    /// scripted one with queued answers installed.
    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive || test_mode::is_enabled()
    }

    /// Yes/no question. Scripted answers from the test queues win over the
    /// terminal; script mode without a queued answer assumes yes.
    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if let Some(answer) = test_mode::next_confirm(prompt) {
            return Ok(answer);
        }
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            result => result.map(|()| LoopControl::Continue),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        crate::cli::shell::handle_line(self, line)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "`{}` is not a command. Type `help` for the full list.",
            input
        ));
        let closest = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, best)) = closest {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Run `help <command>` to see the expected arguments.");
            }
            other => output::error(other),
        }
        Ok(())
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

/// One-line rendering used by add/edit/delete confirmations.
pub(crate) fn expense_line(expense: &Expense) -> String {
    let mut line = format!(
        "{} {} {}",
        expense.date.format("%b %d, %Y"),
        expense.category.label(),
        expense.display_amount()
    );
    if let Some(notes) = &expense.notes {
        line.push_str(&format!(" ({})", notes));
    }
    line.push_str(&format!(" [{}]", expense.short_id()));
    line
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Domain(#[from] ExpenseError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn test_context() -> ShellContext {
    test_context_with(Box::new(crate::storage::MemoryStore::new()))
}

#[cfg(test)]
pub(crate) fn test_context_with(store: Box<dyn StorageBackend>) -> ShellContext {
    let manager =
        ConfigManager::at_path(std::env::temp_dir().join("expense-core-missing-config.json"));
    ShellContext::with_parts(CliMode::Script, store, manager).expect("test context")
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = test_context();
    for line in lines {
        match app.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}
