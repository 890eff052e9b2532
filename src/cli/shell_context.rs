use chrono::{DateTime, Local};
use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    expense::ExpenseBook,
    storage::StorageBackend,
};

use super::output::current_preferences;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Mutable state threaded through every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub book: ExpenseBook,
    pub store: Box<dyn StorageBackend>,
    pub store_available: bool,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_saved: Option<DateTime<Local>>,
    pub running: bool,
}

impl ShellContext {
    pub fn prompt(&self) -> String {
        let arrow = if current_preferences().plain_mode {
            ">"
        } else {
            "⮞"
        };
        format!("expenses {} ", arrow)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }
}
