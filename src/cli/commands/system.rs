use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::config;
use crate::storage::CURRENT_SCHEMA_VERSION;

const CONFIG_USAGE: &str = "usage: config [show|set <export_base|plain_output> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "config",
            "View or change saved preferences",
            "config [show|set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new(
            "version",
            "Show version and storage metadata",
            "version",
            cmd_version,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.command(&command) {
            help::print_command(entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        output::section("Preferences");
        output::info(format!("  export_base : {}", context.config.export_base));
        output::info(format!(
            "  plain_output: {}",
            if context.config.plain_output {
                "on"
            } else {
                "off"
            }
        ));
        output::info(format!(
            "  File: {}",
            context.config_manager.path().display()
        ));
        return Ok(());
    }
    match args {
        [set, key, value] if set.eq_ignore_ascii_case("set") => {
            set_preference(context, key, value)
        }
        _ => Err(CommandError::InvalidArguments(CONFIG_USAGE.into())),
    }
}

fn set_preference(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    match key.to_lowercase().as_str() {
        "export_base" => {
            let base = value.trim();
            if base.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "export_base cannot be empty".into(),
                ));
            }
            context.config.export_base = base.to_string();
        }
        "plain_output" => {
            let enabled = match value.to_lowercase().as_str() {
                "on" | "true" | "yes" | "1" => true,
                "off" | "false" | "no" | "0" => false,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "plain_output must be on or off, not `{}`",
                        other
                    )))
                }
            };
            context.config.plain_output = enabled;
            output::set_preferences(OutputPreferences {
                plain_mode: enabled || context.mode == CliMode::Script,
            });
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown preference `{}` (expected export_base or plain_output)",
                other
            )))
        }
    }
    context.config_manager.save(&context.config)?;
    output::success("Preferences updated.");
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section(format!("Expense Core {}", env!("CARGO_PKG_VERSION")));
    output::info(format!("  Schema  : v{}", CURRENT_SCHEMA_VERSION));
    output::info(format!("  Data dir: {}", config::data_dir().display()));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
