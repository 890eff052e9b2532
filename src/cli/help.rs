use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    let width = registry
        .list()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);
    for entry in registry.list() {
        output::info(format!(
            "  {name:width$}  {}",
            entry.description,
            name = entry.name
        ));
    }
    output::hint("`help <command>` shows usage; Tab or `?` completes names.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("help: {}", entry.name));
    output::info(format!("  {}", entry.description));
    output::info(format!("  usage: {}", entry.usage));
}
