//! Command lookup table for the shell.

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Static description of a single shell command.
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Registered commands in registration order. Lookups are by exact name;
/// re-registering a name replaces the earlier entry in place.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find(|existing| existing.name == entry.name)
        {
            *slot = entry;
        } else {
            self.entries.push(entry);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("add", "Add", "add", noop));
        registry.register(CommandEntry::new("list", "List", "list", noop));
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["add", "list"]);
    }

    #[test]
    fn re_registering_replaces_without_duplicating() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("add", "Add", "add", noop));
        registry.register(CommandEntry::new("add", "Add again", "add", noop));
        assert_eq!(registry.names().count(), 1);
        assert_eq!(registry.get("add").unwrap().description, "Add again");
    }

    #[test]
    fn unknown_names_return_none() {
        let registry = CommandRegistry::new();
        assert!(registry.get("nope").is_none());
        assert!(registry.handler("nope").is_none());
    }
}
