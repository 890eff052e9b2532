//! Line-reading front ends over the command dispatcher: a rustyline editor
//! with completion and ghost-text hints for interactive sessions, and a
//! plain stdin reader for script mode.

use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::{
    current_preferences, hint as output_hint, info as output_info, warning as output_warning,
};

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("EXPENSE_CORE_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ShellHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if let Err(err) = handle_line(context, line) {
                    context.report_error(err)?;
                }
            }
            Err(ReadlineError::Interrupted) => {
                output_hint("Interrupted. Type `exit` or press Ctrl-D to leave.");
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running {
            break;
        }
        if let Err(err) = handle_line(context, &line?) {
            context.report_error(err)?;
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output_warning(err.to_string());
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}

/// Readline helper: completes and hints the command word only. Arguments
/// are dates, amounts, and free-form notes, which have nothing to offer.
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    /// Start offset and text of the command word, or `None` once the
    /// cursor has moved past it.
    fn command_span(line: &str, pos: usize) -> Option<(usize, &str)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        let word = &prefix[start..];
        if word.contains(char::is_whitespace) {
            None
        } else {
            Some((start, word))
        }
    }

    fn matching<'a>(&'a self, word: &str) -> impl Iterator<Item = &'a String> {
        let needle = word.to_ascii_lowercase();
        self.commands
            .iter()
            .filter(move |name| name.starts_with(&needle))
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Some((start, word)) = Self::command_span(line, pos) else {
            return Ok((pos, Vec::new()));
        };
        let candidates = self
            .matching(word)
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    // Ghost-text with the rest of the command once the prefix is
    // unambiguous.
    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (_, word) = Self::command_span(line, pos)?;
        if word.is_empty() {
            return None;
        }
        let mut matches = self.matching(word);
        let only = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(only[word.len()..].to_string())
    }
}

impl Highlighter for ShellHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if current_preferences().plain_mode {
            Cow::Borrowed(hint)
        } else {
            Cow::Owned(format!("\u{1b}[2m{hint}\u{1b}[0m"))
        }
    }
}

impl Validator for ShellHelper {}
