//! Scripted stand-ins for interactive prompts.
//!
//! End-to-end tests drive the form and confirmation prompts without a
//! terminal by seeding answer queues from environment variables:
//! `EXPENSE_CORE_TEST_INPUTS`, `EXPENSE_CORE_TEST_SELECTS`, and
//! `EXPENSE_CORE_TEST_CONFIRMS`, each a `|`-separated answer list.
//! In-process tests install answers directly through the `install_*`
//! helpers and reset them when done.

use once_cell::sync::Lazy;
use std::{collections::VecDeque, env, sync::Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Escape,
}

/// One queue per prompt family. A queue only answers once it has been
/// enabled, either by its environment variable or by an `install_*` call;
/// running dry after that is a test bug and panics with the prompt label.
struct AnswerQueue<T> {
    enabled: bool,
    answers: VecDeque<T>,
}

impl<T> AnswerQueue<T> {
    fn from_env(var: &str, parse: fn(&str) -> VecDeque<T>) -> Self {
        match env::var(var) {
            Ok(raw) => Self {
                enabled: true,
                answers: parse(&raw),
            },
            Err(_) => Self {
                enabled: false,
                answers: VecDeque::new(),
            },
        }
    }

    fn next(&mut self, kind: &str, label: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let answer = self
            .answers
            .pop_front()
            .unwrap_or_else(|| panic!("{kind} answers exhausted before prompt `{label}`"));
        Some(answer)
    }

    fn install(&mut self, answers: Vec<T>) {
        self.enabled = true;
        self.answers = answers.into();
    }

    fn reset(&mut self) {
        self.enabled = false;
        self.answers.clear();
    }
}

static TEXT_INPUTS: Lazy<Mutex<AnswerQueue<TextTestInput>>> = Lazy::new(|| {
    Mutex::new(AnswerQueue::from_env(
        "EXPENSE_CORE_TEST_INPUTS",
        parse_text_sequences,
    ))
});

static SELECTS: Lazy<Mutex<AnswerQueue<usize>>> = Lazy::new(|| {
    Mutex::new(AnswerQueue::from_env(
        "EXPENSE_CORE_TEST_SELECTS",
        parse_select_sequences,
    ))
});

static CONFIRMS: Lazy<Mutex<AnswerQueue<bool>>> = Lazy::new(|| {
    Mutex::new(AnswerQueue::from_env(
        "EXPENSE_CORE_TEST_CONFIRMS",
        parse_confirm_sequences,
    ))
});

pub fn is_enabled() -> bool {
    let text = TEXT_INPUTS.lock().expect("text input queue poisoned");
    let selects = SELECTS.lock().expect("select queue poisoned");
    let confirms = CONFIRMS.lock().expect("confirm queue poisoned");
    text.enabled || selects.enabled || confirms.enabled
}

pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    TEXT_INPUTS
        .lock()
        .expect("text input queue poisoned")
        .next("Text", label)
}

pub fn next_select(label: &str) -> Option<usize> {
    SELECTS
        .lock()
        .expect("select queue poisoned")
        .next("Select", label)
}

pub fn next_confirm(label: &str) -> Option<bool> {
    CONFIRMS
        .lock()
        .expect("confirm queue poisoned")
        .next("Confirm", label)
}

pub fn install_text_inputs(inputs: Vec<TextTestInput>) {
    TEXT_INPUTS
        .lock()
        .expect("text input queue poisoned")
        .install(inputs);
}

pub fn reset_text_inputs() {
    TEXT_INPUTS
        .lock()
        .expect("text input queue poisoned")
        .reset();
}

pub fn install_selects(choices: Vec<usize>) {
    SELECTS
        .lock()
        .expect("select queue poisoned")
        .install(choices);
}

pub fn reset_selects() {
    SELECTS.lock().expect("select queue poisoned").reset();
}

pub fn install_confirms(answers: Vec<bool>) {
    CONFIRMS
        .lock()
        .expect("confirm queue poisoned")
        .install(answers);
}

pub fn reset_confirms() {
    CONFIRMS.lock().expect("confirm queue poisoned").reset();
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    split_tokens(raw)
        .map(|token| match token.to_ascii_uppercase().as_str() {
            "<ESC>" | "ESC" => TextTestInput::Escape,
            "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
            _ => TextTestInput::Value(token.to_string()),
        })
        .collect()
}

fn parse_select_sequences(raw: &str) -> VecDeque<usize> {
    split_tokens(raw)
        .filter_map(|token| token.parse::<usize>().ok())
        .collect()
}

fn parse_confirm_sequences(raw: &str) -> VecDeque<bool> {
    split_tokens(raw)
        .filter_map(|token| match token.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Some(true),
            "n" | "no" | "false" | "0" => Some(false),
            _ => None,
        })
        .collect()
}

fn split_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('|')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The queues are process-wide, so in-process tests that install or
/// consume confirmation answers must not overlap. Holding this lock for
/// the duration of the test keeps one test's answers out of another's
/// prompts.
#[cfg(test)]
pub(crate) fn confirm_test_lock() -> std::sync::MutexGuard<'static, ()> {
    static SERIAL: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Installs confirmation answers under [`confirm_test_lock`] and resets
/// the queue when dropped, even if the test fails midway.
#[cfg(test)]
pub(crate) struct QueuedConfirms {
    _serial: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl QueuedConfirms {
    pub(crate) fn with_answers(answers: Vec<bool>) -> Self {
        let serial = confirm_test_lock();
        install_confirms(answers);
        Self { _serial: serial }
    }
}

#[cfg(test)]
impl Drop for QueuedConfirms {
    fn drop(&mut self) {
        reset_confirms();
    }
}
