#![doc(test(attr(deny(warnings))))]

//! Expense Core tracks day-to-day personal spending: a small domain model,
//! weekly aggregation and trend reporting, JSON persistence, and CSV export,
//! fronted by an interactive shell.

pub mod cli;
pub mod config;
pub mod errors;
pub mod expense;
pub mod export;
pub mod report;
pub mod storage;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("expense_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}
