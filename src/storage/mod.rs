//! Persistence for the expense list. Backends never raise: saves and clears
//! report success as a boolean, loads return `None` when nothing usable is
//! stored, and `is_available` probes the medium without side effects beyond
//! a throwaway write.

pub mod json_store;

use std::sync::Mutex;

use crate::expense::Expense;

pub use json_store::{JsonFileStore, StoreError, CURRENT_SCHEMA_VERSION};

/// Abstraction over the key-value style stores the tracker can persist to.
pub trait StorageBackend: Send + Sync {
    /// Persists the full list, replacing any prior value.
    fn save(&self, expenses: &[Expense]) -> bool;

    /// The previously saved list, or `None` when nothing usable is stored.
    fn load(&self) -> Option<Vec<Expense>>;

    /// Removes the persisted value.
    fn clear(&self) -> bool;

    /// Best-effort write-then-delete probe of the underlying medium.
    fn is_available(&self) -> bool;

    /// Human-readable location for status output.
    fn describe(&self) -> String;
}

/// Single-slot in-memory backend. Serves tests and the degraded session the
/// shell falls back to when the file store is unusable.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Vec<Expense>>>,
    unavailable: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the probe result, simulating a disabled store.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut flag) = self.unavailable.lock() {
            *flag = unavailable;
        }
    }
}

impl StorageBackend for MemoryStore {
    fn save(&self, expenses: &[Expense]) -> bool {
        if !self.is_available() {
            return false;
        }
        match self.slot.lock() {
            Ok(mut slot) => {
                *slot = Some(expenses.to_vec());
                true
            }
            Err(_) => false,
        }
    }

    fn load(&self) -> Option<Vec<Expense>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn clear(&self) -> bool {
        match self.slot.lock() {
            Ok(mut slot) => {
                *slot = None;
                true
            }
            Err(_) => false,
        }
    }

    fn is_available(&self) -> bool {
        self.unavailable.lock().map(|flag| !*flag).unwrap_or(false)
    }

    fn describe(&self) -> String {
        "in-memory (this session only)".into()
    }
}
