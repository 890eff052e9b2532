//! File-backed store. Expenses live in a single pretty-printed JSON document
//! wrapped in a schema-versioned envelope; earlier releases persisted a bare
//! array of records with string ids and string-or-number amounts, which load
//! still accepts and upgrades in place on the next save.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::expense::{record::normalize_notes, validate_amount, Expense, ExpenseCategory};

use super::StorageBackend;

const TMP_SUFFIX: &str = "tmp";
const PROBE_FILE: &str = "__storage_probe__";

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("stored data is from a newer schema version ({found})")]
    UnsupportedSchema { found: u32 },
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    #[serde(default = "unversioned_schema")]
    schema_version: u32,
    #[serde(default)]
    expenses: Vec<Expense>,
}

// Documents written before the envelope carry no version label.
fn unversioned_schema() -> u32 {
    1
}

/// Record shape persisted by the pre-envelope releases. Ids were arbitrary
/// strings and amounts were stored as either a number or its decimal string.
#[derive(Debug, Deserialize)]
struct LegacyRecord {
    #[serde(default)]
    id: Option<String>,
    date: String,
    amount: serde_json::Value,
    category: String,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_save(&self, expenses: &[Expense]) -> Result<(), StoreError> {
        let document = StoredDocument {
            schema_version: CURRENT_SCHEMA_VERSION,
            expenses: expenses.to_vec(),
        };
        let json = serde_json::to_string_pretty(&document)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn try_load(&self) -> Result<Option<Vec<Expense>>, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str::<StoredDocument>(&data) {
            Ok(document) => {
                if document.schema_version > CURRENT_SCHEMA_VERSION {
                    return Err(StoreError::UnsupportedSchema {
                        found: document.schema_version,
                    });
                }
                Ok(Some(document.expenses))
            }
            Err(envelope_err) => match serde_json::from_str::<Vec<LegacyRecord>>(&data) {
                Ok(records) => Ok(Some(salvage_legacy(records))),
                Err(_) => Err(envelope_err.into()),
            },
        }
    }

    fn try_clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl StorageBackend for JsonFileStore {
    fn save(&self, expenses: &[Expense]) -> bool {
        match self.try_save(expenses) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("failed to save expenses to {}: {}", self.path.display(), err);
                false
            }
        }
    }

    fn load(&self) -> Option<Vec<Expense>> {
        match self.try_load() {
            Ok(expenses) => expenses,
            Err(err) => {
                tracing::warn!(
                    "failed to load expenses from {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    fn clear(&self) -> bool {
        match self.try_clear() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("failed to clear {}: {}", self.path.display(), err);
                false
            }
        }
    }

    fn is_available(&self) -> bool {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if fs::create_dir_all(&dir).is_err() {
            return false;
        }
        let probe = dir.join(PROBE_FILE);
        if fs::write(&probe, b"probe").is_err() {
            return false;
        }
        fs::remove_file(&probe).is_ok()
    }

    fn describe(&self) -> String {
        format!("JSON file at {}", self.path.display())
    }
}

fn salvage_legacy(records: Vec<LegacyRecord>) -> Vec<Expense> {
    let mut expenses = Vec::with_capacity(records.len());
    for record in records {
        let date = match chrono::NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                tracing::warn!("skipping stored expense with unreadable date `{}`", record.date);
                continue;
            }
        };
        let amount = match legacy_amount(&record.amount) {
            Some(amount) if validate_amount(amount).is_ok() => amount,
            _ => {
                tracing::warn!("skipping stored expense dated {} with unreadable amount", date);
                continue;
            }
        };
        let category = match record.category.parse::<ExpenseCategory>() {
            Ok(category) => category,
            Err(_) => {
                tracing::warn!(
                    "skipping stored expense dated {} with unknown category `{}`",
                    date,
                    record.category
                );
                continue;
            }
        };
        let id = record
            .id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .unwrap_or_else(Uuid::new_v4);
        expenses.push(Expense {
            id,
            date,
            amount,
            category,
            notes: normalize_notes(record.notes),
        });
    }
    expenses
}

fn legacy_amount(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
