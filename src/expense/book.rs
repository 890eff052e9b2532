use uuid::Uuid;

use crate::errors::ExpenseError;

use super::record::{normalize_notes, validate_amount, Expense};

/// Owns the in-memory expense list. Insertion order is preserved; display
/// order is always re-derived from dates instead.
#[derive(Debug, Clone, Default)]
pub struct ExpenseBook {
    expenses: Vec<Expense>,
}

impl ExpenseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn add(&mut self, expense: Expense) -> Result<Uuid, ExpenseError> {
        if self.expenses.iter().any(|entry| entry.id == expense.id) {
            return Err(ExpenseError::DuplicateId(expense.id));
        }
        let id = expense.id;
        self.expenses.push(expense);
        Ok(id)
    }

    /// Replaces every field except the id, which survives the edit.
    pub fn edit(&mut self, id: Uuid, mut changes: Expense) -> Result<(), ExpenseError> {
        let slot = self
            .expenses
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| ExpenseError::UnknownExpense(id.to_string()))?;
        changes.id = id;
        changes.amount = validate_amount(changes.amount)?;
        changes.notes = normalize_notes(changes.notes);
        *slot = changes;
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Expense, ExpenseError> {
        let index = self
            .expenses
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| ExpenseError::UnknownExpense(id.to_string()))?;
        Ok(self.expenses.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|entry| entry.id == id)
    }

    /// Resolves a shell-entered id prefix to exactly one expense.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Expense, ExpenseError> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(ExpenseError::UnknownExpense(prefix.to_string()));
        }
        let mut matches = self
            .expenses
            .iter()
            .filter(|entry| entry.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (Some(_), Some(_)) => Err(ExpenseError::AmbiguousExpense(prefix.to_string())),
            (None, _) => Err(ExpenseError::UnknownExpense(prefix.to_string())),
        }
    }

    pub fn clear(&mut self) {
        self.expenses.clear();
    }

    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
    }

    /// Expenses newest-first; ties keep insertion order.
    pub fn by_date_desc(&self) -> Vec<&Expense> {
        let mut sorted: Vec<&Expense> = self.expenses.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Case-insensitive filter over category label, notes, and the amount's
    /// string forms, newest-first.
    pub fn search(&self, query: &str) -> Vec<&Expense> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.by_date_desc();
        }
        let mut found: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|entry| {
                entry.category.label().to_lowercase().contains(&needle)
                    || entry
                        .notes
                        .as_deref()
                        .is_some_and(|notes| notes.to_lowercase().contains(&needle))
                    || format!("{}", entry.amount).contains(&needle)
                    || entry.display_amount().contains(&needle)
            })
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        found
    }
}
