//! Expense domain model: the record itself, the closed category set, and the
//! book that owns the in-memory list.

pub mod book;
pub mod category;
pub mod record;
pub mod sample;

pub use book::ExpenseBook;
pub use category::ExpenseCategory;
pub use record::{parse_amount, validate_amount, Expense};
