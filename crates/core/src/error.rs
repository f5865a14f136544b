//! Error types for Shelfkeeper
//!
//! Errors here signal misuse of the catalog or ledger API (bad quantities,
//! incomplete books, ISBN clashes, missing targets). Routine inventory
//! results such as "not enough copies" are not errors; the library crate
//! reports them as outcome values instead.
//!
//! Every error is scoped to the single call that raised it. Nothing is
//! retried internally and nothing is fatal to the process.

use crate::types::{Book, BookField};
use thiserror::Error;

/// Main error type for Shelfkeeper
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // ===== Argument Errors =====
    /// Invalid argument provided (e.g. a non-positive quantity)
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// A book field is absent or has the wrong shape
    #[error("Invalid field: {field} - {reason}")]
    InvalidField { field: BookField, reason: String },

    // ===== Identity Errors =====
    /// The ISBN is already bound to a different book
    #[error("ISBN conflict: {isbn}\nExisting: {existing}\nNew: {incoming}")]
    IsbnConflict {
        isbn: String,
        existing: Box<Book>,
        incoming: Box<Book>,
    },

    /// An update tried to change a book's ISBN
    #[error("Cannot change ISBN from '{old_isbn}' to '{new_isbn}'. Use delete/add instead")]
    IsbnMismatch { old_isbn: String, new_isbn: String },

    // ===== Lookup Errors =====
    /// Lookup target absent
    #[error("Not found: {entity} with {identifier}")]
    NotFound { entity: String, identifier: String },

    /// Positional access past the end of a collection
    #[error("Index {index} out of range for collection of {len} entries")]
    OutOfRange { index: usize, len: usize },

    /// Positional access on an empty collection
    #[error("Collection {collection} is empty")]
    EmptyCollection { collection: String },

    // ===== Concurrency Errors =====
    /// A shared lock was poisoned by a panicking holder
    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: String },
}

impl AppError {
    /// Returns true if the error stems from how the API was called rather
    /// than from the environment
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::LockPoisoned { .. })
    }

    /// Returns a user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument { argument, .. } => {
                format!("The value given for '{}' is not acceptable.", argument)
            }
            Self::InvalidField { field, .. } => {
                format!("The book's {} is missing or malformed.", field)
            }
            Self::IsbnConflict { isbn, .. } => {
                format!("Another book is already registered under ISBN {}.", isbn)
            }
            Self::IsbnMismatch { .. } => {
                "A book's ISBN cannot be edited. Remove it and add it again instead.".to_string()
            }
            Self::NotFound { entity, .. } => format!("The requested {} was not found.", entity),
            Self::OutOfRange { .. } => "There is no book at that position.".to_string(),
            Self::EmptyCollection { .. } => "The collection has no books yet.".to_string(),
            Self::LockPoisoned { .. } => {
                "The library is unavailable after an internal failure.".to_string()
            }
        }
    }

    /// Helper for the non-positive quantity case shared by every mutation
    pub fn non_positive_quantity(quantity: i64) -> Self {
        Self::InvalidArgument {
            argument: "quantity".to_string(),
            reason: format!("Count must be positive, got {}", quantity),
        }
    }

    /// Helper for a stock total that would not fit in a `u64`
    pub fn quantity_overflow(current: u64, added: u64) -> Self {
        Self::InvalidArgument {
            argument: "quantity".to_string(),
            reason: format!("Adding {} to {} copies overflows the stock count", added, current),
        }
    }

    /// Helper to build a not-found error
    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    /// Helper to build an ISBN conflict naming both books
    pub fn isbn_conflict(existing: &Book, incoming: &Book) -> Self {
        Self::IsbnConflict {
            isbn: incoming.isbn().unwrap_or_default().to_string(),
            existing: Box::new(existing.clone()),
            incoming: Box::new(incoming.clone()),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
