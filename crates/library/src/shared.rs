//! Thread-safe handle over a single [`LendingLedger`]
//!
//! One mutex guards the ledger together with its catalog and index, and
//! each call holds it for its whole duration. A borrow therefore checks the
//! shelf and takes the copies under the same lock.

use crate::catalog::Catalog;
use crate::ledger::LendingLedger;
use crate::outcome::{CatalogOutcome, LendingOutcome};
use shelfkeeper_core::{AppError, Book, LendingStats, LibraryReport, Result, UserId};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, shared library handle
#[derive(Debug, Clone)]
pub struct SharedLibrary {
    inner: Arc<Mutex<LendingLedger>>,
}

impl SharedLibrary {
    pub fn new(ledger: LendingLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LendingLedger>> {
        self.inner.lock().map_err(|_| AppError::LockPoisoned {
            resource: "library".to_string(),
        })
    }

    /// Runs `f` with exclusive access to the ledger
    pub fn with<T>(&self, f: impl FnOnce(&mut LendingLedger) -> T) -> Result<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    pub fn add_book(&self, book: &Book, quantity: i64) -> Result<CatalogOutcome> {
        self.lock()?.catalog_mut().add_book(book, quantity)
    }

    pub fn delete_book(&self, book: &Book, quantity: i64) -> Result<CatalogOutcome> {
        self.lock()?.catalog_mut().delete_book(book, quantity)
    }

    pub fn update_book(&self, old: &Book, new: Book) -> Result<CatalogOutcome> {
        self.lock()?.catalog_mut().update_book(old, new)
    }

    pub fn borrow(&self, book: &Book, user: UserId, quantity: i64) -> Result<LendingOutcome> {
        self.lock()?.borrow(book, user, quantity)
    }

    pub fn return_book(&self, book: &Book, user: UserId, quantity: i64) -> Result<LendingOutcome> {
        self.lock()?.return_book(book, user, quantity)
    }

    pub fn statistics(&self) -> Result<LendingStats> {
        Ok(self.lock()?.statistics())
    }

    pub fn generate_report(&self) -> Result<LibraryReport> {
        Ok(self.lock()?.generate_report())
    }

    /// Copy of the catalog as it stands right now
    pub fn catalog_snapshot(&self) -> Result<Catalog> {
        Ok(self.lock()?.catalog().clone())
    }
}

impl From<LendingLedger> for SharedLibrary {
    fn from(ledger: LendingLedger) -> Self {
        Self::new(ledger)
    }
}
