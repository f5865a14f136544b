//! Ordered book catalog with quantity tracking
//!
//! The catalog is the single owner of the `(book, quantity)` entries and
//! of the [`MultiIndex`] built over them. Every mutation goes through this
//! type so the entries and the index are never observed out of sync.

use crate::index::{IndexKey, MultiIndex};
use crate::outcome::CatalogOutcome;
use log::{info, warn};
use serde::Serialize;
use shelfkeeper_core::{AppError, Book, Result, Validator};
use std::fmt;
use std::ops::Range;

/// One catalog line: a book and the number of copies on hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub book: Book,
    pub quantity: u64,
}

/// Converts a caller-supplied quantity, rejecting zero and negatives
pub(crate) fn positive_quantity(quantity: i64) -> Result<u64> {
    if quantity <= 0 {
        return Err(AppError::non_positive_quantity(quantity));
    }
    Ok(quantity.unsigned_abs())
}

/// Ordered collection of catalog entries plus their secondary indexes
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    name: Option<String>,
    entries: Vec<CatalogEntry>,
    index: MultiIndex,
}

impl Catalog {
    /// Creates an unnamed, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with a display name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Checks that every field of `book` is present.
    ///
    /// Reports the first offending field in the order title, author,
    /// genre, isbn, year.
    pub fn validate_book(book: &Book) -> Result<()> {
        match book.missing_fields().first() {
            None => Ok(()),
            Some(field) => {
                let reason = book
                    .validate()
                    .err()
                    .and_then(|errors| errors.into_iter().next())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                Err(AppError::InvalidField {
                    field: *field,
                    reason,
                })
            }
        }
    }

    fn position_of_isbn(&self, isbn: Option<&str>) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.book.isbn() == isbn)
    }

    /// Adds `quantity` copies of `book`.
    ///
    /// Re-adding an identical book increases its quantity. A different book
    /// under an existing ISBN is rejected with `IsbnConflict` and leaves the
    /// catalog untouched.
    pub fn add_book(&mut self, book: &Book, quantity: i64) -> Result<CatalogOutcome> {
        let quantity = positive_quantity(quantity)?;
        self.stock(book, quantity)
    }

    fn stock(&mut self, book: &Book, quantity: u64) -> Result<CatalogOutcome> {
        Self::validate_book(book)?;

        if let Some(pos) = self.position_of_isbn(book.isbn()) {
            let entry = &mut self.entries[pos];
            if !entry.book.is_identical(book) {
                return Err(AppError::isbn_conflict(&entry.book, book));
            }
            let current = entry.quantity;
            entry.quantity = current
                .checked_add(quantity)
                .ok_or_else(|| AppError::quantity_overflow(current, quantity))?;
            info!(
                "Restocked '{}' by {} (total {})",
                book.display_title(),
                quantity,
                entry.quantity
            );
            return Ok(CatalogOutcome::Restocked {
                book: book.clone(),
                added: quantity,
                total: entry.quantity,
                collection: self.name.clone(),
            });
        }

        self.entries.push(CatalogEntry {
            book: book.clone(),
            quantity,
        });
        self.index.add(book);
        info!("Added '{}' x{}", book.display_title(), quantity);

        Ok(CatalogOutcome::Added {
            book: book.clone(),
            quantity,
            collection: self.name.clone(),
        })
    }

    /// Removes `quantity` copies of the book carrying `book`'s ISBN.
    ///
    /// Asking for more copies than available removes the entry anyway and
    /// reports a warning; an unknown ISBN reports `NotFound`. Neither case
    /// is an error.
    pub fn delete_book(&mut self, book: &Book, quantity: i64) -> Result<CatalogOutcome> {
        let quantity = positive_quantity(quantity)?;

        let Some(pos) = self.position_of_isbn(book.isbn()) else {
            warn!("Delete of unknown book '{}'", book.display_title());
            return Ok(CatalogOutcome::NotFound {
                book: book.clone(),
                collection: self.name.clone(),
            });
        };

        let available = self.entries[pos].quantity;
        if quantity < available {
            let entry = &mut self.entries[pos];
            entry.quantity -= quantity;
            info!(
                "Removed {} of '{}' ({} left)",
                quantity,
                book.display_title(),
                entry.quantity
            );
            return Ok(CatalogOutcome::Removed {
                book: book.clone(),
                removed: quantity,
                remaining: entry.quantity,
                collection: self.name.clone(),
            });
        }

        let entry = self.entries.remove(pos);
        self.index.remove(&entry.book);

        if quantity == available {
            info!("Removed all {} of '{}'", quantity, book.display_title());
            Ok(CatalogOutcome::FullyRemoved {
                book: book.clone(),
                removed: quantity,
                collection: self.name.clone(),
            })
        } else {
            warn!(
                "Requested {} of '{}' but only {} available, removed all",
                quantity,
                book.display_title(),
                available
            );
            Ok(CatalogOutcome::RemovedWithWarning {
                book: book.clone(),
                requested: quantity,
                available,
                collection: self.name.clone(),
            })
        }
    }

    /// Replaces `old` with `new` in place, keeping the quantity.
    ///
    /// The ISBN is immutable: a changed ISBN fails with `IsbnMismatch`.
    pub fn update_book(&mut self, old: &Book, new: Book) -> Result<CatalogOutcome> {
        if old.isbn() != new.isbn() {
            return Err(AppError::IsbnMismatch {
                old_isbn: old.isbn().unwrap_or_default().to_string(),
                new_isbn: new.isbn().unwrap_or_default().to_string(),
            });
        }
        Self::validate_book(&new)?;

        let pos = self.position_of_isbn(old.isbn()).ok_or_else(|| {
            AppError::not_found("book", format!("ISBN '{}'", old.isbn().unwrap_or_default()))
        })?;

        let isbn = new.isbn().unwrap_or_default().to_string();
        let previous = std::mem::replace(&mut self.entries[pos].book, new);
        self.index.remove(&previous);
        self.index.add(&self.entries[pos].book);
        info!("Updated book with ISBN '{}'", isbn);

        Ok(CatalogOutcome::Updated {
            isbn,
            collection: self.name.clone(),
        })
    }

    /// Replaces the book at `position`, keeping its quantity
    pub fn replace_at(&mut self, position: usize, book: Book) -> Result<()> {
        self.check_position(position)?;
        Self::validate_book(&book)?;

        if let Some(owner) = self.position_of_isbn(book.isbn()) {
            if owner != position {
                return Err(AppError::isbn_conflict(&self.entries[owner].book, &book));
            }
        }

        let previous = std::mem::replace(&mut self.entries[position].book, book);
        self.index.remove(&previous);
        self.index.add(&self.entries[position].book);
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if self.entries.is_empty() {
            return Err(AppError::EmptyCollection {
                collection: self.name.clone().unwrap_or_default(),
            });
        }
        if position >= self.entries.len() {
            return Err(AppError::OutOfRange {
                index: position,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Book at `position`
    pub fn get(&self, position: usize) -> Result<&Book> {
        self.check_position(position)?;
        Ok(&self.entries[position].book)
    }

    /// Books in `range`, clamped to the catalog length; quantities are dropped
    pub fn slice(&self, range: Range<usize>) -> Vec<Book> {
        let end = range.end.min(self.entries.len());
        let start = range.start.min(end);
        self.entries[start..end]
            .iter()
            .map(|entry| entry.book.clone())
            .collect()
    }

    /// Book carrying `isbn`
    pub fn get_by_isbn(&self, isbn: &str) -> Result<&Book> {
        self.entries
            .iter()
            .map(|entry| &entry.book)
            .find(|book| book.isbn() == Some(isbn))
            .ok_or_else(|| AppError::not_found("book", format!("ISBN '{}'", isbn)))
    }

    /// Secondary index lookup
    pub fn get_by_index(&self, key: &IndexKey) -> &[Book] {
        self.index.lookup(key)
    }

    pub fn index(&self) -> &MultiIndex {
        &self.index
    }

    /// Available copies of the book carrying `book`'s ISBN, 0 if absent
    pub fn quantity_of(&self, book: &Book) -> u64 {
        self.position_of_isbn(book.isbn())
            .map(|pos| self.entries[pos].quantity)
            .unwrap_or(0)
    }

    /// Returns true if an entry holds exactly this book
    pub fn contains(&self, book: &Book) -> bool {
        self.entries.iter().any(|entry| &entry.book == book)
    }

    /// Number of entries (distinct books)
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies on hand across all entries
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|entry| entry.quantity).sum()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Snapshot of every `(book, quantity)` pair in catalog order
    pub fn books_with_quantities(&self) -> Vec<(Book, u64)> {
        self.entries
            .iter()
            .map(|entry| (entry.book.clone(), entry.quantity))
            .collect()
    }

    /// Books in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.entries.iter().map(|entry| &entry.book)
    }

    /// Builds a new unnamed catalog holding the entries of both catalogs.
    ///
    /// Identical books have their quantities summed; an ISBN bound to
    /// different books in the two catalogs fails with `IsbnConflict`, a sum
    /// past `u64::MAX` with `InvalidArgument`.
    pub fn merge(&self, other: &Catalog) -> Result<Catalog> {
        let mut merged = Catalog::new();
        for entry in self.entries.iter().chain(other.entries.iter()) {
            merged.stock(&entry.book, entry.quantity)?;
        }
        Ok(merged)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Collection '{}' Info:", name)?,
            None => write!(f, "Collection Info:")?,
        }
        for entry in &self.entries {
            write!(
                f,
                "\n\tTitle: {}, Author: {}, ISBN: {}, Available: {} items",
                entry.book.display_title(),
                entry.book.author().unwrap_or_default(),
                entry.book.isbn().unwrap_or_default(),
                entry.quantity
            )?;
        }
        Ok(())
    }
}
