//! Borrow/return ledger layered over a [`Catalog`]
//!
//! Copies move between two places: the catalog holds what is on the shelf,
//! the ledger holds what each user has out. A successful borrow deletes
//! copies from the catalog and credits the user; a successful return does
//! the reverse. Every request is checked before anything is touched, and the
//! fallible catalog step runs first, so a rejected or failed request leaves
//! both sides exactly as they were.

use crate::catalog::{positive_quantity, Catalog};
use crate::outcome::LendingOutcome;
use log::{info, warn};
use serde::Serialize;
use shelfkeeper_core::{Book, LendingStats, LibraryReport, Result, Timestamp, UserId};
use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Name used when a ledger is built without one
pub const DEFAULT_LIBRARY_NAME: &str = "Unnamed Library";

/// Per-user lending history
///
/// Exists only while the user holds at least one copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowerRecord {
    user: UserId,
    borrowed: BTreeMap<Book, u64>,
    total_borrowed: u64,
    total_returned: u64,
    first_borrow: Timestamp,
    last_activity: Timestamp,
}

impl BorrowerRecord {
    fn new(user: UserId, now: Timestamp) -> Self {
        Self {
            user,
            borrowed: BTreeMap::new(),
            total_borrowed: 0,
            total_returned: 0,
            first_borrow: now,
            last_activity: now,
        }
    }

    fn record_borrow(&mut self, book: &Book, quantity: u64, now: Timestamp) {
        *self.borrowed.entry(book.clone()).or_insert(0) += quantity;
        self.total_borrowed += quantity;
        self.last_activity = now;
    }

    fn record_return(&mut self, book: &Book, quantity: u64, now: Timestamp) {
        if let Some(held) = self.borrowed.get_mut(book) {
            *held = held.saturating_sub(quantity);
            if *held == 0 {
                self.borrowed.remove(book);
            }
        }
        self.total_returned += quantity;
        self.last_activity = now;
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    /// Copies currently held, per book
    pub fn borrowed(&self) -> &BTreeMap<Book, u64> {
        &self.borrowed
    }

    /// Total copies currently held across all books
    pub fn outstanding(&self) -> u64 {
        self.borrowed.values().sum()
    }

    pub fn total_borrowed(&self) -> u64 {
        self.total_borrowed
    }

    pub fn total_returned(&self) -> u64 {
        self.total_returned
    }

    pub fn first_borrow(&self) -> Timestamp {
        self.first_borrow
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }
}

/// Availability and loan breakdown for a single book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowInfo {
    pub available: u64,
    pub borrowed: u64,
    pub total_copies: u64,
    pub users: Vec<(UserId, u64)>,
}

/// Snapshot of a borrower's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowerHistory {
    pub user: UserId,
    pub currently_borrowed: Vec<(Book, u64)>,
    pub total_borrowed: u64,
    pub total_returned: u64,
    pub first_borrow: Timestamp,
    pub last_activity: Timestamp,
}

/// Sorts descending by count and truncates; the sort is stable so ties keep
/// their input order
fn top_by_count<T>(mut items: Vec<(T, u64)>, limit: usize) -> Vec<(T, u64)> {
    items.sort_by_key(|(_, count)| Reverse(*count));
    items.truncate(limit);
    items
}

/// A named library: a catalog plus the record of who has borrowed what
///
/// `book_order` and `borrower_order` hold the keys of `borrowed` and
/// `borrowers` in first-borrow order; rankings and listings follow it.
#[derive(Debug, Clone)]
pub struct LendingLedger {
    name: String,
    catalog: Catalog,
    borrowed: BTreeMap<Book, BTreeMap<UserId, u64>>,
    book_order: Vec<Book>,
    borrowers: BTreeMap<UserId, BorrowerRecord>,
    borrower_order: Vec<UserId>,
    seen: BTreeSet<UserId>,
    stats: LendingStats,
}

impl Default for LendingLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_NAME)
    }
}

impl LendingLedger {
    /// Creates a library with an empty catalog named after it
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let catalog = Catalog::with_name(name.clone());
        Self::with_catalog(name, catalog)
    }

    /// Creates a library around an existing catalog
    pub fn with_catalog(name: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            name: name.into(),
            catalog,
            borrowed: BTreeMap::new(),
            book_order: Vec::new(),
            borrowers: BTreeMap::new(),
            borrower_order: Vec::new(),
            seen: BTreeSet::new(),
            stats: LendingStats::empty(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Direct access for add/delete/update of shelf stock
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Lends `quantity` copies of `book` to `user`.
    ///
    /// The book must be in the catalog field-for-field, with at least
    /// `quantity` copies on hand.
    pub fn borrow(&mut self, book: &Book, user: UserId, quantity: i64) -> Result<LendingOutcome> {
        let requested = positive_quantity(quantity)?;

        if !self.catalog.contains(book) {
            warn!(
                "User {} asked for '{}', which is not in the catalog",
                user,
                book.display_title()
            );
            return Ok(LendingOutcome::NotAvailable { book: book.clone() });
        }

        let available = self.catalog.quantity_of(book);
        if available < requested {
            warn!(
                "User {} asked for {} of '{}', only {} available",
                user,
                requested,
                book.display_title(),
                available
            );
            return Ok(LendingOutcome::InsufficientQuantity {
                book: book.clone(),
                available,
                requested,
            });
        }

        self.catalog.delete_book(book, quantity)?;

        if !self.borrowed.contains_key(book) {
            self.book_order.push(book.clone());
        }
        *self
            .borrowed
            .entry(book.clone())
            .or_default()
            .entry(user)
            .or_insert(0) += requested;

        let now = Timestamp::now();
        if self.seen.insert(user) {
            self.stats.unique_borrowers += 1;
        }
        let record = match self.borrowers.entry(user) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.stats.active_borrowers += 1;
                self.borrower_order.push(user);
                entry.insert(BorrowerRecord::new(user, now))
            }
        };
        record.record_borrow(book, requested, now);
        self.stats.total_borrowed += requested;

        info!(
            "User {} borrowed {} of '{}'",
            user,
            requested,
            book.display_title()
        );
        Ok(LendingOutcome::Borrowed {
            book: book.clone(),
            user,
            quantity: requested,
        })
    }

    /// Takes back `quantity` copies of `book` from `user`.
    ///
    /// Returning more than the user holds is rejected outright, nothing is
    /// clamped.
    pub fn return_book(
        &mut self,
        book: &Book,
        user: UserId,
        quantity: i64,
    ) -> Result<LendingOutcome> {
        let requested = positive_quantity(quantity)?;

        let borrowed = self.borrowed_quantity(book, user);
        if borrowed == 0 {
            warn!(
                "User {} tried to return '{}' without holding it",
                user,
                book.display_title()
            );
            return Ok(LendingOutcome::NotBorrowed {
                book: book.clone(),
                user,
            });
        }
        if requested > borrowed {
            warn!(
                "User {} tried to return {} of '{}' but holds {}",
                user,
                requested,
                book.display_title(),
                borrowed
            );
            return Ok(LendingOutcome::OverReturn {
                book: book.clone(),
                user,
                borrowed,
                requested,
            });
        }

        self.catalog.add_book(book, quantity)?;

        if let Some(users) = self.borrowed.get_mut(book) {
            let remaining = borrowed - requested;
            if remaining == 0 {
                users.remove(&user);
            } else {
                users.insert(user, remaining);
            }
            if users.is_empty() {
                self.borrowed.remove(book);
                self.book_order.retain(|held| held != book);
            }
        }

        if let Some(record) = self.borrowers.get_mut(&user) {
            record.record_return(book, requested, Timestamp::now());
            if record.borrowed.is_empty() {
                self.borrowers.remove(&user);
                self.borrower_order.retain(|id| *id != user);
                self.stats.active_borrowers = self.stats.active_borrowers.saturating_sub(1);
            }
        }
        self.stats.total_returned += requested;

        info!(
            "User {} returned {} of '{}'",
            user,
            requested,
            book.display_title()
        );
        Ok(LendingOutcome::Returned {
            book: book.clone(),
            user,
            quantity: requested,
        })
    }

    /// Copies of `book` currently held by `user`
    pub fn borrowed_quantity(&self, book: &Book, user: UserId) -> u64 {
        self.borrowed
            .get(book)
            .and_then(|users| users.get(&user))
            .copied()
            .unwrap_or(0)
    }

    /// Books held by `user`, empty if they hold nothing
    pub fn user_borrowed_books(&self, user: UserId) -> BTreeMap<Book, u64> {
        self.borrowers
            .get(&user)
            .map(|record| record.borrowed.clone())
            .unwrap_or_default()
    }

    pub fn borrower(&self, user: UserId) -> Option<&BorrowerRecord> {
        self.borrowers.get(&user)
    }

    /// Users currently holding at least one copy, in first-borrow order
    pub fn active_borrowers(&self) -> Vec<UserId> {
        self.borrower_order
            .iter()
            .filter(|user| {
                self.borrowers
                    .get(user)
                    .is_some_and(|record| !record.borrowed.is_empty())
            })
            .copied()
            .collect()
    }

    pub fn book_borrow_info(&self, book: &Book) -> BorrowInfo {
        let available = self.catalog.quantity_of(book);
        let users: Vec<(UserId, u64)> = self
            .borrowed
            .get(book)
            .map(|users| users.iter().map(|(user, qty)| (*user, *qty)).collect())
            .unwrap_or_default();
        let borrowed = users.iter().map(|(_, qty)| qty).sum();

        BorrowInfo {
            available,
            borrowed,
            total_copies: available + borrowed,
            users,
        }
    }

    /// Catalog books with the most copies on the shelf
    pub fn popular_books(&self, limit: usize) -> Vec<(Book, u64)> {
        top_by_count(self.catalog.books_with_quantities(), limit)
    }

    /// Books with the most copies currently out on loan
    ///
    /// Ties keep the order in which the books were first borrowed.
    pub fn most_borrowed_books(&self, limit: usize) -> Vec<(Book, u64)> {
        let counts = self
            .book_order
            .iter()
            .filter_map(|book| {
                self.borrowed
                    .get(book)
                    .map(|users| (book.clone(), users.values().sum()))
            })
            .collect();
        top_by_count(counts, limit)
    }

    /// Users holding the most copies right now
    ///
    /// Ties keep the order in which the users first borrowed.
    pub fn top_borrowers(&self, limit: usize) -> Vec<(UserId, u64)> {
        let counts = self
            .borrower_order
            .iter()
            .filter_map(|user| {
                self.borrowers
                    .get(user)
                    .map(|record| (*user, record.outstanding()))
            })
            .collect();
        top_by_count(counts, limit)
    }

    pub fn borrower_history(&self, user: UserId) -> Option<BorrowerHistory> {
        self.borrowers.get(&user).map(|record| BorrowerHistory {
            user,
            currently_borrowed: record
                .borrowed
                .iter()
                .map(|(book, qty)| (book.clone(), *qty))
                .collect(),
            total_borrowed: record.total_borrowed,
            total_returned: record.total_returned,
            first_borrow: record.first_borrow,
            last_activity: record.last_activity,
        })
    }

    /// Books with at least one copy on the shelf
    pub fn available_books(&self) -> Vec<Book> {
        self.catalog
            .entries()
            .iter()
            .filter(|entry| entry.quantity > 0)
            .map(|entry| entry.book.clone())
            .collect()
    }

    pub fn is_book_available(&self, book: &Book, quantity: u64) -> bool {
        self.catalog.contains(book) && self.catalog.quantity_of(book) >= quantity
    }

    pub fn statistics(&self) -> LendingStats {
        self.stats
    }

    pub fn generate_report(&self) -> LibraryReport {
        LibraryReport {
            library_name: self.name.clone(),
            unique_books: self.catalog.count(),
            total_copies: self.catalog.total_quantity(),
            authors_count: self.catalog.index().author_count(),
            genres_count: self.catalog.index().genre_count(),
            statistics: self.stats,
        }
    }
}

impl fmt::Display for LendingLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Library '{}' ({} books, {} copies available, {} total borrowed, {} active borrowers)",
            self.name,
            self.catalog.count(),
            self.catalog.total_quantity(),
            self.stats.total_borrowed,
            self.stats.active_borrowers
        )
    }
}
