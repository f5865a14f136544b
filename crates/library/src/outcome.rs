//! Structured results of catalog and lending operations
//!
//! Routine inventory situations (a book that is not stocked, a request
//! for more copies than exist, a return of something never borrowed) are
//! reported as outcome values rather than errors. Callers branch on the
//! variant or on [`OutcomeLevel`].

use serde::Serialize;
use shelfkeeper_core::{Book, UserId};
use std::fmt;

/// Coarse classification of an outcome, used for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLevel {
    Success,
    Warning,
    Failure,
}

/// Result of a catalog mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogOutcome {
    /// A new entry was appended
    Added {
        book: Book,
        quantity: u64,
        collection: Option<String>,
    },
    /// Copies were added to an existing identical entry
    Restocked {
        book: Book,
        added: u64,
        total: u64,
        collection: Option<String>,
    },
    /// Some copies were removed, the entry stays
    Removed {
        book: Book,
        removed: u64,
        remaining: u64,
        collection: Option<String>,
    },
    /// Exactly the available copies were removed, the entry is gone
    FullyRemoved {
        book: Book,
        removed: u64,
        collection: Option<String>,
    },
    /// More copies were requested than available; the entry is gone anyway
    RemovedWithWarning {
        book: Book,
        requested: u64,
        available: u64,
        collection: Option<String>,
    },
    /// No entry carries the book's ISBN
    NotFound {
        book: Book,
        collection: Option<String>,
    },
    /// An entry was replaced in place
    Updated {
        isbn: String,
        collection: Option<String>,
    },
}

impl CatalogOutcome {
    pub fn level(&self) -> OutcomeLevel {
        match self {
            Self::Added { .. }
            | Self::Restocked { .. }
            | Self::Removed { .. }
            | Self::FullyRemoved { .. }
            | Self::Updated { .. } => OutcomeLevel::Success,
            Self::RemovedWithWarning { .. } => OutcomeLevel::Warning,
            Self::NotFound { .. } => OutcomeLevel::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.level() == OutcomeLevel::Success
    }

    pub fn is_warning(&self) -> bool {
        self.level() == OutcomeLevel::Warning
    }

    /// Returns true if the outcome left no entry for the book
    pub fn removed_entry(&self) -> bool {
        matches!(
            self,
            Self::FullyRemoved { .. } | Self::RemovedWithWarning { .. }
        )
    }
}

fn collection_label(collection: &Option<String>) -> String {
    match collection {
        Some(name) => format!("collection '{}'", name),
        None => "the collection".to_string(),
    }
}

impl fmt::Display for CatalogOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added {
                book,
                quantity,
                collection,
            } => write!(
                f,
                "Book '{}' added to {}, number of items: {}",
                book.display_title(),
                collection_label(collection),
                quantity
            ),
            Self::Restocked {
                book,
                added,
                total,
                collection,
            } => write!(
                f,
                "Book '{}' is already in {}, added items: {}, summary items: {}",
                book.display_title(),
                collection_label(collection),
                added,
                total
            ),
            Self::Removed {
                book,
                removed,
                remaining,
                collection,
            } => write!(
                f,
                "Book '{}' deleted from {}, number of items deleted: {}, number of items left: {}",
                book.display_title(),
                collection_label(collection),
                removed,
                remaining
            ),
            Self::FullyRemoved {
                book,
                removed,
                collection,
            } => write!(
                f,
                "Book '{}' deleted from {}, deleted all available items: {}",
                book.display_title(),
                collection_label(collection),
                removed
            ),
            Self::RemovedWithWarning {
                book,
                requested,
                available,
                collection,
            } => write!(
                f,
                "Warning: Trying to delete book '{}' from {} in count {}\n\tAvailable items count: {}\n\tDeleting all...",
                book.display_title(),
                collection_label(collection),
                requested,
                available
            ),
            Self::NotFound { book, collection } => write!(
                f,
                "Cannot delete book '{}': not found in {}",
                book.display_title(),
                collection_label(collection)
            ),
            Self::Updated { isbn, collection } => write!(
                f,
                "Updated book with ISBN '{}' in {}",
                isbn,
                collection_label(collection)
            ),
        }
    }
}

/// Result of a borrow or return request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LendingOutcome {
    Borrowed {
        book: Book,
        user: UserId,
        quantity: u64,
    },
    Returned {
        book: Book,
        user: UserId,
        quantity: u64,
    },
    /// The book is not in the catalog at all
    NotAvailable { book: Book },
    /// The catalog holds fewer copies than requested
    InsufficientQuantity {
        book: Book,
        available: u64,
        requested: u64,
    },
    /// The user holds no copies of the book
    NotBorrowed { book: Book, user: UserId },
    /// The user tried to return more copies than they hold
    OverReturn {
        book: Book,
        user: UserId,
        borrowed: u64,
        requested: u64,
    },
}

impl LendingOutcome {
    pub fn level(&self) -> OutcomeLevel {
        match self {
            Self::Borrowed { .. } | Self::Returned { .. } => OutcomeLevel::Success,
            Self::NotAvailable { .. }
            | Self::InsufficientQuantity { .. }
            | Self::NotBorrowed { .. }
            | Self::OverReturn { .. } => OutcomeLevel::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.level() == OutcomeLevel::Success
    }
}

impl fmt::Display for LendingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed {
                book,
                user,
                quantity,
            } => write!(
                f,
                "Borrowed {} copy/copies of '{}' for user {}",
                quantity,
                book.display_title(),
                user
            ),
            Self::Returned {
                book,
                user,
                quantity,
            } => write!(
                f,
                "Returned {} copy/copies of '{}' from user {}",
                quantity,
                book.display_title(),
                user
            ),
            Self::NotAvailable { book } => {
                write!(f, "Book '{}' not available", book.display_title())
            }
            Self::InsufficientQuantity {
                book,
                available,
                requested,
            } => write!(
                f,
                "Not enough copies of '{}'. Available: {}, requested: {}",
                book.display_title(),
                available,
                requested
            ),
            Self::NotBorrowed { book, user } => write!(
                f,
                "User {} has no copies of '{}' borrowed",
                user,
                book.display_title()
            ),
            Self::OverReturn {
                book,
                user,
                borrowed,
                requested,
            } => write!(
                f,
                "User {} has only {} copies of '{}' borrowed, but trying to return {}",
                user,
                borrowed,
                book.display_title(),
                requested
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Book {
        Book::new("Title", "Author", 2020, "Fiction", "12345")
    }

    #[test]
    fn test_catalog_outcome_levels() {
        let added = CatalogOutcome::Added {
            book: sample(),
            quantity: 1,
            collection: None,
        };
        let warned = CatalogOutcome::RemovedWithWarning {
            book: sample(),
            requested: 5,
            available: 2,
            collection: None,
        };
        let missing = CatalogOutcome::NotFound {
            book: sample(),
            collection: None,
        };

        assert!(added.is_success());
        assert!(warned.is_warning());
        assert!(warned.removed_entry());
        assert_eq!(missing.level(), OutcomeLevel::Failure);
        assert!(!missing.removed_entry());
    }

    #[test]
    fn test_catalog_outcome_messages() {
        let outcome = CatalogOutcome::Restocked {
            book: sample(),
            added: 2,
            total: 5,
            collection: Some("Main".to_string()),
        };
        let message = outcome.to_string();
        assert!(message.contains("already in collection 'Main'"));
        assert!(message.contains("summary items: 5"));

        let outcome = CatalogOutcome::NotFound {
            book: sample(),
            collection: None,
        };
        assert!(outcome.to_string().contains("not found in the collection"));
    }

    #[test]
    fn test_lending_outcome_messages() {
        let user = UserId::new(123);
        assert!(LendingOutcome::NotAvailable { book: sample() }
            .to_string()
            .contains("not available"));
        assert!(LendingOutcome::InsufficientQuantity {
            book: sample(),
            available: 1,
            requested: 2
        }
        .to_string()
        .contains("Not enough copies"));
        assert!(LendingOutcome::NotBorrowed { book: sample(), user }
            .to_string()
            .contains("has no copies"));
        assert!(LendingOutcome::OverReturn {
            book: sample(),
            user,
            borrowed: 2,
            requested: 5
        }
        .to_string()
        .contains("has only 2 copies"));
    }

    #[test]
    fn test_lending_outcome_levels() {
        let user = UserId::new(1);
        assert!(LendingOutcome::Borrowed {
            book: sample(),
            user,
            quantity: 1
        }
        .is_success());
        assert!(!LendingOutcome::NotBorrowed { book: sample(), user }.is_success());
    }

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let outcome = LendingOutcome::Returned {
            book: sample(),
            user: UserId::new(9),
            quantity: 3,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "returned");
        assert_eq!(json["quantity"], 3);
    }
}
