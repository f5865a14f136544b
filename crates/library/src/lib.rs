//! Shelfkeeper library management
//!
//! Catalog of books with synchronized secondary indexes, and the lending
//! ledger that moves copies between the shelf and borrowers.
//!
//! ```
//! use shelfkeeper_core::{Book, UserId};
//! use shelfkeeper_library::LendingLedger;
//!
//! let book = Book::new("T", "A", 2020, "Fiction", "111");
//! let mut library = LendingLedger::new("Branch");
//! library.catalog_mut().add_book(&book, 5).unwrap();
//! library.borrow(&book, UserId::new(42), 3).unwrap();
//! assert_eq!(library.catalog().quantity_of(&book), 2);
//! ```

pub mod catalog;
pub mod index;
pub mod ledger;
pub mod outcome;
pub mod shared;

pub use catalog::{Catalog, CatalogEntry};
pub use index::{IndexKey, IndexKind, KeyedIndex, MultiIndex};
pub use ledger::{BorrowInfo, BorrowerHistory, BorrowerRecord, LendingLedger, DEFAULT_LIBRARY_NAME};
pub use outcome::{CatalogOutcome, LendingOutcome, OutcomeLevel};
pub use shared::SharedLibrary;
