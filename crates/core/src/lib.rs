//! Shelfkeeper core domain
//!
//! Value types shared by every other crate in the workspace plus the
//! error taxonomy used by the catalog and the lending ledger.

pub mod error;
pub mod types;

pub use error::{AppError, Result};
pub use types::{Book, BookField, LendingStats, LibraryReport, Timestamp, UserId, Validator};
