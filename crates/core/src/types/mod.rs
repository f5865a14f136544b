//! Domain types for Shelfkeeper
//!
//! - `book`: the immutable `Book` value and `UserId`
//! - `stats`: lending counters and library reports
//! - `common`: shared traits and utilities

mod book;
mod common;
mod stats;

pub use book::{Book, BookField, UserId};
pub use common::{Timestamp, Validator};
pub use stats::{LendingStats, LibraryReport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let _book: Book = Book::default();
        let _user: UserId = UserId::new(7);
        let _stats: LendingStats = LendingStats::empty();
        let _now: Timestamp = Timestamp::now();
    }
}
