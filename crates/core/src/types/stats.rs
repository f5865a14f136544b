//! Lending statistics and library reports

use serde::{Deserialize, Serialize};

/// Aggregate lending counters
///
/// All counters only ever grow, except `active_borrowers`, which drops
/// when a user returns their last outstanding copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingStats {
    pub total_borrowed: u64,
    pub total_returned: u64,
    pub unique_borrowers: u64,
    pub active_borrowers: u64,
}

impl LendingStats {
    /// Creates empty statistics
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copies currently out on loan
    pub fn outstanding(&self) -> u64 {
        self.total_borrowed.saturating_sub(self.total_returned)
    }

    /// Returns the percentage of borrowed copies that came back
    pub fn return_rate(&self) -> f64 {
        if self.total_borrowed == 0 {
            return 0.0;
        }
        (self.total_returned as f64 / self.total_borrowed as f64) * 100.0
    }
}

/// Snapshot produced by a library's report generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryReport {
    pub library_name: String,
    pub unique_books: usize,
    pub total_copies: u64,
    pub authors_count: usize,
    pub genres_count: usize,
    pub statistics: LendingStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = LendingStats::empty();
        assert_eq!(stats.total_borrowed, 0);
        assert_eq!(stats.outstanding(), 0);
        assert_eq!(stats.return_rate(), 0.0);
    }

    #[test]
    fn test_outstanding_and_return_rate() {
        let stats = LendingStats {
            total_borrowed: 8,
            total_returned: 2,
            unique_borrowers: 3,
            active_borrowers: 2,
        };
        assert_eq!(stats.outstanding(), 6);
        assert_eq!(stats.return_rate(), 25.0);
    }

    #[test]
    fn test_report_serializes_statistics_block() {
        let report = LibraryReport {
            library_name: "Branch".to_string(),
            unique_books: 2,
            total_copies: 7,
            authors_count: 2,
            genres_count: 1,
            statistics: LendingStats {
                total_borrowed: 3,
                ..LendingStats::default()
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["library_name"], "Branch");
        assert_eq!(json["statistics"]["total_borrowed"], 3);
        assert_eq!(json["statistics"]["active_borrowers"], 0);
    }
}
