//! Terminal presentation of library outcomes

use console::style;
use shelfkeeper_core::{AppError, Book, LendingStats};
use shelfkeeper_library::{CatalogOutcome, IndexKey, LendingOutcome, OutcomeLevel};

/// Colors a message by outcome level
pub fn leveled(level: OutcomeLevel, message: &str) -> String {
    match level {
        OutcomeLevel::Success => style(message).green().to_string(),
        OutcomeLevel::Warning => style(message).yellow().to_string(),
        OutcomeLevel::Failure => style(message).red().to_string(),
    }
}

pub fn catalog_outcome(outcome: &CatalogOutcome) -> String {
    leveled(outcome.level(), &outcome.to_string())
}

pub fn lending_outcome(outcome: &LendingOutcome) -> String {
    leveled(outcome.level(), &outcome.to_string())
}

/// An error raised while performing `action`
pub fn error(action: &str, err: &AppError) -> String {
    style(format!("Error found in {}: {}", action, err))
        .red()
        .to_string()
}

/// A precondition that kept `action` from running at all
pub fn skipped(action: &str, reason: &str) -> String {
    style(format!("Cannot perform {}: {}", action, reason))
        .red()
        .to_string()
}

pub fn lookup(key: &IndexKey, books: &[Book]) -> String {
    let titles: Vec<&str> = books.iter().map(Book::display_title).collect();
    style(format!("Found for {} key: {:?}", key, titles))
        .cyan()
        .to_string()
}

pub fn detail(message: &str) -> String {
    format!("\t{}", style(message).dim())
}

pub fn banner(title: &str) -> String {
    let line = format!("{:-^85}", format!(" {} ", title));
    format!("\n{}\n", style(line).magenta())
}

pub fn statistics(stats: &LendingStats) -> String {
    format!(
        "Total borrowed: {}\nTotal returned: {} ({:.1}%)\nUnique borrowers: {}\nActive borrowers: {}",
        stats.total_borrowed,
        stats.total_returned,
        stats.return_rate(),
        stats.unique_borrowers,
        stats.active_borrowers
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfkeeper_core::UserId;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    fn sample() -> Book {
        Book::new("Dune", "Frank Herbert", 1965, "Science Fiction", "1")
    }

    #[test]
    fn test_outcome_text_survives_styling() {
        let outcome = LendingOutcome::NotBorrowed {
            book: sample(),
            user: UserId::new(3),
        };
        assert_eq!(plain(&lending_outcome(&outcome)), outcome.to_string());
    }

    #[test]
    fn test_lookup_lists_titles() {
        let rendered = plain(&lookup(&IndexKey::Genre("Science Fiction".into()), &[sample()]));
        assert_eq!(rendered, "Found for genre 'Science Fiction' key: [\"Dune\"]");
    }

    #[test]
    fn test_skipped_and_error_messages() {
        assert_eq!(
            plain(&skipped("return_book", "no active borrowers found")),
            "Cannot perform return_book: no active borrowers found"
        );
        let err = AppError::non_positive_quantity(0);
        assert!(plain(&error("add_book", &err)).starts_with("Error found in add_book:"));
    }

    #[test]
    fn test_banner_width() {
        let rendered = plain(&banner("Stats"));
        assert_eq!(rendered.trim().chars().count(), 85);
        assert!(rendered.contains(" Stats "));
    }

    #[test]
    fn test_statistics_block() {
        let stats = LendingStats {
            total_borrowed: 4,
            total_returned: 1,
            unique_borrowers: 2,
            active_borrowers: 1,
        };
        let rendered = statistics(&stats);
        assert!(rendered.contains("Total borrowed: 4"));
        assert!(rendered.contains("Total returned: 1 (25.0%)"));
        assert!(rendered.ends_with("Active borrowers: 1"));
    }
}
