//! Random-action driver over a [`LendingLedger`]
//!
//! Stocks the catalog from the seed dataset, then performs a series of
//! randomly chosen actions and renders every outcome. Errors returned by the
//! library are rendered like any other outcome and never stop the run; only
//! failures to write output do.

use crate::{render, seed};
use rand::rngs::StdRng;
use rand::seq::{index, IndexedRandom};
use rand::{Rng, SeedableRng};
use shelfkeeper_config::SimulationConfig;
use shelfkeeper_core::{Book, UserId};
use shelfkeeper_library::{IndexKey, LendingLedger};
use std::io::{self, Write};

/// One kind of random step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddBook,
    Borrow,
    BorrowNonExistent,
    DeleteBook,
    FindByKey,
    ReturnBook,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::AddBook,
        Action::Borrow,
        Action::BorrowNonExistent,
        Action::DeleteBook,
        Action::FindByKey,
        Action::ReturnBook,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::AddBook => "add_book",
            Action::Borrow => "borrow_book",
            Action::BorrowNonExistent => "borrow_book_non_existent",
            Action::DeleteBook => "delete_book",
            Action::FindByKey => "find_book_by_key",
            Action::ReturnBook => "return_book",
        }
    }
}

/// Draws a quantity in `1..=max`
fn quantity(rng: &mut StdRng, max: u32) -> i64 {
    rng.random_range(1..=i64::from(max.max(1)))
}

pub struct Simulator<W: Write> {
    library: LendingLedger,
    rng: StdRng,
    seed: u64,
    users: Vec<UserId>,
    settings: SimulationConfig,
    report_limit: usize,
    catalog_source: Vec<Book>,
    out: W,
}

impl<W: Write> Simulator<W> {
    /// Creates a simulator writing its transcript to `out`
    ///
    /// Without a configured seed a random one is drawn and logged, so any
    /// run can be replayed.
    pub fn new(
        library_name: &str,
        settings: &SimulationConfig,
        report_limit: usize,
        out: W,
    ) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("Simulation seed: {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let id_space = usize::try_from(settings.max_user_id).unwrap_or(usize::MAX);
        let pool = settings.user_pool_size.min(id_space);
        let users = index::sample(&mut rng, id_space, pool)
            .into_iter()
            .map(|id| UserId::new(id as u64 + 1))
            .collect();

        Self {
            library: LendingLedger::new(library_name),
            rng,
            seed,
            users,
            settings: settings.clone(),
            report_limit,
            catalog_source: seed::books(),
            out,
        }
    }

    pub fn library(&self) -> &LendingLedger {
        &self.library
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn emit(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{}", line.as_ref())
    }

    fn stocked_books(&self) -> Vec<Book> {
        self.library.catalog().iter().cloned().collect()
    }

    pub fn add_book(&mut self) -> io::Result<()> {
        let Some(book) = self.catalog_source.choose(&mut self.rng).cloned() else {
            return self.emit(render::skipped("add_book", "no seed books"));
        };
        let count = quantity(&mut self.rng, self.settings.max_add_quantity);

        let line = match self.library.catalog_mut().add_book(&book, count) {
            Ok(outcome) => render::catalog_outcome(&outcome),
            Err(e) => render::error("add_book", &e),
        };
        self.emit(line)
    }

    pub fn delete_book(&mut self) -> io::Result<()> {
        let stocked = self.stocked_books();
        let Some(book) = stocked.choose(&mut self.rng) else {
            return self.emit(render::skipped("delete_book", "no available books found"));
        };
        let count = quantity(&mut self.rng, self.settings.max_delete_quantity);

        let before = self.library.catalog().index().book_count();
        let line = match self.library.catalog_mut().delete_book(book, count) {
            Ok(outcome) => render::catalog_outcome(&outcome),
            Err(e) => render::error("delete_book", &e),
        };
        let after = self.library.catalog().index().book_count();

        self.emit(line)?;
        self.emit(render::detail(&format!("Index size before delete: {}", before)))?;
        self.emit(render::detail(&format!("Index size after delete: {}", after)))
    }

    fn pick_user(&mut self) -> Option<UserId> {
        self.users.choose(&mut self.rng).copied()
    }

    pub fn borrow_book(&mut self) -> io::Result<()> {
        let Some(user) = self.pick_user() else {
            return self.emit(render::skipped("borrow_book", "no users configured"));
        };
        let count = quantity(&mut self.rng, self.settings.max_borrow_quantity);
        let stocked = self.stocked_books();
        let Some(book) = stocked.choose(&mut self.rng) else {
            return self.emit(render::skipped("borrow_book", "no available books found"));
        };

        let line = match self.library.borrow(book, user, count) {
            Ok(outcome) => render::lending_outcome(&outcome),
            Err(e) => render::error("borrow_book", &e),
        };
        self.emit(line)
    }

    pub fn borrow_book_non_existent(&mut self) -> io::Result<()> {
        let Some(user) = self.pick_user() else {
            return self.emit(render::skipped("borrow_book_non_existent", "no users configured"));
        };
        let count = quantity(&mut self.rng, self.settings.max_borrow_quantity);
        let missing: Vec<Book> = self
            .catalog_source
            .iter()
            .filter(|book| !self.library.catalog().contains(book))
            .cloned()
            .collect();
        let Some(book) = missing.choose(&mut self.rng) else {
            return self.emit(render::skipped(
                "borrow_book_non_existent",
                "every seed book is in the catalog",
            ));
        };

        let line = match self.library.borrow(book, user, count) {
            Ok(outcome) => render::lending_outcome(&outcome),
            Err(e) => render::error("borrow_book_non_existent", &e),
        };
        self.emit(line)
    }

    pub fn return_book(&mut self) -> io::Result<()> {
        let active = self.library.active_borrowers();
        let Some(&user) = active.choose(&mut self.rng) else {
            return self.emit(render::skipped("return_book", "no active borrowers found"));
        };
        let count = quantity(&mut self.rng, self.settings.max_return_quantity);
        let held: Vec<Book> = self.library.user_borrowed_books(user).into_keys().collect();
        let Some(book) = held.choose(&mut self.rng) else {
            return self.emit(render::skipped("return_book", "borrower holds no books"));
        };

        let line = match self.library.return_book(book, user, count) {
            Ok(outcome) => render::lending_outcome(&outcome),
            Err(e) => render::error("return_book", &e),
        };
        self.emit(line)
    }

    pub fn find_book_by_key(&mut self) -> io::Result<()> {
        let key = match self.rng.random_range(0..3) {
            0 => seed::GENRES
                .choose(&mut self.rng)
                .map(|g| IndexKey::Genre(g.to_string())),
            1 => seed::AUTHORS
                .choose(&mut self.rng)
                .map(|a| IndexKey::Author(a.to_string())),
            _ => seed::YEARS.choose(&mut self.rng).map(|y| IndexKey::Year(*y)),
        };
        let Some(key) = key else {
            return self.emit(render::skipped("find_book_by_key", "no lookup keys"));
        };

        let line = render::lookup(&key, self.library.catalog().get_by_index(&key));
        self.emit(line)
    }

    /// Performs a single action
    pub fn step(&mut self, action: Action) -> io::Result<()> {
        log::debug!("Simulation action: {}", action.name());
        match action {
            Action::AddBook => self.add_book(),
            Action::Borrow => self.borrow_book(),
            Action::BorrowNonExistent => self.borrow_book_non_existent(),
            Action::DeleteBook => self.delete_book(),
            Action::FindByKey => self.find_book_by_key(),
            Action::ReturnBook => self.return_book(),
        }
    }

    /// Picks a random action
    pub fn next_action(&mut self) -> Action {
        Action::ALL[self.rng.random_range(0..Action::ALL.len())]
    }

    /// Stocks the catalog with a random number of seed books
    pub fn pre_add(&mut self) -> io::Result<usize> {
        let low = self.settings.pre_add_min.min(self.settings.pre_add_max);
        let count = self.rng.random_range(low..=self.settings.pre_add_max);
        self.emit(render::banner(&format!(
            "Pre-adding {} books to show functionality",
            count
        )))?;
        for _ in 0..count {
            self.add_book()?;
        }
        Ok(count)
    }

    /// Runs the whole simulation: stocking, random steps, final summary
    pub fn run(&mut self) -> io::Result<()> {
        self.pre_add()?;

        let steps = self.settings.steps;
        self.emit(render::banner(&format!(
            "Making random actions (steps: {})",
            steps
        )))?;
        for _ in 0..steps {
            let action = self.next_action();
            self.step(action)?;
        }

        self.summarize()
    }

    /// Writes the final statistics, rankings and JSON report
    pub fn summarize(&mut self) -> io::Result<()> {
        self.emit(render::banner("Showing final library statistics"))?;

        let stats = self.library.statistics();
        self.emit(render::statistics(&stats))?;

        let titles: Vec<String> = self
            .library
            .most_borrowed_books(self.report_limit)
            .into_iter()
            .map(|(book, _)| book.display_title().to_string())
            .collect();
        self.emit(format!("Most popular books (live, for borrow): {:?}", titles))?;

        let borrowers: Vec<u64> = self
            .library
            .top_borrowers(self.report_limit)
            .into_iter()
            .map(|(user, _)| user.value())
            .collect();
        self.emit(format!("Top borrowers (live): {:?}", borrowers))?;

        self.emit(self.library.to_string())?;
        let report = serde_json::to_string_pretty(&self.library.generate_report())?;
        self.emit(report)
    }
}

#[cfg(test)]
mod tests;
