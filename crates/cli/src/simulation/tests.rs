use super::*;
use shelfkeeper_library::LendingLedger;

fn settings(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

fn simulator(seed: u64) -> Simulator<Vec<u8>> {
    Simulator::new("Simulation Library", &settings(seed), 3, Vec::new())
}

fn transcript(sim: Simulator<Vec<u8>>) -> String {
    let bytes = sim.into_output();
    console::strip_ansi_codes(&String::from_utf8(bytes).unwrap()).into_owned()
}

/// Catalog, index and ledger agree with each other
fn assert_consistent(library: &LendingLedger) {
    let catalog = library.catalog();
    assert_eq!(catalog.index().book_count(), catalog.count());
    for entry in catalog.entries() {
        assert!(entry.quantity > 0);
        assert_eq!(
            catalog.index().by_isbn(entry.book.isbn().unwrap()),
            Some(&entry.book)
        );
    }

    let stats = library.statistics();
    let loaned: u64 = library
        .active_borrowers()
        .iter()
        .map(|user| library.user_borrowed_books(*user).values().sum::<u64>())
        .sum();
    assert_eq!(stats.outstanding(), loaned);
    assert_eq!(stats.active_borrowers, library.active_borrowers().len() as u64);
    assert!(stats.unique_borrowers >= stats.active_borrowers);
    for user in library.active_borrowers() {
        assert!(!library.user_borrowed_books(user).is_empty());
    }
}

#[test]
fn test_users_are_distinct_and_in_range() {
    let sim = simulator(7);
    let users = sim.users();
    assert_eq!(users.len(), 50);
    let mut ids: Vec<u64> = users.iter().map(|u| u.value()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
    assert!(ids.iter().all(|id| (1..=10_000).contains(id)));
}

#[test]
fn test_pre_add_within_bounds() {
    let mut sim = simulator(11);
    let added = sim.pre_add().unwrap();
    assert!((30..=60).contains(&added));
    assert!(sim.library().catalog().total_quantity() >= added as u64);
    assert_consistent(sim.library());
}

#[test]
fn test_invariants_hold_after_every_step() {
    for seed in [1, 2, 3, 42] {
        let mut sim = simulator(seed);
        sim.pre_add().unwrap();
        for _ in 0..300 {
            let action = sim.next_action();
            sim.step(action).unwrap();
            assert_consistent(sim.library());
        }
    }
}

#[test]
fn test_actions_on_empty_library_are_skipped() {
    let mut sim = simulator(5);
    for action in [Action::DeleteBook, Action::ReturnBook, Action::Borrow, Action::FindByKey] {
        sim.step(action).unwrap();
        assert_consistent(sim.library());
    }
    assert!(sim.library().catalog().is_empty());

    let output = transcript(sim);
    assert!(output.contains("Cannot perform delete_book: no available books found"));
    assert!(output.contains("Cannot perform return_book: no active borrowers found"));
    assert!(output.contains("Cannot perform borrow_book: no available books found"));
    assert!(output.contains("Found for "));
}

#[test]
fn test_every_action_runs() {
    let mut sim = simulator(6);
    sim.pre_add().unwrap();
    for action in Action::ALL {
        sim.step(action).unwrap();
        assert_consistent(sim.library());
    }
}

#[test]
fn test_borrow_non_existent_reports_unavailable() {
    let mut sim = simulator(9);
    sim.step(Action::BorrowNonExistent).unwrap();
    assert_eq!(sim.library().statistics().total_borrowed, 0);
    assert!(transcript(sim).contains("not available"));
}

#[test]
fn test_same_seed_same_transcript() {
    let mut first = simulator(2024);
    let mut second = simulator(2024);
    first.run().unwrap();
    second.run().unwrap();
    assert_eq!(first.seed(), 2024);
    assert_eq!(transcript(first), transcript(second));
}

#[test]
fn test_run_ends_with_report() {
    let mut sim = simulator(3);
    sim.run().unwrap();
    let output = transcript(sim);

    assert!(output.contains("Pre-adding"));
    assert!(output.contains("Making random actions (steps: 20)"));
    assert!(output.contains("Total borrowed:"));
    assert!(output.contains("Top borrowers (live):"));
    assert!(output.contains("\"library_name\": \"Simulation Library\""));
}

#[test]
fn test_small_id_space_limits_pool() {
    let config = SimulationConfig {
        seed: Some(1),
        user_pool_size: 50,
        max_user_id: 4,
        ..SimulationConfig::default()
    };
    let sim = Simulator::new("Tiny", &config, 3, Vec::new());
    assert_eq!(sim.users().len(), 4);
}
