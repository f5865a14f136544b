//! Benchmarks for catalog and lending operations
//!
//! Run with: cargo bench --package shelfkeeper-library

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shelfkeeper_core::{Book, UserId};
use shelfkeeper_library::{Catalog, IndexKey, LendingLedger};
use std::hint::black_box;

fn make_books(count: usize) -> Vec<Book> {
    (0..count)
        .map(|i| {
            Book::new(
                format!("Title {}", i),
                format!("Author {}", i % 50),
                1900 + (i % 120) as i32,
                format!("Genre {}", i % 10),
                format!("isbn-{:06}", i),
            )
        })
        .collect()
}

fn stocked_catalog(books: &[Book]) -> Catalog {
    let mut catalog = Catalog::new();
    for book in books {
        let _ = catalog.add_book(book, 5);
    }
    catalog
}

fn bench_add_books(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_add");
    for size in [100usize, 1_000] {
        let books = make_books(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &books, |b, books| {
            b.iter(|| black_box(stocked_catalog(books)));
        });
    }
    group.finish();
}

fn bench_index_lookup(c: &mut Criterion) {
    let catalog = stocked_catalog(&make_books(1_000));
    let key = IndexKey::Author("Author 7".to_string());

    c.bench_function("catalog_lookup_author", |b| {
        b.iter(|| black_box(catalog.get_by_index(black_box(&key)).len()));
    });

    c.bench_function("catalog_lookup_isbn", |b| {
        b.iter(|| black_box(catalog.index().by_isbn(black_box("isbn-000500"))));
    });
}

fn bench_borrow_return(c: &mut Criterion) {
    let books = make_books(500);
    let mut ledger = LendingLedger::with_catalog("Bench", stocked_catalog(&books));
    let user = UserId::new(1);

    c.bench_function("ledger_borrow_return", |b| {
        b.iter(|| {
            for book in books.iter().take(50) {
                let _ = ledger.borrow(book, user, 2);
                let _ = ledger.return_book(book, user, 2);
            }
        });
    });
}

criterion_group!(benches, bench_add_books, bench_index_lookup, bench_borrow_return);
criterion_main!(benches);
