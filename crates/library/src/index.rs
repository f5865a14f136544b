//! Secondary lookup indexes over catalog books
//!
//! A [`KeyedIndex`] groups books into buckets under a key extracted from
//! each book. [`MultiIndex`] owns one keyed index per lookup dimension
//! (author, title, genre, year) plus the primary ISBN map. The catalog
//! keeps it in step with its entries on every mutation; the index itself
//! never tracks quantities, only membership.

use log::debug;
use serde::{Deserialize, Serialize};
use shelfkeeper_core::Book;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

/// The secondary dimensions a book can be looked up by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Author,
    Title,
    Genre,
    Year,
}

impl IndexKind {
    /// All dimensions, in the order they are maintained
    pub const ALL: [IndexKind; 4] = [
        IndexKind::Author,
        IndexKind::Title,
        IndexKind::Genre,
        IndexKind::Year,
    ];
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Author => write!(f, "author"),
            IndexKind::Title => write!(f, "title"),
            IndexKind::Genre => write!(f, "genre"),
            IndexKind::Year => write!(f, "year"),
        }
    }
}

/// A lookup key for one dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKey {
    Author(String),
    Title(String),
    Genre(String),
    Year(i32),
}

impl IndexKey {
    /// The dimension this key belongs to
    pub fn kind(&self) -> IndexKind {
        match self {
            IndexKey::Author(_) => IndexKind::Author,
            IndexKey::Title(_) => IndexKind::Title,
            IndexKey::Genre(_) => IndexKind::Genre,
            IndexKey::Year(_) => IndexKind::Year,
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Author(v) | IndexKey::Title(v) | IndexKey::Genre(v) => {
                write!(f, "{} '{}'", self.kind(), v)
            }
            IndexKey::Year(y) => write!(f, "year '{}'", y),
        }
    }
}

/// Buckets of books grouped by a key pulled out of each book.
///
/// Books whose key is absent are ignored. A bucket never holds the same
/// book twice and is dropped as soon as it becomes empty.
#[derive(Clone)]
pub struct KeyedIndex<K> {
    extract: fn(&Book) -> Option<K>,
    buckets: HashMap<K, Vec<Book>>,
}

impl<K> KeyedIndex<K>
where
    K: Eq + Hash,
{
    /// Creates an empty index keyed by `extract`
    pub fn new(extract: fn(&Book) -> Option<K>) -> Self {
        Self {
            extract,
            buckets: HashMap::new(),
        }
    }

    /// Adds a book to the bucket for its key
    pub fn add(&mut self, book: &Book) {
        if let Some(key) = (self.extract)(book) {
            let bucket = self.buckets.entry(key).or_default();
            if !bucket.contains(book) {
                bucket.push(book.clone());
            }
        }
    }

    /// Removes a book from the bucket for its key; absent books are ignored
    pub fn remove(&mut self, book: &Book) {
        let Some(key) = (self.extract)(book) else {
            return;
        };
        if let Some(bucket) = self.buckets.get_mut(&key) {
            bucket.retain(|b| b != book);
            if bucket.is_empty() {
                self.buckets.remove(&key);
            }
        }
    }

    /// Returns the books stored under `key`, empty if the key is unknown
    pub fn search<Q>(&self, key: &Q) -> &[Book]
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drops every bucket
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Number of distinct keys
    pub fn count(&self) -> usize {
        self.buckets.len()
    }

    /// Every book across all buckets
    pub fn all_books(&self) -> Vec<Book> {
        self.buckets.values().flatten().cloned().collect()
    }

    /// Returns true if no bucket exists
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<K> fmt::Debug for KeyedIndex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedIndex")
            .field("keys", &self.buckets.len())
            .finish()
    }
}

/// ISBN map plus one [`KeyedIndex`] per dimension
#[derive(Debug, Clone)]
pub struct MultiIndex {
    by_isbn: BTreeMap<String, Book>,
    by_author: KeyedIndex<String>,
    by_title: KeyedIndex<String>,
    by_genre: KeyedIndex<String>,
    by_year: KeyedIndex<i32>,
}

impl Default for MultiIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiIndex {
    pub fn new() -> Self {
        Self {
            by_isbn: BTreeMap::new(),
            by_author: KeyedIndex::new(|b| b.author().map(str::to_string)),
            by_title: KeyedIndex::new(|b| b.title().map(str::to_string)),
            by_genre: KeyedIndex::new(|b| b.genre().map(str::to_string)),
            by_year: KeyedIndex::new(Book::year),
        }
    }

    /// Indexes a book under all dimensions.
    ///
    /// No-op unless all five fields are present.
    pub fn add(&mut self, book: &Book) {
        let Some(isbn) = book.isbn().filter(|_| book.is_complete()) else {
            debug!("Skipping index insert for incomplete book: {}", book);
            return;
        };

        self.by_isbn.insert(isbn.to_string(), book.clone());
        self.by_author.add(book);
        self.by_title.add(book);
        self.by_genre.add(book);
        self.by_year.add(book);
        debug!("Indexed ISBN {}", isbn);
    }

    /// Removes a book from every dimension; unknown books are ignored
    pub fn remove(&mut self, book: &Book) {
        if let Some(isbn) = book.isbn() {
            if self.by_isbn.remove(isbn).is_some() {
                debug!("Unindexed ISBN {}", isbn);
            }
        }
        self.by_author.remove(book);
        self.by_title.remove(book);
        self.by_genre.remove(book);
        self.by_year.remove(book);
    }

    /// Looks up books by a dimension key; unknown keys yield an empty slice
    pub fn lookup(&self, key: &IndexKey) -> &[Book] {
        match key {
            IndexKey::Author(author) => self.by_author(author),
            IndexKey::Title(title) => self.by_title(title),
            IndexKey::Genre(genre) => self.by_genre(genre),
            IndexKey::Year(year) => self.by_year(*year),
        }
    }

    pub fn by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.by_isbn.get(isbn)
    }

    pub fn by_author(&self, author: &str) -> &[Book] {
        self.by_author.search(author)
    }

    pub fn by_title(&self, title: &str) -> &[Book] {
        self.by_title.search(title)
    }

    pub fn by_genre(&self, genre: &str) -> &[Book] {
        self.by_genre.search(genre)
    }

    pub fn by_year(&self, year: i32) -> &[Book] {
        self.by_year.search(&year)
    }

    /// Empties every dimension and the ISBN map
    pub fn clear(&mut self) {
        self.by_isbn.clear();
        self.by_author.clear();
        self.by_title.clear();
        self.by_genre.clear();
        self.by_year.clear();
    }

    /// Distinct key count for one dimension
    pub fn count(&self, kind: IndexKind) -> usize {
        match kind {
            IndexKind::Author => self.by_author.count(),
            IndexKind::Title => self.by_title.count(),
            IndexKind::Genre => self.by_genre.count(),
            IndexKind::Year => self.by_year.count(),
        }
    }

    pub fn author_count(&self) -> usize {
        self.count(IndexKind::Author)
    }

    pub fn title_count(&self) -> usize {
        self.count(IndexKind::Title)
    }

    pub fn genre_count(&self) -> usize {
        self.count(IndexKind::Genre)
    }

    pub fn year_count(&self) -> usize {
        self.count(IndexKind::Year)
    }

    /// Number of indexed books (distinct ISBNs)
    pub fn book_count(&self) -> usize {
        self.by_isbn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_isbn.is_empty()
    }

    /// Indexed books ordered by ISBN
    pub fn all_books(&self) -> Vec<Book> {
        self.by_isbn.values().cloned().collect()
    }

    /// Iterates indexed books ordered by ISBN
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.by_isbn.values()
    }
}

impl fmt::Display for MultiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MultiIndex({} books, {} authors, {} titles, {} genres, {} years)",
            self.book_count(),
            self.author_count(),
            self.title_count(),
            self.genre_count(),
            self.year_count()
        )
    }
}
