//! Book and borrower identity models

use crate::types::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a library user (borrower)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    /// Wraps a raw numeric user id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names of the five descriptive fields of a [`Book`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookField {
    Title,
    Author,
    Year,
    Genre,
    Isbn,
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookField::Title => write!(f, "title"),
            BookField::Author => write!(f, "author"),
            BookField::Year => write!(f, "year"),
            BookField::Genre => write!(f, "genre"),
            BookField::Isbn => write!(f, "isbn"),
        }
    }
}

/// An immutable catalog item.
///
/// Every field is optional until the book is validated by a catalog. Two
/// books with identical fields are interchangeable: equality, ordering and
/// hashing cover the full field tuple. Changing a title or author means
/// building a new `Book`, never mutating an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Book {
    title: Option<String>,
    author: Option<String>,
    year: Option<i32>,
    genre: Option<String>,
    isbn: Option<String>,
}

impl Book {
    /// Creates a fully populated book
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            year: Some(year),
            genre: Some(genre.into()),
            isbn: Some(isbn.into()),
        }
    }

    /// Creates a book from individually optional fields
    pub fn from_parts(
        title: Option<String>,
        author: Option<String>,
        year: Option<i32>,
        genre: Option<String>,
        isbn: Option<String>,
    ) -> Self {
        Self {
            title,
            author,
            year,
            genre,
            isbn,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    /// Returns true if `other` carries exactly the same five fields
    pub fn is_identical(&self, other: &Book) -> bool {
        self == other
    }

    /// Returns true if both books carry the same ISBN (absent ISBNs match each other)
    pub fn same_isbn(&self, other: &Book) -> bool {
        self.isbn == other.isbn
    }

    /// Returns true if all five fields are present
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Lists absent fields in validation order: title, author, genre, isbn, year
    pub fn missing_fields(&self) -> Vec<BookField> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push(BookField::Title);
        }
        if self.author.is_none() {
            missing.push(BookField::Author);
        }
        if self.genre.is_none() {
            missing.push(BookField::Genre);
        }
        if self.isbn.is_none() {
            missing.push(BookField::Isbn);
        }
        if self.year.is_none() {
            missing.push(BookField::Year);
        }
        missing
    }

    /// Title for messages, `<untitled>` when absent
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("<untitled>")
    }
}

impl Validator for Book {
    fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .missing_fields()
            .into_iter()
            .map(|field| match field {
                BookField::Year => "year must be an integer".to_string(),
                other => format!("{other} must be a string"),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The book '{}'", self.display_title())?;
        if let Some(author) = &self.author {
            write!(f, ", written by {author}")?;
        }
        if let Some(year) = self.year {
            write!(f, " in {year}")?;
        }
        Ok(())
    }
}
