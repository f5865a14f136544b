//! Fixed sample data the simulation draws from

use shelfkeeper_core::Book;

/// `(title, author, year, genre, isbn)` rows
pub const BOOKS: &[(&str, &str, i32, &str, &str)] = &[
    ("Pride and Prejudice", "Jane Austen", 1813, "Romance", "978-0141439518"),
    ("Emma", "Jane Austen", 1815, "Romance", "978-0141439587"),
    ("Persuasion", "Jane Austen", 1817, "Romance", "978-0141439686"),
    ("Nineteen Eighty-Four", "George Orwell", 1949, "Dystopia", "978-0451524935"),
    ("Animal Farm", "George Orwell", 1945, "Satire", "978-0451526342"),
    ("Brave New World", "Aldous Huxley", 1932, "Dystopia", "978-0060850524"),
    ("Fahrenheit 451", "Ray Bradbury", 1953, "Dystopia", "978-1451673319"),
    ("The Martian Chronicles", "Ray Bradbury", 1950, "Science Fiction", "978-1451678192"),
    ("Dune", "Frank Herbert", 1965, "Science Fiction", "978-0441172719"),
    ("Foundation", "Isaac Asimov", 1951, "Science Fiction", "978-0553293357"),
    ("I, Robot", "Isaac Asimov", 1950, "Science Fiction", "978-0553382563"),
    ("The Hobbit", "J. R. R. Tolkien", 1937, "Fantasy", "978-0547928227"),
    ("The Fellowship of the Ring", "J. R. R. Tolkien", 1954, "Fantasy", "978-0547928210"),
    ("A Wizard of Earthsea", "Ursula K. Le Guin", 1968, "Fantasy", "978-0547773742"),
    ("The Left Hand of Darkness", "Ursula K. Le Guin", 1969, "Science Fiction", "978-0441478125"),
    ("Crime and Punishment", "Fyodor Dostoevsky", 1866, "Philosophical", "978-0486415871"),
    ("The Brothers Karamazov", "Fyodor Dostoevsky", 1880, "Philosophical", "978-0374528379"),
    ("War and Peace", "Leo Tolstoy", 1869, "Historical", "978-1400079988"),
    ("Anna Karenina", "Leo Tolstoy", 1878, "Romance", "978-0143035008"),
    ("The Master and Margarita", "Mikhail Bulgakov", 1967, "Satire", "978-0141180144"),
    ("One Hundred Years of Solitude", "Gabriel Garcia Marquez", 1967, "Magical Realism", "978-0060883287"),
    ("The Old Man and the Sea", "Ernest Hemingway", 1952, "Literary", "978-0684801223"),
    ("The Great Gatsby", "F. Scott Fitzgerald", 1925, "Literary", "978-0743273565"),
    ("Moby-Dick", "Herman Melville", 1851, "Adventure", "978-1503280786"),
    ("The Count of Monte Cristo", "Alexandre Dumas", 1844, "Adventure", "978-0140449266"),
    ("Frankenstein", "Mary Shelley", 1818, "Gothic", "978-0486282114"),
    ("Dracula", "Bram Stoker", 1897, "Gothic", "978-0486411095"),
    ("The Name of the Rose", "Umberto Eco", 1980, "Mystery", "978-0544176560"),
    ("Murder on the Orient Express", "Agatha Christie", 1934, "Mystery", "978-0062693662"),
    ("And Then There Were None", "Agatha Christie", 1939, "Mystery", "978-0062073488"),
];

/// Authors used for index lookups; a few have no books in [`BOOKS`]
pub const AUTHORS: &[&str] = &[
    "Jane Austen",
    "George Orwell",
    "Aldous Huxley",
    "Ray Bradbury",
    "Frank Herbert",
    "Isaac Asimov",
    "J. R. R. Tolkien",
    "Ursula K. Le Guin",
    "Fyodor Dostoevsky",
    "Leo Tolstoy",
    "Mikhail Bulgakov",
    "Gabriel Garcia Marquez",
    "Ernest Hemingway",
    "F. Scott Fitzgerald",
    "Herman Melville",
    "Alexandre Dumas",
    "Mary Shelley",
    "Bram Stoker",
    "Umberto Eco",
    "Agatha Christie",
    "Virginia Woolf",
    "Franz Kafka",
];

pub const GENRES: &[&str] = &[
    "Romance",
    "Dystopia",
    "Satire",
    "Science Fiction",
    "Fantasy",
    "Philosophical",
    "Historical",
    "Magical Realism",
    "Literary",
    "Adventure",
    "Gothic",
    "Mystery",
    "Poetry",
];

pub const YEARS: &[i32] = &[
    1813, 1815, 1817, 1818, 1844, 1851, 1866, 1869, 1878, 1880, 1897, 1925, 1932, 1934, 1937,
    1939, 1945, 1949, 1950, 1951, 1952, 1953, 1954, 1965, 1967, 1968, 1969, 1980, 2000,
];

/// Materializes [`BOOKS`]
pub fn books() -> Vec<Book> {
    BOOKS
        .iter()
        .map(|&(title, author, year, genre, isbn)| Book::new(title, author, year, genre, isbn))
        .collect()
}
