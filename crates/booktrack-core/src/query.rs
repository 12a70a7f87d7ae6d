//! Lookups over an in-memory record set.

use crate::model::Book;

/// First book whose ISBN equals `isbn` exactly.
#[must_use]
pub fn find_by_isbn<'a>(books: &'a [Book], isbn: &str) -> Option<&'a Book> {
    let isbn = isbn.trim();
    books.iter().find(|b| b.isbn() == isbn)
}

/// All books whose title contains `keyword`, ignoring case, in catalog
/// order.
#[must_use]
pub fn find_by_title_keyword<'a>(books: &'a [Book], keyword: &str) -> Vec<&'a Book> {
    let needle = keyword.trim().to_lowercase();
    books
        .iter()
        .filter(|b| b.title().to_lowercase().contains(&needle))
        .collect()
}
