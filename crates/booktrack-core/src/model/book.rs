use std::fmt;
use thiserror::Error;

/// Characters a text field may never contain: the record delimiter and
/// line breaks.
const RESERVED: [char; 3] = [':', '\n', '\r'];

/// Why a field value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must not contain ':' or line breaks")]
    Reserved(&'static str),
}

/// One catalog entry.
///
/// Text fields are stored trimmed and never contain the record delimiter,
/// so a `Book` always serializes to exactly one catalog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,
    copies: u32,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        copies: u32,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            title: clean("title", title.into())?,
            author: clean("author", author.into())?,
            isbn: clean("isbn", isbn.into())?,
            copies,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    #[must_use]
    pub const fn copies(&self) -> u32 {
        self.copies
    }
}

fn clean(field: &'static str, value: String) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty(field));
    }
    if trimmed.contains(RESERVED) {
        return Err(FieldError::Reserved(field));
    }
    Ok(trimmed.to_string())
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.isbn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new_trims_fields() {
        let book = Book::new("  Dune ", "Herbert", " 9780441", 3).unwrap();
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.isbn(), "9780441");
        assert_eq!(book.copies(), 3);
    }

    #[test]
    fn test_book_rejects_blank_author() {
        let err = Book::new("Dune", "   ", "9780441", 3).unwrap_err();
        assert_eq!(err, FieldError::Empty("author"));
    }

    #[test]
    fn test_book_rejects_delimiter_in_title() {
        let err = Book::new("Dune: Messiah", "Herbert", "9780441", 3).unwrap_err();
        assert_eq!(err, FieldError::Reserved("title"));
    }

    #[test]
    fn test_book_display() {
        let book = Book::new("Dune", "Herbert", "9780441", 3).unwrap();
        assert_eq!(book.to_string(), "Dune by Herbert (9780441)");
    }
}
