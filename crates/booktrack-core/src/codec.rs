//! Conversion between catalog lines and [`Book`] values.
//!
//! A record is `title:author:isbn:copies`. Lines read from the catalog and
//! records submitted on the command line go through the same validation.

use crate::error::{CatalogError, Result};
use crate::model::Book;

/// Field delimiter within a catalog line.
pub const DELIMITER: char = ':';

/// Number of fields in a record.
pub const FIELD_COUNT: usize = 4;

/// Expected shape of a new book record, shown to the user on bad input.
pub const RECORD_FORMAT_HINT: &str = "New book record must be: title:author:isbn:copies";

/// Parse one catalog line.
///
/// Blank and whitespace-only lines are not records and yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Book>> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    parse_record(line)
        .map(Some)
        .map_err(CatalogError::MalformedRecord)
}

/// Parse a new record given as the operation argument.
pub fn parse_add_argument(arg: &str) -> Result<Book> {
    parse_record(arg)
        .map_err(|reason| CatalogError::MalformedBookEntry(format!("{RECORD_FORMAT_HINT} ({reason})")))
}

/// Serialize a book as a catalog line, without the trailing newline.
#[must_use]
pub fn format(book: &Book) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
        book.title(),
        book.author(),
        book.isbn(),
        book.copies()
    )
}

fn parse_record(text: &str) -> std::result::Result<Book, String> {
    let fields: Vec<&str> = text.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        ));
    }

    let copies_field = fields[3].trim();
    let copies = copies_field.parse::<u32>().map_err(|_| {
        format!("copies must be a non-negative integer, found '{copies_field}'")
    })?;

    Book::new(fields[0], fields[1], fields[2], copies).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book::new("Dune", "Frank Herbert", "9780441", 3).unwrap()
    }

    #[test]
    fn test_parse_line() {
        let book = parse_line("Dune:Frank Herbert:9780441:3").unwrap();
        assert_eq!(book, Some(dune()));
    }

    #[test]
    fn test_parse_line_trims_fields() {
        let book = parse_line(" Dune : Frank Herbert :9780441: 3 ").unwrap();
        assert_eq!(book, Some(dune()));
    }

    #[test]
    fn test_blank_line_is_not_a_record() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   \t").unwrap(), None);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_line("Dune:Herbert:3").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord(_)));
        assert!(err.to_string().contains("expected 4 fields, found 3"));

        assert!(parse_line("Dune:Herbert:9780441:3:").is_err());
    }

    #[test]
    fn test_negative_copies_rejected() {
        let err = parse_line("Dune:Herbert:9780441:-1").unwrap_err();
        assert!(err.to_string().contains("non-negative integer"));
    }

    #[test]
    fn test_non_numeric_copies_rejected() {
        assert!(parse_line("Dune:Herbert:9780441:three").is_err());
        assert!(parse_line("Dune:Herbert:9780441:").is_err());
    }

    #[test]
    fn test_empty_text_field_rejected() {
        let err = parse_line("Dune::9780441:3").unwrap_err();
        assert!(err.to_string().contains("author must not be empty"));
    }

    #[test]
    fn test_add_argument_uses_same_rules() {
        assert_eq!(parse_add_argument("Dune:Frank Herbert:9780441:3").unwrap(), dune());

        let err = parse_add_argument("BadRecord:OnlyTwo").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedBookEntry(_)));
        assert!(err.to_string().starts_with(RECORD_FORMAT_HINT));
    }

    #[test]
    fn test_format() {
        assert_eq!(format(&dune()), "Dune:Frank Herbert:9780441:3");
    }

    #[test]
    fn test_format_then_parse_is_identity() {
        let books = [
            dune(),
            Book::new("The Left Hand of Darkness", "Le Guin", "0-441-47812-3", 0).unwrap(),
            Book::new("Solaris", "Lem", "080442957X", u32::MAX).unwrap(),
        ];
        for book in books {
            assert_eq!(parse_line(&format(&book)).unwrap(), Some(book));
        }
    }
}
