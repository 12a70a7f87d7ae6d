//! Console rendering of books.

use std::io::{self, Write};

use crate::model::Book;

const TITLE_WIDTH: usize = 30;
const AUTHOR_WIDTH: usize = 20;
const ISBN_WIDTH: usize = 15;
const COPIES_WIDTH: usize = 5;
const DIVIDER_WIDTH: usize = 74;

pub const NO_MATCHES: &str = "No matching books found.";

/// Write a header, a divider and one fixed-width row per book.
pub fn write_books<W: Write + ?Sized>(out: &mut W, books: &[&Book]) -> io::Result<()> {
    writeln!(
        out,
        "{:<TITLE_WIDTH$} {:<AUTHOR_WIDTH$} {:<ISBN_WIDTH$} {:>COPIES_WIDTH$}",
        "Title", "Author", "ISBN", "Copies"
    )?;
    writeln!(out, "{}", "-".repeat(DIVIDER_WIDTH))?;
    for book in books {
        writeln!(
            out,
            "{:<TITLE_WIDTH$} {:<AUTHOR_WIDTH$} {:<ISBN_WIDTH$} {:>COPIES_WIDTH$}",
            fit(book.title(), TITLE_WIDTH),
            fit(book.author(), AUTHOR_WIDTH),
            fit(book.isbn(), ISBN_WIDTH),
            book.copies()
        )?;
    }
    Ok(())
}

fn fit(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(books: &[&Book]) -> String {
        let mut out = Vec::new();
        write_books(&mut out, books).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_and_row_layout() {
        let dune = Book::new("Dune", "Herbert", "9780441", 3).unwrap();
        let output = render(&[&dune]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            format!("{:<30} {:<20} {:<15} {:>5}", "Title", "Author", "ISBN", "Copies")
        );
        assert_eq!(lines[1], "-".repeat(74));
        assert_eq!(
            lines[2],
            format!("{:<30} {:<20} {:<15} {:>5}", "Dune", "Herbert", "9780441", 3)
        );
    }

    #[test]
    fn test_long_fields_are_truncated() {
        let long = Book::new(
            "A Very Long Title That Will Not Fit The Column",
            "Somebody With A Long Name",
            "978-0-00-000000-0",
            12345,
        )
        .unwrap();
        let output = render(&[&long]);
        let row = output.lines().nth(2).unwrap();

        assert_eq!(row.chars().count(), 30 + 1 + 20 + 1 + 15 + 1 + 5);
        assert!(row.starts_with("A Very Long Title That Will No "));
        assert!(row.ends_with("12345"));
    }

    #[test]
    fn test_fit_respects_char_boundaries() {
        assert_eq!(fit("Ñandú", 3), "Ñan");
        assert_eq!(fit("Emma", 10), "Emma");
    }
}
