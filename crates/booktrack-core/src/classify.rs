//! Deciding what the operation argument asks for.
//!
//! A colon separates "this is a record" from "this is plain text": any
//! argument containing one is either a new record or malformed, and is
//! never used as a lookup or search term.

use crate::codec::{self, DELIMITER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    IsbnLookup,
    AddRecord,
    TitleSearch,
    /// Looks like a record attempt but does not have the record shape.
    Malformed,
}

#[must_use]
pub fn classify(arg: &str) -> Operation {
    if !arg.contains(DELIMITER) && is_isbn_token(arg) {
        Operation::IsbnLookup
    } else if codec::parse_add_argument(arg).is_ok() {
        Operation::AddRecord
    } else if arg.contains(DELIMITER) {
        Operation::Malformed
    } else {
        Operation::TitleSearch
    }
}

/// ASCII digits and hyphens, at least one digit, optionally ending in an
/// `X` check character.
#[must_use]
pub fn is_isbn_token(arg: &str) -> bool {
    let token = arg.trim();
    let body = token.strip_suffix(['X', 'x']).unwrap_or(token);

    body.bytes().any(|b| b.is_ascii_digit())
        && body.bytes().all(|b| b.is_ascii_digit() || b == b'-')
}
