//! The on-disk catalog file.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::codec;
use crate::error::{CatalogError, Result};
use crate::model::Book;

/// How titles are compared when the catalog is rewritten.
///
/// Sorting is stable under either policy: titles that compare equal keep
/// their relative order, with a newly added book placed after existing ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleOrder {
    /// Plain `str` ordering (uppercase sorts before lowercase).
    #[default]
    CaseSensitive,
    /// Compare lowercased titles.
    CaseInsensitive,
}

impl TitleOrder {
    #[must_use]
    pub fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::CaseSensitive => a.title().cmp(b.title()),
            Self::CaseInsensitive => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
        }
    }
}

impl fmt::Display for TitleOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaseSensitive => write!(f, "case-sensitive"),
            Self::CaseInsensitive => write!(f, "case-insensitive"),
        }
    }
}

impl FromStr for TitleOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "case-sensitive" => Ok(Self::CaseSensitive),
            "case-insensitive" => Ok(Self::CaseInsensitive),
            other => Err(format!(
                "unknown title order '{other}' (expected case-sensitive or case-insensitive)"
            )),
        }
    }
}

/// A catalog line that was skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number in the catalog file.
    pub line_number: usize,
    pub reason: String,
}

/// Outcome of reading the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResult {
    /// Valid records in file order.
    pub books: Vec<Book>,
    pub malformed: Vec<MalformedLine>,
}

impl LoadResult {
    #[must_use]
    pub fn valid_records(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn invalid_records(&self) -> usize {
        self.malformed.len()
    }
}

/// Create an empty catalog at `path` unless a file is already there.
///
/// Returns `true` when a new file was created. An existing file is never
/// truncated.
pub fn create_if_missing(path: &Path) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            log::info!("Created empty catalog at {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Read every record in the catalog.
///
/// Malformed lines are counted and excluded; blank lines are ignored.
pub fn load_all(path: &Path) -> Result<LoadResult> {
    let contents = fs::read_to_string(path)?;
    let mut result = LoadResult::default();

    for (index, line) in contents.lines().enumerate() {
        match codec::parse_line(line) {
            Ok(Some(book)) => result.books.push(book),
            Ok(None) => {}
            Err(CatalogError::MalformedRecord(reason)) => {
                let line_number = index + 1;
                log::warn!(
                    "Skipping malformed record at {}:{}: {}",
                    path.display(),
                    line_number,
                    reason
                );
                result.malformed.push(MalformedLine {
                    line_number,
                    reason,
                });
            }
            Err(e) => return Err(e),
        }
    }

    log::debug!(
        "Loaded {} valid and {} invalid records from {}",
        result.valid_records(),
        result.invalid_records(),
        path.display()
    );
    Ok(result)
}

/// Add `new_book` to `existing`, sort by title and rewrite the catalog.
///
/// Fails with [`CatalogError::DuplicateIsbn`] without touching the file
/// when the ISBN is already catalogued. Returns the records as written.
pub fn append_sort_rewrite(
    path: &Path,
    existing: &[Book],
    new_book: Book,
    order: TitleOrder,
) -> Result<Vec<Book>> {
    if existing.iter().any(|b| b.isbn() == new_book.isbn()) {
        return Err(CatalogError::DuplicateIsbn {
            isbn: new_book.isbn().to_string(),
        });
    }

    let mut books = Vec::with_capacity(existing.len() + 1);
    books.extend_from_slice(existing);
    books.push(new_book);
    books.sort_by(|a, b| order.compare(a, b));

    write_atomically(path, |out| {
        for book in &books {
            writeln!(out, "{}", codec::format(book))?;
        }
        Ok(())
    })?;

    log::info!("Rewrote {} with {} records", path.display(), books.len());
    Ok(books)
}

/// Replace the contents of `path` with whatever `write` produces.
///
/// Output goes to a temporary file in the same directory which is synced
/// and then renamed over `path`. If `write` or any step before the rename
/// fails, `path` keeps its previous contents and the temporary file is
/// removed.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".booktrack-")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }

    // Keep the catalog's permissions rather than the temp file's 0600.
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file().set_permissions(metadata.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
