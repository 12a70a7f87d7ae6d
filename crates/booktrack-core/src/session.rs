//! One run of the tracker, from raw arguments to the statistics footer.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::classify::{classify, Operation};
use crate::codec::{self, RECORD_FORMAT_HINT};
use crate::error::{CatalogError, Result};
use crate::error_log::{ErrorSink, NO_ARGUMENT};
use crate::model::Book;
use crate::query;
use crate::report::{self, NO_MATCHES};
use crate::store::{self, TitleOrder};

/// Required suffix of the catalog file name.
pub const CATALOG_SUFFIX: &str = ".txt";

pub const USAGE: &str = "Usage: booktrack <catalogFile.txt> <operationArgument>";

/// Counters accumulated over a run and printed once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub valid_records: usize,
    pub search_results: usize,
    pub books_added: usize,
    pub errors: usize,
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "----- Statistics -----")?;
        writeln!(f, "Valid records processed: {}", self.valid_records)?;
        writeln!(f, "Search results found: {}", self.search_results)?;
        writeln!(f, "Books added: {}", self.books_added)?;
        writeln!(f, "Errors encountered: {}", self.errors)?;
        writeln!(f, "----------------------")?;
        writeln!(f, "Thank you for using the Library Book Tracker.")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub title_order: TitleOrder,
}

/// Drives a single run and writes everything the user sees to `out`.
pub struct Session<'a, W: Write, S: ErrorSink + ?Sized> {
    options: SessionOptions,
    sink: &'a S,
    out: W,
    stats: RunStatistics,
    catalog: Option<PathBuf>,
    argument: Option<String>,
}

impl<W: Write, S: ErrorSink + ?Sized> fmt::Debug for Session<'_, W, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .field("stats", &self.stats)
            .field("catalog", &self.catalog)
            .field("argument", &self.argument)
            .finish_non_exhaustive()
    }
}

impl<'a, W: Write, S: ErrorSink + ?Sized> Session<'a, W, S> {
    pub fn new(options: SessionOptions, sink: &'a S, out: W) -> Self {
        Self {
            options,
            sink,
            out,
            stats: RunStatistics::default(),
            catalog: None,
            argument: None,
        }
    }

    /// Run with `args` (catalog path, operation argument).
    ///
    /// Every failure is reported and counted; the statistics block is
    /// written on every path. The only error returned is a failure to write
    /// to `out`.
    pub fn run(mut self, args: &[String]) -> io::Result<RunStatistics> {
        if let Err(e) = self.execute(args) {
            self.fail(&e)?;
        }
        write!(self.out, "{}", self.stats)?;
        self.out.flush()?;
        Ok(self.stats)
    }

    fn execute(&mut self, args: &[String]) -> Result<()> {
        let [catalog, argument, rest @ ..] = args else {
            return Err(CatalogError::InsufficientArguments {
                usage: USAGE.to_string(),
            });
        };
        if !rest.is_empty() {
            log::debug!("Ignoring {} extra argument(s)", rest.len());
        }

        self.catalog = Some(PathBuf::from(catalog));
        self.argument = Some(argument.clone());

        if !catalog.ends_with(CATALOG_SUFFIX) {
            return Err(CatalogError::InvalidFileName {
                suffix: CATALOG_SUFFIX,
            });
        }

        let path = Path::new(catalog);
        store::create_if_missing(path)?;
        let loaded = store::load_all(path)?;
        self.stats.valid_records = loaded.valid_records();
        for line in &loaded.malformed {
            self.stats.errors += 1;
            self.sink.record(
                path,
                argument,
                &CatalogError::MalformedRecord(format!(
                    "line {}: {}",
                    line.line_number, line.reason
                )),
            );
        }

        let operation = classify(argument);
        log::info!("{:?} '{}' against {}", operation, argument, path.display());

        match operation {
            Operation::IsbnLookup => match query::find_by_isbn(&loaded.books, argument) {
                Some(book) => self.show(&[book])?,
                None => self.show(&[])?,
            },
            Operation::AddRecord => match self.add(path, &loaded.books, argument) {
                Err(e) if e.is_user_error() => self.fail(&e)?,
                other => other?,
            },
            Operation::TitleSearch => {
                let results = query::find_by_title_keyword(&loaded.books, argument);
                self.show(&results)?;
            }
            Operation::Malformed => {
                self.fail(&CatalogError::MalformedBookEntry(RECORD_FORMAT_HINT.to_string()))?;
            }
        }

        Ok(())
    }

    fn add(&mut self, path: &Path, existing: &[Book], argument: &str) -> Result<()> {
        let book = codec::parse_add_argument(argument)?;
        store::append_sort_rewrite(path, existing, book.clone(), self.options.title_order)?;
        report::write_books(&mut self.out, &[&book])?;
        self.stats.books_added = 1;
        Ok(())
    }

    /// Print search or lookup results and record how many there were.
    fn show(&mut self, books: &[&Book]) -> io::Result<()> {
        self.stats.search_results = books.len();
        if books.is_empty() {
            writeln!(self.out, "{NO_MATCHES}")
        } else {
            report::write_books(&mut self.out, books)
        }
    }

    fn fail(&mut self, error: &CatalogError) -> io::Result<()> {
        self.stats.errors += 1;
        if error.is_user_error() {
            log::warn!("{}", error);
            writeln!(self.out, "Error: {error}")?;
        } else {
            log::error!("{}", error);
            writeln!(self.out, "Unexpected error: {error}")?;
        }

        let catalog = self.catalog.as_deref().unwrap_or_else(|| Path::new("."));
        let argument = self.argument.as_deref().unwrap_or(NO_ARGUMENT);
        self.sink.record(catalog, argument, error);
        Ok(())
    }
}
