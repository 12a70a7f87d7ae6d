//! Side channel recording every error a run encounters.

use chrono::{SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

/// Default file name of the error log, placed beside the catalog.
pub const DEFAULT_ERROR_LOG: &str = "errors.log";

/// Argument recorded when the run was started without enough arguments.
pub const NO_ARGUMENT: &str = "NO ARGUMENTS";

/// Receives errors as they happen. Recording is fire-and-forget: a sink
/// must not fail the run.
pub trait ErrorSink {
    fn record(&self, catalog: &Path, argument: &str, error: &CatalogError);
}

/// Appends one line per error to a text file.
///
/// When no explicit path is configured, the log lives next to the catalog
/// the error concerns.
#[derive(Debug, Clone, Default)]
pub struct FileErrorLog {
    path: Option<PathBuf>,
}

impl FileErrorLog {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path_for(&self, catalog: &Path) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => catalog
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .join(DEFAULT_ERROR_LOG),
        }
    }

    fn append(&self, catalog: &Path, argument: &str, error: &CatalogError) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(catalog))?;
        writeln!(
            file,
            "{} | catalog={} | argument={} | {}: {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            catalog.display(),
            argument,
            error.kind(),
            error
        )
    }
}

impl ErrorSink for FileErrorLog {
    fn record(&self, catalog: &Path, argument: &str, error: &CatalogError) {
        if let Err(e) = self.append(catalog, argument, error) {
            log::debug!(
                "Could not write error log {}: {}",
                self.path_for(catalog).display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_log_defaults_to_catalog_directory() {
        let log = FileErrorLog::default();
        assert_eq!(
            log.path_for(Path::new("/data/catalog.txt")),
            PathBuf::from("/data/errors.log")
        );
        assert_eq!(
            log.path_for(Path::new("catalog.txt")),
            PathBuf::from("./errors.log")
        );
    }

    #[test]
    fn test_record_appends_lines() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = temp_dir.path().join("catalog.txt");
        let log = FileErrorLog::default();

        log.record(
            &catalog,
            "BadRecord:OnlyTwo",
            &CatalogError::MalformedBookEntry("bad".to_string()),
        );
        log.record(
            &catalog,
            NO_ARGUMENT,
            &CatalogError::InvalidFileName { suffix: ".txt" },
        );

        let contents = fs::read_to_string(temp_dir.path().join(DEFAULT_ERROR_LOG)).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("argument=BadRecord:OnlyTwo | MalformedBookEntry: bad"));
        assert!(lines[1].contains("argument=NO ARGUMENTS | InvalidFileName"));
    }

    #[test]
    fn test_unwritable_log_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let log = FileErrorLog::new(Some(temp_dir.path().join("missing").join("errors.log")));

        // Must not panic.
        log.record(
            Path::new("catalog.txt"),
            "x",
            &CatalogError::MalformedBookEntry("bad".to_string()),
        );
    }
}
