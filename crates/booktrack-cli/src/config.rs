use anyhow::{Context, Result};
use booktrack_core::TitleOrder;
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for booktrack.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (BOOKTRACK_* prefix)
/// 3. Config file (~/.config/booktrack/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level for diagnostics on stderr.
    ///
    /// Can be set via:
    /// - CLI: --log-level debug
    /// - ENV: BOOKTRACK_LOG_LEVEL
    /// - Config: log_level = "debug"
    /// - Default: warn
    pub log_level: String,

    /// Title comparison used when the catalog is rewritten after an add.
    ///
    /// Can be set via:
    /// - CLI: --title-order case-insensitive
    /// - ENV: BOOKTRACK_TITLE_ORDER
    /// - Config: title_order = "case-insensitive"
    /// - Default: case-sensitive
    pub title_order: TitleOrder,

    /// Where errors are recorded. When unset, `errors.log` next to the
    /// catalog file.
    pub error_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: String::from("warn"),
            title_order: TitleOrder::default(),
            error_log: None,
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and
    /// environment variables with the BOOKTRACK_ prefix.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("booktrack");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        title_order: Option<TitleOrder>,
        error_log: Option<PathBuf>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(order) = title_order {
            self.title_order = order;
        }
        if error_log.is_some() {
            self.error_log = error_log;
        }
        self
    }
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/booktrack/config.toml
/// - macOS: ~/Library/Application Support/booktrack/config.toml
/// - Windows: %APPDATA%\booktrack\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("booktrack")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Booktrack Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (BOOKTRACK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Diagnostics written to stderr: off, error, warn, info, debug, trace
#log_level = "warn"

# How titles are ordered when a book is added and the catalog rewritten:
# "case-sensitive" (uppercase before lowercase) or "case-insensitive"
#title_order = "case-sensitive"

# Error log file. Defaults to errors.log next to the catalog file.
#error_log = "/path/to/errors.log"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.title_order, TitleOrder::CaseSensitive);
        assert!(config.error_log.is_none());
    }

    #[test]
    fn test_config_load_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from(&temp_dir.path().join("missing.toml"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "title_order = \"case-insensitive\"\nerror_log = \"/tmp/booktrack-errors.log\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.title_order, TitleOrder::CaseInsensitive);
        assert_eq!(
            config.error_log,
            Some(PathBuf::from("/tmp/booktrack-errors.log"))
        );
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = Config::default().with_overrides(
            Some("debug".to_string()),
            Some(TitleOrder::CaseInsensitive),
            None,
        );
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.title_order, TitleOrder::CaseInsensitive);
        assert!(config.error_log.is_none());
    }
}
