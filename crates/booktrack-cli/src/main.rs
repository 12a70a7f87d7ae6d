use anyhow::Result;
use booktrack_core::{FileErrorLog, Session, SessionOptions, TitleOrder};
use clap::Parser;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

mod config;
mod logging;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "booktrack", version, about)]
struct Cli {
    /// Catalog file followed by the operation argument
    ///
    /// The catalog must end in `.txt` and is created empty if it does not
    /// exist. The operation argument decides what happens:
    ///
    /// - An ISBN (digits and hyphens, optional trailing X) looks up one book
    /// - `title:author:isbn:copies` adds a book and rewrites the catalog
    ///   sorted by title
    /// - Anything else without a colon searches titles, ignoring case
    ///
    /// Everything after the catalog is taken literally, so options must come
    /// first. Missing or undecodable arguments are reported by the run
    /// itself rather than rejected here.
    #[arg(
        value_name = "CATALOG OPERATION",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<OsString>,

    /// Log level for diagnostics on stderr (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Title ordering used when rewriting the catalog
    #[arg(long, value_name = "case-sensitive|case-insensitive")]
    title_order: Option<TitleOrder>,

    /// Error log file (default: errors.log next to the catalog)
    #[arg(long)]
    error_log: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

impl Cli {
    /// Positional arguments in the order given. Bytes that are not valid
    /// UTF-8 become U+FFFD.
    fn positional(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {e:#}; using defaults");
            Config::default()
        }
    }
    .with_overrides(
        cli.log_level.clone(),
        cli.title_order,
        cli.error_log.clone(),
    );

    if cli.show_config {
        show_config(&config);
        return Ok(());
    }

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("Warning: {e:#}");
    }

    let options = SessionOptions {
        title_order: config.title_order,
    };
    let error_log = FileErrorLog::new(config.error_log);
    let stdout = io::stdout();

    Session::new(options, &error_log, stdout.lock()).run(&cli.positional())?;
    Ok(())
}

fn show_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    println!(
        "File exists: {}\n",
        if config_path.exists() { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  log_level: {}", config.log_level);
    println!("  title_order: {}", config.title_order);
    println!(
        "  error_log: {}",
        config
            .error_log
            .as_ref()
            .map_or_else(|| String::from("<next to catalog>"), |p| p.display().to_string())
    );

    println!("\nPriority: CLI args > ENV vars (BOOKTRACK_*) > Config file > Defaults");
    println!("\nExample config file:\n");
    print!("{}", config::example_config());
}
