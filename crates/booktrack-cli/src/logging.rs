use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use twyg::{LogLevel, OptsBuilder, Output};

/// Install the twyg logger on stderr at `level`.
///
/// Stdout is reserved for the catalog report.
pub fn init(level: &str) -> Result<()> {
    let filter = parse_level(level)?;

    let opts = OptsBuilder::new()
        .coloured(true)
        .output(Output::Stderr)
        .level(twyg_level(filter))
        .build()
        .map_err(|e| anyhow!("Invalid logger options: {e}"))?;
    twyg::setup(opts).map_err(|e| anyhow!("Failed to set up logger: {e}"))?;

    log::set_max_level(filter);
    Ok(())
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .with_context(|| format!("Unknown log level '{level}'"))
}

fn twyg_level(filter: LevelFilter) -> LogLevel {
    match filter {
        LevelFilter::Trace => LogLevel::Trace,
        LevelFilter::Debug => LogLevel::Debug,
        LevelFilter::Info => LogLevel::Info,
        LevelFilter::Warn => LogLevel::Warn,
        LevelFilter::Off | LevelFilter::Error => LogLevel::Error,
    }
}
