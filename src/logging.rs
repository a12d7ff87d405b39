// src/logging.rs
// =============================================================================
// Logging setup: turns the --log-level flag into a tracing subscriber.
//
// We use the `tracing` ecosystem:
// - tracing: the macros (debug!, info!, warn!) and spans our code emits
// - tracing-subscriber: collects those events and writes them to stderr
//
// The level string is validated here, before any crawling starts. An
// unknown level is a configuration error, not something to guess around.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

// Initializes the global tracing subscriber from the --log-level flag
//
// Parameters:
//   level: the flag value ("error", "warn", "info", "debug", "trace")
//
// Errors: if the level string is not a known level name.
//
// RUST_LOG takes precedence when set, so `RUST_LOG=doc_mirror=trace` works
// without touching the flag.
pub fn init(level: &str) -> Result<()> {
    // Level implements FromStr and accepts any case ("DEBUG", "debug", ...)
    let level: Level = level
        .parse()
        .map_err(|_| anyhow!("Invalid log level: {}", level))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("doc_mirror={}", level)));

    // Logs go to stderr so they never mix with the report on stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_level() {
        // Only the string validation can be exercised repeatedly; installing
        // the global subscriber twice would panic, so success goes untested here.
        assert!("warp".parse::<Level>().is_err());
        assert!("debug".parse::<Level>().is_ok());
        assert!("WARN".parse::<Level>().is_ok());
    }
}
