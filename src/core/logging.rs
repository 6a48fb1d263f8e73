//! Diagnostic logging on stderr
//!
//! Console results go through the active sink; `tracing` carries the
//! engine's own diagnostics so they never mix with JSON output on stdout.

use anyhow::Result;
use tracing::Level;

pub fn level_for(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(level_for(0, false), Level::WARN);
        assert_eq!(level_for(1, false), Level::DEBUG);
        assert_eq!(level_for(2, false), Level::TRACE);
        assert_eq!(level_for(5, false), Level::TRACE);
        assert_eq!(level_for(3, true), Level::ERROR);
    }
}
