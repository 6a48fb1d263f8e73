//! Session context: the immutable target plus extraction limits

use crate::cli::args::Cli;
use crate::core::scope::Scope;
use crate::core::settings::{
    DEFAULT_DELAY, DUMP_ROWS, MAX_COLUMNS, MAX_DELAY, MAX_LENGTH, MAX_ROWS, MAX_TABLES,
    TIMEOUT_MARGIN,
};
use std::time::Duration;
use url::Url;

/// Endpoint, injectable parameter and timing threshold for one session.
#[derive(Debug, Clone)]
pub struct ExtractionTarget {
    pub url: Url,
    pub param: String,
    /// SLEEP duration and detection threshold, in seconds
    pub delay: f64,
    pub max_length: usize,
}

impl ExtractionTarget {
    pub fn new(url: Url, param: impl Into<String>, delay: f64) -> Self {
        Self {
            url,
            param: param.into(),
            delay,
            max_length: MAX_LENGTH,
        }
    }

    /// HTTP timeout, kept above the delay so a slow true answer is not cut off
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.delay + TIMEOUT_MARGIN)
    }
}

/// Ceilings bounding every count loop, plus the dump row cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_tables: usize,
    pub max_columns: usize,
    pub max_rows: usize,
    pub dump_rows: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_tables: MAX_TABLES,
            max_columns: MAX_COLUMNS,
            max_rows: MAX_ROWS,
            dump_rows: DUMP_ROWS,
        }
    }
}

pub struct Context {
    pub target: ExtractionTarget,
    pub limits: Limits,
    pub scope: Scope,
    pub probe_pause: Duration,
    pub op_timeout: Option<Duration>,
    pub quiet: bool,
}

impl Context {
    /// Builds the context once the target URL and delay have been resolved
    /// (from flags or prompts).
    pub fn from_cli(cli: &Cli, target: &str, delay: f64) -> anyhow::Result<Self> {
        let url = Url::parse(target)?;
        let scope = Scope::new(&url)?;

        let mut extraction = ExtractionTarget::new(url, cli.param.clone(), delay);
        extraction.max_length = cli.max_length;

        let limits = Limits {
            max_tables: cli.max_count,
            max_columns: cli.max_count,
            max_rows: cli.max_count,
            dump_rows: cli.dump_rows,
        };

        Ok(Self {
            target: extraction,
            limits,
            scope,
            probe_pause: Duration::from_millis(cli.pause_ms),
            op_timeout: cli.op_timeout.map(Duration::from_secs),
            quiet: cli.quiet,
        })
    }
}

/// Only http:// and https:// targets are accepted.
pub fn has_http_scheme(target: &str) -> bool {
    target.trim().starts_with("http")
}

/// Parses a delay in seconds; `None` for non-numeric input and for values
/// outside `(0, MAX_DELAY]`.
pub fn parse_delay(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| *d > 0.0 && *d <= MAX_DELAY)
}

/// [`parse_delay`] with the session default as fallback.
pub fn delay_or_default(raw: &str) -> (f64, bool) {
    match parse_delay(raw) {
        Some(d) => (d, true),
        None => (DEFAULT_DELAY, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_delay() {
        assert_eq!(parse_delay("2.5"), Some(2.5));
        assert_eq!(parse_delay(" 3 "), Some(3.0));
        assert_eq!(parse_delay("abc"), None);
        assert_eq!(parse_delay("-1"), None);
        assert_eq!(parse_delay("NaN"), None);
        assert_eq!(parse_delay("inf"), None);
        assert_eq!(parse_delay("300"), Some(MAX_DELAY));
        assert_eq!(parse_delay("300.5"), None);
        assert_eq!(delay_or_default("oops"), (DEFAULT_DELAY, false));
    }

    #[test]
    fn test_huge_delay_falls_back_to_default() {
        let (delay, valid) = delay_or_default("1e20");
        assert_eq!((delay, valid), (DEFAULT_DELAY, false));

        let url = Url::parse("http://localhost/a.php").unwrap();
        let target = ExtractionTarget::new(url, "artist", delay);
        assert_eq!(target.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_http_scheme() {
        assert!(has_http_scheme("http://testphp.vulnweb.com/artists.php"));
        assert!(has_http_scheme("https://example.com"));
        assert!(!has_http_scheme("ftp://example.com"));
        assert!(!has_http_scheme("example.com"));
    }

    #[test]
    fn test_timeout_exceeds_delay() {
        let url = Url::parse("http://localhost/a.php").unwrap();
        let target = ExtractionTarget::new(url, "artist", 2.0);
        assert_eq!(target.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_context_from_cli() {
        let cli = Cli::parse_from(["hourglass", "--max-count", "10", "--dump-rows", "5"]);
        let ctx = Context::from_cli(&cli, "http://localhost/artists.php", 1.5).unwrap();

        assert_eq!(ctx.target.param, "artist");
        assert_eq!(ctx.target.delay, 1.5);
        assert_eq!(ctx.target.max_length, MAX_LENGTH);
        assert_eq!(ctx.limits.max_tables, 10);
        assert_eq!(ctx.limits.max_rows, 10);
        assert_eq!(ctx.limits.dump_rows, 5);
        assert!(ctx.op_timeout.is_none());
    }
}
