use crate::core::settings::{DEFAULT_PARAM, DUMP_ROWS, MAX_LENGTH, MAX_TABLES};
use clap::{Parser, ValueEnum};

/// Output style for progress and results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored console output with boxed tables
    #[default]
    Rich,
    /// Plain `[*]` / `[!]` lines
    Plain,
    /// One JSON object per event
    Json,
}

/// HOURGLASS – Time-based Blind SQL Injection Extractor
#[derive(Parser, Debug)]
#[command(
    name = "hourglass",
    version = "0.1.0",
    author = "Siddhant Bhattarai",
    about = "HOURGLASS – Time-based Blind SQL Injection Extractor",
    long_about = r#"
HOURGLASS recovers database metadata and row data through a single injectable
query parameter, using nothing but response time as a one-bit oracle:

  • Conditional SLEEP payloads, one HTTP request per yes/no question
  • Character-by-character string extraction over a fixed alphabet
  • Count-then-fetch enumeration of tables, columns and rows
  • MySQL / PostgreSQL banner detection
  • Session cache: nothing already recovered is asked for twice

Only use against systems you are authorized to test.
"#,
    after_help = r#"EXAMPLES:

  hourglass -t http://testphp.vulnweb.com/artists.php -d 2
  hourglass -t http://testphp.vulnweb.com/artists.php -p artist -d 1.5 --dump-rows 5
  hourglass -t http://localhost/item.php -p id --format json --no-banner
  hourglass                      (prompts for target and delay)"#
)]
pub struct Cli {
    /// Target URL (e.g. http://testphp.vulnweb.com/artists.php); prompted for when omitted
    #[arg(short, long)]
    pub target: Option<String>,

    /// Injectable query parameter
    #[arg(short, long, default_value = DEFAULT_PARAM)]
    pub param: String,

    /// SLEEP delay and detection threshold in seconds; prompted for when omitted
    #[arg(short, long)]
    pub delay: Option<String>,

    // ═══════════════════════════════════════════════════════════════════
    // EXTRACTION LIMITS
    // ═══════════════════════════════════════════════════════════════════

    /// Maximum characters recovered per value
    #[arg(long = "max-length", help_heading = "EXTRACTION LIMITS", default_value_t = MAX_LENGTH)]
    pub max_length: usize,

    /// Ceiling for table, column and row counts
    #[arg(long = "max-count", help_heading = "EXTRACTION LIMITS", default_value_t = MAX_TABLES)]
    pub max_count: usize,

    /// Rows extracted per table dump
    #[arg(long = "dump-rows", help_heading = "EXTRACTION LIMITS", default_value_t = DUMP_ROWS)]
    pub dump_rows: usize,

    // ═══════════════════════════════════════════════════════════════════
    // REQUEST CONTROL
    // ═══════════════════════════════════════════════════════════════════

    /// Minimum pause between two probes, in milliseconds
    #[arg(long = "pause", help_heading = "REQUEST CONTROL", default_value = "0")]
    pub pause_ms: u64,

    /// Abort any single menu operation after this many seconds
    #[arg(long = "op-timeout", help_heading = "REQUEST CONTROL")]
    pub op_timeout: Option<u64>,

    // ═══════════════════════════════════════════════════════════════════
    // OUTPUT
    // ═══════════════════════════════════════════════════════════════════

    /// Output format
    #[arg(long, value_enum, help_heading = "OUTPUT", default_value_t = OutputFormat::Rich)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, help_heading = "OUTPUT")]
    pub verbose: u8,

    /// Only log errors and hide the banner
    #[arg(short, long, help_heading = "OUTPUT", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Do not print the startup banner
    #[arg(long = "no-banner", help_heading = "OUTPUT")]
    pub no_banner: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["hourglass"]);
        assert!(cli.target.is_none());
        assert!(cli.delay.is_none());
        assert_eq!(cli.param, "artist");
        assert_eq!(cli.max_length, 50);
        assert_eq!(cli.max_count, 50);
        assert_eq!(cli.dump_rows, 3);
        assert_eq!(cli.pause_ms, 0);
        assert_eq!(cli.format, OutputFormat::Rich);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "hourglass",
            "-t",
            "http://localhost/a.php",
            "-p",
            "id",
            "-d",
            "1.5",
            "--format",
            "json",
            "--op-timeout",
            "60",
            "-vv",
        ]);
        assert_eq!(cli.target.as_deref(), Some("http://localhost/a.php"));
        assert_eq!(cli.param, "id");
        assert_eq!(cli.delay.as_deref(), Some("1.5"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.op_timeout, Some(60));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["hourglass", "-q", "-v"]).is_err());
    }
}
