//! Core settings and constants for time-based extraction

/// Candidate characters, scanned in this order at every position.
/// The single quote is absent: values containing one truncate there.
pub const CHARSET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_{}[]()-=+!@#$%^&*:;/?><,.\" ";

/// Default SLEEP duration / detection threshold in seconds
pub const DEFAULT_DELAY: f64 = 2.0;

/// Longest accepted delay in seconds
pub const MAX_DELAY: f64 = 300.0;

/// Added to the delay to get the HTTP timeout
pub const TIMEOUT_MARGIN: f64 = 5.0;

/// Maximum characters extracted per value
pub const MAX_LENGTH: usize = 50;

/// Count ceilings for tables, columns and rows
pub const MAX_TABLES: usize = 50;
pub const MAX_COLUMNS: usize = 50;
pub const MAX_ROWS: usize = 50;

/// Rows shown by a dump
pub const DUMP_ROWS: usize = 3;

/// Injectable query parameter
pub const DEFAULT_PARAM: &str = "artist";

/// Prefix every injected condition is appended to
pub const PAYLOAD_PREFIX: &str = "1 AND";
