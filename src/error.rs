//! Error types for the extraction engine
//!
//! Transport failures are typed so the oracle can collapse them on purpose;
//! session errors describe why an operation stopped before probing further.

use thiserror::Error;

/// Failure of a single HTTP round trip.
///
/// Never escapes the oracle: `TimingOracle::probe` turns every variant into a
/// `false` measurement.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("blocked out-of-scope request to {0}")]
    OutOfScope(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Reasons a session operation stops without a result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("database name not extracted yet, run option 1 first")]
    DatabaseUnknown,

    #[error("no tables found or table count could not be determined")]
    NoTables,

    #[error("invalid table index {index} (available: 1-{available})")]
    TableIndexOutOfRange { index: usize, available: usize },

    #[error("no columns found for table '{0}'")]
    NoColumns(String),

    #[error("operation cancelled, enter q at the menu to quit")]
    Cancelled,

    #[error("operation timed out after {0}s")]
    TimedOut(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_messages() {
        let err = SessionError::TableIndexOutOfRange {
            index: 7,
            available: 2,
        };
        assert_eq!(err.to_string(), "invalid table index 7 (available: 1-2)");
        assert_eq!(
            SessionError::NoColumns("users".into()).to_string(),
            "no columns found for table 'users'"
        );
    }

    #[test]
    fn test_transport_error_display() {
        assert_eq!(TransportError::Timeout.to_string(), "request timed out");
        assert!(TransportError::OutOfScope("http://evil/".into())
            .to_string()
            .contains("out-of-scope"));
    }
}
