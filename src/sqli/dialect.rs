//! DBMS banner retrieval and dialect classification

use crate::reporting::{Event, Sink};
use crate::sqli::extract::extract_string;
use crate::sqli::oracle::Oracle;
use serde::Serialize;

/// SQL dialects the introspection queries know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    MySql,
    Postgres,
    #[default]
    Unknown,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySql => write!(f, "MySQL"),
            Dialect::Postgres => write!(f, "PostgreSQL"),
            Dialect::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Dialect {
    /// Version banners tried in order by [`detect_dialect`]
    pub const VERSION_PROBES: [(Dialect, &'static str); 2] = [
        (Dialect::MySql, "@@version"),
        (Dialect::Postgres, "version()"),
    ];

    /// Lowercase substrings identifying the dialect in its banner
    fn signatures(self) -> &'static [&'static str] {
        match self {
            Dialect::MySql => &["mysql", "mariadb"],
            Dialect::Postgres => &["postgres"],
            Dialect::Unknown => &[],
        }
    }

    pub fn matches_banner(self, banner: &str) -> bool {
        let banner = banner.to_lowercase();
        self.signatures().iter().any(|s| banner.contains(s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DialectInfo {
    pub banner: String,
    pub dialect: Dialect,
}

impl DialectInfo {
    pub fn is_detected(&self) -> bool {
        !self.banner.is_empty()
    }
}

/// Classifies the target from its version banner.
///
/// MySQL's `@@version` is always tried first. The first non-empty banner
/// decides: its dialect if the signature matches, `Unknown` otherwise. At
/// most two string extractions are run.
pub async fn detect_dialect<O: Oracle + ?Sized>(
    oracle: &O,
    max_length: usize,
    sink: &dyn Sink,
) -> DialectInfo {
    sink.render(&Event::info(
        "Retrieving DBMS banner via time-based injection...",
    ));

    for (dialect, expression) in Dialect::VERSION_PROBES {
        let banner = extract_string(oracle, expression, max_length, sink).await;
        if banner.is_empty() {
            tracing::debug!("[DIALECT] {} returned nothing", expression);
            continue;
        }

        let detected = if dialect.matches_banner(&banner) {
            dialect
        } else {
            sink.render(&Event::warn(format!(
                "Unexpected banner content from {}",
                expression
            )));
            Dialect::Unknown
        };

        tracing::info!("[DIALECT] {} => {}", banner, detected);
        return DialectInfo {
            banner,
            dialect: detected,
        };
    }

    DialectInfo::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::MemorySink;
    use crate::sqli::testing::FakeTarget;

    #[test]
    fn test_mysql_banner_is_probed_first() {
        let expressions: Vec<&str> = Dialect::VERSION_PROBES.iter().map(|(_, e)| *e).collect();
        assert_eq!(expressions, vec!["@@version", "version()"]);
    }

    #[test]
    fn test_signatures() {
        assert!(Dialect::MySql.matches_banner("5.7.44-MySQL"));
        assert!(Dialect::MySql.matches_banner("10.6.12-MariaDB-0ubuntu0.22.04.1"));
        assert!(Dialect::Postgres.matches_banner("PostgreSQL"));
        assert!(!Dialect::MySql.matches_banner("8.0.1"));
        assert!(!Dialect::Unknown.matches_banner("anything"));
    }

    #[tokio::test]
    async fn test_mysql_banner_detected_first() {
        let target = FakeTarget::new()
            .value("@@version", "MySQL-8.0.1")
            .value("version()", "PostgreSQL");
        let sink = MemorySink::default();

        let info = detect_dialect(&target, 50, &sink).await;
        assert_eq!(info.dialect, Dialect::MySql);
        assert_eq!(info.banner, "MySQL-8.0.1");
        assert!(target.conditions().iter().all(|c| !c.contains("version()")));
    }

    #[tokio::test]
    async fn test_postgres_fallback() {
        let target = FakeTarget::new().value("version()", "PostgreSQL");
        let sink = MemorySink::default();

        let info = detect_dialect(&target, 50, &sink).await;
        assert_eq!(info.dialect, Dialect::Postgres);
        assert_eq!(info.banner, "PostgreSQL");
    }

    #[tokio::test]
    async fn test_unrecognised_banner_is_kept_as_unknown() {
        let target = FakeTarget::new()
            .value("@@version", "8.0.1")
            .value("version()", "PostgreSQL");
        let sink = MemorySink::default();

        let info = detect_dialect(&target, 50, &sink).await;
        assert_eq!(info.dialect, Dialect::Unknown);
        assert_eq!(info.banner, "8.0.1");
        assert!(info.is_detected());
    }

    #[tokio::test]
    async fn test_no_banner() {
        let target = FakeTarget::new();
        let sink = MemorySink::default();

        let info = detect_dialect(&target, 50, &sink).await;
        assert_eq!(info, DialectInfo::default());
        assert!(!info.is_detected());
    }
}
