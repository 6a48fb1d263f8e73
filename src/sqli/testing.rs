//! Simulated injectable target for tests
//!
//! Answers probe conditions exactly, from a table of known expression values
//! and query counts. Conditions are parsed back with the same shapes the
//! extractor and enumerator produce.

use crate::sqli::dialect::Dialect;
use crate::sqli::oracle::Oracle;
use crate::sqli::queries;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct FakeTarget {
    values: HashMap<String, String>,
    counts: HashMap<String, usize>,
    probes: AtomicUsize,
    conditions: Mutex<Vec<String>>,
    substring_re: Regex,
    count_re: Regex,
}

impl FakeTarget {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            counts: HashMap::new(),
            probes: AtomicUsize::new(0),
            conditions: Mutex::new(Vec::new()),
            substring_re: Regex::new(r"(?s)^SUBSTRING\(\((.*)\),(\d+),1\)='(.)'$").unwrap(),
            count_re: Regex::new(r"(?s)^\((.*)\)=(\d+)$").unwrap(),
        }
    }

    /// `expression` evaluates to `value`
    pub fn value(mut self, expression: &str, value: &str) -> Self {
        self.values.insert(expression.to_string(), value.to_string());
        self
    }

    /// `query` returns `n`
    pub fn count(mut self, query: &str, n: usize) -> Self {
        self.counts.insert(query.to_string(), n);
        self
    }

    /// Tables of `database` with their columns, in introspection order
    pub fn schema(self, database: &str, tables: &[(&str, Vec<&str>)]) -> Self {
        self.schema_in(Dialect::MySql, database, tables)
    }

    pub fn schema_in(mut self, dialect: Dialect, database: &str, tables: &[(&str, Vec<&str>)]) -> Self {
        self = self.count(&queries::count_tables(database), tables.len());
        for (i, (table, columns)) in tables.iter().enumerate() {
            self = self
                .value(&queries::table_name_at(dialect, database, i), table)
                .count(&queries::count_columns(database, table), columns.len());
            for (j, column) in columns.iter().enumerate() {
                self = self.value(&queries::column_name_at(dialect, database, table, j), column);
            }
        }
        self
    }

    /// Row data of `database.table`, one inner vec per row in column order
    pub fn rows(mut self, database: &str, table: &str, columns: &[&str], rows: &[Vec<&str>]) -> Self {
        let dialect = Dialect::MySql;
        self = self.count(&queries::count_rows(dialect, database, table), rows.len());
        for (r, row) in rows.iter().enumerate() {
            for (column, value) in columns.iter().zip(row) {
                self = self.value(&queries::cell_at(dialect, database, table, column, r), value);
            }
        }
        self
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }

    pub fn conditions(&self) -> Vec<String> {
        self.conditions.lock().unwrap().clone()
    }

    fn answer(&self, condition: &str) -> bool {
        if let Some(caps) = self.substring_re.captures(condition) {
            let position: usize = caps[2].parse().unwrap();
            let ch = caps[3].chars().next();
            return self
                .values
                .get(&caps[1])
                .and_then(|v| v.chars().nth(position - 1))
                .is_some_and(|c| Some(c) == ch);
        }

        if let Some(caps) = self.count_re.captures(condition) {
            let n: usize = caps[2].parse().unwrap();
            return self.counts.get(&caps[1]) == Some(&n);
        }

        false
    }
}

#[async_trait]
impl Oracle for FakeTarget {
    async fn probe(&self, condition: &str) -> bool {
        self.probes.fetch_add(1, Ordering::Relaxed);
        self.conditions.lock().unwrap().push(condition.to_string());
        self.answer(condition)
    }
}

/// The two-table `shop` database used across session tests
pub fn shop() -> FakeTarget {
    FakeTarget::new()
        .value("@@version", "MySQL-8.0.1")
        .value("DATABASE()", "shop")
        .schema("shop", &[("users", vec!["id", "name"]), ("orders", vec!["id", "total"])])
        .rows(
            "shop",
            "users",
            &["id", "name"],
            &[vec!["1", "alice"], vec!["2", "bob"]],
        )
}
