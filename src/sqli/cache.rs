//! Session-scoped memo of extracted facts
//!
//! Entries are never invalidated: the target is assumed static for the life
//! of the session. Nothing is written to disk.

use crate::sqli::dialect::DialectInfo;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct SessionCache {
    database: Option<String>,
    dialect: Option<DialectInfo>,
    table_count: Option<usize>,
    tables: BTreeMap<usize, String>,
    columns: HashMap<String, Vec<String>>,
    /// Column lists still being fetched: resolved count plus names so far
    partial_columns: HashMap<String, (usize, Vec<String>)>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn set_database(&mut self, name: impl Into<String>) {
        self.database = Some(name.into());
    }

    pub fn dialect(&self) -> Option<&DialectInfo> {
        self.dialect.as_ref()
    }

    pub fn set_dialect(&mut self, info: DialectInfo) {
        self.dialect = Some(info);
    }

    pub fn table_count(&self) -> Option<usize> {
        self.table_count
    }

    pub fn set_table_count(&mut self, count: usize) {
        self.table_count = Some(count);
    }

    pub fn table(&self, index: usize) -> Option<&str> {
        self.tables.get(&index).map(String::as_str)
    }

    pub fn set_table(&mut self, index: usize, name: impl Into<String>) {
        self.tables.insert(index, name.into());
    }

    pub fn columns(&self, table: &str) -> Option<&[String]> {
        self.columns.get(table).map(Vec::as_slice)
    }

    /// Completes the column list of `table`, dropping any partial progress.
    pub fn set_columns(&mut self, table: impl Into<String>, columns: Vec<String>) {
        let table = table.into();
        self.partial_columns.remove(&table);
        self.columns.insert(table, columns);
    }

    pub fn partial_columns(&self, table: &str) -> Option<(usize, &[String])> {
        self.partial_columns
            .get(table)
            .map(|(count, names)| (*count, names.as_slice()))
    }

    pub fn start_columns(&mut self, table: impl Into<String>, count: usize) {
        self.partial_columns.insert(table.into(), (count, Vec::new()));
    }

    pub fn push_column(&mut self, table: &str, name: impl Into<String>) {
        if let Some((_, names)) = self.partial_columns.get_mut(table) {
            names.push(name.into());
        }
    }
}
