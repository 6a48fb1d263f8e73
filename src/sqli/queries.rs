//! Introspection queries per dialect
//!
//! MySQL and unidentified targets share one syntax; PostgreSQL differs in
//! identifier quoting and the offset clause. No ORDER BY is added anywhere:
//! entries come back in the introspection source's natural order.

use crate::sqli::dialect::Dialect;

/// Current-database expressions, tried in order
pub const DATABASE_EXPRESSIONS: [&str; 2] = ["DATABASE()", "current_database()"];

/// Clause selecting exactly the `index`-th row (zero-based)
pub fn single_row(dialect: Dialect, index: usize) -> String {
    match dialect {
        Dialect::Postgres => format!("LIMIT 1 OFFSET {}", index),
        Dialect::MySql | Dialect::Unknown => format!("LIMIT {},1", index),
    }
}

pub fn quote_ident(dialect: Dialect, ident: &str) -> String {
    match dialect {
        Dialect::Postgres => format!("\"{}\"", ident.replace('"', "\"\"")),
        Dialect::MySql | Dialect::Unknown => format!("`{}`", ident.replace('`', "``")),
    }
}

/// `<database>.<table>` with dialect quoting
pub fn qualified_table(dialect: Dialect, database: &str, table: &str) -> String {
    format!(
        "{}.{}",
        quote_ident(dialect, database),
        quote_ident(dialect, table)
    )
}

fn tables_source(database: &str) -> String {
    format!(
        "information_schema.tables WHERE table_schema='{}'",
        database
    )
}

fn columns_source(database: &str, table: &str) -> String {
    format!(
        "information_schema.columns WHERE table_schema='{}' AND table_name='{}'",
        database, table
    )
}

pub fn count_tables(database: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", tables_source(database))
}

pub fn table_name_at(dialect: Dialect, database: &str, index: usize) -> String {
    format!(
        "SELECT table_name FROM {} {}",
        tables_source(database),
        single_row(dialect, index)
    )
}

pub fn count_columns(database: &str, table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", columns_source(database, table))
}

pub fn column_name_at(dialect: Dialect, database: &str, table: &str, index: usize) -> String {
    format!(
        "SELECT column_name FROM {} {}",
        columns_source(database, table),
        single_row(dialect, index)
    )
}

pub fn count_rows(dialect: Dialect, database: &str, table: &str) -> String {
    format!(
        "SELECT COUNT(*) FROM {}",
        qualified_table(dialect, database, table)
    )
}

pub fn cell_at(dialect: Dialect, database: &str, table: &str, column: &str, row: usize) -> String {
    format!(
        "SELECT {} FROM {} {}",
        quote_ident(dialect, column),
        qualified_table(dialect, database, table),
        single_row(dialect, row)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_introspection() {
        assert_eq!(
            count_tables("shop"),
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema='shop'"
        );
        assert_eq!(
            table_name_at(Dialect::MySql, "shop", 1),
            "SELECT table_name FROM information_schema.tables WHERE table_schema='shop' LIMIT 1,1"
        );
        assert_eq!(
            column_name_at(Dialect::MySql, "shop", "users", 0),
            "SELECT column_name FROM information_schema.columns WHERE table_schema='shop' AND table_name='users' LIMIT 0,1"
        );
    }

    #[test]
    fn test_unknown_uses_mysql_syntax() {
        assert_eq!(
            cell_at(Dialect::Unknown, "shop", "users", "name", 2),
            cell_at(Dialect::MySql, "shop", "users", "name", 2)
        );
    }

    #[test]
    fn test_row_queries_quote_per_dialect() {
        assert_eq!(
            count_rows(Dialect::MySql, "shop", "users"),
            "SELECT COUNT(*) FROM `shop`.`users`"
        );
        assert_eq!(
            count_rows(Dialect::Postgres, "shop", "users"),
            "SELECT COUNT(*) FROM \"shop\".\"users\""
        );
        assert_eq!(
            cell_at(Dialect::Postgres, "shop", "users", "name", 2),
            "SELECT \"name\" FROM \"shop\".\"users\" LIMIT 1 OFFSET 2"
        );
    }

    #[test]
    fn test_quote_ident_escapes_quote_char() {
        assert_eq!(quote_ident(Dialect::MySql, "a`b"), "`a``b`");
        assert_eq!(quote_ident(Dialect::Postgres, "a\"b"), "\"a\"\"b\"");
    }
}
