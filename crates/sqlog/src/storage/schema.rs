//! SQL text for a session's table, views, and insert statement.
//!
//! Each session writes to its own table named `log at <timestamp>` with one
//! view per entry level named `log at <timestamp>.<level>_messages`. Names are
//! quoted with backticks.

use sqlog_core::LogLevel;

/// Prefix shared by every session table.
pub const TABLE_PREFIX: &str = "log at ";

/// Column list shared by every view, in select order.
pub const VIEW_COLUMNS: &str = "log_timestamp,log_message,log_filename,log_functionname,\
                                log_linenumber,log_tag,log_supplementaldata";

/// Table name for a session stamped `stamp`.
pub fn table_name(stamp: &str) -> String {
    format!("{TABLE_PREFIX}{stamp}")
}

/// View name for `level` over `table`.
pub fn view_name(table: &str, level: LogLevel) -> String {
    format!("{table}.{}_messages", level.as_str().to_lowercase())
}

/// `CREATE TABLE` for a session table.
pub fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE `{table}` (\
         `log_id` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
         `log_timestamp` TEXT NOT NULL, \
         `log_message` TEXT NOT NULL, \
         `log_level` TEXT NOT NULL, \
         `log_filename` TEXT, \
         `log_functionname` TEXT, \
         `log_linenumber` INTEGER, \
         `log_tag` TEXT, \
         `log_supplementaldata` TEXT)"
    )
}

/// `CREATE VIEW` selecting `level` entries from `table`.
pub fn create_view_sql(table: &str, level: LogLevel) -> String {
    format!(
        "CREATE VIEW `{view}` AS SELECT {VIEW_COLUMNS} FROM `{table}` WHERE log_level = '{name}'",
        view = view_name(table, level),
        name = level.as_str(),
    )
}

/// Parameterized insert into `table` (eight parameters, in entry field order).
pub fn insert_sql(table: &str) -> String {
    format!(
        "INSERT INTO `{table}` (log_timestamp,log_message,log_level,log_filename,\
         log_functionname,log_linenumber,log_tag,log_supplementaldata) \
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAMP: &str = "2024-01-01 00:00:00.000000 UTC";

    #[test]
    fn names() {
        let table = table_name(STAMP);
        assert_eq!(table, "log at 2024-01-01 00:00:00.000000 UTC");
        assert_eq!(
            view_name(&table, LogLevel::Warning),
            "log at 2024-01-01 00:00:00.000000 UTC.warning_messages"
        );
    }

    #[test]
    fn view_filters_by_level_name() {
        let sql = create_view_sql(&table_name(STAMP), LogLevel::Diagnostic);
        assert!(sql.contains("WHERE log_level = 'Diagnostic'"));
        assert!(sql.contains(".diagnostic_messages`"));
        assert!(!sql.contains("log_id"));
    }

    #[test]
    fn statements_execute_against_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let table = table_name(STAMP);
        conn.execute_batch(&create_table_sql(&table)).unwrap();
        for level in LogLevel::ENTRY_LEVELS {
            conn.execute_batch(&create_view_sql(&table, level)).unwrap();
        }
        let inserted = conn
            .execute(
                &insert_sql(&table),
                rusqlite::params![STAMP, "m", "Error", None::<String>, None::<String>, 1, None::<String>, None::<String>],
            )
            .unwrap();
        assert_eq!(inserted, 1);

        let view = view_name(&table, LogLevel::Error);
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM `{view}`"), [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
