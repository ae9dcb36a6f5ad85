//! Read stored sessions back out of a log database.

use rusqlite::{Connection, Row};
use sqlog_core::{LogLevel, Result, SqlogError};

use crate::storage::schema;

/// One stored row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredEntry {
    /// Row id. `None` when read through a level view, which omits it.
    pub id: Option<i64>,
    /// Acceptance timestamp.
    pub timestamp: String,
    /// Message text.
    pub message: String,
    /// Level name.
    pub level: String,
    /// Source file name.
    pub file_name: Option<String>,
    /// Function or module name.
    pub function_name: Option<String>,
    /// Source line.
    pub line_number: Option<u32>,
    /// Tag.
    pub tag: Option<String>,
    /// Supplemental data.
    pub supplemental_data: Option<String>,
}

/// Reader over the session tables in one database.
#[derive(Debug, Clone, Copy)]
pub struct LogReader<'a> {
    conn: &'a Connection,
}

impl<'a> LogReader<'a> {
    /// Wrap an open connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Session table names, oldest first.
    pub fn session_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name LIKE ?1 ORDER BY name",
        )?;
        let names = stmt
            .query_map([format!("{}%", schema::TABLE_PREFIX)], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Every row of `table` in insertion order.
    pub fn read(&self, table: &str) -> Result<Vec<StoredEntry>> {
        check_name(table)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT log_id,log_timestamp,log_message,log_level,log_filename,\
             log_functionname,log_linenumber,log_tag,log_supplementaldata \
             FROM `{table}` ORDER BY log_id"
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    message: row.get(2)?,
                    level: row.get(3)?,
                    file_name: row.get(4)?,
                    function_name: row.get(5)?,
                    line_number: row.get(6)?,
                    tag: row.get(7)?,
                    supplemental_data: row.get(8)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Rows of `table` at `level`, read through the level's view.
    pub fn read_level(&self, table: &str, level: LogLevel) -> Result<Vec<StoredEntry>> {
        check_name(table)?;
        if level == LogLevel::None {
            return Err(SqlogError::InvalidArgument(
                "no view exists for level None".into(),
            ));
        }
        let view = schema::view_name(table, level);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM `{view}`",
            schema::VIEW_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], |row| view_row(row, level))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Number of rows in `table`.
    pub fn count(&self, table: &str) -> Result<u64> {
        check_name(table)?;
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM `{table}`"), [], |row| {
                    row.get(0)
                })?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

fn view_row(row: &Row<'_>, level: LogLevel) -> rusqlite::Result<StoredEntry> {
    Ok(StoredEntry {
        id: None,
        timestamp: row.get(0)?,
        message: row.get(1)?,
        level: level.as_str().to_owned(),
        file_name: row.get(2)?,
        function_name: row.get(3)?,
        line_number: row.get(4)?,
        tag: row.get(5)?,
        supplemental_data: row.get(6)?,
    })
}

fn check_name(table: &str) -> Result<()> {
    if table.is_empty() || table.contains('`') {
        return Err(SqlogError::InvalidArgument(format!(
            "invalid table name: {table:?}"
        )));
    }
    Ok(())
}
