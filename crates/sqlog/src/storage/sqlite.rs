//! `SQLite` storage backend.
//!
//! [`SqliteStorage::open`] opens (or creates, never truncates) the database
//! file, creates this session's table and its five level views in one
//! transaction, and prepares the insert statement into the connection's
//! statement cache. Each flush reuses that cached statement inside a single
//! transaction.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, params};
use sqlog_core::{LogLevel, Result, timestamp};
use sqlog_settings::StoreSettings;
use tracing::{debug, info, warn};

use super::schema;
use super::{LogStorage, LogTransaction};
use crate::entry::LogEntry;

/// Attempts at finding an unused table name before letting `CREATE TABLE` fail.
const MAX_NAME_ATTEMPTS: usize = 8;

/// Connection options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqliteOptions {
    /// How long a write waits on a locked database.
    pub busy_timeout: Duration,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self::from(&StoreSettings::default())
    }
}

impl From<&StoreSettings> for SqliteOptions {
    fn from(settings: &StoreSettings) -> Self {
        Self {
            busy_timeout: Duration::from_millis(settings.busy_timeout_ms),
        }
    }
}

/// One session's connection, table, and prepared insert.
pub struct SqliteStorage {
    conn: Connection,
    table: String,
    insert_sql: String,
}

impl SqliteStorage {
    /// Open `path` and create a new session table with its views.
    pub fn open(path: &Path, options: &SqliteOptions) -> Result<Self> {
        let conn = Connection::open(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to open log database");
        })?;
        Self::bootstrap(conn, options)
    }

    /// Create a session table in a private in-memory database.
    pub fn open_in_memory(options: &SqliteOptions) -> Result<Self> {
        Self::bootstrap(Connection::open_in_memory()?, options)
    }

    fn bootstrap(conn: Connection, options: &SqliteOptions) -> Result<Self> {
        conn.busy_timeout(options.busy_timeout)?;

        let table = unused_table_name(&conn)?;
        create_schema(&conn, &table).inspect_err(|e| {
            warn!(table = %table, error = %e, "failed to create log table");
        })?;

        let insert_sql = schema::insert_sql(&table);
        let _ = conn.prepare_cached(&insert_sql).inspect_err(|e| {
            warn!(table = %table, error = %e, "failed to prepare insert statement");
        })?;

        info!(table = %table, "log session opened");
        Ok(Self {
            conn,
            table,
            insert_sql,
        })
    }

    /// This session's table name.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl LogStorage for SqliteStorage {
    type Transaction<'a> = SqliteTransaction<'a>;

    fn begin(&mut self) -> Result<SqliteTransaction<'_>> {
        let tx = self.conn.transaction()?;
        Ok(SqliteTransaction {
            tx,
            insert_sql: &self.insert_sql,
        })
    }

    fn close(self) -> Result<()> {
        let table = self.table;
        self.conn.flush_prepared_statement_cache();
        self.conn.close().map_err(|(_, e)| {
            warn!(table = %table, error = %e, "failed to close log database");
            e
        })?;
        info!(table = %table, "log session closed");
        Ok(())
    }
}

/// An open `SQLite` transaction. Rolls back on drop.
pub struct SqliteTransaction<'a> {
    tx: rusqlite::Transaction<'a>,
    insert_sql: &'a str,
}

impl LogTransaction for SqliteTransaction<'_> {
    fn insert(&mut self, entry: &LogEntry) -> Result<()> {
        let mut stmt = self.tx.prepare_cached(self.insert_sql)?;
        let _ = stmt.execute(params![
            entry.timestamp(),
            entry.message(),
            entry.level(),
            entry.file_name(),
            entry.function_name(),
            entry.line_number(),
            entry.tag(),
            entry.supplemental_data(),
        ])?;
        Ok(())
    }

    fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Table name stamped with the current time, skipping names already taken.
fn unused_table_name(conn: &Connection) -> rusqlite::Result<String> {
    let mut table = schema::table_name(&timestamp::now());
    for _ in 1..MAX_NAME_ATTEMPTS {
        if !table_exists(conn, &table)? {
            break;
        }
        debug!(table = %table, "log table name taken, restamping");
        std::thread::sleep(Duration::from_micros(1));
        table = schema::table_name(&timestamp::now());
    }
    Ok(table)
}

fn create_schema(conn: &Connection, table: &str) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&schema::create_table_sql(table))?;
    for level in LogLevel::ENTRY_LEVELS {
        tx.execute_batch(&schema::create_view_sql(table, level))?;
    }
    tx.commit()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
