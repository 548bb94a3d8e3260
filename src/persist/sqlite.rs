//! SQLite-backed table store.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::types::{Row, RowIndex};

use super::{PersistError, PersistResult, TableBackend};

/// Durable [`TableBackend`] keeping one JSON cell payload per row.
///
/// Row positions are materialized in a `pos` column so the positional
/// contract (append, overwrite at, delete at with shift-up) survives reopen.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens or creates the backing database at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        debug!(path = %path.as_ref().display(), "opening sqlite backend");
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens a private in-memory database, mostly useful in tests.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    fn require_table(&self, table: &str) -> PersistResult<()> {
        if self.table_exists(table)? {
            Ok(())
        } else {
            Err(PersistError::MissingTable(table.to_string()))
        }
    }

    fn row_count(&self, table: &str) -> PersistResult<RowIndex> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM rows WHERE table_name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count as RowIndex)
    }
}

impl TableBackend for SqliteBackend {
    fn table_exists(&self, table: &str) -> PersistResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM tables WHERE name = ?1",
                params![table],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn create_table(&mut self, table: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO tables(name) VALUES (?1)",
            params![table],
        )?;
        Ok(())
    }

    fn rows(&self, table: &str) -> PersistResult<Vec<Row>> {
        self.require_table(table)?;
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM rows WHERE table_name = ?1 ORDER BY pos ASC")?;
        let payloads = stmt.query_map(params![table], |row| row.get::<_, Vec<u8>>(0))?;

        let mut out = Vec::new();
        for payload in payloads {
            out.push(serde_json::from_slice(&payload?)?);
        }
        Ok(out)
    }

    fn append_row(&mut self, table: &str, row: &Row) -> PersistResult<()> {
        self.require_table(table)?;
        let pos = self.row_count(table)?;
        let payload = serde_json::to_vec(row)?;
        self.conn.execute(
            "INSERT INTO rows(table_name, pos, payload) VALUES (?1, ?2, ?3)",
            params![table, pos as i64, payload],
        )?;
        Ok(())
    }

    fn overwrite_row(&mut self, table: &str, index: RowIndex, row: &Row) -> PersistResult<()> {
        self.require_table(table)?;
        let payload = serde_json::to_vec(row)?;
        let changed = self.conn.execute(
            "UPDATE rows SET payload = ?3 WHERE table_name = ?1 AND pos = ?2",
            params![table, index as i64, payload],
        )?;
        if changed == 0 {
            return Err(PersistError::OutOfRange {
                table: table.to_string(),
                index,
            });
        }
        Ok(())
    }

    fn delete_row(&mut self, table: &str, index: RowIndex) -> PersistResult<()> {
        self.require_table(table)?;
        let tx = self.conn.transaction()?;
        let deleted = tx.execute(
            "DELETE FROM rows WHERE table_name = ?1 AND pos = ?2",
            params![table, index as i64],
        )?;
        if deleted == 0 {
            return Err(PersistError::OutOfRange {
                table: table.to_string(),
                index,
            });
        }
        tx.execute(
            "UPDATE rows SET pos = pos - 1 WHERE table_name = ?1 AND pos > ?2",
            params![table, index as i64],
        )?;
        tx.commit()?;
        Ok(())
    }
}
