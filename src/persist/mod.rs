//! Row-oriented table storage abstraction and implementations.

/// Volatile in-memory backend.
pub mod memory;
/// Durable SQLite backend.
pub mod sqlite;

use thiserror::Error;

use crate::types::{Row, RowIndex};

/// Backend-level failure.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The named table does not exist in the backing store.
    #[error("table '{0}' was not found in the backing store")]
    MissingTable(String),
    /// A row position fell outside the table.
    #[error("row {index} is out of range for table '{table}'")]
    OutOfRange {
        /// Table that was addressed.
        table: String,
        /// Offending row position.
        index: RowIndex,
    },
    /// SQLite error.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    /// Row payload (de)serialization error.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Result alias for backend operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Row-oriented storage for named tables.
///
/// The contract is deliberately small: everything the ledger needs is "all
/// rows", "append", "overwrite at position", and "delete at position", plus
/// table existence and provisioning. Any store with those affordances works
/// as a backend.
pub trait TableBackend: Send {
    /// Returns true when `table` exists.
    fn table_exists(&self, table: &str) -> PersistResult<bool>;

    /// Creates an empty `table`. Creating an existing table is a no-op.
    fn create_table(&mut self, table: &str) -> PersistResult<()>;

    /// Returns every row of `table` in positional order.
    fn rows(&self, table: &str) -> PersistResult<Vec<Row>>;

    /// Appends `row` after the last row of `table`.
    fn append_row(&mut self, table: &str, row: &Row) -> PersistResult<()>;

    /// Replaces the row at `index` with `row`.
    fn overwrite_row(&mut self, table: &str, index: RowIndex, row: &Row) -> PersistResult<()>;

    /// Removes the row at `index`; later rows shift up by one position.
    fn delete_row(&mut self, table: &str, index: RowIndex) -> PersistResult<()>;
}
