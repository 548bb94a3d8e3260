use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    persist::{PersistError, TableBackend},
    record::{DraftError, RecordDraft},
    types::{Cell, RecordKind, Row, RowIndex},
};

/// Ledger-level operation failure.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A draft field was missing or invalid.
    #[error("validation failed: {0}")]
    Validation(#[from] DraftError),
    /// Insert used an id already present in the table.
    #[error("id '{0}' already exists, use a unique id")]
    DuplicateKey(String),
    /// Update or delete referenced an id with no matching row.
    #[error("no row found for id '{0}'")]
    NotFound(String),
    /// The backing table is missing.
    #[error("table '{0}' is not available")]
    Unavailable(String),
    /// The backing store failed.
    #[error("backing store error: {0}")]
    Backend(PersistError),
}

impl From<PersistError> for LedgerError {
    fn from(value: PersistError) -> Self {
        match value {
            PersistError::MissingTable(table) => Self::Unavailable(table),
            other => Self::Backend(other),
        }
    }
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Named-table CRUD over a row-oriented backend.
///
/// Every mutation is a full-table scan followed by a single row write. The
/// tables this store is built for stay small, so no index is kept. Key scans
/// cover the header row at position 0 as well; header labels never collide
/// with real ids, and this keeps reported positions equal to backing-store
/// row numbers.
pub struct LedgerStore {
    backend: Box<dyn TableBackend>,
}

impl LedgerStore {
    /// Opens a store, provisioning the three kind tables (with their header
    /// rows) when absent.
    pub fn open(mut backend: Box<dyn TableBackend>) -> LedgerResult<Self> {
        for kind in RecordKind::ALL {
            let table = kind.table_name();
            if !backend.table_exists(table)? {
                debug!(table, "provisioning table");
                backend.create_table(table)?;
                backend.append_row(table, &kind.header_row())?;
            }
        }
        Ok(Self { backend })
    }

    /// Wraps an already-provisioned backend without creating any tables.
    ///
    /// Operations on a kind whose table is missing fail with
    /// [`LedgerError::Unavailable`].
    pub fn attach(backend: Box<dyn TableBackend>) -> Self {
        Self { backend }
    }

    /// Validates and appends a new record. The id must be unused.
    pub fn insert(&mut self, draft: RecordDraft) -> LedgerResult<()> {
        let kind = draft.kind();
        let record = draft.validate()?;
        let table = kind.table_name();
        debug!(table, id = record.id(), "insert");

        let rows = self.backend.rows(table)?;
        if find_row(&rows, record.id()).is_some() {
            return Err(LedgerError::DuplicateKey(record.id().to_string()));
        }
        self.backend.append_row(table, &record.to_row())?;
        Ok(())
    }

    /// Returns every row of the kind's table, header row included.
    pub fn list(&self, kind: RecordKind) -> LedgerResult<Vec<Row>> {
        let table = kind.table_name();
        self.backend.rows(table).map_err(|err| {
            warn!(table, %err, "list failed");
            err.into()
        })
    }

    /// Overwrites the non-key columns of the row keyed by `id` with the
    /// draft's values, in the kind's fixed column order.
    ///
    /// The key and the row position are preserved.
    pub fn update_by_key(&mut self, id: &str, draft: RecordDraft) -> LedgerResult<()> {
        let kind = draft.kind();
        let record = draft.validate()?;
        let table = kind.table_name();
        debug!(table, id, "update");

        let rows = self.backend.rows(table)?;
        let index = find_row(&rows, id).ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        let mut row = record.to_row();
        row[0] = Cell::text(id);
        self.backend.overwrite_row(table, index, &row)?;
        Ok(())
    }

    /// Removes the row keyed by `id`; later rows shift up by one position.
    pub fn delete_by_key(&mut self, kind: RecordKind, id: &str) -> LedgerResult<()> {
        let table = kind.table_name();
        debug!(table, id, "delete");

        let rows = self.backend.rows(table)?;
        let index = find_row(&rows, id).ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        self.backend.delete_row(table, index)?;
        Ok(())
    }
}

fn find_row(rows: &[Row], id: &str) -> Option<RowIndex> {
    rows.iter()
        .position(|row| row.first().and_then(Cell::as_text) == Some(id))
}
