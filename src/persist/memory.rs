//! In-memory table backend.

use hashbrown::HashMap;

use crate::types::{Row, RowIndex};

use super::{PersistError, PersistResult, TableBackend};

/// Volatile [`TableBackend`] holding every table in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: HashMap<String, Vec<Row>>,
}

impl MemoryBackend {
    /// Creates an empty backend with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, table: &str) -> PersistResult<&Vec<Row>> {
        self.tables
            .get(table)
            .ok_or_else(|| PersistError::MissingTable(table.to_string()))
    }

    fn table_mut(&mut self, table: &str) -> PersistResult<&mut Vec<Row>> {
        self.tables
            .get_mut(table)
            .ok_or_else(|| PersistError::MissingTable(table.to_string()))
    }
}

impl TableBackend for MemoryBackend {
    fn table_exists(&self, table: &str) -> PersistResult<bool> {
        Ok(self.tables.contains_key(table))
    }

    fn create_table(&mut self, table: &str) -> PersistResult<()> {
        self.tables.entry(table.to_string()).or_default();
        Ok(())
    }

    fn rows(&self, table: &str) -> PersistResult<Vec<Row>> {
        Ok(self.table(table)?.clone())
    }

    fn append_row(&mut self, table: &str, row: &Row) -> PersistResult<()> {
        self.table_mut(table)?.push(row.clone());
        Ok(())
    }

    fn overwrite_row(&mut self, table: &str, index: RowIndex, row: &Row) -> PersistResult<()> {
        match self.table_mut(table)?.get_mut(index) {
            Some(slot) => {
                *slot = row.clone();
                Ok(())
            }
            None => Err(PersistError::OutOfRange {
                table: table.to_string(),
                index,
            }),
        }
    }

    fn delete_row(&mut self, table: &str, index: RowIndex) -> PersistResult<()> {
        let rows = self.table_mut(table)?;
        if index >= rows.len() {
            return Err(PersistError::OutOfRange {
                table: table.to_string(),
                index,
            });
        }
        rows.remove(index);
        Ok(())
    }
}
