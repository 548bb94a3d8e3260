//! Change events broadcast to presentation-layer subscribers.

use crate::types::RecordKind;

/// Events emitted after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A record was inserted.
    Inserted {
        /// Kind whose table changed.
        kind: RecordKind,
        /// Key of the new row.
        id: String,
    },
    /// A record's non-key columns were rewritten.
    Updated {
        /// Kind whose table changed.
        kind: RecordKind,
        /// Key of the rewritten row.
        id: String,
    },
    /// A record was removed.
    Deleted {
        /// Kind whose table changed.
        kind: RecordKind,
        /// Key of the removed row.
        id: String,
    },
}
