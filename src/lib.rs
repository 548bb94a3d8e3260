//! Small financial-record ledger over named row tables.
//!
//! Three record kinds (payables, receivables, vacations) each live in one
//! named table of an exchangeable row store. Operations are plain CRUD:
//! insert with duplicate-key detection, list, update-by-key, delete-by-key.
//!
//! # Examples
//!
//! Synchronous usage with [`core::store::LedgerStore`] and the in-memory
//! backend:
//! ```
//! use contalog::{
//!     core::store::LedgerStore,
//!     persist::memory::MemoryBackend,
//!     record::{ObligationDraft, RecordDraft},
//!     types::RecordKind,
//! };
//!
//! let mut store = LedgerStore::open(Box::new(MemoryBackend::new())).expect("open");
//! store
//!     .insert(RecordDraft::Payable(ObligationDraft {
//!         id: "P1".to_string(),
//!         category: "fixa".to_string(),
//!         bank: "X".to_string(),
//!         date: "2024-01-01".to_string(),
//!         amount: "100".to_string(),
//!         payment_control: "ok".to_string(),
//!         due_date: "2024-02-01".to_string(),
//!         alert: None,
//!     }))
//!     .expect("insert");
//!
//! let rows = store.list(RecordKind::Payable).expect("list");
//! assert_eq!(rows.len(), 2); // header row plus the inserted record
//! ```
//!
//! Runtime usage with the SQLite backend:
//! ```no_run
//! use contalog::{
//!     core::store::LedgerStore,
//!     persist::sqlite::SqliteBackend,
//!     record::{RecordDraft, VacationDraft},
//!     runtime::handle::{spawn_ledger, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = SqliteBackend::open("ledger.db").expect("open sqlite");
//! let store = LedgerStore::open(Box::new(backend)).expect("open store");
//! let handle = spawn_ledger(store, RuntimeConfig::default());
//!
//! handle
//!     .insert(RecordDraft::Vacation(VacationDraft {
//!         id: "V1".to_string(),
//!         name: "Ana".to_string(),
//!         start_date: "2024-07-01".to_string(),
//!         end_date: "2024-07-15".to_string(),
//!         category: "annual".to_string(),
//!     }))
//!     .await
//!     .expect("insert");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Ledger store operating over a table backend.
pub mod core;
/// Table backend abstraction with in-memory and SQLite implementations.
pub mod persist;
/// Record drafts, validation, and fixed column orders.
pub mod record;
/// Single-writer runtime handle and change events.
pub mod runtime;
/// Record kinds, table naming, and row/cell primitives.
pub mod types;
