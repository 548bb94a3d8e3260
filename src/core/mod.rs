//! Ledger core: named-table CRUD over a pluggable row backend.

/// Ledger store and its error type.
pub mod store;
