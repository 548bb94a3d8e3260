use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use crate::{
    core::store::{LedgerError, LedgerStore},
    record::RecordDraft,
    types::{RecordKind, Row},
};

use super::events::LedgerEvent;

/// Failure surfaced by the runtime handle.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The store rejected the operation.
    #[error(transparent)]
    Store(#[from] LedgerError),
    /// The writer loop is no longer running.
    #[error("ledger runtime is not running")]
    ChannelClosed,
}

/// Runtime tuning knobs.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound of the command queue feeding the writer loop.
    pub command_queue_bound: usize,
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Clonable async handle to the single-writer ledger loop.
pub struct LedgerHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<LedgerEvent>,
}

impl Clone for LedgerHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Insert {
        draft: RecordDraft,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    List {
        kind: RecordKind,
        resp: oneshot::Sender<Result<Vec<Row>, RuntimeError>>,
    },
    Update {
        id: String,
        draft: RecordDraft,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Delete {
        kind: RecordKind,
        id: String,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Spawns the writer loop that owns `store` and returns its handle.
///
/// The loop runs on a blocking worker thread because backend calls are
/// synchronous. Every operation's read-scan-write executes there in arrival
/// order, so two callers can never interleave inside one operation.
pub fn spawn_ledger(store: LedgerStore, config: RuntimeConfig) -> LedgerHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<LedgerEvent>(config.event_capacity);

    let events_tx_loop = events_tx.clone();
    let _ = tokio::task::spawn_blocking(move || {
        let mut store = store;
        while let Some(cmd) = cmd_rx.blocking_recv() {
            if handle_command(cmd, &mut store, &events_tx_loop) {
                break;
            }
        }
        debug!("ledger writer loop stopped");
    });

    LedgerHandle { cmd_tx, events_tx }
}

impl LedgerHandle {
    /// Subscribes to mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events_tx.subscribe()
    }

    /// Validates and inserts a new record.
    pub async fn insert(&self, draft: RecordDraft) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Insert { draft, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Returns every row of the kind's table, header row included.
    pub async fn list(&self, kind: RecordKind) -> Result<Vec<Row>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::List { kind, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Overwrites the non-key columns of the row keyed by `id`.
    pub async fn update_by_key(
        &self,
        id: impl Into<String>,
        draft: RecordDraft,
    ) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Update {
                id: id.into(),
                draft,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Removes the row keyed by `id` from the kind's table.
    pub async fn delete_by_key(
        &self,
        kind: RecordKind,
        id: impl Into<String>,
    ) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Delete {
                kind,
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Stops the writer loop after draining commands queued ahead.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    store: &mut LedgerStore,
    events_tx: &broadcast::Sender<LedgerEvent>,
) -> bool {
    match cmd {
        Command::Insert { draft, resp } => {
            let kind = draft.kind();
            let id = draft.id().to_string();
            let res = store.insert(draft).map_err(RuntimeError::from);
            if res.is_ok() {
                let _ = events_tx.send(LedgerEvent::Inserted { kind, id });
            }
            let _ = resp.send(res);
        }
        Command::List { kind, resp } => {
            let res = store.list(kind).map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::Update { id, draft, resp } => {
            let kind = draft.kind();
            let res = store.update_by_key(&id, draft).map_err(RuntimeError::from);
            if res.is_ok() {
                let _ = events_tx.send(LedgerEvent::Updated { kind, id });
            }
            let _ = resp.send(res);
        }
        Command::Delete { kind, id, resp } => {
            let res = store.delete_by_key(kind, &id).map_err(RuntimeError::from);
            if res.is_ok() {
                let _ = events_tx.send(LedgerEvent::Deleted { kind, id });
            }
            let _ = resp.send(res);
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
