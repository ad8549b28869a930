use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use serde_derive::{Deserialize, Serialize};

use crate::mvcc::version::TxId;

/// The five SQL isolation levels the engine supports. Stored on the
/// [`TransactionRecord`] at `begin` time and frozen for the transaction's
/// lifetime -- changing a database's default isolation never affects an
/// already-running transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Snapshot,
    Serializable,
}

impl Display for IsolationLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            IsolationLevel::ReadUncommitted => "read uncommitted",
            IsolationLevel::ReadCommitted => "read committed",
            IsolationLevel::RepeatableRead => "repeatable read",
            IsolationLevel::Snapshot => "snapshot",
            IsolationLevel::Serializable => "serializable",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle state of a transaction. `InProgress` is the only non-terminal
/// state; `Committed` and `Aborted` are absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    InProgress,
    Committed,
    Aborted,
}

impl Display for TransactionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionState::InProgress => "in progress",
            TransactionState::Committed => "committed",
            TransactionState::Aborted => "aborted",
        };
        write!(f, "{s}")
    }
}

impl TransactionState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, TransactionState::InProgress)
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, TransactionState::Committed)
    }
}

/// A transaction's durable bookkeeping record, as retained by the
/// [`crate::mvcc::database::Database`] for the lifetime of the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TxId,
    pub isolation_level: IsolationLevel,
    pub state: TransactionState,

    /// Transactions that were `InProgress` at the instant this one began.
    /// Frozen at `begin`; used by the snapshot-like visibility predicate.
    pub inprogress: HashSet<TxId>,

    pub readset: HashSet<Vec<u8>>,
    pub writeset: HashSet<Vec<u8>>,
}

impl TransactionRecord {
    pub fn new(id: TxId, isolation_level: IsolationLevel, inprogress: HashSet<TxId>) -> Self {
        TransactionRecord {
            id,
            isolation_level,
            state: TransactionState::InProgress,
            inprogress,
            readset: HashSet::new(),
            writeset: HashSet::new(),
        }
    }
}
