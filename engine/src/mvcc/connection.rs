use std::sync::{Arc, Mutex};

use crate::error::CResult;
use crate::mvcc::database::Database;
use crate::mvcc::transaction::TransactionState;
use crate::mvcc::version::TxId;

/// A connection binds at most one active transaction to a shared
/// [`Database`] and translates `begin`/`set`/`delete`/`get`/`commit`/`abort`
/// into calls against it.
///
/// Several `Connection`s typically share one `Database` behind an
/// `Arc<Mutex<_>>`.
pub struct Connection {
    db: Arc<Mutex<Database>>,
    current_tx: Option<TxId>,
}

impl Connection {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Connection { db, current_tx: None }
    }

    pub fn begin(&mut self) -> TxId {
        assert!(self.current_tx.is_none(), "connection already has an active transaction");
        let id = self.db.lock().expect("database mutex poisoned").new_transaction();
        self.current_tx = Some(id);
        id
    }

    pub fn abort(&mut self) {
        let id = self.active();
        self.db
            .lock()
            .expect("database mutex poisoned")
            .complete_transaction(id, TransactionState::Aborted)
            .expect("abort never conflicts");
        self.current_tx = None;
    }

    pub fn commit(&mut self) -> CResult<()> {
        let id = self.active();
        let result = self
            .db
            .lock()
            .expect("database mutex poisoned")
            .complete_transaction(id, TransactionState::Committed);
        self.current_tx = None;
        result
    }

    pub fn set(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) {
        let id = self.active();
        self.db.lock().expect("database mutex poisoned").set(id, key.as_ref().to_vec(), value.as_ref().to_vec());
    }

    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> CResult<()> {
        let id = self.active();
        self.db.lock().expect("database mutex poisoned").delete(id, key.as_ref().to_vec())
    }

    pub fn get(&mut self, key: impl AsRef<[u8]>) -> CResult<Vec<u8>> {
        let id = self.active();
        self.db.lock().expect("database mutex poisoned").get(id, key.as_ref())
    }

    pub fn active_transaction(&self) -> Option<TxId> {
        self.current_tx
    }

    /// State of this connection's currently-bound transaction, or `None` if
    /// no transaction is active.
    pub fn transaction_state(&self) -> Option<TransactionState> {
        let id = self.active_transaction()?;
        Some(self.db.lock().expect("database mutex poisoned").transaction_state(id))
    }

    fn active(&self) -> TxId {
        self.current_tx.expect("no active transaction on this connection")
    }
}

/// Textual commands a driver can translate a line of input into; the engine
/// itself never parses text, only this closed enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Begin,
    Commit,
    Abort,
    Set(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
    Get(Vec<u8>),
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    TxId(TxId),
    Ok,
    Value(Vec<u8>),
    Status(Option<TransactionState>),
}

impl Connection {
    pub fn exec_command(&mut self, command: Command) -> CResult<CommandResult> {
        match command {
            Command::Begin => Ok(CommandResult::TxId(self.begin())),
            Command::Commit => self.commit().map(|()| CommandResult::Ok),
            Command::Abort => {
                self.abort();
                Ok(CommandResult::Ok)
            }
            Command::Set(key, value) => {
                self.set(key, value);
                Ok(CommandResult::Ok)
            }
            Command::Delete(key) => self.delete(key).map(|()| CommandResult::Ok),
            Command::Get(key) => self.get(key).map(CommandResult::Value),
            Command::Status => Ok(CommandResult::Status(self.transaction_state())),
        }
    }
}
