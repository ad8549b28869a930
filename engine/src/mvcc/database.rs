use std::collections::HashMap;

use crate::error::{CResult, Error};
use crate::mvcc::transaction::{IsolationLevel, TransactionRecord, TransactionState};
use crate::mvcc::version::{TxId, Version};

/// Owns the global version store and the transaction table, and implements
/// the visibility predicate and commit-time conflict analysis that give the
/// five isolation levels their distinct behavior.
///
/// A `Database` is normally wrapped in `Arc<Mutex<Database>>` and shared by
/// several [`crate::mvcc::connection::Connection`]s, mirroring the way the
/// teacher's own MVCC engine shares a single storage engine handle.
pub struct Database {
    default_isolation: IsolationLevel,
    store: HashMap<Vec<u8>, Vec<Version>>,
    transactions: HashMap<TxId, TransactionRecord>,
    next_transaction_id: TxId,
}

impl Database {
    pub fn new(default_isolation: IsolationLevel) -> Self {
        Database {
            default_isolation,
            store: HashMap::new(),
            transactions: HashMap::new(),
            next_transaction_id: 1,
        }
    }

    /// Allocates a new transaction, snapshotting the current in-progress set.
    pub fn new_transaction(&mut self) -> TxId {
        let id = self.next_transaction_id;
        self.next_transaction_id += 1;

        let inprogress = self
            .transactions
            .values()
            .filter(|t| t.state.is_in_progress())
            .map(|t| t.id)
            .collect();

        self.transactions.insert(id, TransactionRecord::new(id, self.default_isolation, inprogress));
        id
    }

    pub fn transaction_state(&self, id: TxId) -> TransactionState {
        self.transactions.get(&id).expect("unknown transaction").state
    }

    /// Transitions a transaction to `Committed` or `Aborted`. Committing
    /// under Snapshot or Serializable runs conflict analysis first; a
    /// conflict aborts the transaction instead and is reported to the
    /// caller.
    pub fn complete_transaction(&mut self, id: TxId, target: TransactionState) -> CResult<()> {
        assert!(!matches!(target, TransactionState::InProgress), "cannot complete into InProgress");
        assert!(
            self.transactions.get(&id).expect("unknown transaction").state.is_in_progress(),
            "transaction {id} is not in progress"
        );

        let conflict = if target == TransactionState::Committed {
            let t = self.transactions.get(&id).expect("unknown transaction");
            match t.isolation_level {
                IsolationLevel::Snapshot => {
                    Self::check_write_write(&self.transactions, t).then_some(Error::WriteWriteConflict)
                }
                IsolationLevel::Serializable => {
                    if Self::check_write_write(&self.transactions, t) {
                        Some(Error::WriteWriteConflict)
                    } else if Self::check_read_write(&self.transactions, t) {
                        Some(Error::ReadWriteConflict)
                    } else {
                        None
                    }
                }
                IsolationLevel::ReadUncommitted | IsolationLevel::ReadCommitted | IsolationLevel::RepeatableRead => None,
            }
        } else {
            None
        };

        let record = self.transactions.get_mut(&id).expect("unknown transaction");
        record.state = if conflict.is_some() { TransactionState::Aborted } else { target };

        match conflict {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Writes a fresh version, superseding whatever `tx_id` could see.
    pub fn set(&mut self, tx_id: TxId, key: Vec<u8>, value: Vec<u8>) {
        self.supersede(tx_id, &key);
        self.store.entry(key.clone()).or_default().push(Version::new(tx_id, value));
        self.transactions.get_mut(&tx_id).expect("unknown transaction").writeset.insert(key);
    }

    /// Deletes whatever version of `key` is visible to `tx_id`. The
    /// writeset is only touched when a version was actually superseded.
    pub fn delete(&mut self, tx_id: TxId, key: Vec<u8>) -> CResult<()> {
        if !self.supersede(tx_id, &key) {
            return Err(Error::KeyNotFound);
        }
        self.transactions.get_mut(&tx_id).expect("unknown transaction").writeset.insert(key);
        Ok(())
    }

    pub fn get(&mut self, tx_id: TxId, key: &[u8]) -> CResult<Vec<u8>> {
        self.transactions.get_mut(&tx_id).expect("unknown transaction").readset.insert(key.to_vec());

        let Database { store, transactions, .. } = self;
        let reader = transactions.get(&tx_id).expect("unknown transaction");
        let chain = store.get(key).ok_or(Error::KeyNotFound)?;
        chain
            .iter()
            .rev()
            .find(|v| Self::is_visible(transactions, reader, v))
            .map(|v| v.payload.clone())
            .ok_or(Error::KeyNotFound)
    }

    /// Walks `key`'s version chain newest-to-oldest, marking every version
    /// visible to `tx_id` as superseded by it. Returns whether any version
    /// was found.
    fn supersede(&mut self, tx_id: TxId, key: &[u8]) -> bool {
        let Database { store, transactions, .. } = self;
        let reader = transactions.get(&tx_id).expect("unknown transaction");
        let Some(chain) = store.get_mut(key) else { return false };

        let mut found = false;
        for v in chain.iter_mut().rev() {
            if Self::is_visible(transactions, reader, v) {
                v.tx_end_id = tx_id;
                found = true;
            }
        }
        found
    }

    /// Isolation-level dispatch for the visibility predicate.
    fn is_visible(transactions: &HashMap<TxId, TransactionRecord>, reader: &TransactionRecord, v: &Version) -> bool {
        match reader.isolation_level {
            IsolationLevel::ReadUncommitted => v.is_live(),
            IsolationLevel::ReadCommitted => Self::visible_read_committed(transactions, reader, v),
            IsolationLevel::RepeatableRead | IsolationLevel::Snapshot | IsolationLevel::Serializable => {
                Self::visible_snapshot_like(transactions, reader, v)
            }
        }
    }

    fn visible_read_committed(transactions: &HashMap<TxId, TransactionRecord>, reader: &TransactionRecord, v: &Version) -> bool {
        if v.tx_start_id != reader.id && !transactions.get(&v.tx_start_id).expect("unknown transaction").state.is_committed() {
            return false;
        }
        if v.tx_end_id == reader.id {
            return false;
        }
        if v.tx_end_id > 0 && transactions.get(&v.tx_end_id).expect("unknown transaction").state.is_committed() {
            return false;
        }
        true
    }

    /// Shared predicate for Repeatable Read, Snapshot, and Serializable:
    /// a transaction sees only what had committed strictly before it began.
    fn visible_snapshot_like(transactions: &HashMap<TxId, TransactionRecord>, reader: &TransactionRecord, v: &Version) -> bool {
        if v.tx_start_id > reader.id {
            return false;
        }
        if reader.inprogress.contains(&v.tx_start_id) {
            return false;
        }
        if v.tx_start_id != reader.id && !transactions.get(&v.tx_start_id).expect("unknown transaction").state.is_committed() {
            return false;
        }
        if v.tx_end_id == reader.id {
            return false;
        }
        if v.tx_end_id > 0
            && v.tx_end_id < reader.id
            && !reader.inprogress.contains(&v.tx_end_id)
            && transactions.get(&v.tx_end_id).expect("unknown transaction").state.is_committed()
        {
            return false;
        }
        true
    }

    /// Transactions that overlapped `t`'s lifetime and have since committed:
    /// those it saw as in-progress at `begin`, plus any begun after it.
    fn candidate_ids(transactions: &HashMap<TxId, TransactionRecord>, t: &TransactionRecord) -> Vec<TxId> {
        transactions
            .values()
            .filter(|u| u.id != t.id && u.state.is_committed() && (t.inprogress.contains(&u.id) || u.id > t.id))
            .map(|u| u.id)
            .collect()
    }

    fn check_write_write(transactions: &HashMap<TxId, TransactionRecord>, t: &TransactionRecord) -> bool {
        Self::candidate_ids(transactions, t).into_iter().any(|id| {
            let u = transactions.get(&id).expect("unknown transaction");
            !t.writeset.is_disjoint(&u.writeset)
        })
    }

    fn check_read_write(transactions: &HashMap<TxId, TransactionRecord>, t: &TransactionRecord) -> bool {
        Self::candidate_ids(transactions, t).into_iter().any(|id| {
            let u = transactions.get(&id).expect("unknown transaction");
            !t.writeset.is_disjoint(&u.readset) || !t.readset.is_disjoint(&u.writeset)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transaction_ids_are_monotonic() {
        let mut db = Database::new(IsolationLevel::Snapshot);
        let a = db.new_transaction();
        let b = db.new_transaction();
        assert!(b > a);
    }

    #[test]
    fn serializable_commit_with_empty_sets_always_succeeds() {
        let mut db = Database::new(IsolationLevel::Serializable);
        let t1 = db.new_transaction();
        let t2 = db.new_transaction();
        db.complete_transaction(t1, TransactionState::Committed).unwrap();
        db.complete_transaction(t2, TransactionState::Committed).unwrap();
    }

    #[test]
    fn read_uncommitted_sees_uncommitted_writes() {
        let mut db = Database::new(IsolationLevel::ReadUncommitted);
        let writer = db.new_transaction();
        db.set(writer, b"x".to_vec(), b"hey".to_vec());

        let reader = db.new_transaction();
        assert_eq!(db.get(reader, b"x").unwrap(), b"hey".to_vec());
    }

    #[test]
    fn transaction_state_reflects_lifecycle() {
        let mut db = Database::new(IsolationLevel::Snapshot);
        let t = db.new_transaction();
        assert_eq!(db.transaction_state(t), TransactionState::InProgress);

        db.complete_transaction(t, TransactionState::Committed).unwrap();
        assert_eq!(db.transaction_state(t), TransactionState::Committed);
    }

    #[test]
    #[should_panic(expected = "unknown transaction")]
    fn transaction_state_of_unknown_id_panics() {
        let db = Database::new(IsolationLevel::Snapshot);
        db.transaction_state(42);
    }

    #[test]
    #[should_panic(expected = "not in progress")]
    fn complete_transaction_twice_panics_before_running_conflict_analysis() {
        let mut db = Database::new(IsolationLevel::Serializable);
        let t = db.new_transaction();
        db.complete_transaction(t, TransactionState::Committed).unwrap();
        let _ = db.complete_transaction(t, TransactionState::Committed);
    }

    #[test]
    fn aborted_writes_are_invisible_to_snapshot() {
        let mut db = Database::new(IsolationLevel::Snapshot);
        let writer = db.new_transaction();
        db.set(writer, b"x".to_vec(), b"hey".to_vec());
        db.complete_transaction(writer, TransactionState::Aborted).unwrap();

        let reader = db.new_transaction();
        assert_eq!(db.get(reader, b"x").unwrap_err(), Error::KeyNotFound);
    }
}
