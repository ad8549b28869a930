//! `kv-rs` is an in-memory, multi-version key/value storage engine
//! implementing all five SQL isolation levels -- Read Uncommitted, Read
//! Committed, Repeatable Read, Snapshot Isolation, and Serializable -- over
//! one shared MVCC substrate.
//!
//! All state lives for the process's lifetime only; there is no
//! persistence, no recovery, and no on-disk format. A [`mvcc::Database`]
//! owns the version store and the transaction table; one or more
//! [`mvcc::Connection`]s bind a single active transaction at a time to it.
//!
//! ## Getting started
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use kv_rs::mvcc::{Connection, Database, IsolationLevel};
//!
//! let db = Arc::new(Mutex::new(Database::new(IsolationLevel::Snapshot)));
//! let mut c1 = Connection::new(db.clone());
//! let mut c2 = Connection::new(db.clone());
//!
//! c1.begin();
//! c1.set(b"order_key", b"xxx");
//! c1.commit().unwrap();
//!
//! c2.begin();
//! assert_eq!(c2.get(b"order_key").unwrap(), b"xxx".to_vec());
//! c2.commit().unwrap();
//! ```

pub mod error;
pub mod mvcc;

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use crate::mvcc::{Connection, Database, IsolationLevel};

    #[test]
    fn run() {
        let db = Arc::new(Mutex::new(Database::new(IsolationLevel::ReadCommitted)));
        let mut c1 = Connection::new(db.clone());
        let mut c2 = Connection::new(db.clone());

        c1.begin();
        c1.set(b"b", b"\x01");
        c1.set(b"b", b"\x02");
        c1.commit().unwrap();

        c2.begin();
        assert_eq!(c2.get(b"b").unwrap(), vec![0x02]);
        c2.delete(b"b").unwrap();
        c2.commit().unwrap();

        let mut c3 = Connection::new(db);
        c3.begin();
        assert!(c3.get(b"b").is_err());
        c3.commit().unwrap();
    }
}
