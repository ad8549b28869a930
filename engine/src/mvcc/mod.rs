//! Multi-Version Concurrency Control: per-key version chains, an
//! isolation-level-dispatched visibility predicate, and commit-time
//! write-write / read-write conflict detection.
//!
//! [`Database`] owns the version store and the transaction table.
//! [`Connection`] binds one active transaction at a time to a `Database`
//! and exposes the `begin`/`set`/`delete`/`get`/`commit`/`abort` surface,
//! either directly or through [`Command`]/[`Connection::exec_command`].

pub mod connection;
pub mod database;
pub mod transaction;
pub mod version;

pub use connection::{Command, CommandResult, Connection};
pub use database::Database;
pub use transaction::{IsolationLevel, TransactionRecord, TransactionState};
pub use version::{TxId, Version};
