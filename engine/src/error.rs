//! Crate-local error type and result alias.
//!
//! Only the client-recoverable error cases live here (`CResult`). Invariant
//! violations -- calling `begin` twice on the same connection, issuing a
//! command with no active transaction, referencing an unknown transaction --
//! are programmer errors and panic instead of round-tripping through this
//! type. See the `mvcc` module for where that distinction is drawn.

use std::fmt::{self, Display, Formatter};

pub type CResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `get` or `delete` found no visible version for the key.
    KeyNotFound,

    /// Commit-time write-write conflict (Snapshot, and Serializable when a
    /// write-write witness fires before any read-write witness).
    WriteWriteConflict,

    /// Commit-time read-write conflict (Serializable only).
    ReadWriteConflict,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key not found"),
            Error::WriteWriteConflict => write!(f, "write-write conflict"),
            Error::ReadWriteConflict => write!(f, "read-write conflict"),
        }
    }
}

impl std::error::Error for Error {}
