use serde_derive::{Deserialize, Serialize};

/// Monotonically increasing transaction identifier. `0` is reserved as the
/// "not deleted" sentinel in [`Version::tx_end_id`]; real transactions start
/// at 1.
pub type TxId = u64;

/// One immutable version of a key's value.
///
/// Only `tx_end_id` is ever mutated after construction, and only once, from
/// `0` to the id of the transaction that superseded or deleted it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Transaction that created this version.
    pub tx_start_id: TxId,

    /// Transaction that deleted or superseded this version. `0` means live.
    pub tx_end_id: TxId,

    /// Opaque payload; the engine never interprets it.
    pub payload: Vec<u8>,
}

impl Version {
    pub fn new(tx_start_id: TxId, payload: Vec<u8>) -> Self {
        Version { tx_start_id, tx_end_id: 0, payload }
    }

    pub fn is_live(&self) -> bool {
        self.tx_end_id == 0
    }
}
