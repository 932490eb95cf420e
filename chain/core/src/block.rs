use crate::hashing;
use ember_hashes::Hash;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub nonce: u64,
    pub value: u128,
    pub payload: Vec<u8>,
}

impl Transaction {
    pub fn hash(&self) -> Hash {
        hashing::tx::hash(self)
    }
}

/// The non-header portion of a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub succeeded: bool,
    pub cumulative_gas_used: u64,
    pub logs: Vec<Vec<u8>>,
}

/// Location of a transaction inside the chain, kept per tx hash so lookups
/// do not scan bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxLookupEntry {
    pub block_number: u64,
    pub block_hash: Hash,
}

/// An opaque per-block state delta record. The vacuum only creates and
/// deletes these; their internal layout belongs to the state layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLayer(pub Vec<u8>);
