use crate::constants::{EMPTY_CODE_HASH, EMPTY_ROOT};
use ember_hashes::Hash;
use serde::{Deserialize, Serialize};

/// An account record as stored in a state trie leaf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub nonce: u64,
    pub balance: u128,
    pub storage_root: Hash,
    pub code_hash: Hash,
}

impl Account {
    /// Whether the account owns a storage trie of its own.
    pub fn has_storage(&self) -> bool {
        self.storage_root != EMPTY_ROOT
    }

    /// Whether the account owns a code blob.
    pub fn has_code(&self) -> bool {
        self.code_hash != EMPTY_CODE_HASH
    }
}
