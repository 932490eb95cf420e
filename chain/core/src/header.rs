use crate::hashing;
use ember_hashes::Hash;
use serde::{Deserialize, Serialize};

/// A block header. The hash is not cached; it is recomputed from the fields
/// on demand, which keeps headers recovered from remote peers trivially
/// verifiable against the canonical hash that requested them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub parent_hash: Hash,
    pub number: u64,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub timestamp: u64,
}

impl Header {
    pub fn hash(&self) -> Hash {
        hashing::header::hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_covers_all_fields() {
        let base = Header {
            parent_hash: Hash::from_bytes([1; 32]),
            number: 7,
            state_root: Hash::from_bytes([2; 32]),
            transactions_root: Hash::from_bytes([3; 32]),
            receipts_root: Hash::from_bytes([4; 32]),
            timestamp: 1_700_000_000,
        };
        let mut mutated = base.clone();
        mutated.number += 1;
        assert_ne!(base.hash(), mutated.hash());

        let mut mutated = base.clone();
        mutated.state_root = Hash::from_bytes([9; 32]);
        assert_ne!(base.hash(), mutated.hash());

        assert_eq!(base.hash(), base.clone().hash());
    }
}
