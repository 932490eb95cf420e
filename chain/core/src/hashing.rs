use ember_hashes::Hash;
use sha3::{Digest, Keccak256};

pub mod header {
    use super::*;
    use crate::header::Header;

    /// Returns the header hash: keccak-256 over the fixed-order field encoding.
    pub fn hash(header: &Header) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(header.parent_hash.as_bytes());
        hasher.update(header.number.to_be_bytes());
        hasher.update(header.state_root.as_bytes());
        hasher.update(header.transactions_root.as_bytes());
        hasher.update(header.receipts_root.as_bytes());
        hasher.update(header.timestamp.to_be_bytes());
        Hash::from_bytes(hasher.finalize().into())
    }
}

pub mod tx {
    use super::*;
    use crate::block::Transaction;

    /// Returns the transaction hash.
    pub fn hash(tx: &Transaction) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(tx.nonce.to_be_bytes());
        hasher.update(tx.value.to_be_bytes());
        hasher.update((tx.payload.len() as u64).to_be_bytes());
        hasher.update(&tx.payload);
        Hash::from_bytes(hasher.finalize().into())
    }
}
