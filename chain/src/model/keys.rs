use ember_database::prelude::{DatabaseStorePrefixes, DbKey};
use ember_hashes::Hash;

/// Big-endian block-number key suffix, so forward iteration walks numbers in
/// ascending order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NumberKey([u8; 8]);

impl From<u64> for NumberKey {
    fn from(number: u64) -> Self {
        Self(number.to_be_bytes())
    }
}

impl From<NumberKey> for u64 {
    fn from(key: NumberKey) -> Self {
        u64::from_be_bytes(key.0)
    }
}

impl AsRef<[u8]> for NumberKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The namespaces a full sweep walks. State trie nodes are deliberately
/// absent: the live head still references them, and sweep pruning has no way
/// to tell a dead node from a shared one. The head-number singleton is also
/// outside this list; losing it would blind every future pass.
pub const SWEEP_PREFIXES: [DatabaseStorePrefixes; 14] = [
    DatabaseStorePrefixes::CanonicalHashes,
    DatabaseStorePrefixes::Headers,
    DatabaseStorePrefixes::TotalDifficulties,
    DatabaseStorePrefixes::HeaderNumbers,
    DatabaseStorePrefixes::Bodies,
    DatabaseStorePrefixes::Receipts,
    DatabaseStorePrefixes::TxLookups,
    DatabaseStorePrefixes::BloomBits,
    DatabaseStorePrefixes::AccountSnapshots,
    DatabaseStorePrefixes::StorageSnapshots,
    DatabaseStorePrefixes::Code,
    DatabaseStorePrefixes::DiffLayers,
    DatabaseStorePrefixes::Preimages,
    DatabaseStorePrefixes::ChainConfig,
];

pub fn canonical_hash_key(number: u64) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::CanonicalHashes.as_ref(), NumberKey::from(number))
}

pub fn header_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::Headers.as_ref(), hash)
}

pub fn total_difficulty_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::TotalDifficulties.as_ref(), hash)
}

pub fn header_number_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::HeaderNumbers.as_ref(), hash)
}

pub fn body_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::Bodies.as_ref(), hash)
}

pub fn receipts_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::Receipts.as_ref(), hash)
}

pub fn tx_lookup_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::TxLookups.as_ref(), hash)
}

pub fn account_snapshot_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::AccountSnapshots.as_ref(), hash)
}

pub fn code_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::Code.as_ref(), hash)
}

pub fn diff_layer_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::DiffLayers.as_ref(), hash)
}

pub fn preimage_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::Preimages.as_ref(), hash)
}

pub fn config_key(hash: Hash) -> DbKey {
    DbKey::new(DatabaseStorePrefixes::ChainConfig.as_ref(), hash)
}

/// Returns true if `key` is one of the exact keys holding genesis-block data.
///
/// Genesis data anchors the chain's identity and every future re-sync; sweep
/// pruning consults this guard before deleting anything under a namespace
/// prefix, so a blunt prefix scan can never take the genesis block with it.
pub fn is_genesis_key(genesis_hash: Hash, key: &[u8]) -> bool {
    key == header_key(genesis_hash).as_ref()
        || key == total_difficulty_key(genesis_hash).as_ref()
        || key == canonical_hash_key(0).as_ref()
        || key == header_number_key(genesis_hash).as_ref()
        || key == body_key(genesis_hash).as_ref()
        || key == receipts_key(genesis_hash).as_ref()
        || key == diff_layer_key(genesis_hash).as_ref()
        || key == tx_lookup_key(genesis_hash).as_ref()
        || key == account_snapshot_key(genesis_hash).as_ref()
        || key == preimage_key(genesis_hash).as_ref()
        || key == code_key(genesis_hash).as_ref()
        || key == config_key(genesis_hash).as_ref()
}
