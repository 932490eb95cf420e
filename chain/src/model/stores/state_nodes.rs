use std::sync::Arc;

use ember_database::prelude::{BatchDbWriter, CachedDbAccess, DatabaseStorePrefixes, DirectDbWriter, StoreResult, DB};
use ember_hashes::Hash;
use rocksdb::WriteBatch;

/// Content-addressed trie nodes, keyed by the hash of their encoded content.
/// A node may be shared by the states of many blocks; deleting one is only
/// safe once no retained state root reaches it. That policy lives in the
/// vacuum pipeline, not here.
#[derive(Clone)]
pub struct DbStateNodesStore {
    db: Arc<DB>,
    access: CachedDbAccess<Hash, Vec<u8>>,
}

impl DbStateNodesStore {
    pub fn new(db: Arc<DB>, cache_size: u64) -> Self {
        Self { db: Arc::clone(&db), access: CachedDbAccess::new(db, cache_size, DatabaseStorePrefixes::StateNodes.into()) }
    }

    pub fn insert(&self, node_hash: Hash, node: Vec<u8>) -> StoreResult<()> {
        self.access.write(DirectDbWriter::new(&self.db), node_hash, node)
    }

    pub fn get(&self, node_hash: Hash) -> StoreResult<Vec<u8>> {
        self.access.read(node_hash)
    }

    pub fn has(&self, node_hash: Hash) -> StoreResult<bool> {
        self.access.has(node_hash)
    }

    pub fn delete_batch(&self, batch: &mut WriteBatch, node_hash: Hash) -> StoreResult<()> {
        self.access.delete(BatchDbWriter::new(batch), node_hash)
    }
}
