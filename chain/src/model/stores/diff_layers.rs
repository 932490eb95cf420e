use std::sync::Arc;

use ember_chain_core::block::DiffLayer;
use ember_database::prelude::{BatchDbWriter, CachedDbAccess, DatabaseStorePrefixes, DirectDbWriter, StoreResult, DB};
use ember_hashes::Hash;
use rocksdb::WriteBatch;

/// Per-block state deltas, keyed by block hash. Deleted alongside their block.
#[derive(Clone)]
pub struct DbDiffLayersStore {
    db: Arc<DB>,
    access: CachedDbAccess<Hash, DiffLayer>,
}

impl DbDiffLayersStore {
    pub fn new(db: Arc<DB>, cache_size: u64) -> Self {
        Self { db: Arc::clone(&db), access: CachedDbAccess::new(db, cache_size, DatabaseStorePrefixes::DiffLayers.into()) }
    }

    pub fn insert(&self, hash: Hash, layer: DiffLayer) -> StoreResult<()> {
        self.access.write(DirectDbWriter::new(&self.db), hash, layer)
    }

    pub fn get(&self, hash: Hash) -> StoreResult<DiffLayer> {
        self.access.read(hash)
    }

    pub fn has(&self, hash: Hash) -> StoreResult<bool> {
        self.access.has(hash)
    }

    pub fn delete_batch(&self, batch: &mut WriteBatch, hash: Hash) -> StoreResult<()> {
        self.access.delete(BatchDbWriter::new(batch), hash)
    }

    pub fn clear_cache(&self) {
        self.access.clear_cache();
    }
}
