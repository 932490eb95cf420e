use std::sync::Arc;

use ember_database::prelude::{BatchDbWriter, CachedDbAccess, DatabaseStorePrefixes, DirectDbWriter, StoreResult, DB};
use ember_hashes::Hash;
use rocksdb::WriteBatch;

/// Contract code blobs, keyed by the keccak of their contents. Content
/// addressing makes re-insertion of identical code idempotent.
#[derive(Clone)]
pub struct DbCodeStore {
    db: Arc<DB>,
    access: CachedDbAccess<Hash, Vec<u8>>,
}

impl DbCodeStore {
    pub fn new(db: Arc<DB>, cache_size: u64) -> Self {
        Self { db: Arc::clone(&db), access: CachedDbAccess::new(db, cache_size, DatabaseStorePrefixes::Code.into()) }
    }

    pub fn insert(&self, code_hash: Hash, code: Vec<u8>) -> StoreResult<()> {
        self.access.write(DirectDbWriter::new(&self.db), code_hash, code)
    }

    pub fn get(&self, code_hash: Hash) -> StoreResult<Vec<u8>> {
        self.access.read(code_hash)
    }

    pub fn has(&self, code_hash: Hash) -> StoreResult<bool> {
        self.access.has(code_hash)
    }

    pub fn delete_batch(&self, batch: &mut WriteBatch, code_hash: Hash) -> StoreResult<()> {
        self.access.delete(BatchDbWriter::new(batch), code_hash)
    }

    pub fn clear_cache(&self) {
        self.access.clear_cache();
    }
}
