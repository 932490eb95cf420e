use std::sync::Arc;

use ember_chain_core::block::Receipt;
use ember_database::prelude::{BatchDbWriter, CachedDbAccess, DatabaseStorePrefixes, DirectDbWriter, StoreResult, DB};
use ember_hashes::Hash;
use rocksdb::WriteBatch;

pub trait ReceiptsStoreReader {
    fn get_receipts(&self, hash: Hash) -> StoreResult<Vec<Receipt>>;
    fn has(&self, hash: Hash) -> StoreResult<bool>;
}

#[derive(Clone)]
pub struct DbReceiptsStore {
    db: Arc<DB>,
    access: CachedDbAccess<Hash, Vec<Receipt>>,
}

impl DbReceiptsStore {
    pub fn new(db: Arc<DB>, cache_size: u64) -> Self {
        Self { db: Arc::clone(&db), access: CachedDbAccess::new(db, cache_size, DatabaseStorePrefixes::Receipts.into()) }
    }

    pub fn insert(&self, hash: Hash, receipts: Vec<Receipt>) -> StoreResult<()> {
        self.access.write(DirectDbWriter::new(&self.db), hash, receipts)
    }

    pub fn delete_batch(&self, batch: &mut WriteBatch, hash: Hash) -> StoreResult<()> {
        self.access.delete(BatchDbWriter::new(batch), hash)
    }

    pub fn clear_cache(&self) {
        self.access.clear_cache();
    }
}

impl ReceiptsStoreReader for DbReceiptsStore {
    fn get_receipts(&self, hash: Hash) -> StoreResult<Vec<Receipt>> {
        self.access.read(hash)
    }

    fn has(&self, hash: Hash) -> StoreResult<bool> {
        self.access.has(hash)
    }
}
