use std::sync::Arc;

use ember_chain_core::block::TxLookupEntry;
use ember_database::prelude::{BatchDbWriter, CachedDbAccess, DatabaseStorePrefixes, DirectDbWriter, StoreResult, DB};
use ember_hashes::Hash;
use rocksdb::WriteBatch;

/// tx hash → owning block. Entries die with their block.
#[derive(Clone)]
pub struct DbTxLookupsStore {
    db: Arc<DB>,
    access: CachedDbAccess<Hash, TxLookupEntry>,
}

impl DbTxLookupsStore {
    pub fn new(db: Arc<DB>, cache_size: u64) -> Self {
        Self { db: Arc::clone(&db), access: CachedDbAccess::new(db, cache_size, DatabaseStorePrefixes::TxLookups.into()) }
    }

    pub fn insert(&self, tx_hash: Hash, entry: TxLookupEntry) -> StoreResult<()> {
        self.access.write(DirectDbWriter::new(&self.db), tx_hash, entry)
    }

    pub fn get(&self, tx_hash: Hash) -> StoreResult<TxLookupEntry> {
        self.access.read(tx_hash)
    }

    pub fn has(&self, tx_hash: Hash) -> StoreResult<bool> {
        self.access.has(tx_hash)
    }

    pub fn delete_batch(&self, batch: &mut WriteBatch, tx_hash: Hash) -> StoreResult<()> {
        self.access.delete(BatchDbWriter::new(batch), tx_hash)
    }
}
