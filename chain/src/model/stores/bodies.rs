use std::sync::Arc;

use ember_chain_core::block::Body;
use ember_database::prelude::{BatchDbWriter, CachedDbAccess, DatabaseStorePrefixes, DirectDbWriter, StoreResult, DB};
use ember_hashes::Hash;
use rocksdb::WriteBatch;

pub trait BodyStoreReader {
    fn get_body(&self, hash: Hash) -> StoreResult<Body>;
    fn has(&self, hash: Hash) -> StoreResult<bool>;
}

#[derive(Clone)]
pub struct DbBodiesStore {
    db: Arc<DB>,
    access: CachedDbAccess<Hash, Body>,
}

impl DbBodiesStore {
    pub fn new(db: Arc<DB>, cache_size: u64) -> Self {
        Self { db: Arc::clone(&db), access: CachedDbAccess::new(db, cache_size, DatabaseStorePrefixes::Bodies.into()) }
    }

    pub fn insert(&self, hash: Hash, body: Body) -> StoreResult<()> {
        self.access.write(DirectDbWriter::new(&self.db), hash, body)
    }

    pub fn delete_batch(&self, batch: &mut WriteBatch, hash: Hash) -> StoreResult<()> {
        self.access.delete(BatchDbWriter::new(batch), hash)
    }

    pub fn clear_cache(&self) {
        self.access.clear_cache();
    }
}

impl BodyStoreReader for DbBodiesStore {
    fn get_body(&self, hash: Hash) -> StoreResult<Body> {
        self.access.read(hash)
    }

    fn has(&self, hash: Hash) -> StoreResult<bool> {
        self.access.has(hash)
    }
}
