use std::sync::Arc;

use ember_chain_core::header::Header;
use ember_database::prelude::{
    BatchDbWriter, CachedDbAccess, DatabaseStorePrefixes, DirectDbWriter, StoreError, StoreResult, DB,
};
use ember_hashes::Hash;
use rocksdb::WriteBatch;

pub trait HeaderStoreReader {
    fn get_header(&self, hash: Hash) -> StoreResult<Header>;
    fn get_total_difficulty(&self, hash: Hash) -> StoreResult<u128>;
    fn has(&self, hash: Hash) -> StoreResult<bool>;
}

pub trait HeaderStore: HeaderStoreReader {
    /// Direct, unbatched write of a bare header (no total difficulty), used
    /// when recovering a header from a remote source.
    fn insert(&self, hash: Hash, header: Header) -> StoreResult<()>;
}

/// A DB + cache implementation of `HeaderStore`, with concurrency support.
/// Headers and their total-difficulty records live in sibling namespaces and
/// are written/deleted together.
#[derive(Clone)]
pub struct DbHeadersStore {
    db: Arc<DB>,
    headers_access: CachedDbAccess<Hash, Header>,
    td_access: CachedDbAccess<Hash, u128>,
}

impl DbHeadersStore {
    pub fn new(db: Arc<DB>, cache_size: u64) -> Self {
        Self {
            db: Arc::clone(&db),
            headers_access: CachedDbAccess::new(Arc::clone(&db), cache_size, DatabaseStorePrefixes::Headers.into()),
            td_access: CachedDbAccess::new(db, cache_size, DatabaseStorePrefixes::TotalDifficulties.into()),
        }
    }

    pub fn insert_batch(&self, batch: &mut WriteBatch, hash: Hash, header: Header, total_difficulty: u128) -> StoreResult<()> {
        if self.headers_access.has(hash)? {
            return Err(StoreError::KeyAlreadyExists(hash.to_string()));
        }
        self.headers_access.write(BatchDbWriter::new(batch), hash, header)?;
        self.td_access.write(BatchDbWriter::new(batch), hash, total_difficulty)?;
        Ok(())
    }

    /// Drops both caches. Required after raw deletes under the header or
    /// total-difficulty namespaces.
    pub fn clear_caches(&self) {
        self.headers_access.clear_cache();
        self.td_access.clear_cache();
    }

    /// Queues deletion of the header and its total-difficulty record.
    pub fn delete_batch(&self, batch: &mut WriteBatch, hash: Hash) -> StoreResult<()> {
        self.headers_access.delete(BatchDbWriter::new(batch), hash)?;
        self.td_access.delete(BatchDbWriter::new(batch), hash)?;
        Ok(())
    }
}

impl HeaderStoreReader for DbHeadersStore {
    fn get_header(&self, hash: Hash) -> StoreResult<Header> {
        self.headers_access.read(hash)
    }

    fn get_total_difficulty(&self, hash: Hash) -> StoreResult<u128> {
        self.td_access.read(hash)
    }

    fn has(&self, hash: Hash) -> StoreResult<bool> {
        self.headers_access.has(hash)
    }
}

impl HeaderStore for DbHeadersStore {
    fn insert(&self, hash: Hash, header: Header) -> StoreResult<()> {
        if self.headers_access.has(hash)? {
            return Err(StoreError::KeyAlreadyExists(hash.to_string()));
        }
        self.headers_access.write(DirectDbWriter::new(&self.db), hash, header)
    }
}
