use std::sync::Arc;

use crate::model::keys::NumberKey;
use ember_database::prelude::{
    CachedDbAccess, CachedDbItem, DatabaseStorePrefixes, DbWriter, DirectDbWriter, StoreResult, DB,
};
use ember_hashes::Hash;

/// Reader API for `CanonicalStore`: the number ↔ hash index plus the current
/// canonical height. This is the pruning engine's view of the chain head.
pub trait CanonicalStoreReader {
    fn head_number(&self) -> StoreResult<u64>;
    fn canonical_hash(&self, number: u64) -> StoreResult<Hash>;
    /// Inverse lookup. After a block is pruned this still answers (from the
    /// tombstone written at pruning time), distinguishing "known but pruned"
    /// from "unknown".
    fn block_number(&self, hash: Hash) -> StoreResult<u64>;
}

pub trait CanonicalStore: CanonicalStoreReader {
    fn set_head_number(&mut self, number: u64) -> StoreResult<()>;
    fn set_canonical_hash(&self, number: u64, hash: Hash) -> StoreResult<()>;
    fn write_block_number(&self, writer: impl DbWriter, hash: Hash, number: u64) -> StoreResult<()>;
}

/// A DB + cache implementation of `CanonicalStore`, with concurrent readers support.
#[derive(Clone)]
pub struct DbCanonicalStore {
    db: Arc<DB>,
    hash_by_number_access: CachedDbAccess<NumberKey, Hash>,
    number_by_hash_access: CachedDbAccess<Hash, u64>,
    head_number: CachedDbItem<u64>,
}

impl DbCanonicalStore {
    pub fn new(db: Arc<DB>, cache_size: u64) -> Self {
        Self {
            db: Arc::clone(&db),
            hash_by_number_access: CachedDbAccess::new(
                Arc::clone(&db),
                cache_size,
                DatabaseStorePrefixes::CanonicalHashes.into(),
            ),
            number_by_hash_access: CachedDbAccess::new(
                Arc::clone(&db),
                cache_size,
                DatabaseStorePrefixes::HeaderNumbers.into(),
            ),
            head_number: CachedDbItem::new(db, DatabaseStorePrefixes::HeadNumber.into()),
        }
    }

    /// Drops the number↔hash caches. The head-number item is left alone; its
    /// namespace is never swept.
    pub fn clear_index_caches(&self) {
        self.hash_by_number_access.clear_cache();
        self.number_by_hash_access.clear_cache();
    }
}

impl CanonicalStoreReader for DbCanonicalStore {
    fn head_number(&self) -> StoreResult<u64> {
        self.head_number.read()
    }

    fn canonical_hash(&self, number: u64) -> StoreResult<Hash> {
        self.hash_by_number_access.read(number.into())
    }

    fn block_number(&self, hash: Hash) -> StoreResult<u64> {
        self.number_by_hash_access.read(hash)
    }
}

impl CanonicalStore for DbCanonicalStore {
    fn set_head_number(&mut self, number: u64) -> StoreResult<()> {
        self.head_number.write(DirectDbWriter::new(&self.db), &number)
    }

    fn set_canonical_hash(&self, number: u64, hash: Hash) -> StoreResult<()> {
        self.hash_by_number_access.write(DirectDbWriter::new(&self.db), number.into(), hash)?;
        self.number_by_hash_access.write(DirectDbWriter::new(&self.db), hash, number)
    }

    fn write_block_number(&self, writer: impl DbWriter, hash: Hash, number: u64) -> StoreResult<()> {
        self.number_by_hash_access.write(writer, hash, number)
    }
}
