//! Shared fixtures for vacuum tests: an in-memory trie collaborator, a
//! recording ancient tier, and a populated-chain builder.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    model::{
        ancient::AncientStore,
        stores::{
            bodies::DbBodiesStore,
            canonical::{CanonicalStore, DbCanonicalStore},
            code::DbCodeStore,
            diff_layers::DbDiffLayersStore,
            headers::DbHeadersStore,
            receipts::DbReceiptsStore,
            state_nodes::DbStateNodesStore,
        },
    },
    pipeline::vacuum::VacuumStores,
    trie::{TrieAccess, TrieCursor, TrieError},
};
use ember_chain_core::{
    account::Account,
    block::{Body, DiffLayer, Receipt},
    header::Header,
};
use ember_database::prelude::{StoreResult, DB};
use ember_hashes::{keccak256, Hash};
use parking_lot::Mutex;
use rocksdb::WriteBatch;

pub fn account_leaf(storage_root: Hash, code_hash: Hash) -> Vec<u8> {
    bincode::serialize(&Account { nonce: 1, balance: 42, storage_root, code_hash }).unwrap()
}

#[derive(Clone, Default)]
pub struct MockTrie {
    pub node_hashes: Vec<Hash>,
    pub leaf_values: Vec<Vec<u8>>,
}

impl TrieCursor for MockTrie {
    fn nodes(&self) -> Box<dyn Iterator<Item = Hash> + '_> {
        Box::new(self.node_hashes.iter().copied())
    }

    fn leaves(&self) -> Box<dyn Iterator<Item = Vec<u8>> + '_> {
        Box::new(self.leaf_values.iter().cloned())
    }
}

/// All tries the mock knows, by root.
#[derive(Default)]
pub struct MockTrieForest {
    tries: HashMap<Hash, MockTrie>,
}

impl MockTrieForest {
    pub fn add_trie(&mut self, root: Hash, node_hashes: Vec<Hash>, leaf_values: Vec<Vec<u8>>) {
        self.tries.insert(root, MockTrie { node_hashes, leaf_values });
    }
}

impl TrieAccess for MockTrieForest {
    type Cursor = MockTrie;

    fn open(&self, root: Hash) -> Result<Self::Cursor, TrieError> {
        self.tries.get(&root).cloned().ok_or(TrieError::MissingRoot(root))
    }
}

/// Records the boundaries it was asked to advance to.
#[derive(Default)]
pub struct RecordingAncientStore {
    pub boundaries: Mutex<Vec<u64>>,
}

impl AncientStore for RecordingAncientStore {
    fn prune_ancients(&self, boundary: u64) -> StoreResult<()> {
        self.boundaries.lock().push(boundary);
        Ok(())
    }
}

pub struct ChainFixture {
    pub stores: VacuumStores<MockTrieForest>,
    pub canonical: Arc<DbCanonicalStore>,
    pub ancient: Arc<RecordingAncientStore>,
    pub genesis_hash: Hash,
}

pub fn block_hash(number: u64) -> Hash {
    header_for(number).hash()
}

pub fn state_root_for(number: u64) -> Hash {
    keccak256(format!("state-{number}").as_bytes())
}

pub fn trie_node_for(number: u64) -> Hash {
    keccak256(format!("node-{number}").as_bytes())
}

fn header_for(number: u64) -> Header {
    Header {
        parent_hash: if number == 0 { Hash::ZERO } else { keccak256(format!("parent-{number}").as_bytes()) },
        number,
        state_root: state_root_for(number),
        transactions_root: Hash::ZERO,
        receipts_root: Hash::ZERO,
        timestamp: 1_700_000_000 + number,
    }
}

/// Builds a chain of blocks `0..=head` with full per-block records and a
/// one-node state trie per block.
pub fn build_chain(db: Arc<DB>, head: u64) -> ChainFixture {
    let mut canonical = DbCanonicalStore::new(Arc::clone(&db), 16);
    let headers = DbHeadersStore::new(Arc::clone(&db), 16);
    let bodies = DbBodiesStore::new(Arc::clone(&db), 16);
    let receipts = DbReceiptsStore::new(Arc::clone(&db), 16);
    let diff_layers = DbDiffLayersStore::new(Arc::clone(&db), 16);
    let state_nodes = DbStateNodesStore::new(Arc::clone(&db), 0);
    let code = DbCodeStore::new(Arc::clone(&db), 0);
    let ancient = Arc::new(RecordingAncientStore::default());
    let mut forest = MockTrieForest::default();

    for number in 0..=head {
        let header = header_for(number);
        let hash = header.hash();
        canonical.set_canonical_hash(number, hash).unwrap();
        let mut batch = WriteBatch::default();
        headers.insert_batch(&mut batch, hash, header, number as u128).unwrap();
        db.write(batch).unwrap();
        bodies.insert(hash, Body::default()).unwrap();
        receipts.insert(hash, vec![Receipt { succeeded: true, cumulative_gas_used: 21_000, logs: vec![] }]).unwrap();
        diff_layers.insert(hash, DiffLayer(vec![number as u8])).unwrap();
        state_nodes.insert(trie_node_for(number), vec![0xfe]).unwrap();
        forest.add_trie(state_root_for(number), vec![trie_node_for(number)], vec![]);
    }
    canonical.set_head_number(head).unwrap();

    let canonical = Arc::new(canonical);
    let ancient_dyn: Arc<dyn AncientStore> = ancient.clone();
    let stores = VacuumStores {
        db,
        canonical: Arc::clone(&canonical),
        headers: Arc::new(headers),
        bodies: Arc::new(bodies),
        receipts: Arc::new(receipts),
        diff_layers: Arc::new(diff_layers),
        state_nodes: Arc::new(state_nodes),
        code: Arc::new(code),
        ancient: ancient_dyn,
        tries: Arc::new(forest),
    };
    let genesis_hash = block_hash(0);
    ChainFixture { stores, canonical, ancient, genesis_hash }
}
