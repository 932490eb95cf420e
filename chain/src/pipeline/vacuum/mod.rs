//! The vacuum: background reclamation of block data and state that fell out
//! of the retention window, plus the periodic full namespace sweep.

pub mod processor;
pub mod state_cleaner;
pub mod sweep;
pub mod windowed;

#[cfg(test)]
pub(crate) mod testutils;

use std::sync::Arc;

use crate::{
    model::{
        ancient::AncientStore,
        stores::{
            bodies::DbBodiesStore, canonical::DbCanonicalStore, code::DbCodeStore, diff_layers::DbDiffLayersStore,
            headers::DbHeadersStore, receipts::DbReceiptsStore, state_nodes::DbStateNodesStore,
        },
    },
    trie::TrieAccess,
};
use ember_database::prelude::DB;

pub enum VacuumMessage {
    Exit,
}

/// Watermark shared by the two strategies. Owned by the worker thread; never
/// read or written elsewhere, so it needs no synchronization. Initialized to
/// zero on process start and recomputed from chain height by the first
/// windowed pass; it is deliberately not persisted.
#[derive(Default)]
pub struct VacuumState {
    /// Highest block number already fully pruned. Advances monotonically.
    pub last_pruned_number: u64,
}

/// The store handles a vacuum pass operates on.
pub struct VacuumStores<T: TrieAccess> {
    pub db: Arc<DB>,
    pub canonical: Arc<DbCanonicalStore>,
    pub headers: Arc<DbHeadersStore>,
    pub bodies: Arc<DbBodiesStore>,
    pub receipts: Arc<DbReceiptsStore>,
    pub diff_layers: Arc<DbDiffLayersStore>,
    pub state_nodes: Arc<DbStateNodesStore>,
    pub code: Arc<DbCodeStore>,
    pub ancient: Arc<dyn AncientStore>,
    pub tries: Arc<T>,
}

/// A pruning strategy: decides what range/keys a pass covers and executes it.
/// Every failure inside a pass is logged and absorbed; strategies never
/// propagate errors up to the worker loop.
pub trait VacuumStrategy<T: TrieAccess> {
    fn ident(&self) -> &'static str;
    fn execute(&self, stores: &VacuumStores<T>, state: &mut VacuumState);
}
