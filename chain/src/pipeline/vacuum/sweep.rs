use crate::{
    model::keys::{is_genesis_key, SWEEP_PREFIXES},
    pipeline::vacuum::{VacuumState, VacuumStores, VacuumStrategy},
    trie::TrieAccess,
};
use ember_database::prelude::DbKey;
use ember_hashes::Hash;
use log::{error, info, warn};
use rocksdb::{Direction, IteratorMode, ReadOptions, WriteBatch};

/// Full namespace sweep: walks every swept prefix end to end and deletes all
/// keys except the guarded genesis records, then advances the ancient tier to
/// the current watermark.
///
/// Operates on the raw keyspace, below the typed store caches; it is intended
/// for namespaces the hot path no longer reads (or reads through the DB).
#[derive(Clone, Copy)]
pub struct SweepVacuum {
    genesis_hash: Hash,
}

impl SweepVacuum {
    pub fn new(genesis_hash: Hash) -> Self {
        Self { genesis_hash }
    }
}

impl<T: TrieAccess> VacuumStrategy<T> for SweepVacuum {
    fn ident(&self) -> &'static str {
        "sweep"
    }

    fn execute(&self, stores: &VacuumStores<T>, state: &mut VacuumState) {
        info!("Sweep vacuum: clearing {} namespaces", SWEEP_PREFIXES.len());
        for prefix in SWEEP_PREFIXES {
            let prefix_key = DbKey::prefix_only(prefix.as_ref());
            let mut read_opts = ReadOptions::default();
            read_opts.set_iterate_range(rocksdb::PrefixRange(prefix_key.as_ref()));
            let iter = stores.db.iterator_opt(IteratorMode::From(prefix_key.as_ref(), Direction::Forward), read_opts);

            // One batch per namespace: a failed namespace leaves the others
            // fully applied
            let mut batch = WriteBatch::default();
            let mut kept = 0usize;
            for entry in iter {
                let key = match entry {
                    Ok((key, _)) => key,
                    Err(err) => {
                        warn!("Sweep vacuum: iteration failed under prefix {prefix:?}: {err}");
                        break;
                    }
                };
                if is_genesis_key(self.genesis_hash, &key) {
                    kept += 1;
                    continue;
                }
                batch.delete(&key);
            }

            let deleted = batch.len();
            if let Err(err) = stores.db.write(batch) {
                error!("Sweep vacuum: failed to clear prefix {prefix:?}: {err}");
                continue;
            }
            info!("Sweep vacuum: prefix {prefix:?} cleared ({deleted} deleted, {kept} genesis keys kept)");
        }

        // The raw deletes above bypass the typed store caches; drop them so a
        // warm store cannot keep serving swept entries
        stores.canonical.clear_index_caches();
        stores.headers.clear_caches();
        stores.bodies.clear_cache();
        stores.receipts.clear_cache();
        stores.diff_layers.clear_cache();
        stores.code.clear_cache();

        if let Err(err) = stores.ancient.prune_ancients(state.last_pruned_number) {
            warn!("Sweep vacuum: ancient-tier pruning up to {} failed: {err}", state.last_pruned_number);
        }
    }
}
