use crate::{
    config::BOOTSTRAP_WINDOW_FACTOR,
    model::stores::{canonical::CanonicalStore, canonical::CanonicalStoreReader, headers::HeaderStoreReader},
    pipeline::vacuum::{state_cleaner::clean_state_at_root, VacuumState, VacuumStores, VacuumStrategy},
    trie::TrieAccess,
};
use ember_database::prelude::{BatchDbWriter, StoreResult, StoreResultExtensions};
use ember_hashes::Hash;
use log::{debug, error, info, warn};
use rocksdb::WriteBatch;

/// Windowed structural pruning: walks block numbers between the watermark and
/// `head - retention_depth - 1`, deep-cleaning each block's state trie and
/// deleting its chain records.
#[derive(Clone, Copy)]
pub struct WindowedVacuum {
    retention_depth: u64,
}

impl WindowedVacuum {
    pub fn new(retention_depth: u64) -> Self {
        Self { retention_depth }
    }

    fn clean_block<T: TrieAccess>(&self, stores: &VacuumStores<T>, number: u64, hash: Hash) -> StoreResult<()> {
        let mut batch = WriteBatch::default();

        match stores.headers.get_header(hash).optional()? {
            Some(header) => {
                clean_state_at_root(stores.tries.as_ref(), &stores.state_nodes, &stores.code, header.state_root, &mut batch)?
            }
            // Header already gone (e.g. a rerun after a crash); the remaining
            // namespaces are still cleaned below
            None => debug!("Windowed vacuum: no local header for block {number} ({hash}), skipping state walk"),
        }

        stores.headers.delete_batch(&mut batch, hash)?;
        stores.bodies.delete_batch(&mut batch, hash)?;
        stores.receipts.delete_batch(&mut batch, hash)?;
        stores.diff_layers.delete_batch(&mut batch, hash)?;
        // Tombstone: future lookups see "known but pruned" rather than "unknown"
        stores.canonical.write_block_number(BatchDbWriter::new(&mut batch), hash, number)?;

        if let Err(err) = stores.db.write(batch) {
            error!("Windowed vacuum: failed to delete block {number} ({hash}): {err}");
        }
        Ok(())
    }
}

impl<T: TrieAccess> VacuumStrategy<T> for WindowedVacuum {
    fn ident(&self) -> &'static str {
        "windowed"
    }

    fn execute(&self, stores: &VacuumStores<T>, state: &mut VacuumState) {
        let head = match stores.canonical.head_number().optional() {
            Ok(Some(head)) => head,
            Ok(None) => return,
            Err(err) => {
                warn!("Windowed vacuum: cannot read chain head: {err}");
                return;
            }
        };
        if head < state.last_pruned_number + self.retention_depth + 1 {
            // Not enough history accumulated past the safety margin
            return;
        }

        let mut from = state.last_pruned_number + 1;
        if from == 1 {
            // First pass since process start: reach deeper to catch the backlog
            from = head.saturating_sub(BOOTSTRAP_WINDOW_FACTOR * self.retention_depth).max(1);
        }
        let to = head - self.retention_depth - 1;
        if to < from {
            return;
        }
        // Advanced before the work so a crash mid-pass cannot double-report
        // the same range; a partially-done range is simply left behind
        state.last_pruned_number = to;

        info!("Windowed vacuum: pruning blocks {from}..={to}");
        let total = to - from + 1;
        let mut last_percent = 0;
        for number in from..=to {
            match stores.canonical.canonical_hash(number).optional() {
                Ok(Some(hash)) => {
                    if let Err(err) = self.clean_block(stores, number, hash) {
                        warn!("Windowed vacuum: failed to clean block {number}: {err}");
                    }
                }
                Ok(None) => {}
                Err(err) => warn!("Windowed vacuum: cannot resolve canonical hash of {number}: {err}"),
            }
            let percent = 100 * (number - from + 1) / total;
            if percent != last_percent {
                last_percent = percent;
                info!("Windowed vacuum: progress {percent}%");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stores::{bodies::BodyStoreReader, receipts::ReceiptsStoreReader};
    use crate::pipeline::vacuum::testutils::{block_hash, build_chain, trie_node_for};
    use ember_database::prelude::ConnBuilder;

    #[test]
    fn test_bootstrap_window() {
        // retentionDepth=100, head=250, watermark=0: from clamps to 1, to=149
        let (_lifetime, db) = ember_database::create_temp_db!(ConnBuilder::default());
        let fixture = build_chain(db, 250);
        let strategy = WindowedVacuum::new(100);
        let mut state = VacuumState::default();

        strategy.execute(&fixture.stores, &mut state);
        assert_eq!(state.last_pruned_number, 149);

        for number in 1..=149 {
            let hash = block_hash(number);
            assert!(!fixture.stores.headers.has(hash).unwrap(), "header {number} should be pruned");
            assert!(!fixture.stores.bodies.has(hash).unwrap(), "body {number} should be pruned");
            assert!(!fixture.stores.receipts.has(hash).unwrap());
            assert!(!fixture.stores.diff_layers.has(hash).unwrap());
            assert!(!fixture.stores.state_nodes.has(trie_node_for(number)).unwrap());
            // Tombstone remains
            assert_eq!(fixture.canonical.block_number(hash).unwrap(), number);
        }
        for number in 150..=250 {
            let hash = block_hash(number);
            assert!(fixture.stores.headers.has(hash).unwrap(), "header {number} should survive");
            assert!(fixture.stores.bodies.has(hash).unwrap());
            assert!(fixture.stores.state_nodes.has(trie_node_for(number)).unwrap());
        }
        // Genesis is untouched by windowed pruning
        assert!(fixture.stores.headers.has(fixture.genesis_hash).unwrap());
    }

    #[test]
    fn test_noop_within_safety_margin() {
        let (_lifetime, db) = ember_database::create_temp_db!(ConnBuilder::default());
        let fixture = build_chain(db, 80);
        let strategy = WindowedVacuum::new(100);
        let mut state = VacuumState::default();

        strategy.execute(&fixture.stores, &mut state);
        assert_eq!(state.last_pruned_number, 0);
        for number in 0..=80 {
            assert!(fixture.stores.headers.has(block_hash(number)).unwrap());
        }
    }

    #[test]
    fn test_watermark_is_monotonic_and_incremental() {
        let (_lifetime, db) = ember_database::create_temp_db!(ConnBuilder::default());
        let fixture = build_chain(db, 250);
        let strategy = WindowedVacuum::new(100);
        let mut state = VacuumState::default();

        strategy.execute(&fixture.stores, &mut state);
        let first = state.last_pruned_number;
        // Head unchanged: nothing more to do, watermark must not move
        strategy.execute(&fixture.stores, &mut state);
        assert_eq!(state.last_pruned_number, first);
    }
}
