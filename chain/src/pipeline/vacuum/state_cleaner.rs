use crate::{
    model::stores::{code::DbCodeStore, state_nodes::DbStateNodesStore},
    trie::{TrieAccess, TrieCursor},
};
use ember_chain_core::account::Account;
use ember_database::prelude::StoreResult;
use ember_hashes::Hash;
use log::{debug, info};
use rocksdb::WriteBatch;

/// Deep-cleans everything reachable from `root`: every storage-trie node and
/// code blob of every account, then every node of the account trie itself.
/// Only populates `batch` with deletes; committing (and the decision that
/// `root` is safe to delete at all) belongs to the caller.
///
/// Storage subtrees are cleaned before the account trie so a partially
/// committed state never looks like a valid trie pointing at vanished
/// subtrees. Under content addressing either order would be correct.
pub fn clean_state_at_root<T: TrieAccess>(
    tries: &T,
    state_nodes: &DbStateNodesStore,
    code: &DbCodeStore,
    root: Hash,
    batch: &mut WriteBatch,
) -> StoreResult<()> {
    let account_trie = match tries.open(root) {
        Ok(trie) => trie,
        Err(err) => {
            // The block's other namespaces can still be cleaned
            info!("State clean: cannot open account trie at {root}, skipping the walk: {err}");
            return Ok(());
        }
    };

    for leaf in account_trie.leaves() {
        // Corrupt or foreign leaf data is tolerated, not fatal
        let Ok(account) = bincode::deserialize::<Account>(&leaf) else {
            debug!("State clean: undecodable account leaf under root {root}, skipping entry");
            continue;
        };
        if account.has_storage() {
            match tries.open(account.storage_root) {
                Ok(storage_trie) => {
                    for node_hash in storage_trie.nodes() {
                        state_nodes.delete_batch(batch, node_hash)?;
                    }
                }
                Err(err) => {
                    debug!("State clean: cannot open storage trie at {}: {err}", account.storage_root);
                }
            }
        }
        if account.has_code() {
            code.delete_batch(batch, account.code_hash)?;
        }
    }

    // Node-by-node, not leaf-by-leaf: internal nodes occupy storage too
    for node_hash in account_trie.nodes() {
        state_nodes.delete_batch(batch, node_hash)?;
    }

    Ok(())
}
