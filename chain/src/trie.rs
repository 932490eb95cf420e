use ember_hashes::Hash;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum TrieError {
    #[error("no trie root {0} in the node store")]
    MissingRoot(Hash),

    #[error("trie node {0} is corrupt or unreadable")]
    CorruptNode(Hash),
}

/// A read cursor over one trie opened at a fixed root.
///
/// The trie implementation itself lives outside this subsystem; the vacuum
/// only needs the two traversals below.
pub trait TrieCursor {
    /// Pre-order iteration over the hash of every node reachable from the
    /// root, internal (branch/extension) nodes included. Leaf-only iteration
    /// would miss the internal nodes, which occupy storage too.
    fn nodes(&self) -> Box<dyn Iterator<Item = Hash> + '_>;

    /// Iteration over the encoded values of the trie's leaves.
    fn leaves(&self) -> Box<dyn Iterator<Item = Vec<u8>> + '_>;
}

/// Access to the node's collection of state/storage tries.
pub trait TrieAccess {
    type Cursor: TrieCursor;

    /// Opens the trie rooted at `root`. Fails if the root is unknown or its
    /// node is corrupt.
    fn open(&self, root: Hash) -> Result<Self::Cursor, TrieError>;
}
