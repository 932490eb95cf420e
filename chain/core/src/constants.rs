use ember_hashes::Hash;
use hex_literal::hex;

/// Root hash of an empty state/storage trie. An account whose storage root
/// equals this sentinel owns no storage trie at all.
pub const EMPTY_ROOT: Hash = Hash::from_bytes(hex!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"));

/// keccak-256 of zero-length code. An account whose code hash equals this
/// sentinel owns no code blob.
pub const EMPTY_CODE_HASH: Hash = Hash::from_bytes(hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"));
