use enum_primitive_derive::Primitive;

/// We use `u8::MAX` which is never a valid namespace. Also note that through
/// the [`DatabaseStorePrefixes`] enum we make sure it is not used as a prefix as well
pub const SEPARATOR: u8 = u8::MAX;

/// The catalog of on-disk namespaces. Every store key starts with exactly one
/// of these bytes; pruning reasons about disk contents namespace by namespace.
#[derive(Primitive, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DatabaseStorePrefixes {
    // ---- Chain ----
    /// number → canonical block hash
    CanonicalHashes = 1,
    /// block hash → header
    Headers = 2,
    /// block hash → total difficulty
    TotalDifficulties = 3,
    /// block hash → number (also serves as the "known but pruned" tombstone)
    HeaderNumbers = 4,
    Bodies = 5,
    Receipts = 6,
    /// tx hash → owning block
    TxLookups = 7,
    BloomBits = 8,

    // ---- State ----
    AccountSnapshots = 9,
    StorageSnapshots = 10,
    /// code hash → contract code blob
    Code = 11,
    /// block hash → per-block state delta
    DiffLayers = 12,
    Preimages = 13,
    /// trie node hash → node payload (content addressed, shared between roots)
    StateNodes = 14,

    // ---- Metadata ----
    ChainConfig = 15,
    /// Singleton: current canonical head number. Not sweep-prunable.
    HeadNumber = 16,

    // ---- Separator ----
    /// Reserved as a separator
    Separator = SEPARATOR,
}

impl From<DatabaseStorePrefixes> for Vec<u8> {
    fn from(value: DatabaseStorePrefixes) -> Self {
        [value as u8].to_vec()
    }
}

impl From<DatabaseStorePrefixes> for u8 {
    fn from(value: DatabaseStorePrefixes) -> Self {
        value as u8
    }
}

impl AsRef<[u8]> for DatabaseStorePrefixes {
    fn as_ref(&self) -> &[u8] {
        // SAFETY: enum has repr(u8)
        std::slice::from_ref(unsafe { &*(self as *const Self as *const u8) })
    }
}
