use ember_database::prelude::StoreResult;

/// Handle to the append-only archival tier holding historical block data
/// migrated out of the mutable store. Its file format is not this
/// subsystem's concern; the vacuum only drives its retention boundary.
pub trait AncientStore: Send + Sync {
    /// Discards archival data belonging to blocks strictly below `boundary`.
    fn prune_ancients(&self, boundary: u64) -> StoreResult<()>;
}
