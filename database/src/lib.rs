mod access;
mod cache;
mod db;
mod errors;
mod item;
mod key;
mod registry;
mod utils;
mod writer;

pub mod prelude {
    use crate::{db, errors};

    pub use super::access::CachedDbAccess;
    pub use super::cache::Cache;
    pub use super::item::CachedDbItem;
    pub use super::key::DbKey;
    pub use super::registry::DatabaseStorePrefixes;
    pub use super::utils::{get_ember_tempdir, DbLifetime};
    pub use super::writer::{BatchDbWriter, DbWriter, DirectDbWriter};
    pub use db::{ConnBuilder, DB};
    pub use errors::{StoreError, StoreResult, StoreResultExtensions};
}
