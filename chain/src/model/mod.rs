pub mod ancient;
pub mod keys;
pub mod stores;
