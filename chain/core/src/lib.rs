pub mod account;
pub mod block;
pub mod constants;
pub mod hashing;
pub mod header;

pub type BlockNumber = u64;
