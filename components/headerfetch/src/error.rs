use ember_database::prelude::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no remote endpoints configured")]
    NoEndpoints,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("fetch interrupted by shutdown")]
    Interrupted,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type FetchResult<T> = Result<T, FetchError>;
