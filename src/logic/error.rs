use crate::store::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Subtree deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

pub type TreeResult<T> = std::result::Result<T, TreeError>;
