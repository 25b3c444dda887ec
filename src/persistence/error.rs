//! Error types raised by save stores.

use thiserror::Error;

/// Errors surfaced by [`MetaStore`](super::MetaStore) implementations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize save data: {0}")]
    Serialize(#[from] ron::Error),

    #[error("corrupted save data: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
