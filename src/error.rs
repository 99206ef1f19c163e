//! Error types and result aliases for the netlog library.
//!
//! Logging itself never fails: entries are delivered or dropped. The errors
//! here cover the observer attach/detach surface, where a caller breaking the
//! attachment contract gets a [`NetLogError`] back instead of a corrupted
//! observer list, and configuration loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetLogError {
    #[error("observer is already attached to net log {0}")]
    ObserverAlreadyAttached(u64),

    #[error("observer is not attached to net log {0}")]
    ObserverNotAttached(u64),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NetLogError>;
