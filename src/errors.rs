use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Form input rejected before any mutation took place.
    #[error("{0}")]
    Validation(String),
    /// The targeted transaction no longer exists in the ledger.
    #[error("transaction {0} not found")]
    NotFound(Uuid),
    /// A record with this id is already present.
    #[error("duplicate transaction id {0}")]
    DuplicateId(Uuid),
    /// The storage slot holds data that cannot be parsed back into a ledger.
    #[error("stored ledger data is unreadable: {0}")]
    CorruptData(String),
    /// The stored blob was written by a newer version of this crate.
    #[error("ledger schema v{found} is newer than supported v{supported}")]
    SchemaVersion { found: u8, supported: u8 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
