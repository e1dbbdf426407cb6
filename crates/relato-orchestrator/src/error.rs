//! Error types for the engine.

use thiserror::Error;

/// Engine-level errors.
///
/// Backend failures never appear here: the engine degrades to offline
/// operation instead of surfacing them.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// State store error.
    #[error("store error: {0}")]
    Store(#[from] relato_store::StoreError),

    /// Draft persistence error.
    #[error("persistence error: {0}")]
    Persistence(#[from] relato_persistence::PersistenceError),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
