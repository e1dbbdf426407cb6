//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Note that unknown section or question ids are NOT errors: those are
/// programming mistakes the store logs and ignores so a bad id can never
/// take the whole flow down.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Draft snapshot was written by an incompatible schema version.
    #[error("draft version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: String, expected: String },

    /// Lock poisoned (a thread panicked while holding the lock).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
