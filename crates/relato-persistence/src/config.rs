//! State directory resolution.
//!
//! All drafts live under one state directory:
//! 1. `RELATO_STATE_DIR` environment variable, if set
//! 2. `~/.relato` when a home directory is available
//! 3. `.relato` in the current directory as a fallback

use std::path::PathBuf;

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "RELATO_STATE_DIR";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".relato";

/// Resolves the state directory.
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}
