//! The draft store: one JSON file holding the current report draft.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use relato_models::DraftSnapshot;

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::error::{PersistenceError, Result};

/// Drafts older than this are discarded on load.
pub const DRAFT_TTL_HOURS: i64 = 24;

/// File name of the draft under the store directory.
const DRAFT_FILE: &str = "draft.json";

/// Persists the current draft as a single JSON file under a base
/// directory.
pub struct DraftStore {
    base_path: PathBuf,
}

impl DraftStore {
    /// Creates a store rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Path of the draft file.
    pub fn draft_path(&self) -> PathBuf {
        self.base_path.join(DRAFT_FILE)
    }

    /// Writes the snapshot atomically.
    pub fn save(&self, snapshot: &DraftSnapshot) -> Result<()> {
        let path = self.draft_path();
        atomic_write_json(&path, snapshot)?;
        debug!(path = %path.display(), "draft persisted");
        Ok(())
    }

    /// Loads the persisted draft.
    ///
    /// Returns `None` when no draft exists, when the file cannot be
    /// parsed, or when the draft is older than [`DRAFT_TTL_HOURS`].
    /// Corrupt and expired drafts are removed. This never errors toward
    /// the caller; problems are logged.
    pub fn load(&self) -> Option<DraftSnapshot> {
        let path = self.draft_path();
        let snapshot: DraftSnapshot = match read_json_optional(&path) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unreadable draft");
                let _ = self.clear();
                return None;
            }
        };

        if snapshot.age(Utc::now()) > Duration::hours(DRAFT_TTL_HOURS) {
            info!(path = %path.display(), "draft expired, discarding");
            let _ = self.clear();
            return None;
        }

        Some(snapshot)
    }

    /// Removes the draft file. Idempotent.
    pub fn clear(&self) -> Result<()> {
        let path = self.draft_path();
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|source| PersistenceError::Write { path, source })?;
        }
        Ok(())
    }

    /// Base directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
