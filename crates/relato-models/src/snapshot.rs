//! The persisted draft snapshot.
//!
//! A snapshot captures everything needed to resume a report: session
//! identity, navigation position and every section's state. Follow-up
//! queues are deliberately absent; they are reconstructed from the
//! catalog and the answers on resume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ids::{ReportId, SectionId, SessionId};
use crate::section::SectionState;

/// Snapshot schema version. A draft written by a different version is
/// rejected wholesale on restore; there is no partial migration.
pub const SNAPSHOT_VERSION: &str = "2.0";

/// Serialized engine state for draft persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    /// Schema version, see [`SNAPSHOT_VERSION`].
    pub version: String,
    /// When the snapshot was written; drafts expire after 24 hours.
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<ReportId>,
    pub start_time: DateTime<Utc>,
    pub current_section_id: SectionId,
    pub sections: HashMap<SectionId, SectionState>,
}

impl DraftSnapshot {
    /// Returns true if this snapshot matches the engine's schema version.
    pub fn version_matches(&self) -> bool {
        self.version == SNAPSHOT_VERSION
    }

    /// Age of the snapshot relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.timestamp
    }
}
