//! Core data models for the Relato guided-report engine.
//!
//! This crate provides the fundamental data types shared across the
//! system: typed IDs, the read-only question catalog, per-section state,
//! chat messages, the session record, and the persisted draft snapshot.

pub mod builders;
pub mod catalog;
pub mod ids;
pub mod section;
pub mod snapshot;

// Re-export main types
pub use builders::{QuestionBuilder, SectionBuilder};
pub use catalog::{
    Catalog, CatalogError, ChoiceOption, FollowUp, InputType, Question, Section, ValidationRules,
};
pub use ids::{QuestionId, ReportId, SectionId, SessionId};
pub use section::{ChatMessage, MessageRole, SectionState, SectionStatus, Session};
pub use snapshot::{DraftSnapshot, SNAPSHOT_VERSION};
