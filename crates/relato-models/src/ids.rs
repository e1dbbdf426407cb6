//! Type-safe ID wrappers.
//!
//! Session and report IDs are issued by the backend and treated as opaque
//! strings; question IDs come from the catalog and carry structure in
//! their dot-depth (`"1.5"` is top-level, `"1.5.1"` is a follow-up).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate opaque string ID newtypes with common functionality.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Returns the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Backend-issued session identifier.
    SessionId
);
define_id!(
    /// Backend-issued report ("BO") identifier.
    ReportId
);
define_id!(
    /// Dotted question identifier from the catalog (e.g. `"1.5"`, `"1.5.1"`).
    QuestionId
);

impl QuestionId {
    /// Number of dot-separated segments below the section level.
    ///
    /// `"1.5"` has depth 1 (top-level), `"1.5.1"` has depth 2 (follow-up).
    pub fn depth(&self) -> usize {
        self.0.matches('.').count()
    }

    /// Returns true if this ID names a follow-up question.
    pub fn is_follow_up(&self) -> bool {
        self.depth() >= 2
    }
}

/// Numeric section identifier (1-based, per the catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(u32);

impl SectionId {
    /// Creates a section ID from its numeric value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SectionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
