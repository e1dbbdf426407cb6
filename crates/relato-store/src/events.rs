//! Events broadcast by the store after every mutation.

use relato_models::{QuestionId, SectionId, SectionStatus};

/// Notification of a state change, sent to subscribers synchronously
/// inside the mutating call, after the state has been updated.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    /// An answer was saved (or overwritten) in a section.
    Answer {
        section: SectionId,
        question: QuestionId,
    },
    /// A section's chat history changed (message appended or the last
    /// user message rolled back).
    Message { section: SectionId },
    /// A section reached `Completed`.
    SectionCompleted { section: SectionId },
    /// A section was skipped, with the reason it does not apply.
    SectionSkipped { section: SectionId, reason: String },
    /// The current section changed.
    Navigation {
        previous: SectionId,
        current: SectionId,
    },
    /// Generated narrative text was set for a section.
    GeneratedText { section: SectionId },
    /// A section's effective question count changed.
    TotalQuestions { section: SectionId, total: usize },
    /// The question cursor moved within a section.
    QuestionIndex { section: SectionId, index: usize },
    /// A section's lifecycle status changed.
    Status {
        section: SectionId,
        status: SectionStatus,
    },
    /// Backend session identity was set.
    Session,
    /// Connectivity flag changed.
    Online { online: bool },
    /// State was replaced from a persisted draft.
    Restore,
    /// State was reset to a fresh report.
    Reset,
}

impl StateEvent {
    /// The section this event concerns, when it is section-scoped.
    /// Used to route events to per-section subscribers.
    pub fn section_id(&self) -> Option<SectionId> {
        match self {
            StateEvent::Answer { section, .. }
            | StateEvent::Message { section }
            | StateEvent::SectionCompleted { section }
            | StateEvent::SectionSkipped { section, .. }
            | StateEvent::GeneratedText { section }
            | StateEvent::TotalQuestions { section, .. }
            | StateEvent::QuestionIndex { section, .. }
            | StateEvent::Status { section, .. } => Some(*section),
            StateEvent::Navigation { current, .. } => Some(*current),
            StateEvent::Session
            | StateEvent::Online { .. }
            | StateEvent::Restore
            | StateEvent::Reset => None,
        }
    }
}
