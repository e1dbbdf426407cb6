//! Per-section runtime state, chat messages and the session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Section;
use crate::ids::{QuestionId, ReportId, SessionId};

/// Lifecycle status of a section.
///
/// Transitions are monotonic: `Pending -> InProgress -> {Completed, Skipped}`,
/// never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// Not yet visited.
    #[default]
    Pending,
    /// Currently being answered.
    InProgress,
    /// All questions answered and text generated.
    Completed,
    /// Skipped via the gatekeeper question.
    Skipped,
}

impl SectionStatus {
    /// Returns true if moving from `self` to `next` follows the monotonic
    /// order. Same-state transitions are allowed (idempotent re-apply).
    pub fn can_transition_to(self, next: SectionStatus) -> bool {
        use SectionStatus::*;
        match (self, next) {
            (a, b) if a == b => true,
            (Pending, InProgress | Completed | Skipped) => true,
            (InProgress, Completed | Skipped) => true,
            _ => false,
        }
    }

    /// Returns true for `Completed` or `Skipped`.
    pub fn is_terminal(self) -> bool {
        matches!(self, SectionStatus::Completed | SectionStatus::Skipped)
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    Bot,
    User,
}

/// One entry in a section's chat history. Append-only; the only mutation
/// is the explicit removal of the last user message when the backend
/// rejects an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a bot message with an optional hint.
    pub fn bot(text: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            role: MessageRole::Bot,
            text: text.into(),
            hint,
            timestamp: Utc::now(),
        }
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
            hint: None,
            timestamp: Utc::now(),
        }
    }
}

/// Runtime state of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionState {
    /// Lifecycle status.
    pub status: SectionStatus,
    /// Answers keyed by question ID; a question appears at most once.
    #[serde(default)]
    pub answers: HashMap<QuestionId, String>,
    /// Chronological chat history.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Cursor into the section's linear question slots (skip-question
    /// occupies slot 0 when present).
    #[serde(default)]
    pub current_question_index: usize,
    /// Backend-generated narrative text, set on completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_text: Option<String>,
    /// Reason a skipped section does not apply; non-null iff skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    /// Denormalized count of answered questions, for fast progress reads.
    #[serde(default)]
    pub answered_count: usize,
    /// Effective question count; grows when follow-ups activate.
    pub total_count: usize,
}

impl SectionState {
    /// Fresh pending state for a catalog section.
    pub fn new_for(section: &Section) -> Self {
        Self {
            status: SectionStatus::Pending,
            answers: HashMap::new(),
            messages: Vec::new(),
            current_question_index: 0,
            generated_text: None,
            skip_reason: None,
            answered_count: 0,
            total_count: section.base_total(),
        }
    }

    /// Upserts an answer and refreshes the answered count.
    pub fn record_answer(&mut self, question_id: QuestionId, answer: String) {
        self.answers.insert(question_id, answer);
        self.answered_count = self.answers.len();
    }

    /// Appends a message to the chat history.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Removes the most recent user message, if any. Used to roll back a
    /// speculative message after a validation rejection.
    pub fn remove_last_user_message(&mut self) -> bool {
        if let Some(pos) = self
            .messages
            .iter()
            .rposition(|m| m.role == MessageRole::User)
        {
            self.messages.remove(pos);
            true
        } else {
            false
        }
    }
}

/// Identity and connectivity of the current report session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Backend session ID, once confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    /// Backend report ID, once confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<ReportId>,
    /// When this session started.
    pub start_time: DateTime<Utc>,
    /// Whether the backend is reachable.
    pub is_online: bool,
}

impl Session {
    /// New anonymous session, assumed online until a health check says
    /// otherwise.
    pub fn new() -> Self {
        Self {
            session_id: None,
            report_id: None,
            start_time: Utc::now(),
            is_online: true,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{QuestionBuilder, SectionBuilder};

    #[test]
    fn test_status_monotonic_transitions() {
        use SectionStatus::*;
        assert!(Pending.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Skipped));
        assert!(Pending.can_transition_to(Completed));

        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(InProgress));
        assert!(!Skipped.can_transition_to(InProgress));
        assert!(!Completed.can_transition_to(Skipped));
    }

    #[test]
    fn test_status_same_state_is_allowed() {
        use SectionStatus::*;
        assert!(Completed.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(InProgress));
    }

    #[test]
    fn test_record_answer_overwrites() {
        let section = SectionBuilder::new(1, "Test")
            .question(QuestionBuilder::new("1.1", "Q").build())
            .build();
        let mut state = SectionState::new_for(&section);

        state.record_answer(QuestionId::from("1.1"), "first".to_string());
        state.record_answer(QuestionId::from("1.1"), "second".to_string());

        assert_eq!(state.answered_count, 1);
        assert_eq!(
            state.answers.get(&QuestionId::from("1.1")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_remove_last_user_message() {
        let section = SectionBuilder::new(1, "Test")
            .question(QuestionBuilder::new("1.1", "Q").build())
            .build();
        let mut state = SectionState::new_for(&section);

        state.push_message(ChatMessage::bot("1.1) Q", None));
        state.push_message(ChatMessage::user("resposta"));

        assert!(state.remove_last_user_message());
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, MessageRole::Bot);

        // Nothing left to remove
        assert!(!state.remove_last_user_message());
    }

    #[test]
    fn test_new_for_uses_base_total() {
        let section = SectionBuilder::new(2, "Veículo")
            .skip_question(QuestionBuilder::new("2.0", "Havia veículo?").build())
            .question(QuestionBuilder::new("2.1", "Placa").build())
            .build();
        let state = SectionState::new_for(&section);
        assert_eq!(state.total_count, 2);
        assert_eq!(state.status, SectionStatus::Pending);
    }

    #[test]
    fn test_session_serialization_camel_case() {
        let session = Session::new();
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("startTime"));
        assert!(json.contains("isOnline"));
    }
}
