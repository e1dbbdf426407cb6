//! Wire types for the backend API (snake_case JSON).

use serde::{Deserialize, Serialize};

use relato_models::{QuestionId, ReportId, SectionId, SessionId};

/// Result of a health probe. Not a wire type; `health()` folds any
/// failure into `online: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub online: bool,
}

/// Response of `POST /new_session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSessionResponse {
    /// Backend session identifier.
    pub session_id: SessionId,
    /// Report ("BO") number assigned to this session.
    pub bo_id: ReportId,
}

/// Body of `POST /answer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub session_id: SessionId,
    pub section_id: SectionId,
    pub question_id: QuestionId,
    pub answer: String,
}

/// Response of `POST /answer`. Every field is optional on the wire;
/// absent fields take their inert default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Set when the answer was rejected; the message is shown to the
    /// user and the answer is not committed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,

    /// The answer triggered a section skip.
    #[serde(default)]
    pub section_skipped: bool,

    /// Why the section does not apply, when `section_skipped` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,

    /// Narrative text, when the backend generated it inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_text: Option<String>,

    /// The backend considers the section complete.
    #[serde(default)]
    pub is_section_complete: bool,

    /// Generation is about to run; the caller should request it.
    #[serde(default)]
    pub will_generate_now: bool,
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub session_id: SessionId,
    pub section_id: SectionId,
}

/// Response of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub generated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_request_wire_format() {
        let request = AnswerRequest {
            session_id: SessionId::from("sess-1"),
            section_id: SectionId::new(2),
            question_id: QuestionId::from("2.1"),
            answer: "ABC-1234".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["session_id"], "sess-1");
        assert_eq!(json["section_id"], 2);
        assert_eq!(json["question_id"], "2.1");
    }

    #[test]
    fn test_answer_response_defaults() {
        // A minimal acceptance body parses with inert defaults
        let response: AnswerResponse = serde_json::from_str("{}").unwrap();
        assert!(response.validation_error.is_none());
        assert!(!response.section_skipped);
        assert!(!response.is_section_complete);
        assert!(!response.will_generate_now);
    }

    #[test]
    fn test_answer_response_full_body() {
        let body = r#"{
            "validation_error": null,
            "section_skipped": true,
            "skip_reason": "sem veículo envolvido",
            "is_section_complete": true
        }"#;
        let response: AnswerResponse = serde_json::from_str(body).unwrap();
        assert!(response.section_skipped);
        assert_eq!(response.skip_reason.as_deref(), Some("sem veículo envolvido"));
        assert!(response.is_section_complete);
    }

    #[test]
    fn test_new_session_response_parse() {
        let body = r#"{"session_id": "sess-9", "bo_id": "BO-2026-0042"}"#;
        let response: NewSessionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.session_id.as_str(), "sess-9");
        assert_eq!(response.bo_id.as_str(), "BO-2026-0042");
    }
}
