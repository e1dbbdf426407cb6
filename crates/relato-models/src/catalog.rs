//! The question catalog: the static, read-only definition of sections,
//! questions, conditional follow-ups and skip-questions.
//!
//! The catalog is configuration data; the engine interprets it but never
//! mutates it. The JSON shape uses camelCase keys to stay compatible with
//! the original section definition files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::ids::{QuestionId, SectionId};

/// Errors raised while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog JSON could not be parsed.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog contains no sections.
    #[error("catalog is empty")]
    Empty,
}

/// Input widget kind for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    /// Free text field.
    #[default]
    Text,
    /// Single choice among options.
    SingleChoice,
    /// Multiple choice among options.
    MultipleChoice,
}

/// A selectable option for choice questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    /// Machine value of the option.
    pub value: String,
    /// Label shown to the user.
    pub label: String,
    /// When true, choosing this option skips the whole section.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skips_section: bool,
}

impl ChoiceOption {
    /// Returns true if `answer` selects this option (by value or label,
    /// case-insensitively).
    pub fn matches(&self, answer: &str) -> bool {
        let answer = answer.to_lowercase();
        self.value.to_lowercase() == answer || self.label.to_lowercase() == answer
    }
}

/// Client-side validation rules attached to a question.
///
/// The engine carries these for the UI; enforcement is the backend's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Conditionally-activated follow-up questions.
///
/// Activated when the parent answer contains `condition` as a
/// case-insensitive substring. The `questions` array is the preferred
/// form; `question` is the legacy singular form still present in old
/// catalog files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    /// Substring that activates the follow-ups.
    pub condition: String,
    /// Follow-up questions, in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<Question>,
    /// Legacy singular follow-up question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<Box<Question>>,
}

impl FollowUp {
    /// Returns true if `answer` satisfies the activation condition.
    pub fn activated_by(&self, answer: &str) -> bool {
        answer
            .to_lowercase()
            .contains(&self.condition.to_lowercase())
    }

    /// Declared sub-questions, preferring the array over the legacy
    /// singular form.
    pub fn sub_questions(&self) -> Vec<&Question> {
        if !self.questions.is_empty() {
            self.questions.iter().collect()
        } else {
            self.question.iter().map(|q| q.as_ref()).collect()
        }
    }

    /// Number of declared sub-questions.
    pub fn count(&self) -> usize {
        if !self.questions.is_empty() {
            self.questions.len()
        } else {
            usize::from(self.question.is_some())
        }
    }
}

/// A single question in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Dotted ID, e.g. `"1.5"` or `"1.5.1"`.
    pub id: QuestionId,
    /// Question text shown to the user.
    pub text: String,
    /// Optional example/hint line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Input widget kind.
    #[serde(default)]
    pub input_type: InputType,
    /// Options for choice questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    /// Validation rules for the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    /// Conditional follow-ups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUp>,
}

impl Question {
    /// Returns the option selected by `answer`, if any.
    pub fn selected_option(&self, answer: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.matches(answer))
    }
}

/// A section of the report: an ordered group of questions with an
/// optional gatekeeper skip-question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Numeric section ID.
    pub id: SectionId,
    /// Section name.
    pub name: String,
    /// Whether the section may be skipped entirely.
    #[serde(default = "default_true")]
    pub skippable: bool,
    /// Gatekeeper question; may short-circuit the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_question: Option<Question>,
    /// Top-level questions in order.
    pub questions: Vec<Question>,
}

fn default_true() -> bool {
    true
}

impl Section {
    /// Static question count: skip-question (if present) plus all
    /// top-level questions. Follow-ups are excluded; they only count once
    /// activated (see [`Section::total_for`]).
    pub fn base_total(&self) -> usize {
        self.questions.len() + usize::from(self.skip_question.is_some())
    }

    /// Dynamic question count given the answers so far: the base total
    /// plus, for every answered question whose follow-up condition is
    /// satisfied, the number of follow-up sub-questions it declares.
    pub fn total_for(&self, answers: &HashMap<QuestionId, String>) -> usize {
        let mut total = self.base_total();
        for question in &self.questions {
            if let (Some(follow_up), Some(answer)) =
                (question.follow_up.as_ref(), answers.get(&question.id))
            {
                if follow_up.activated_by(answer) {
                    total += follow_up.count();
                }
            }
        }
        total
    }

    /// Looks up a question by ID within this section, searching the
    /// skip-question, top-level questions and their follow-ups.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        if let Some(skip) = self.skip_question.as_ref() {
            if skip.id == *id {
                return Some(skip);
            }
        }
        for question in &self.questions {
            if question.id == *id {
                return Some(question);
            }
            if let Some(follow_up) = question.follow_up.as_ref() {
                if let Some(found) = follow_up.sub_questions().into_iter().find(|q| q.id == *id) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// The full, immutable question catalog: an ordered sequence of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// Builds a catalog from sections. Returns an error if empty.
    pub fn new(sections: Vec<Section>) -> Result<Self, CatalogError> {
        if sections.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { sections })
    }

    /// Parses a catalog from a JSON array of sections.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let sections: Vec<Section> = serde_json::from_str(json)?;
        Self::new(sections)
    }

    /// All sections, in order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if the catalog has no sections (never, by construction).
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// ID of the first section (the starting navigation position).
    pub fn first_section_id(&self) -> SectionId {
        self.sections[0].id
    }

    /// Looks up a section by ID.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Looks up a question by ID across all sections.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.sections.iter().find_map(|s| s.question(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{QuestionBuilder, SectionBuilder};

    fn sample_section() -> Section {
        SectionBuilder::new(1, "Contexto")
            .question(QuestionBuilder::new("1.1", "Data e hora").build())
            .question(
                QuestionBuilder::new("1.5", "Houve deslocamento?")
                    .single_choice(&[("sim", "SIM"), ("nao", "NÃO")])
                    .follow_up_on(
                        "sim",
                        vec![
                            QuestionBuilder::new("1.5.1", "Local de partida").build(),
                            QuestionBuilder::new("1.5.2", "Alterações no percurso?").build(),
                        ],
                    )
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_catalog_rejects_empty() {
        assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_section_lookup() {
        let catalog = Catalog::new(vec![sample_section()]).unwrap();
        assert!(catalog.section(SectionId::new(1)).is_some());
        assert!(catalog.section(SectionId::new(99)).is_none());
        assert_eq!(catalog.first_section_id(), SectionId::new(1));
    }

    #[test]
    fn test_question_lookup_includes_follow_ups() {
        let catalog = Catalog::new(vec![sample_section()]).unwrap();
        assert!(catalog.question(&QuestionId::from("1.1")).is_some());
        assert!(catalog.question(&QuestionId::from("1.5.2")).is_some());
        assert!(catalog.question(&QuestionId::from("9.9")).is_none());
    }

    #[test]
    fn test_question_lookup_includes_skip_question() {
        let section = SectionBuilder::new(2, "Veículo")
            .skip_question(
                QuestionBuilder::new("2.0", "Havia veículo?")
                    .skip_option("nao", "NÃO")
                    .build(),
            )
            .question(QuestionBuilder::new("2.1", "Placa").build())
            .build();
        let catalog = Catalog::new(vec![section]).unwrap();
        assert!(catalog.question(&QuestionId::from("2.0")).is_some());
    }

    #[test]
    fn test_base_total_counts_skip_question() {
        let section = sample_section();
        assert_eq!(section.base_total(), 2);

        let with_skip = SectionBuilder::new(2, "Veículo")
            .skip_question(QuestionBuilder::new("2.0", "Havia veículo?").build())
            .question(QuestionBuilder::new("2.1", "Placa").build())
            .build();
        assert_eq!(with_skip.base_total(), 2);
    }

    #[test]
    fn test_total_for_grows_when_follow_up_activates() {
        let section = sample_section();
        let mut answers = HashMap::new();
        assert_eq!(section.total_for(&answers), 2);

        answers.insert(QuestionId::from("1.5"), "SIM".to_string());
        assert_eq!(section.total_for(&answers), 4);

        // Non-matching answer does not activate
        answers.insert(QuestionId::from("1.5"), "NÃO".to_string());
        assert_eq!(section.total_for(&answers), 2);
    }

    #[test]
    fn test_follow_up_condition_case_insensitive() {
        let follow_up = FollowUp {
            condition: "sim".to_string(),
            questions: vec![],
            question: None,
        };
        assert!(follow_up.activated_by("SIM"));
        assert!(follow_up.activated_by("Sim, houve"));
        assert!(!follow_up.activated_by("não"));
    }

    #[test]
    fn test_follow_up_legacy_singular() {
        let follow_up = FollowUp {
            condition: "sim".to_string(),
            questions: vec![],
            question: Some(Box::new(QuestionBuilder::new("3.1.1", "Qual?").build())),
        };
        assert_eq!(follow_up.count(), 1);
        assert_eq!(follow_up.sub_questions().len(), 1);
    }

    #[test]
    fn test_choice_option_matches_value_or_label() {
        let opt = ChoiceOption {
            value: "nao".to_string(),
            label: "NÃO".to_string(),
            skips_section: true,
        };
        assert!(opt.matches("nao"));
        assert!(opt.matches("não".to_uppercase().as_str()));
        assert!(!opt.matches("sim"));
    }

    #[test]
    fn test_catalog_from_json_camel_case() {
        let json = r#"[
            {
                "id": 2,
                "name": "Veículo",
                "skippable": true,
                "skipQuestion": {
                    "id": "2.0",
                    "text": "Havia veículo?",
                    "inputType": "single_choice",
                    "options": [
                        { "value": "sim", "label": "SIM" },
                        { "value": "nao", "label": "NÃO", "skipsSection": true }
                    ]
                },
                "questions": [
                    {
                        "id": "2.1",
                        "text": "Placa do veículo",
                        "hint": "Ex: ABC-1234",
                        "inputType": "text",
                        "validation": { "required": true, "minLength": 7 },
                        "followUp": {
                            "condition": "sim",
                            "questions": [
                                { "id": "2.1.1", "text": "Cor do veículo" }
                            ]
                        }
                    }
                ]
            }
        ]"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        let section = catalog.section(SectionId::new(2)).unwrap();
        let skip = section.skip_question.as_ref().unwrap();
        assert_eq!(skip.input_type, InputType::SingleChoice);
        assert!(skip.options[1].skips_section);

        let q = section.question(&QuestionId::from("2.1")).unwrap();
        assert_eq!(q.validation.as_ref().unwrap().min_length, Some(7));
        assert_eq!(q.follow_up.as_ref().unwrap().count(), 1);
    }

    #[test]
    fn test_catalog_from_invalid_json() {
        assert!(matches!(
            Catalog::from_json_str("not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
