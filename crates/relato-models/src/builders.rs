//! Builder patterns for catalog types.
//!
//! Catalogs are normally loaded from JSON config; these builders exist for
//! tests and for assembling small catalogs in code.

use crate::catalog::{ChoiceOption, FollowUp, InputType, Question, Section, ValidationRules};
use crate::ids::SectionId;

/// Builder for creating Question instances with a fluent API.
#[derive(Debug, Clone)]
pub struct QuestionBuilder {
    question: Question,
}

impl QuestionBuilder {
    /// Creates a new QuestionBuilder with the required fields.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question: Question {
                id: id.into().into(),
                text: text.into(),
                hint: None,
                input_type: InputType::Text,
                options: Vec::new(),
                validation: None,
                follow_up: None,
            },
        }
    }

    /// Sets the hint line.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.question.hint = Some(hint.into());
        self
    }

    /// Makes this a single-choice question with the given (value, label)
    /// options.
    pub fn single_choice(mut self, options: &[(&str, &str)]) -> Self {
        self.question.input_type = InputType::SingleChoice;
        self.question.options = options
            .iter()
            .map(|(value, label)| ChoiceOption {
                value: (*value).to_string(),
                label: (*label).to_string(),
                skips_section: false,
            })
            .collect();
        self
    }

    /// Adds a single-choice option that skips the whole section when
    /// chosen.
    pub fn skip_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.question.input_type = InputType::SingleChoice;
        self.question.options.push(ChoiceOption {
            value: value.into(),
            label: label.into(),
            skips_section: true,
        });
        self
    }

    /// Adds a plain single-choice option.
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.question.input_type = InputType::SingleChoice;
        self.question.options.push(ChoiceOption {
            value: value.into(),
            label: label.into(),
            skips_section: false,
        });
        self
    }

    /// Attaches follow-up questions activated when the answer contains
    /// `condition`.
    pub fn follow_up_on(mut self, condition: impl Into<String>, questions: Vec<Question>) -> Self {
        self.question.follow_up = Some(FollowUp {
            condition: condition.into(),
            questions,
            question: None,
        });
        self
    }

    /// Attaches a legacy singular follow-up question.
    pub fn legacy_follow_up(
        mut self,
        condition: impl Into<String>,
        question: Question,
    ) -> Self {
        self.question.follow_up = Some(FollowUp {
            condition: condition.into(),
            questions: Vec::new(),
            question: Some(Box::new(question)),
        });
        self
    }

    /// Sets validation rules.
    pub fn validation(mut self, validation: ValidationRules) -> Self {
        self.question.validation = Some(validation);
        self
    }

    /// Builds the Question.
    pub fn build(self) -> Question {
        self.question
    }
}

/// Builder for creating Section instances with a fluent API.
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    section: Section,
}

impl SectionBuilder {
    /// Creates a new SectionBuilder with the required fields.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            section: Section {
                id: SectionId::new(id),
                name: name.into(),
                skippable: true,
                skip_question: None,
                questions: Vec::new(),
            },
        }
    }

    /// Marks the section as not skippable.
    pub fn not_skippable(mut self) -> Self {
        self.section.skippable = false;
        self
    }

    /// Sets the gatekeeper skip-question.
    pub fn skip_question(mut self, question: Question) -> Self {
        self.section.skip_question = Some(question);
        self
    }

    /// Appends a top-level question.
    pub fn question(mut self, question: Question) -> Self {
        self.section.questions.push(question);
        self
    }

    /// Builds the Section.
    pub fn build(self) -> Section {
        self.section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_builder_defaults() {
        let q = QuestionBuilder::new("1.1", "Data e hora").build();
        assert_eq!(q.id.as_str(), "1.1");
        assert_eq!(q.input_type, InputType::Text);
        assert!(q.options.is_empty());
        assert!(q.follow_up.is_none());
    }

    #[test]
    fn test_single_choice_with_skip_option() {
        let q = QuestionBuilder::new("2.0", "Havia veículo?")
            .option("sim", "SIM")
            .skip_option("nao", "NÃO")
            .build();
        assert_eq!(q.input_type, InputType::SingleChoice);
        assert_eq!(q.options.len(), 2);
        assert!(!q.options[0].skips_section);
        assert!(q.options[1].skips_section);
    }

    #[test]
    fn test_section_builder() {
        let section = SectionBuilder::new(3, "Campana")
            .not_skippable()
            .question(QuestionBuilder::new("3.1", "Duração").build())
            .build();
        assert_eq!(section.id.as_u32(), 3);
        assert!(!section.skippable);
        assert_eq!(section.questions.len(), 1);
    }

    #[test]
    fn test_follow_up_builders() {
        let preferred = QuestionBuilder::new("1.5", "Houve deslocamento?")
            .follow_up_on("sim", vec![QuestionBuilder::new("1.5.1", "De onde?").build()])
            .build();
        assert_eq!(preferred.follow_up.as_ref().unwrap().count(), 1);

        let legacy = QuestionBuilder::new("3.2", "Houve apoio?")
            .legacy_follow_up("sim", QuestionBuilder::new("3.2.1", "De quem?").build())
            .build();
        assert_eq!(legacy.follow_up.as_ref().unwrap().count(), 1);
    }
}
