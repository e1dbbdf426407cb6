//! Offline fallback for the generated narrative text.

use std::collections::HashMap;

use relato_models::{Question, QuestionId, Section};

/// Builds a preliminary narrative from the recorded answers, used when
/// the backend cannot generate the real text. Answers appear in catalog
/// order, follow-ups right after their parent.
pub fn placeholder_text(section: &Section, answers: &HashMap<QuestionId, String>) -> String {
    let mut lines = vec![format!(
        "[Registro preliminar: {}] Texto gerado localmente, sem conexão com o servidor.",
        section.name
    )];

    let mut push_answer = |question: &Question| {
        if let Some(answer) = answers.get(&question.id) {
            lines.push(format!("{}: {}", question.text, answer));
        }
    };

    if let Some(skip) = section.skip_question.as_ref() {
        push_answer(skip);
    }
    for question in &section.questions {
        push_answer(question);
        if let Some(follow_up) = question.follow_up.as_ref() {
            for sub in follow_up.sub_questions() {
                push_answer(sub);
            }
        }
    }

    lines.join("\n")
}
