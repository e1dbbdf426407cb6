//! Next-question traversal, follow-up activation and queue
//! reconstruction.

use std::collections::HashMap;

use tracing::warn;

use relato_models::{Question, QuestionId, Section};

/// The flow engine's answer to "what should be shown next".
#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    /// Show this question.
    Ask(Question),
    /// Every applicable question is answered; the section is complete.
    Complete,
}

/// Classification of a just-submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The chosen option skips the whole section.
    SkipsSection,
    /// The answer satisfied a follow-up condition; this many sub-questions
    /// are now owed.
    ActivatesFollowUps(usize),
    /// Plain acceptance; traversal advances linearly.
    Advance,
}

/// Maps the section-level cursor to the top-level question list. When a
/// skip-question exists it occupies slot 0, so the list is offset by one.
fn real_index(section: &Section, current_index: usize) -> usize {
    if section.skip_question.is_some() {
        current_index.saturating_sub(1)
    } else {
        current_index
    }
}

/// Decides the next question to show for a section, or that the section
/// is complete.
///
/// Priority order:
/// 1. an unanswered skip-question (it decides whether the section applies
///    at all);
/// 2. the head of the pending follow-up queue (reconstructed, see
///    [`follow_up_queue`]);
/// 3. the first unanswered top-level question at or after the cursor;
/// 4. otherwise the section is complete.
///
/// Already-answered questions found during the linear walk are skipped,
/// which makes resumption from a stale cursor self-healing. Walking past
/// the end never panics; it fails closed toward `Complete`.
pub fn next_question(
    section: &Section,
    answers: &HashMap<QuestionId, String>,
    current_index: usize,
) -> FlowStep {
    if let Some(skip) = section.skip_question.as_ref() {
        if !answers.contains_key(&skip.id) {
            return FlowStep::Ask(skip.clone());
        }
    }

    let mut queue = follow_up_queue(section, answers, current_index);
    if !queue.is_empty() {
        return FlowStep::Ask(queue.remove(0));
    }

    let start = real_index(section, current_index);
    if start > section.questions.len() {
        warn!(
            section = %section.id,
            index = current_index,
            "question cursor beyond section end"
        );
    }
    for question in section.questions.iter().skip(start) {
        if !answers.contains_key(&question.id) {
            return FlowStep::Ask(question.clone());
        }
    }

    FlowStep::Complete
}

/// Reconstructs the pending follow-up queue.
///
/// The queue is a pure function of `(section, answers, cursor)` and is
/// never persisted: the question under the cursor is located, its
/// follow-up condition is checked against the stored answer, and the
/// declared sub-questions not yet present in `answers` form the queue, in
/// declared order. Handles both the preferred `questions` array and the
/// legacy singular form.
pub fn follow_up_queue(
    section: &Section,
    answers: &HashMap<QuestionId, String>,
    current_index: usize,
) -> Vec<Question> {
    let idx = real_index(section, current_index);
    let Some(question) = section.questions.get(idx) else {
        return Vec::new();
    };
    let Some(answer) = answers.get(&question.id) else {
        return Vec::new();
    };
    let Some(follow_up) = question.follow_up.as_ref() else {
        return Vec::new();
    };
    if !follow_up.activated_by(answer) {
        return Vec::new();
    }

    follow_up
        .sub_questions()
        .into_iter()
        .filter(|q| !answers.contains_key(&q.id))
        .cloned()
        .collect()
}

/// Classifies a just-submitted answer to `question`.
pub fn answer_outcome(question: &Question, answer: &str) -> AnswerOutcome {
    if let Some(option) = question.selected_option(answer) {
        if option.skips_section {
            return AnswerOutcome::SkipsSection;
        }
    }
    if let Some(follow_up) = question.follow_up.as_ref() {
        if follow_up.activated_by(answer) && follow_up.count() > 0 {
            return AnswerOutcome::ActivatesFollowUps(follow_up.count());
        }
    }
    AnswerOutcome::Advance
}

/// Computes the cursor position after an answer at the current position
/// has been saved: stay put while follow-ups are still owed, otherwise
/// advance by one slot.
pub fn index_after_answer(
    section: &Section,
    answers: &HashMap<QuestionId, String>,
    current_index: usize,
) -> usize {
    if follow_up_queue(section, answers, current_index).is_empty() {
        current_index + 1
    } else {
        current_index
    }
}
