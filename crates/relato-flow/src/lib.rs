//! Pure question-flow traversal logic.
//!
//! Everything here is a function of `(section definition, answers,
//! current question index)`: no state, no I/O. That purity is what makes
//! draft resumption idempotent: the pending follow-up queue is never
//! persisted, it is recomputed from the answers on every query, so a
//! reloaded section behaves exactly like a live one.

pub mod traversal;

pub use traversal::{
    answer_outcome, follow_up_queue, index_after_answer, next_question, AnswerOutcome, FlowStep,
};
