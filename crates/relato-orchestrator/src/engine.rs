//! The report engine: UI intents in, store mutations and backend calls
//! out.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use relato_client::{AnswerRequest, AnswerResponse, Backend, GenerateRequest};
use relato_flow as flow;
use relato_flow::{AnswerOutcome, FlowStep};
use relato_models::{Catalog, ChatMessage, Question, QuestionId, Section, SectionId};
use relato_persistence::{DebouncedSaver, DraftStore};
use relato_store::{StateEvent, StateStore, StoreError};

use crate::error::Result;
use crate::placeholder::placeholder_text;

/// Outcome of submitting one answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// The backend rejected the answer; nothing was committed and the
    /// speculative chat message was rolled back.
    Rejected { message: String },
    /// The answer marked the whole section as not applicable.
    Skipped { reason: String },
    /// Answer committed; this is the next question to show.
    NextQuestion(Question),
    /// Answer committed and the section is finished.
    SectionComplete { generated_text: String },
    /// The response no longer matches the current state (navigation
    /// raced the backend, or the ids were unknown); it was dropped.
    Stale,
}

/// Drives a guided report session.
///
/// All collaborators are injected: the catalog (what to ask), the store
/// (what was answered), the draft store (crash recovery) and the backend
/// (validation and text generation, behind the [`Backend`] trait so
/// tests can script it).
pub struct Engine {
    catalog: Arc<Catalog>,
    store: Arc<StateStore>,
    backend: Arc<dyn Backend>,
    saver: DebouncedSaver,
    events: Receiver<StateEvent>,
}

impl Engine {
    /// Wires an engine together. Subscribes to the store so mutations
    /// can be turned into debounced draft writes via
    /// [`Engine::pump_persistence`].
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<StateStore>,
        drafts: DraftStore,
        backend: Arc<dyn Backend>,
    ) -> Self {
        let events = store.subscribe();
        Self {
            catalog,
            store,
            backend,
            saver: DebouncedSaver::new(drafts),
            events,
        }
    }

    /// The underlying draft store.
    pub fn drafts(&self) -> &DraftStore {
        self.saver.store()
    }

    /// Probes the backend, opens a session when reachable and emits the
    /// first prompt. Backend failures degrade to offline operation.
    pub async fn start(&mut self) -> Result<()> {
        let health = self.backend.health().await;
        self.store.set_online(health.online)?;

        if health.online {
            match self.backend.start_session().await {
                Ok(response) => {
                    info!(report = %response.bo_id, "session started");
                    self.store.set_session(response.session_id, response.bo_id)?;
                }
                Err(e) if e.is_network() => {
                    warn!(error = %e, "session start unreachable, going offline");
                    self.store.set_online(false)?;
                }
                Err(e) => {
                    warn!(error = %e, "session start failed, continuing without session");
                }
            }
        }

        self.prompt_current()
    }

    /// Restores a persisted draft into the store, if one exists and its
    /// schema version matches. Incompatible drafts are discarded.
    pub fn resume(&mut self) -> Result<bool> {
        let Some(snapshot) = self.saver.store().load() else {
            return Ok(false);
        };
        match self.store.restore_from_draft(snapshot) {
            Ok(()) => {
                info!("draft resumed");
                Ok(true)
            }
            Err(StoreError::VersionMismatch { found, .. }) => {
                warn!(found, "incompatible draft discarded");
                self.saver.store().clear()?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Throws away any persisted draft without touching live state.
    pub fn discard_draft(&mut self) -> Result<()> {
        self.saver.cancel();
        self.saver.store().clear()?;
        Ok(())
    }

    /// The question the user should be answering right now, if the
    /// current section still has one.
    pub fn current_prompt(&self) -> Option<Question> {
        let section_id = self.store.current_section_id().ok()?;
        let section = self.catalog.section(section_id)?;
        let state = self.store.section_state(section_id)?;
        match flow::next_question(section, &state.answers, state.current_question_index) {
            FlowStep::Ask(question) => Some(question),
            FlowStep::Complete => None,
        }
    }

    /// Submits one answer for the current section.
    ///
    /// The user message is pushed speculatively, then the backend is
    /// consulted when online. A validation rejection rolls the message
    /// back and commits nothing. A network failure flips the engine
    /// offline and commits the answer optimistically. A response that
    /// lands after the user navigated away is dropped.
    pub async fn submit_answer(
        &mut self,
        question_id: QuestionId,
        answer: &str,
    ) -> Result<SubmitResult> {
        let section_id = self.store.current_section_id()?;
        let Some(section) = self.catalog.section(section_id).cloned() else {
            warn!(section = %section_id, "current section missing from catalog, answer dropped");
            return Ok(SubmitResult::Stale);
        };
        let Some(question) = section.question(&question_id).cloned() else {
            warn!(section = %section_id, question = %question_id, "unknown question, answer dropped");
            return Ok(SubmitResult::Stale);
        };

        self.store
            .push_message(section_id, ChatMessage::user(answer))?;

        let session = self.store.session()?;
        if session.is_online {
            if let Some(session_id) = session.session_id.clone() {
                let request = AnswerRequest {
                    session_id,
                    section_id,
                    question_id: question.id.clone(),
                    answer: answer.to_string(),
                };
                match self.backend.send_answer(request).await {
                    Ok(response) => {
                        if self.store.current_section_id()? != section_id {
                            warn!(
                                section = %section_id,
                                "response landed after navigation, dropped"
                            );
                            self.store.remove_last_user_message(section_id)?;
                            return Ok(SubmitResult::Stale);
                        }
                        return self
                            .apply_response(section_id, &section, &question, answer, response)
                            .await;
                    }
                    Err(e) if e.is_network() => {
                        warn!(error = %e, "backend unreachable, continuing offline");
                        self.store.set_online(false)?;
                    }
                    Err(e) => {
                        warn!(error = %e, "backend error, committing answer locally");
                    }
                }
            }
        }

        // Offline path: no server-side validation, commit optimistically.
        if let AnswerOutcome::SkipsSection = flow::answer_outcome(&question, answer) {
            return self.apply_skip(section_id, &section, &question, answer, None);
        }
        self.commit_answer(section_id, &section, &question, answer)?;
        self.advance(section_id, &section, None, false, false).await
    }

    /// Navigates to a section and prompts its next question.
    pub fn go_to_section(&mut self, section_id: SectionId) -> Result<()> {
        self.store.set_current_section(section_id)?;
        self.prompt_current()
    }

    /// Navigates back to a section for review, without emitting a new
    /// prompt.
    pub fn go_back(&mut self, section_id: SectionId) -> Result<()> {
        Ok(self.store.set_current_section(section_id)?)
    }

    /// Starts a fresh report: live state reset, draft gone.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()?;
        self.saver.cancel();
        self.saver.store().clear()?;
        self.prompt_current()
    }

    /// Turns accumulated store events into a debounced draft write.
    ///
    /// Call this periodically with the current instant. Returns true
    /// when a draft was actually written.
    pub fn pump_persistence(&mut self, now: Instant) -> Result<bool> {
        let events: Vec<StateEvent> = self.events.try_iter().collect();
        let mut dirty = false;
        for event in events {
            match event {
                // A reset made the pending draft obsolete
                StateEvent::Reset => self.saver.cancel(),
                StateEvent::Online { .. } | StateEvent::Restore => {}
                _ => dirty = true,
            }
        }
        if dirty {
            self.saver.schedule(now);
        }
        if !self.saver.pending() {
            return Ok(false);
        }
        let snapshot = self.store.snapshot()?;
        Ok(self.saver.flush_due(now, || snapshot))
    }

    /// Writes the draft immediately, bypassing the debounce window.
    pub fn flush_drafts(&mut self) -> Result<()> {
        let _ = self.events.try_iter().count();
        let snapshot = self.store.snapshot()?;
        self.saver.flush_now(|| snapshot)?;
        Ok(())
    }

    // ---- internals ----

    async fn apply_response(
        &mut self,
        section_id: SectionId,
        section: &Section,
        question: &Question,
        answer: &str,
        response: AnswerResponse,
    ) -> Result<SubmitResult> {
        if let Some(message) = response.validation_error {
            debug!(section = %section_id, question = %question.id, "answer rejected");
            self.store.remove_last_user_message(section_id)?;
            self.store
                .push_message(section_id, ChatMessage::bot(message.clone(), None))?;
            return Ok(SubmitResult::Rejected { message });
        }

        if response.section_skipped {
            return self.apply_skip(section_id, section, question, answer, response.skip_reason);
        }

        self.commit_answer(section_id, section, question, answer)?;
        self.advance(
            section_id,
            section,
            response.generated_text,
            response.will_generate_now,
            response.is_section_complete,
        )
        .await
    }

    fn apply_skip(
        &mut self,
        section_id: SectionId,
        section: &Section,
        question: &Question,
        answer: &str,
        reason: Option<String>,
    ) -> Result<SubmitResult> {
        self.store
            .save_answer(section_id, question.id.clone(), answer)?;
        let reason = reason.unwrap_or_else(|| {
            let label = question
                .selected_option(answer)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| answer.to_string());
            format!("Não se aplica: {}", label)
        });
        self.store.mark_section_skipped(section_id, reason.clone())?;
        self.store.push_message(
            section_id,
            ChatMessage::bot(
                format!("Seção \"{}\" marcada como não aplicável.", section.name),
                None,
            ),
        )?;
        Ok(SubmitResult::Skipped { reason })
    }

    /// Records an accepted answer: answer itself, refreshed question
    /// total when follow-ups may have changed it, and the new cursor.
    fn commit_answer(
        &mut self,
        section_id: SectionId,
        section: &Section,
        question: &Question,
        answer: &str,
    ) -> Result<()> {
        self.store
            .save_answer(section_id, question.id.clone(), answer)?;
        let answers = self.store.answers(section_id);
        if question.follow_up.is_some() {
            self.store
                .update_total_questions(section_id, section.total_for(&answers))?;
        }
        let index = self
            .store
            .section_state(section_id)
            .map(|s| s.current_question_index)
            .unwrap_or(0);
        let next = flow::index_after_answer(section, &answers, index);
        self.store.set_current_question_index(section_id, next)?;
        Ok(())
    }

    async fn advance(
        &mut self,
        section_id: SectionId,
        section: &Section,
        generated: Option<String>,
        will_generate: bool,
        backend_complete: bool,
    ) -> Result<SubmitResult> {
        let Some(state) = self.store.section_state(section_id) else {
            return Ok(SubmitResult::Stale);
        };

        let step = if backend_complete {
            FlowStep::Complete
        } else {
            flow::next_question(section, &state.answers, state.current_question_index)
        };

        match step {
            FlowStep::Ask(question) => {
                self.push_prompt(section_id, &question)?;
                Ok(SubmitResult::NextQuestion(question))
            }
            FlowStep::Complete => {
                let text = match generated {
                    Some(text) => text,
                    None => {
                        self.generate_text(section_id, section, &state.answers, will_generate)
                            .await
                    }
                };
                self.store.set_generated_text(section_id, text.clone())?;
                self.store
                    .push_message(section_id, ChatMessage::bot(text.clone(), None))?;
                self.store.mark_section_completed(section_id, None)?;
                Ok(SubmitResult::SectionComplete {
                    generated_text: text,
                })
            }
        }
    }

    async fn generate_text(
        &mut self,
        section_id: SectionId,
        section: &Section,
        answers: &std::collections::HashMap<QuestionId, String>,
        will_generate: bool,
    ) -> String {
        if will_generate {
            if let Ok(session) = self.store.session() {
                if session.is_online {
                    if let Some(session_id) = session.session_id {
                        let request = GenerateRequest {
                            session_id,
                            section_id,
                        };
                        match self.backend.generate(request).await {
                            Ok(response) => return response.generated_text,
                            Err(e) => {
                                warn!(error = %e, "generation failed, using local placeholder");
                            }
                        }
                    }
                }
            }
        }
        placeholder_text(section, answers)
    }

    /// Pushes the bot prompt for the current question, if any.
    fn prompt_current(&mut self) -> Result<()> {
        if let Some(question) = self.current_prompt() {
            let section_id = self.store.current_section_id()?;
            self.push_prompt(section_id, &question)?;
        }
        Ok(())
    }

    fn push_prompt(&mut self, section_id: SectionId, question: &Question) -> Result<()> {
        let text = format!("{}) {}", question.id, question.text);
        Ok(self
            .store
            .push_message(section_id, ChatMessage::bot(text, question.hint.clone()))?)
    }
}
