//! The state store: shared, observable report state.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{debug, warn};

use relato_models::{
    Catalog, ChatMessage, DraftSnapshot, QuestionId, ReportId, SectionId, SectionState,
    SectionStatus, Session, SessionId, SNAPSHOT_VERSION,
};

use crate::error::{Result, StoreError};
use crate::events::StateEvent;

/// Everything mutable, behind one lock so every mutator sees a
/// consistent view.
struct EngineState {
    session: Session,
    current_section_id: SectionId,
    sections: HashMap<SectionId, SectionState>,
}

impl EngineState {
    fn fresh(catalog: &Catalog) -> Self {
        let sections = catalog
            .sections()
            .iter()
            .map(|s| (s.id, SectionState::new_for(s)))
            .collect();
        Self {
            session: Session::new(),
            current_section_id: catalog.first_section_id(),
            sections,
        }
    }
}

/// Thread-safe report state with pub/sub change notifications.
///
/// Getters return owned copies; callers can never alias the interior
/// state. Mutators validate their inputs, update the state, then notify
/// subscribers synchronously in subscription order. Unknown section ids
/// are logged and ignored rather than surfaced, so a stray id cannot
/// corrupt anything or crash the flow.
pub struct StateStore {
    catalog: Arc<Catalog>,
    state: RwLock<EngineState>,
    subscribers: RwLock<Vec<Sender<StateEvent>>>,
    section_subscribers: RwLock<HashMap<SectionId, Vec<Sender<StateEvent>>>>,
}

impl StateStore {
    /// Creates a store with fresh pending state for every catalog section.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let state = EngineState::fresh(&catalog);
        Self {
            catalog,
            state: RwLock::new(state),
            subscribers: RwLock::new(Vec::new()),
            section_subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// The catalog this store was built from.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    // ---- pub/sub ----

    /// Subscribes to all state events. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> Receiver<StateEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.write() {
            subs.push(tx);
        }
        rx
    }

    /// Subscribes to events scoped to one section (plus navigation
    /// events that land on it).
    pub fn subscribe_to_section(&self, id: SectionId) -> Receiver<StateEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.section_subscribers.write() {
            subs.entry(id).or_default().push(tx);
        }
        rx
    }

    /// Sends the event to every live subscriber, pruning disconnected
    /// ones. Called after the state lock has been released.
    fn broadcast(&self, event: StateEvent) {
        if let Ok(mut subs) = self.subscribers.write() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
        }
        if let Some(section) = event.section_id() {
            if let Ok(mut subs) = self.section_subscribers.write() {
                if let Some(list) = subs.get_mut(&section) {
                    list.retain(|tx| tx.send(event.clone()).is_ok());
                }
            }
        }
    }

    // ---- lock helpers ----

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, EngineState>> {
        self.state
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, EngineState>> {
        self.state
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    /// Applies a status transition if the monotonic order allows it.
    /// Illegal transitions are ignored with a warning.
    fn apply_status(id: SectionId, state: &mut SectionState, next: SectionStatus) -> bool {
        if state.status.can_transition_to(next) {
            let changed = state.status != next;
            state.status = next;
            changed
        } else {
            warn!(
                section = %id,
                from = ?state.status,
                to = ?next,
                "illegal status transition ignored"
            );
            false
        }
    }

    // ---- mutators ----

    /// Saves (or overwrites) an answer and moves a pending section to
    /// in-progress.
    pub fn save_answer(
        &self,
        section: SectionId,
        question: QuestionId,
        answer: impl Into<String>,
    ) -> Result<()> {
        let mut events = Vec::new();
        {
            let mut state = self.write()?;
            let Some(section_state) = state.sections.get_mut(&section) else {
                warn!(section = %section, "save_answer for unknown section ignored");
                return Ok(());
            };
            if Self::apply_status(section, section_state, SectionStatus::InProgress) {
                events.push(StateEvent::Status {
                    section,
                    status: SectionStatus::InProgress,
                });
            }
            section_state.record_answer(question.clone(), answer.into());
            events.push(StateEvent::Answer { section, question });
        }
        for event in events {
            self.broadcast(event);
        }
        Ok(())
    }

    /// Marks a section completed, optionally replacing its answer map
    /// with the backend's authoritative copy. The answered count is
    /// pinned to the total on completion. No-op with a warning if the
    /// section is unknown or already terminal in another state.
    pub fn mark_section_completed(
        &self,
        section: SectionId,
        answers: Option<HashMap<QuestionId, String>>,
    ) -> Result<()> {
        let completed = {
            let mut state = self.write()?;
            let Some(section_state) = state.sections.get_mut(&section) else {
                warn!(section = %section, "mark_section_completed for unknown section ignored");
                return Ok(());
            };
            if Self::apply_status(section, section_state, SectionStatus::Completed) {
                if let Some(answers) = answers {
                    section_state.answers = answers;
                }
                section_state.answered_count = section_state.total_count;
                true
            } else {
                false
            }
        };
        if completed {
            self.broadcast(StateEvent::SectionCompleted { section });
        }
        Ok(())
    }

    /// Marks a section skipped, recording why it does not apply.
    pub fn mark_section_skipped(
        &self,
        section: SectionId,
        reason: impl Into<String>,
    ) -> Result<()> {
        let reason = reason.into();
        let skipped = {
            let mut state = self.write()?;
            let Some(section_state) = state.sections.get_mut(&section) else {
                warn!(section = %section, "mark_section_skipped for unknown section ignored");
                return Ok(());
            };
            if Self::apply_status(section, section_state, SectionStatus::Skipped) {
                section_state.skip_reason = Some(reason.clone());
                true
            } else {
                false
            }
        };
        if skipped {
            self.broadcast(StateEvent::SectionSkipped { section, reason });
        }
        Ok(())
    }

    /// Changes the current section, moving a pending target to
    /// in-progress.
    pub fn set_current_section(&self, section: SectionId) -> Result<()> {
        let mut events = Vec::new();
        {
            let mut state = self.write()?;
            if !state.sections.contains_key(&section) {
                warn!(section = %section, "set_current_section for unknown section ignored");
                return Ok(());
            }
            let previous = state.current_section_id;
            state.current_section_id = section;
            if let Some(section_state) = state.sections.get_mut(&section) {
                if section_state.status == SectionStatus::Pending
                    && Self::apply_status(section, section_state, SectionStatus::InProgress)
                {
                    events.push(StateEvent::Status {
                        section,
                        status: SectionStatus::InProgress,
                    });
                }
            }
            events.push(StateEvent::Navigation {
                previous,
                current: section,
            });
        }
        for event in events {
            self.broadcast(event);
        }
        Ok(())
    }

    /// Stores the backend-generated narrative text for a section.
    pub fn set_generated_text(&self, section: SectionId, text: impl Into<String>) -> Result<()> {
        {
            let mut state = self.write()?;
            let Some(section_state) = state.sections.get_mut(&section) else {
                warn!(section = %section, "set_generated_text for unknown section ignored");
                return Ok(());
            };
            section_state.generated_text = Some(text.into());
        }
        self.broadcast(StateEvent::GeneratedText { section });
        Ok(())
    }

    /// Updates a section's effective question count (it grows when
    /// follow-ups activate).
    pub fn update_total_questions(&self, section: SectionId, total: usize) -> Result<()> {
        {
            let mut state = self.write()?;
            let Some(section_state) = state.sections.get_mut(&section) else {
                warn!(section = %section, "update_total_questions for unknown section ignored");
                return Ok(());
            };
            section_state.total_count = total;
        }
        self.broadcast(StateEvent::TotalQuestions { section, total });
        Ok(())
    }

    /// Moves the question cursor within a section.
    pub fn set_current_question_index(&self, section: SectionId, index: usize) -> Result<()> {
        {
            let mut state = self.write()?;
            let Some(section_state) = state.sections.get_mut(&section) else {
                warn!(section = %section, "set_current_question_index for unknown section ignored");
                return Ok(());
            };
            section_state.current_question_index = index;
        }
        self.broadcast(StateEvent::QuestionIndex { section, index });
        Ok(())
    }

    /// Appends a chat message to a section's history.
    pub fn push_message(&self, section: SectionId, message: ChatMessage) -> Result<()> {
        {
            let mut state = self.write()?;
            let Some(section_state) = state.sections.get_mut(&section) else {
                warn!(section = %section, "push_message for unknown section ignored");
                return Ok(());
            };
            section_state.push_message(message);
        }
        self.broadcast(StateEvent::Message { section });
        Ok(())
    }

    /// Rolls back the most recent user message after a validation
    /// rejection. Returns whether anything was removed.
    pub fn remove_last_user_message(&self, section: SectionId) -> Result<bool> {
        let removed = {
            let mut state = self.write()?;
            let Some(section_state) = state.sections.get_mut(&section) else {
                warn!(section = %section, "remove_last_user_message for unknown section ignored");
                return Ok(false);
            };
            section_state.remove_last_user_message()
        };
        if removed {
            self.broadcast(StateEvent::Message { section });
        }
        Ok(removed)
    }

    /// Records the backend-issued session and report ids.
    pub fn set_session(&self, session_id: SessionId, report_id: ReportId) -> Result<()> {
        {
            let mut state = self.write()?;
            state.session.session_id = Some(session_id);
            state.session.report_id = Some(report_id);
        }
        self.broadcast(StateEvent::Session);
        Ok(())
    }

    /// Flips the connectivity flag.
    pub fn set_online(&self, online: bool) -> Result<()> {
        let changed = {
            let mut state = self.write()?;
            let changed = state.session.is_online != online;
            state.session.is_online = online;
            changed
        };
        if changed {
            self.broadcast(StateEvent::Online { online });
        }
        Ok(())
    }

    /// Discards everything and starts a fresh report: new session,
    /// pending sections, cleared skip reasons and generated text.
    pub fn reset(&self) -> Result<()> {
        {
            let mut state = self.write()?;
            *state = EngineState::fresh(&self.catalog);
        }
        self.broadcast(StateEvent::Reset);
        Ok(())
    }

    // ---- persistence ----

    /// Captures the full state as a versioned snapshot for persistence.
    /// Follow-up queues are not part of the state and are not captured;
    /// they are recomputed from the answers on restore.
    pub fn snapshot(&self) -> Result<DraftSnapshot> {
        let state = self.read()?;
        Ok(DraftSnapshot {
            version: SNAPSHOT_VERSION.to_string(),
            timestamp: Utc::now(),
            session_id: state.session.session_id.clone(),
            report_id: state.session.report_id.clone(),
            start_time: state.session.start_time,
            current_section_id: state.current_section_id,
            sections: state.sections.clone(),
        })
    }

    /// Replaces the state from a persisted draft.
    ///
    /// The snapshot version must match [`SNAPSHOT_VERSION`] exactly;
    /// there is no partial migration. Sections in the draft that no
    /// longer exist in the catalog are dropped with a warning; catalog
    /// sections absent from the draft start fresh.
    pub fn restore_from_draft(&self, snapshot: DraftSnapshot) -> Result<()> {
        if !snapshot.version_matches() {
            return Err(StoreError::VersionMismatch {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION.to_string(),
            });
        }
        {
            let mut state = self.write()?;
            let mut fresh = EngineState::fresh(&self.catalog);
            for (id, section_state) in snapshot.sections {
                if fresh.sections.contains_key(&id) {
                    fresh.sections.insert(id, section_state);
                } else {
                    warn!(section = %id, "draft section not in catalog, dropped");
                }
            }
            fresh.session.session_id = snapshot.session_id;
            fresh.session.report_id = snapshot.report_id;
            fresh.session.start_time = snapshot.start_time;
            fresh.session.is_online = state.session.is_online;
            if fresh.sections.contains_key(&snapshot.current_section_id) {
                fresh.current_section_id = snapshot.current_section_id;
            }
            *state = fresh;
        }
        debug!("state restored from draft");
        self.broadcast(StateEvent::Restore);
        Ok(())
    }

    // ---- getters (owned copies) ----

    /// Full state of one section, if it exists.
    pub fn section_state(&self, section: SectionId) -> Option<SectionState> {
        self.read().ok()?.sections.get(&section).cloned()
    }

    /// The section currently being answered.
    pub fn current_section_id(&self) -> Result<SectionId> {
        Ok(self.read()?.current_section_id)
    }

    /// One answer, if recorded.
    pub fn answer(&self, section: SectionId, question: &QuestionId) -> Option<String> {
        self.read()
            .ok()?
            .sections
            .get(&section)?
            .answers
            .get(question)
            .cloned()
    }

    /// All answers of a section.
    pub fn answers(&self, section: SectionId) -> HashMap<QuestionId, String> {
        self.read()
            .ok()
            .and_then(|s| s.sections.get(&section).map(|st| st.answers.clone()))
            .unwrap_or_default()
    }

    /// A section's lifecycle status.
    pub fn section_status(&self, section: SectionId) -> Option<SectionStatus> {
        Some(self.read().ok()?.sections.get(&section)?.status)
    }

    /// A section's generated narrative text, once set.
    pub fn generated_text(&self, section: SectionId) -> Option<String> {
        self.read()
            .ok()?
            .sections
            .get(&section)?
            .generated_text
            .clone()
    }

    /// Ids of all completed sections, ascending.
    pub fn completed_sections(&self) -> Vec<SectionId> {
        let Ok(state) = self.read() else {
            return Vec::new();
        };
        let mut ids: Vec<SectionId> = state
            .sections
            .iter()
            .filter(|(_, s)| s.status == SectionStatus::Completed)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Percentage of sections that reached a terminal status.
    pub fn overall_progress(&self) -> u8 {
        let Ok(state) = self.read() else {
            return 0;
        };
        if state.sections.is_empty() {
            return 0;
        }
        let done = state
            .sections
            .values()
            .filter(|s| s.status.is_terminal())
            .count();
        ((done * 100) / state.sections.len()) as u8
    }

    /// Backend session and report ids, once confirmed.
    pub fn session_ids(&self) -> (Option<SessionId>, Option<ReportId>) {
        match self.read() {
            Ok(state) => (
                state.session.session_id.clone(),
                state.session.report_id.clone(),
            ),
            Err(_) => (None, None),
        }
    }

    /// Copy of the session record.
    pub fn session(&self) -> Result<Session> {
        Ok(self.read()?.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relato_models::{QuestionBuilder, Section, SectionBuilder};

    fn catalog() -> Arc<Catalog> {
        let sections: Vec<Section> = vec![
            SectionBuilder::new(1, "Contexto")
                .question(QuestionBuilder::new("1.1", "Data e hora").build())
                .question(QuestionBuilder::new("1.2", "Local").build())
                .build(),
            SectionBuilder::new(2, "Veículo")
                .skip_question(
                    QuestionBuilder::new("2.0", "Havia veículo?")
                        .option("sim", "SIM")
                        .skip_option("nao", "NÃO")
                        .build(),
                )
                .question(QuestionBuilder::new("2.1", "Placa").build())
                .build(),
        ];
        Arc::new(Catalog::new(sections).unwrap())
    }

    fn store() -> StateStore {
        StateStore::new(catalog())
    }

    #[test]
    fn test_fresh_store_state() {
        let store = store();
        assert_eq!(store.current_section_id().unwrap(), SectionId::new(1));
        assert_eq!(
            store.section_status(SectionId::new(1)),
            Some(SectionStatus::Pending)
        );
        assert_eq!(store.overall_progress(), 0);
    }

    #[test]
    fn test_save_answer_and_event() {
        let store = store();
        let rx = store.subscribe();

        store
            .save_answer(SectionId::new(1), QuestionId::from("1.1"), "ontem")
            .unwrap();

        assert_eq!(
            store.answer(SectionId::new(1), &QuestionId::from("1.1")),
            Some("ontem".to_string())
        );
        // first answer moves the section to in-progress
        assert_eq!(
            store.section_status(SectionId::new(1)),
            Some(SectionStatus::InProgress)
        );

        let events: Vec<StateEvent> = rx.try_iter().collect();
        assert!(events.contains(&StateEvent::Status {
            section: SectionId::new(1),
            status: SectionStatus::InProgress,
        }));
        assert!(events.contains(&StateEvent::Answer {
            section: SectionId::new(1),
            question: QuestionId::from("1.1"),
        }));
    }

    #[test]
    fn test_unknown_section_is_ignored() {
        // Scenario E: bad id neither errors nor mutates anything
        let store = store();
        let rx = store.subscribe();

        store
            .save_answer(SectionId::new(99), QuestionId::from("99.1"), "x")
            .unwrap();

        assert!(store.section_state(SectionId::new(99)).is_none());
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn test_completed_section_cannot_be_skipped() {
        let store = store();
        store
            .mark_section_completed(SectionId::new(1), None)
            .unwrap();
        store
            .mark_section_skipped(SectionId::new(1), "não se aplica")
            .unwrap();

        assert_eq!(
            store.section_status(SectionId::new(1)),
            Some(SectionStatus::Completed)
        );
        let state = store.section_state(SectionId::new(1)).unwrap();
        assert!(state.skip_reason.is_none());
    }

    #[test]
    fn test_completion_pins_answered_count_to_total() {
        let store = store();
        let section = SectionId::new(1);
        store
            .save_answer(section, QuestionId::from("1.1"), "ontem")
            .unwrap();

        let authoritative: HashMap<QuestionId, String> = [
            (QuestionId::from("1.1"), "ontem".to_string()),
            (QuestionId::from("1.2"), "Rua X, 123".to_string()),
        ]
        .into_iter()
        .collect();
        store
            .mark_section_completed(section, Some(authoritative))
            .unwrap();

        let state = store.section_state(section).unwrap();
        assert_eq!(state.status, SectionStatus::Completed);
        assert_eq!(state.answered_count, state.total_count);
        assert_eq!(
            state.answers.get(&QuestionId::from("1.2")).map(String::as_str),
            Some("Rua X, 123")
        );
    }

    #[test]
    fn test_skip_reason_set_only_when_skipped() {
        let store = store();
        store
            .mark_section_skipped(SectionId::new(2), "sem veículo envolvido")
            .unwrap();

        let state = store.section_state(SectionId::new(2)).unwrap();
        assert_eq!(state.status, SectionStatus::Skipped);
        assert_eq!(state.skip_reason.as_deref(), Some("sem veículo envolvido"));
    }

    #[test]
    fn test_navigation_event_carries_previous_and_current() {
        let store = store();
        let rx = store.subscribe();

        store.set_current_section(SectionId::new(2)).unwrap();

        let events: Vec<StateEvent> = rx.try_iter().collect();
        assert!(events.contains(&StateEvent::Navigation {
            previous: SectionId::new(1),
            current: SectionId::new(2),
        }));
        assert_eq!(store.current_section_id().unwrap(), SectionId::new(2));
    }

    #[test]
    fn test_section_subscription_is_scoped() {
        let store = store();
        let rx = store.subscribe_to_section(SectionId::new(2));

        store
            .save_answer(SectionId::new(1), QuestionId::from("1.1"), "a")
            .unwrap();
        store
            .save_answer(SectionId::new(2), QuestionId::from("2.1"), "ABC-1234")
            .unwrap();

        let events: Vec<StateEvent> = rx.try_iter().collect();
        assert!(events
            .iter()
            .all(|e| e.section_id() == Some(SectionId::new(2))));
        assert!(events.contains(&StateEvent::Answer {
            section: SectionId::new(2),
            question: QuestionId::from("2.1"),
        }));
    }

    #[test]
    fn test_dropped_receiver_unsubscribes() {
        let store = store();
        let rx = store.subscribe();
        drop(rx);

        // Broadcast after drop must not fail and prunes the sender
        store
            .save_answer(SectionId::new(1), QuestionId::from("1.1"), "a")
            .unwrap();
        assert!(store.subscribers.read().unwrap().is_empty());
    }

    #[test]
    fn test_rollback_removes_only_last_user_message() {
        let store = store();
        let section = SectionId::new(1);
        store
            .push_message(section, ChatMessage::bot("1.1) Data e hora", None))
            .unwrap();
        store
            .push_message(section, ChatMessage::user("anteontem"))
            .unwrap();

        assert!(store.remove_last_user_message(section).unwrap());
        let state = store.section_state(section).unwrap();
        assert_eq!(state.messages.len(), 1);

        assert!(!store.remove_last_user_message(section).unwrap());
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let store = store();
        store
            .set_session(SessionId::from("sess-1"), ReportId::from("bo-1"))
            .unwrap();
        store
            .save_answer(SectionId::new(1), QuestionId::from("1.1"), "ontem")
            .unwrap();
        store
            .set_current_question_index(SectionId::new(1), 1)
            .unwrap();
        store.set_current_section(SectionId::new(1)).unwrap();

        let snapshot = store.snapshot().unwrap();

        let restored = StateStore::new(catalog());
        restored.restore_from_draft(snapshot).unwrap();

        assert_eq!(
            restored.answer(SectionId::new(1), &QuestionId::from("1.1")),
            Some("ontem".to_string())
        );
        assert_eq!(
            restored.session_ids(),
            (Some(SessionId::from("sess-1")), Some(ReportId::from("bo-1")))
        );
        let state = restored.section_state(SectionId::new(1)).unwrap();
        assert_eq!(state.current_question_index, 1);
        assert_eq!(state.status, SectionStatus::InProgress);
    }

    #[test]
    fn test_restore_rejects_version_mismatch() {
        let store = store();
        let mut snapshot = store.snapshot().unwrap();
        snapshot.version = "1.0".to_string();
        snapshot.sections.clear();

        let err = store.restore_from_draft(snapshot).unwrap_err();
        assert!(matches!(err, StoreError::VersionMismatch { .. }));
    }

    #[test]
    fn test_restore_drops_unknown_sections() {
        let store = store();
        let mut snapshot = store.snapshot().unwrap();
        let orphan = snapshot.sections.get(&SectionId::new(1)).cloned().unwrap();
        snapshot.sections.insert(SectionId::new(42), orphan);

        store.restore_from_draft(snapshot).unwrap();
        assert!(store.section_state(SectionId::new(42)).is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        // P5: skip reasons and answers do not survive a reset
        let store = store();
        store
            .save_answer(SectionId::new(1), QuestionId::from("1.1"), "ontem")
            .unwrap();
        store
            .mark_section_skipped(SectionId::new(2), "sem veículo")
            .unwrap();
        store
            .set_session(SessionId::from("sess-1"), ReportId::from("bo-1"))
            .unwrap();

        store.reset().unwrap();

        assert!(store.answers(SectionId::new(1)).is_empty());
        let state = store.section_state(SectionId::new(2)).unwrap();
        assert_eq!(state.status, SectionStatus::Pending);
        assert!(state.skip_reason.is_none());
        assert_eq!(store.session_ids(), (None, None));
    }

    #[test]
    fn test_overall_progress() {
        let store = store();
        assert_eq!(store.overall_progress(), 0);

        store
            .mark_section_completed(SectionId::new(1), None)
            .unwrap();
        assert_eq!(store.overall_progress(), 50);

        store
            .mark_section_skipped(SectionId::new(2), "não se aplica")
            .unwrap();
        assert_eq!(store.overall_progress(), 100);
        assert_eq!(store.completed_sections(), vec![SectionId::new(1)]);
    }

    #[test]
    fn test_online_event_only_on_change() {
        let store = store();
        let rx = store.subscribe();

        store.set_online(true).unwrap(); // already online
        store.set_online(false).unwrap();

        let events: Vec<StateEvent> = rx.try_iter().collect();
        assert_eq!(events, vec![StateEvent::Online { online: false }]);
    }

    #[test]
    fn test_getters_return_owned_copies() {
        let store = store();
        let mut copy = store.section_state(SectionId::new(1)).unwrap();
        copy.record_answer(QuestionId::from("1.1"), "mutated copy".to_string());

        // The store is unaffected by mutating the copy
        assert!(store
            .answer(SectionId::new(1), &QuestionId::from("1.1"))
            .is_none());
    }
}
