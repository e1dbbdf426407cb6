//! Debounced draft saving.
//!
//! Rapid answer sequences would otherwise write the draft file once per
//! mutation. `DebouncedSaver` coalesces a burst into one write: every
//! `schedule` pushes the deadline back by the debounce window, and the
//! snapshot is taken when the write actually fires, never at schedule
//! time.
//!
//! The engine is single-threaded and cooperative, so there is no timer
//! thread here: the owner pumps `flush_due` from its event loop, passing
//! the current instant.

use std::time::{Duration, Instant};

use tracing::warn;

use relato_models::DraftSnapshot;

use crate::draft_store::DraftStore;
use crate::error::Result;

/// Default debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces bursts of mutations into a single draft write.
pub struct DebouncedSaver {
    store: DraftStore,
    window: Duration,
    deadline: Option<Instant>,
}

impl DebouncedSaver {
    /// Creates a saver with the default 500ms window.
    pub fn new(store: DraftStore) -> Self {
        Self::with_window(store, DEFAULT_DEBOUNCE)
    }

    /// Creates a saver with a custom debounce window.
    pub fn with_window(store: DraftStore, window: Duration) -> Self {
        Self {
            store,
            window,
            deadline: None,
        }
    }

    /// Arms (or re-arms) the write deadline at `now + window`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Returns true if a write is pending.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Cancels any pending write.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Writes the draft if the deadline has passed. The snapshot closure
    /// runs only when the write fires, so the persisted state is the
    /// state at fire time.
    ///
    /// Returns true if a write happened.
    pub fn flush_due<F>(&mut self, now: Instant, snapshot: F) -> bool
    where
        F: FnOnce() -> DraftSnapshot,
    {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if let Err(e) = self.store.save(&snapshot()) {
                    warn!(error = %e, "debounced draft write failed");
                    return false;
                }
                true
            }
            _ => false,
        }
    }

    /// Forces an immediate write, clearing any pending deadline.
    pub fn flush_now<F>(&mut self, snapshot: F) -> Result<()>
    where
        F: FnOnce() -> DraftSnapshot,
    {
        self.deadline = None;
        self.store.save(&snapshot())
    }

    /// Access to the underlying draft store.
    pub fn store(&self) -> &DraftStore {
        &self.store
    }
}
