//! Crash-safe draft persistence for the Relato engine.
//!
//! Drafts are written atomically (temp file + rename) so a crash never
//! leaves a half-written file behind. Loading never fails toward the
//! caller: a missing, corrupt or expired draft degrades to `None` with a
//! logged warning, and the app starts fresh.
//!
//! # Example
//!
//! ```no_run
//! use relato_persistence::DraftStore;
//!
//! let store = DraftStore::new(relato_persistence::config::state_dir());
//! if let Some(draft) = store.load() {
//!     println!("resuming report started at {}", draft.start_time);
//! }
//! ```

pub mod atomic;
pub mod config;
pub mod debounce;
pub mod draft_store;
pub mod error;

pub use debounce::DebouncedSaver;
pub use draft_store::{DraftStore, DRAFT_TTL_HOURS};
pub use error::{PersistenceError, Result};
