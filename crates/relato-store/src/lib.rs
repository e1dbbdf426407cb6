//! Single source of truth for the guided-report state.
//!
//! [`StateStore`] owns the session record, the navigation position and
//! every section's runtime state. All reads go through getters that
//! return owned copies; all writes go through named mutators that notify
//! subscribers synchronously, after the state has been updated, via
//! `mpsc` channels. Dropping a receiver unsubscribes.

pub mod error;
pub mod events;
pub mod store;

pub use error::{Result, StoreError};
pub use events::StateEvent;
pub use store::StateStore;
