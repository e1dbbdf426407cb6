//! The engine that drives a guided report session.
//!
//! [`Engine`] connects the four underlying pieces: the state store (what
//! has been answered), the flow logic (what to ask next), the draft
//! store (what survives a restart) and the backend client (validation
//! and text generation). All collaborators are injected at construction;
//! there are no globals.

pub mod engine;
pub mod error;
pub mod placeholder;

pub use engine::{Engine, SubmitResult};
pub use error::{OrchestratorError, Result};
