//! HTTP client for the report backend.
//!
//! The backend validates answers, tracks sessions and generates the
//! narrative text. [`ApiClient`] is the real transport; the [`Backend`]
//! trait is the seam the orchestrator depends on, so tests can script
//! responses without a server.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, Backend};
pub use error::{ApiError, Result};
pub use types::{
    AnswerRequest, AnswerResponse, GenerateRequest, GenerateResponse, HealthStatus,
    NewSessionResponse,
};
