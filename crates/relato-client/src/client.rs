//! The backend transport trait and its reqwest implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::types::{
    AnswerRequest, AnswerResponse, GenerateRequest, GenerateResponse, HealthStatus,
    NewSessionResponse,
};

/// Transport seam between the orchestrator and the backend.
///
/// The orchestrator only ever talks to this trait, so tests can swap in
/// a scripted mock and exercise validation, skipping and generation
/// without a server.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Probes the backend. Never errors; unreachable maps to
    /// `online: false`.
    async fn health(&self) -> HealthStatus;

    /// Opens a session and receives the report number.
    async fn start_session(&self) -> Result<NewSessionResponse>;

    /// Submits one answer for validation and flow feedback.
    async fn send_answer(&self, request: AnswerRequest) -> Result<AnswerResponse>;

    /// Requests narrative text for a completed section.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}

/// HTTP client for the report backend.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for a backend at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "backend request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::ResponseParse(e.to_string()))
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn health(&self) -> HealthStatus {
        let online = match self.client.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "health check failed");
                false
            }
        };
        HealthStatus { online }
    }

    async fn start_session(&self) -> Result<NewSessionResponse> {
        self.post_json("/new_session", &serde_json::json!({})).await
    }

    async fn send_answer(&self, request: AnswerRequest) -> Result<AnswerResponse> {
        self.post_json("/answer", &request).await
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.post_json("/generate", &request).await
    }
}
