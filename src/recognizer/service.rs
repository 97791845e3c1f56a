//! HTTP client for the local speech recognition service
//!
//! The service runs out-of-process and owns audio capture and endpointing.
//! Starting a session begins capture; the result endpoint long-polls until
//! the session ends (explicit stop or service-side endpointing) and returns
//! the ranked transcript candidates.

use super::RecognitionRequest;
use serde::Deserialize;
use std::time::Duration;

/// Default speech service address
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8750";

/// Default timeout for API requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Response from the session start endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartSessionResponse {
    session_id: String,
}

/// Response from the session result endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultResponse {
    /// Transcript candidates ranked by confidence, best first
    #[serde(default)]
    transcripts: Vec<String>,
}

/// Error types for speech service operations
#[derive(Debug, thiserror::Error)]
pub enum RecognizerError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// HTTP client for the speech recognition service.
///
/// The client is cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SpeechServiceClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for SpeechServiceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechServiceClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom base URL and timeout.
    pub fn with_config(base_url: &str, timeout_secs: u64) -> Self {
        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        }
    }

    /// Get the configured service URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check if the speech service is reachable.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/v1/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Speech service not available: {}", e);
                false
            }
        }
    }

    /// Start a recognition session.
    ///
    /// The service begins capturing microphone audio as soon as it accepts
    /// the request. Returns the session id used by the other endpoints.
    pub async fn start_session(
        &self,
        request: &RecognitionRequest,
    ) -> Result<String, RecognizerError> {
        let url = format!("{}/v1/sessions", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_status(response).await);
        }

        let started: StartSessionResponse = response
            .json()
            .await
            .map_err(|e| RecognizerError::ParseError(e.to_string()))?;

        Ok(started.session_id)
    }

    /// Long-poll the ranked transcript candidates for a session.
    ///
    /// Completes when the session ends, either by an explicit stop or by
    /// the service's own endpointing.
    pub async fn fetch_result(&self, session_id: &str) -> Result<Vec<String>, RecognizerError> {
        let url = format!("{}/v1/sessions/{}/result", self.base_url, session_id);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_status(response).await);
        }

        let result: ResultResponse = response
            .json()
            .await
            .map_err(|e| RecognizerError::ParseError(e.to_string()))?;

        Ok(result.transcripts)
    }

    /// End audio capture for a session.
    ///
    /// The pending result poll completes with the final transcripts.
    pub async fn stop_session(&self, session_id: &str) -> Result<(), RecognizerError> {
        let url = format!("{}/v1/sessions/{}/stop", self.base_url, session_id);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_status(response).await);
        }

        Ok(())
    }

    /// Map a reqwest transport error to a recognizer error.
    fn map_send_error(&self, e: reqwest::Error) -> RecognizerError {
        if e.is_timeout() {
            RecognizerError::Timeout(self.timeout.as_secs())
        } else {
            RecognizerError::ConnectionFailed(e.to_string())
        }
    }

    /// Build a service error from a non-success response.
    async fn error_from_status(response: reqwest::Response) -> RecognizerError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        RecognizerError::ServiceError { status, message }
    }
}
