//! Stream transport adapter for the chat completion endpoint.
//!
//! Issues one POST per turn with the JSON-encoded conversation and hands
//! back the raw chunk stream. Terminal statuses are classified here, before
//! any body handling: 429 is rate limiting, 402 is payment required,
//! anything else non-success is a transport failure. The stream is not
//! restartable; a retry is a new call.

use std::sync::Arc;

use crate::config::BackendConfig;
use crate::error::ChatError;
use crate::models::{ChatMessage, ChatRequest};
use crate::traits::{ByteStream, Headers, HttpClient};

/// Client for the hosted chat completion endpoint.
#[derive(Clone)]
pub struct ChatClient {
    http: Arc<dyn HttpClient>,
    endpoint: String,
}

impl ChatClient {
    /// Build a client against an explicit endpoint URL.
    pub fn new(http: Arc<dyn HttpClient>, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Build a client for the configured backend's chat function.
    pub fn from_config(http: Arc<dyn HttpClient>, config: &BackendConfig) -> Self {
        Self::new(http, format!("{}/functions/v1/ai-chat", config.base_url))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the conversation and return the streaming response body.
    ///
    /// `bearer` is the opaque credential from the session provider.
    pub async fn open_stream(
        &self,
        messages: &[ChatMessage],
        bearer: &str,
    ) -> Result<ByteStream, ChatError> {
        let request = ChatRequest {
            messages: messages.to_vec(),
        };
        let body = serde_json::to_string(&request).map_err(|e| ChatError::Transport {
            message: format!("failed to encode request: {}", e),
        })?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {}", bearer));

        tracing::debug!(endpoint = %self.endpoint, messages = messages.len(), "opening chat stream");

        self.http
            .post_stream(&self.endpoint, &body, &headers)
            .await
            .map_err(ChatError::from)
    }
}
