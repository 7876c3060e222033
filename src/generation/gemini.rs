//! Gemini generateContent client
//!
//! One HTTPS POST per question, fixed 30 second timeout, no retry. Timeouts,
//! transport failures, and bodies without answer text each map to their own
//! `GenerationError` variant.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, GenerationError,
    RequestContent, RequestPart,
};
use super::GenerationBackend;
use crate::config::GENERATION_TIMEOUT_SECS;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Client for the hosted Gemini generation endpoint
pub struct GeminiClient {
    api_key: String,
    endpoint: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client against the production Gemini endpoint
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, GEMINI_API_URL.to_string())
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(GENERATION_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            endpoint,
            client,
        }
    }

    fn request_body(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: GENERATION_TIMEOUT_SECS,
                    }
                } else {
                    // Strip the request URL: it carries the API key as a
                    // query param and the message ends up in the
                    // user-visible sentinel
                    GenerationError::Transport {
                        status: None,
                        message: e.without_url().to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| GenerationError::EmptyResponse)?;

        match body.first_text() {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(GenerationError::EmptyResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new("test-key".to_string());
        assert_eq!(client.endpoint, GEMINI_API_URL);
    }

    #[test]
    fn test_request_body_shape() {
        let body = GeminiClient::request_body("Context:\n...\nQuestion: q\nAnswer:");
        assert_eq!(body.contents.len(), 1);
        assert_eq!(body.contents[0].role, "user");
        assert!(body.contents[0].parts[0].text.contains("Question: q"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) refuses connections in the test environment
        let client = GeminiClient::with_endpoint(
            "secret-api-key".to_string(),
            "http://127.0.0.1:9/v1beta/models/test:generateContent".to_string(),
        );

        let result = client.complete("prompt").await;
        match result {
            Err(GenerationError::Transport { status, message }) => {
                assert!(status.is_none());
                // The credential travels as a query param; it must never
                // surface in the transport message
                assert!(!message.contains("secret-api-key"));
                assert!(!message.contains("127.0.0.1:9"));
            }
            Err(GenerationError::Timeout { .. }) => {}
            other => panic!("Expected transport failure, got {:?}", other.map(|_| ())),
        }
    }
}
