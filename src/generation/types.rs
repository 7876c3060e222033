//! Wire types for the Gemini generateContent API
//!
//! Every level of the response is optional and matched explicitly: a body
//! with no candidates, no content, no parts, or no text is a distinct,
//! expected outcome rather than a panic or a stringified surprise.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request body for generateContent
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

/// One content block in the request
#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

/// One text part in the request
#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

/// Sampling configuration, applied uniformly to every call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 500,
            top_p: 0.9,
            top_k: 40,
        }
    }
}

/// Response body from generateContent, with optional fields explicitly modeled
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Extract the first generated text, if the response carries one
    ///
    /// Walks candidates → content → parts → text; any missing level yields
    /// `None`.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_deref()?
            .first()?
            .text
            .as_deref()
    }
}

/// Failure modes of a single generation call
///
/// No automatic retry is attempted on any of these; the answer generator maps
/// each variant to its sentinel answer string.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Request exceeded the fixed timeout
    #[error("Generation request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Connection error or non-2xx HTTP status
    #[error("Generation request failed: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Body parsed but carried no answer text (or did not parse at all)
    #[error("Generation API returned no answer")]
    EmptyResponse,
}
