//! Answer generation
//!
//! Builds the grounded-answer prompt and calls the external generation
//! service through the `GenerationBackend` seam. Every failure mode is
//! converted to a string-typed sentinel answer here - no error ever crosses
//! this module's boundary, so the query service needs no generation error
//! handling at all.

pub mod gemini;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{
    Candidate, CandidateContent, CandidatePart, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, GenerationError,
};

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Sentinel returned when the generation call exceeds its timeout
pub const TIMEOUT_SENTINEL: &str = "[ERROR] generation request timed out.";

/// Sentinel returned when the response carries no parseable answer text
pub const NO_ANSWER_SENTINEL: &str = "[ERROR] generation API returned no answer.";

/// Prefix for the transport-failure sentinel; the failure detail follows
pub const TRANSPORT_SENTINEL_PREFIX: &str = "[ERROR] generation request failed: ";

/// Raw call to a text-generation service
///
/// One attempt per call; implementations apply their own fixed timeout.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Send a prompt and return the generated text
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Prompt construction plus sentinel-typed failure handling
pub struct AnswerGenerator {
    backend: Arc<dyn GenerationBackend>,
}

impl AnswerGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Build the instruction prompt: grounding constraint, "I don't know"
    /// fallback, then the retrieved context and the question
    pub fn build_prompt(question: &str, context: &str) -> String {
        format!(
            "Answer the question based only on the context below. \
             If not in context, say 'I don't know'.\n\n\
             Context:\n{}\nQuestion: {}\nAnswer:",
            context, question
        )
    }

    /// Generate an answer for a question given its assembled context
    ///
    /// Always returns a non-empty string: either the trimmed generated text
    /// or a sentinel describing the failure.
    pub async fn generate(&self, question: &str, context: &str) -> String {
        let prompt = Self::build_prompt(question, context);

        match self.backend.complete(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(GenerationError::Timeout { timeout_secs }) => {
                warn!("Generation timed out after {}s", timeout_secs);
                TIMEOUT_SENTINEL.to_string()
            }
            Err(GenerationError::Transport { status, message }) => {
                warn!(
                    "Generation transport failure (status {:?}): {}",
                    status, message
                );
                match status {
                    Some(code) => format!("{}HTTP {}: {}", TRANSPORT_SENTINEL_PREFIX, code, message),
                    None => format!("{}{}", TRANSPORT_SENTINEL_PREFIX, message),
                }
            }
            Err(GenerationError::EmptyResponse) => {
                warn!("Generation response carried no answer text");
                NO_ANSWER_SENTINEL.to_string()
            }
        }
    }
}
