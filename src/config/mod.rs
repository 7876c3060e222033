//! Service configuration
//!
//! All values come from environment variables (a `.env` file is honored at
//! startup). The generation credential is the only hard requirement: the
//! process refuses to start without it. Retrieval depth, the generation
//! timeout, and sampling parameters are deliberately fixed constants rather
//! than knobs.

use std::env;

/// Number of nearest chunks retrieved per question
pub const TOP_K: usize = 3;

/// Request timeout for the generation call, in seconds
pub const GENERATION_TIMEOUT_SECS: u64 = 30;

/// Configuration for the query service
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Gemini API key (required)
    pub gemini_api_key: String,
    /// Path to the serialized vector file produced by the ingestion pipeline
    pub index_path: String,
    /// Path to the chunk metadata file, ordered to match the vector file
    pub metadata_path: String,
    /// Path to the ONNX embedding model
    pub embed_model_path: String,
    /// Path to the embedding tokenizer JSON
    pub embed_tokenizer_path: String,
    /// Port for the HTTP API
    pub api_port: u16,
}

impl RagConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            index_path: env::var("INDEX_PATH").unwrap_or_else(|_| "./data/index.bin".to_string()),
            metadata_path: env::var("METADATA_PATH")
                .unwrap_or_else(|_| "./data/metadata.json".to_string()),
            embed_model_path: env::var("EMBED_MODEL_PATH")
                .unwrap_or_else(|_| "./models/all-MiniLM-L6-v2-onnx/model.onnx".to_string()),
            embed_tokenizer_path: env::var("EMBED_TOKENIZER_PATH")
                .unwrap_or_else(|_| "./models/all-MiniLM-L6-v2-onnx/tokenizer.json".to_string()),
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Validate the configuration
    ///
    /// The service cannot answer anything without the generation credential,
    /// so a missing key is a startup failure rather than a per-request one.
    pub fn validate(&self) -> Result<(), String> {
        if self.gemini_api_key.trim().is_empty() {
            return Err("GEMINI_API_KEY not set in environment".to_string());
        }
        if self.index_path.is_empty() {
            return Err("Index path must not be empty".to_string());
        }
        if self.metadata_path.is_empty() {
            return Err("Metadata path must not be empty".to_string());
        }
        Ok(())
    }
}
