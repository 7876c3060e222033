//! Error types for the query pipeline
//!
//! Closed taxonomy for everything that can fail between the HTTP boundary and
//! the generation call. Generation failures are intentionally absent: the
//! answer generator converts them to sentinel answer strings and never lets
//! an error cross its boundary (see `generation`).

use thiserror::Error;

/// Errors produced by index loading and retrieval
#[derive(Debug, Error)]
pub enum RagError {
    /// Index or metadata file absent at load time. Fatal: the service cannot
    /// answer any request without the artifacts.
    #[error("Required resource missing: {path}")]
    ResourceMissing { path: String },

    /// Index or metadata file present but unreadable
    #[error("Failed to load index: {0}")]
    IndexLoad(String),

    /// Blank or whitespace-only question
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A search result points outside the metadata sequence, meaning the
    /// index and metadata were not built together
    #[error("Index corrupt: position {position} out of bounds for {len} metadata entries")]
    IndexCorrupt { position: usize, len: usize },

    /// Vector and metadata files disagree on entry count, meaning they were
    /// not built together
    #[error("Index corrupt: {vectors} vectors but {chunks} metadata entries")]
    IndexMisaligned { vectors: usize, chunks: usize },

    /// Query embedding failed
    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    /// Index search rejected the query vector
    #[error("Index search failed: {0}")]
    SearchFailed(String),
}

impl RagError {
    /// HTTP status code for surfacing this error at the API boundary
    pub fn status_code(&self) -> u16 {
        match self {
            RagError::InvalidInput(_) => 400,
            RagError::ResourceMissing { .. } => 503,
            RagError::IndexLoad(_)
            | RagError::IndexCorrupt { .. }
            | RagError::IndexMisaligned { .. }
            | RagError::EmbeddingFailed(_)
            | RagError::SearchFailed(_) => 500,
        }
    }

    /// Stable error code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            RagError::ResourceMissing { .. } => "RESOURCE_MISSING",
            RagError::IndexLoad(_) => "INDEX_LOAD_FAILED",
            RagError::InvalidInput(_) => "INVALID_INPUT",
            RagError::IndexCorrupt { .. } => "INDEX_CORRUPT",
            RagError::IndexMisaligned { .. } => "INDEX_MISALIGNED",
            RagError::EmbeddingFailed(_) => "EMBEDDING_FAILED",
            RagError::SearchFailed(_) => "SEARCH_FAILED",
        }
    }
}
