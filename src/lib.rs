pub mod api;
pub mod config;
pub mod embeddings;
pub mod engine;
pub mod errors;
pub mod generation;
pub mod index;
pub mod retrieval;

// Re-export main types
pub use config::RagConfig;
pub use engine::RagEngine;
pub use errors::RagError;
pub use generation::{AnswerGenerator, GenerationBackend, GenerationError, GeminiClient};
pub use index::{ChunkStore, IndexedChunk, StoredVectors};
pub use retrieval::{assemble_context, RetrievalHit, Retriever};
