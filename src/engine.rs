//! Query service
//!
//! Owns the loaded index, the embedding model, and the answer generator, and
//! exposes the one externally visible operation: `answer(question)`. The
//! engine is constructed once at startup and shared behind an `Arc`; all of
//! its state is immutable after construction, so concurrent requests need no
//! coordination.

use crate::config::{RagConfig, TOP_K};
use crate::embeddings::{EmbeddingProvider, OnnxEmbeddingModel};
use crate::errors::RagError;
use crate::generation::{AnswerGenerator, GeminiClient, GenerationBackend};
use crate::index::ChunkStore;
use crate::retrieval::{assemble_context, Retriever};
use std::sync::Arc;
use tracing::info;

/// Composes Retriever → Context Assembler → Answer Generator
pub struct RagEngine {
    retriever: Retriever,
    generator: AnswerGenerator,
}

impl RagEngine {
    /// Load all resources from configuration
    ///
    /// Fails fast: a missing index, metadata file, or embedding model aborts
    /// startup rather than surfacing on the first request.
    pub fn load(config: &RagConfig) -> Result<Self, RagError> {
        let store = Arc::new(ChunkStore::load(&config.index_path, &config.metadata_path)?);

        let embedder = OnnxEmbeddingModel::new(
            "all-MiniLM-L6-v2",
            &config.embed_model_path,
            &config.embed_tokenizer_path,
        )
        .map_err(|e| RagError::ResourceMissing {
            path: format!("{} ({})", config.embed_model_path, e),
        })?;

        let backend = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));

        info!("Query engine ready: {} chunks indexed", store.chunk_count());

        Ok(Self::new(store, Arc::new(embedder), backend))
    }

    /// Assemble an engine from already-constructed components
    pub fn new(
        store: Arc<ChunkStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Self {
        Self {
            retriever: Retriever::new(store, embedder),
            generator: AnswerGenerator::new(backend),
        }
    }

    /// Answer a question from indexed context
    ///
    /// Blank questions are rejected before any pipeline work. Generation
    /// failures never surface as errors - they come back as sentinel answer
    /// strings, so a non-blank question always yields a non-empty answer
    /// unless retrieval itself fails.
    pub async fn answer(&self, question: &str) -> Result<String, RagError> {
        if question.trim().is_empty() {
            return Err(RagError::InvalidInput(
                "Query cannot be empty".to_string(),
            ));
        }

        let hits = self.retriever.retrieve(question, TOP_K).await?;
        let context = assemble_context(&hits);
        Ok(self.generator.generate(question, &context).await)
    }
}
