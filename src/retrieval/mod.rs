//! Retrieval: question → top-k nearest indexed passages
//!
//! Embeds the question, searches the read-only index, and maps each returned
//! position back to its chunk metadata. Search against an in-memory index is
//! assumed never to fail transiently, so there is no retry anywhere in this
//! path.

pub mod context;

pub use context::assemble_context;

use crate::embeddings::EmbeddingProvider;
use crate::errors::RagError;
use crate::index::{ChunkStore, IndexedChunk};
use std::sync::Arc;
use tracing::debug;

/// One retrieved passage with its distance to the query
///
/// Lower distance = more relevant (L2 semantics).
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalHit {
    pub chunk: IndexedChunk,
    pub distance: f32,
}

/// Retrieves the nearest indexed passages for a question
pub struct Retriever {
    store: Arc<ChunkStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl Retriever {
    pub fn new(store: Arc<ChunkStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embedder }
    }

    /// Retrieve up to `top_k` passages, ascending by distance
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `top_k` is zero
    /// - `EmbeddingFailed` if the question cannot be embedded
    /// - `IndexCorrupt` if a search result points outside the metadata
    ///   sequence (index and metadata not built together)
    pub async fn retrieve(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievalHit>, RagError> {
        if top_k == 0 {
            return Err(RagError::InvalidInput(
                "top_k must be greater than 0".to_string(),
            ));
        }

        let query = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| RagError::EmbeddingFailed(e.to_string()))?;

        let index_hits = self.store.search(&query, top_k)?;
        debug!("Retrieved {} candidates for question", index_hits.len());

        let mut hits = Vec::with_capacity(index_hits.len());
        for index_hit in index_hits {
            let chunk = self.store.chunk_at(index_hit.position)?;
            hits.push(RetrievalHit {
                chunk: chunk.clone(),
                distance: index_hit.distance,
            });
        }

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ChunkStore, StoredVectors};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Embedder double mapping known texts to fixed vectors
    struct MockEmbedder {
        vectors: HashMap<String, Vec<f32>>,
        dimension: usize,
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.vectors
                .get(text)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No mock embedding for: {}", text))
        }

        fn dimension(&self) -> usize {
            self.dimension
        }
    }

    fn axis_vector(dim: usize, axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; dim];
        v[axis] = 1.0;
        v
    }

    fn store_with_chunks(n: usize) -> Arc<ChunkStore> {
        let stored = StoredVectors {
            dimension: 8,
            vectors: (0..n).map(|i| axis_vector(8, i % 8)).collect(),
        };
        let chunks = (0..n)
            .map(|i| IndexedChunk {
                source_file: format!("doc{}.json", i),
                chunk_index: i,
                text: format!("passage {}", i),
            })
            .collect();
        Arc::new(ChunkStore::from_parts(stored, chunks).unwrap())
    }

    fn retriever_for(question: &str, axis: usize, store: Arc<ChunkStore>) -> Retriever {
        let mut vectors = HashMap::new();
        vectors.insert(question.to_string(), axis_vector(8, axis));
        Retriever::new(
            store,
            Arc::new(MockEmbedder {
                vectors,
                dimension: 8,
            }),
        )
    }

    #[tokio::test]
    async fn test_retrieve_maps_positions_to_chunks() {
        let store = store_with_chunks(5);
        let retriever = retriever_for("which passage?", 2, store);

        let hits = retriever.retrieve("which passage?", 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk.text, "passage 2");
        assert_eq!(hits[0].chunk.source_file, "doc2.json");
        assert!(hits[0].distance < 0.001);
    }

    #[tokio::test]
    async fn test_retrieve_ascending_and_bounded() {
        let store = store_with_chunks(6);
        let retriever = retriever_for("q", 0, store);

        let hits = retriever.retrieve("q", 3).await.unwrap();
        assert!(hits.len() <= 3);
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[tokio::test]
    async fn test_retrieve_deterministic() {
        let store = store_with_chunks(6);
        let retriever = retriever_for("q", 3, store);

        let first = retriever.retrieve("q", 3).await.unwrap();
        let second = retriever.retrieve("q", 3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_zero_top_k_rejected() {
        let store = store_with_chunks(3);
        let retriever = retriever_for("q", 0, store);

        let result = retriever.retrieve("q", 0).await;
        assert!(matches!(result, Err(RagError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_embedding_failure_surfaces() {
        let store = store_with_chunks(3);
        let retriever = retriever_for("known question", 0, store);

        let result = retriever.retrieve("unknown question", 2).await;
        assert!(matches!(result, Err(RagError::EmbeddingFailed(_))));
    }
}
