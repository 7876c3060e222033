// Shared test doubles for pipeline and HTTP tests

use anyhow::Result;
use async_trait::async_trait;
use rag_query_node::embeddings::EmbeddingProvider;
use rag_query_node::index::{ChunkStore, IndexedChunk, StoredVectors};
use rag_query_node::{GenerationBackend, GenerationError};
use std::collections::HashMap;
use std::sync::Arc;

pub const DIM: usize = 8;

/// Deterministic embedder mapping known texts to fixed vectors
pub struct MockEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self {
            vectors: HashMap::new(),
        }
    }

    pub fn with_text(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }
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
        DIM
    }
}

/// Generation backend double returning a canned outcome
pub struct CannedBackend {
    outcome: CannedOutcome,
}

pub enum CannedOutcome {
    Answer(String),
    Timeout,
    Transport(u16, String),
    Empty,
}

impl CannedBackend {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: CannedOutcome::Answer(text.to_string()),
        })
    }

    pub fn timing_out() -> Arc<Self> {
        Arc::new(Self {
            outcome: CannedOutcome::Timeout,
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: CannedOutcome::Transport(status, message.to_string()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            outcome: CannedOutcome::Empty,
        })
    }
}

#[async_trait]
impl GenerationBackend for CannedBackend {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        match &self.outcome {
            CannedOutcome::Answer(text) => Ok(text.clone()),
            CannedOutcome::Timeout => Err(GenerationError::Timeout { timeout_secs: 30 }),
            CannedOutcome::Transport(status, message) => Err(GenerationError::Transport {
                status: Some(*status),
                message: message.clone(),
            }),
            CannedOutcome::Empty => Err(GenerationError::EmptyResponse),
        }
    }
}

pub fn axis_vector(axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    v[axis] = 1.0;
    v
}

/// Store holding the single insurance chunk from the canonical scenario
pub fn insurance_store() -> Arc<ChunkStore> {
    let stored = StoredVectors {
        dimension: DIM,
        vectors: vec![axis_vector(0)],
    };
    let chunks = vec![IndexedChunk {
        source_file: "a.json".to_string(),
        chunk_index: 0,
        text: "Insurance covers fire damage.".to_string(),
    }];
    Arc::new(ChunkStore::from_parts(stored, chunks).unwrap())
}

/// Embedder that knows the canonical insurance question
pub fn insurance_embedder() -> Arc<MockEmbedder> {
    Arc::new(MockEmbedder::new().with_text("What does the policy cover?", axis_vector(0)))
}
