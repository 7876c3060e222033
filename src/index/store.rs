//! Vector index store
//!
//! Loads the two artifacts produced by the ingestion pipeline: a
//! bincode-serialized vector file and a JSON metadata file. The metadata is an
//! ordered sequence aligned 1:1 with the vectors - position `i` in the index
//! is position `i` in the metadata. The two files must be built together; a
//! length mismatch at load time is treated as a corrupt index, not papered
//! over.
//!
//! Loaded once at startup and immutable afterwards, so the store can be
//! shared across request handlers without locking.

use crate::errors::RagError;
use crate::index::hnsw::{IndexHit, VectorIndex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// One indexed passage with its provenance, produced at ingestion time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexedChunk {
    /// Source document this chunk came from
    pub source_file: String,
    /// Position of the chunk within its source document
    pub chunk_index: usize,
    /// Chunk text
    pub text: String,
}

/// On-disk vector artifact written by the ingestion pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredVectors {
    /// Embedding dimension (384 for all-MiniLM-L6-v2)
    pub dimension: usize,
    /// Embeddings in metadata order
    pub vectors: Vec<Vec<f32>>,
}

/// Read-only store pairing the nearest-neighbor index with chunk metadata
pub struct ChunkStore {
    index: VectorIndex,
    chunks: Vec<IndexedChunk>,
}

impl ChunkStore {
    /// Load the vector file and metadata file, then build the search index
    ///
    /// # Errors
    ///
    /// - `ResourceMissing` if either file is absent
    /// - `IndexLoad` if either file cannot be parsed
    /// - `IndexMisaligned` if vector and metadata counts differ
    pub fn load<P: AsRef<Path>>(index_path: P, metadata_path: P) -> Result<Self, RagError> {
        let index_path = index_path.as_ref();
        let metadata_path = metadata_path.as_ref();

        if !index_path.exists() {
            return Err(RagError::ResourceMissing {
                path: index_path.display().to_string(),
            });
        }
        if !metadata_path.exists() {
            return Err(RagError::ResourceMissing {
                path: metadata_path.display().to_string(),
            });
        }

        let raw = fs::read(index_path)
            .map_err(|e| RagError::IndexLoad(format!("{}: {}", index_path.display(), e)))?;
        let stored: StoredVectors = bincode::deserialize(&raw)
            .map_err(|e| RagError::IndexLoad(format!("{}: {}", index_path.display(), e)))?;

        let meta_raw = fs::read_to_string(metadata_path)
            .map_err(|e| RagError::IndexLoad(format!("{}: {}", metadata_path.display(), e)))?;
        let chunks: Vec<IndexedChunk> = serde_json::from_str(&meta_raw)
            .map_err(|e| RagError::IndexLoad(format!("{}: {}", metadata_path.display(), e)))?;

        Self::from_parts(stored, chunks)
    }

    /// Build a store from already-deserialized artifacts
    pub fn from_parts(stored: StoredVectors, chunks: Vec<IndexedChunk>) -> Result<Self, RagError> {
        if stored.vectors.len() != chunks.len() {
            return Err(RagError::IndexMisaligned {
                vectors: stored.vectors.len(),
                chunks: chunks.len(),
            });
        }

        let index = VectorIndex::build(&stored.vectors, stored.dimension)
            .map_err(|e| RagError::IndexLoad(e.to_string()))?;

        info!(
            "Loaded vector index: {} chunks, {} dimensions",
            chunks.len(),
            stored.dimension
        );

        Ok(Self { index, chunks })
    }

    /// Search the index for the k nearest vectors
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<IndexHit>, RagError> {
        self.index
            .search(query, k)
            .map_err(|e| RagError::SearchFailed(e.to_string()))
    }

    /// Look up the chunk at an index position
    ///
    /// # Errors
    ///
    /// `IndexCorrupt` if the position is out of range for the metadata
    /// sequence - a search can only return such a position when the index and
    /// metadata were not built together.
    pub fn chunk_at(&self, position: usize) -> Result<&IndexedChunk, RagError> {
        self.chunks.get(position).ok_or(RagError::IndexCorrupt {
            position,
            len: self.chunks.len(),
        })
    }

    /// Number of indexed chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Embedding dimension of the index
    pub fn dimensions(&self) -> usize {
        self.index.dimensions()
    }
}
