//! Query embedding
//!
//! The pipeline embeds questions with the same pinned model used when the
//! index was built (all-MiniLM-L6-v2, 384 dimensions). The model identity is
//! not stored alongside the index, so a mismatch silently produces
//! meaningless distances - a documented risk, not something the service can
//! self-verify.

pub mod onnx_model;

pub use onnx_model::OnnxEmbeddingModel;

use anyhow::Result;
use async_trait::async_trait;

/// Converts text into a fixed-dimension vector
///
/// Implementations must be deterministic: the same text always yields the
/// same vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Output dimension of this provider
    fn dimension(&self) -> usize;
}
