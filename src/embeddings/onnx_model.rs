//! ONNX embedding model wrapper
//!
//! Runs the all-MiniLM-L6-v2 sentence transformer through ONNX Runtime:
//! - BERT tokenization with padding/truncation
//! - attention-mask-weighted mean pooling over token embeddings
//! - 384-dimensional f32 output
//!
//! Inference is CPU-only. The session is behind a mutex because ort sessions
//! take `&mut self` to run; embedding a short query is cheap enough that the
//! lock is not a bottleneck at this service's request rates.

use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::{Array2, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::Tokenizer;
use tracing::info;

use super::EmbeddingProvider;

/// ONNX-based embedding model (all-MiniLM-L6-v2)
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Load the model and tokenizer from disk
    ///
    /// # Arguments
    /// - `model_name`: Model identity (e.g., "all-MiniLM-L6-v2")
    /// - `model_path`: Path to the ONNX model file
    /// - `tokenizer_path`: Path to the tokenizer JSON file
    ///
    /// # Errors
    ///
    /// Returns error if either file is missing or invalid, or if a
    /// validation inference does not produce 384-dimensional output.
    pub fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let mut session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        // Validate output shape with a throwaway inference before serving
        {
            let encoding = tokenizer
                .encode("validation test", true)
                .map_err(|e| anyhow::anyhow!("Tokenizer validation failed: {}", e))?;
            let (input_ids, attention_mask, token_type_ids) = tensor_inputs(&encoding)?;
            let outputs = session.run(ort::inputs![
                "input_ids" => Value::from_array(input_ids)?,
                "attention_mask" => Value::from_array(attention_mask)?,
                "token_type_ids" => Value::from_array(token_type_ids)?
            ])?;

            let output_tensor = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            let shape = output_tensor.shape();
            if shape.len() != 3 || shape[2] != 384 {
                anyhow::bail!(
                    "Model outputs unexpected dimensions: {:?} (expected [batch, seq_len, 384])",
                    shape
                );
            }
        }

        info!("Embedding model loaded: {}", model_name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension: 384,
        })
    }

    /// Returns the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let (input_ids, attention_mask, token_type_ids) = tensor_inputs(&encoding)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Embedding session lock poisoned"))?;
        let outputs = session.run(ort::inputs![
            "input_ids" => Value::from_array(input_ids)?,
            "attention_mask" => Value::from_array(attention_mask)?,
            "token_type_ids" => Value::from_array(token_type_ids)?
        ])?;

        let output_array = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        // Token-level embeddings [batch, seq_len, hidden]; mean pooling
        // weighted by the attention mask to ignore padding
        let batch_0 = output_array.index_axis(Axis(0), 0);
        let seq_len = batch_0.shape()[0];
        let hidden_dim = batch_0.shape()[1];

        let mut pooled = vec![0.0f32; hidden_dim];
        let mut sum_mask = 0.0f32;
        for i in 0..seq_len {
            let mask_value = mask[i] as f32;
            sum_mask += mask_value;
            for j in 0..hidden_dim {
                pooled[j] += batch_0[[i, j]] * mask_value;
            }
        }
        for val in &mut pooled {
            *val /= sum_mask.max(1e-9);
        }

        if pooled.len() != self.dimension {
            anyhow::bail!(
                "Unexpected embedding dimension: {} (expected {})",
                pooled.len(),
                self.dimension
            );
        }

        Ok(pooled)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn tensor_inputs(
    encoding: &tokenizers::Encoding,
) -> Result<(Array2<i64>, Array2<i64>, Array2<i64>)> {
    let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let attention_mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();
    let token_type_ids: Vec<i64> = vec![0i64; input_ids.len()];

    let len = input_ids.len();
    Ok((
        Array2::from_shape_vec((1, len), input_ids).context("Failed to create input_ids array")?,
        Array2::from_shape_vec((1, len), attention_mask)
            .context("Failed to create attention_mask array")?,
        Array2::from_shape_vec((1, len), token_type_ids)
            .context("Failed to create token_type_ids array")?,
    ))
}
