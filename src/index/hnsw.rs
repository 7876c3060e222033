//! HNSW index over the pre-built embedding set
//!
//! Hierarchical Navigable Small World graph for nearest-neighbor search.
//! Built once at load time from the serialized vector file and never mutated
//! afterwards, so concurrent searches need no synchronization.
//!
//! Distances are L2 (Euclidean): lower distance = more relevant. The insertion
//! id of each vector is its position in the vector file, which is also its
//! position in the metadata sequence - retrieval depends on that alignment.

use anyhow::{anyhow, Result};
use hnsw_rs::hnsw::{Hnsw, Neighbour};
use hnsw_rs::prelude::*;

/// A search hit: vector position and L2 distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexHit {
    /// Position of the vector at build time (= metadata position)
    pub position: usize,
    /// L2 distance to the query (lower = closer)
    pub distance: f32,
}

/// Read-only nearest-neighbor index over fixed-dimension embeddings
pub struct VectorIndex {
    hnsw: Hnsw<'static, f32, DistL2>,
    dimensions: usize,
    count: usize,
}

impl VectorIndex {
    /// Build the index from vectors in positional order
    ///
    /// # Errors
    ///
    /// Returns error if any vector has the wrong dimensions or contains
    /// NaN/Infinity values.
    pub fn build(vectors: &[Vec<f32>], dimensions: usize) -> Result<Self> {
        for (i, vector) in vectors.iter().enumerate() {
            if vector.len() != dimensions {
                return Err(anyhow!(
                    "Vector {} has wrong dimensions: expected {}, got {}",
                    i,
                    dimensions,
                    vector.len()
                ));
            }
            if vector.iter().any(|&v| !v.is_finite()) {
                return Err(anyhow!("Vector {} contains NaN or Infinity values", i));
            }
        }

        if vectors.is_empty() {
            return Ok(Self {
                hnsw: Hnsw::new(16, 0, 16, 200, DistL2),
                dimensions,
                count: 0,
            });
        }

        // HNSW parameters sized for small-to-medium document sets
        let max_nb_connection = 12;
        let ef_construction = 48;
        let nb_layer = if vectors.len() > 1 {
            ((vectors.len() as f32).log2().ceil() as usize).clamp(4, 16)
        } else {
            4
        };

        let mut hnsw: Hnsw<f32, DistL2> = Hnsw::new(
            max_nb_connection,
            nb_layer,
            ef_construction,
            vectors.len(),
            DistL2,
        );

        for (position, vector) in vectors.iter().enumerate() {
            hnsw.insert((vector, position));
        }

        hnsw.set_searching_mode(true);

        Ok(Self {
            hnsw,
            dimensions,
            count: vectors.len(),
        })
    }

    /// Search for the k nearest vectors
    ///
    /// Results are sorted ascending by distance and never exceed `k` entries.
    ///
    /// # Errors
    ///
    /// Returns error if the query has the wrong dimensions or contains
    /// NaN/Infinity values.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<IndexHit>> {
        if query.len() != self.dimensions {
            return Err(anyhow!(
                "Query has wrong dimensions: expected {}, got {}",
                self.dimensions,
                query.len()
            ));
        }
        if query.iter().any(|&v| !v.is_finite()) {
            return Err(anyhow!("Query contains NaN or Infinity values"));
        }

        if self.count == 0 {
            return Ok(vec![]);
        }

        let ef_search = (k * 2).max(50);
        let query_vec = query.to_vec();
        let neighbours: Vec<Neighbour> = self.hnsw.search(&query_vec, k, ef_search);

        let mut hits: Vec<IndexHit> = neighbours
            .into_iter()
            .map(|n| IndexHit {
                position: n.d_id,
                distance: n.distance,
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Number of indexed vectors
    pub fn vector_count(&self) -> usize {
        self.count
    }

    /// Vector dimensions
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}
