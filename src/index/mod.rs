pub mod hnsw;
pub mod store;

pub use hnsw::{IndexHit, VectorIndex};
pub use store::{ChunkStore, IndexedChunk, StoredVectors};
