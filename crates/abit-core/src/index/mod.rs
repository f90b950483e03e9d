//! Knowledge index: immutable embedded-passage collection with top-K search.

mod store;

pub use store::{IndexStore, PassageRecord};

use crate::error::RetrievalError;
use std::path::Path;

/// Immutable, named collection of embedded passages for one level.
///
/// Built once offline, loaded lazily on first use, never mutated at runtime.
pub struct KnowledgeIndex {
    passages: Vec<PassageRecord>,
}

impl KnowledgeIndex {
    /// Loads the index from its on-disk directory.
    ///
    /// A missing directory is [`RetrievalError::IndexUnavailable`]: answering
    /// from an absent knowledge base must fail loudly, not fall back.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RetrievalError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RetrievalError::IndexUnavailable(path.to_path_buf()));
        }
        let store = IndexStore::open_path(path)?;
        let passages = store.load_all()?;
        tracing::info!(
            target: "abit::index",
            path = %path.display(),
            passages = passages.len(),
            "knowledge index loaded"
        );
        Ok(Self { passages })
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// The K passages most similar to the query embedding, in similarity
    /// order. The sort is stable over insertion order, so equal scores keep
    /// index insertion order.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<(&PassageRecord, f32)> {
        let mut scored: Vec<(&PassageRecord, f32)> = self
            .passages
            .iter()
            .map(|p| (p, cosine_similarity(query, &p.embedding)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

/// Cosine similarity; 0.0 for mismatched or zero-norm vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
