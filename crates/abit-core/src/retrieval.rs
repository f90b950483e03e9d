//! Level-scoped knowledge retrieval with a process-wide index cache.

use crate::error::RetrievalError;
use crate::index::KnowledgeIndex;
use crate::level::Level;
use crate::llm::LlmClient;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// One retrieved passage with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredPassage {
    pub text: String,
    pub source: String,
    pub score: f32,
}

/// Maps a level to its lazily-loaded, cached knowledge index and runs
/// nearest-neighbor search for a question.
pub struct Retriever {
    index_root: PathBuf,
    k: usize,
    llm: Arc<dyn LlmClient>,
    /// Per-level cache, populated on first use, never evicted. Two concurrent
    /// first-time loads of the same level may both load; the later insert
    /// replaces the entry with an equivalent index (wasted work, not
    /// corruption).
    indices: DashMap<Level, Arc<KnowledgeIndex>>,
}

impl Retriever {
    pub fn new(index_root: impl Into<PathBuf>, k: usize, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            index_root: index_root.into(),
            k,
            llm,
            indices: DashMap::new(),
        }
    }

    /// The K passages closest to the question in the level's index.
    pub async fn retrieve(
        &self,
        question: &str,
        level: Level,
    ) -> Result<Vec<ScoredPassage>, RetrievalError> {
        let index = self.index_for(level)?;
        let query = self
            .llm
            .embed(question)
            .await
            .map_err(RetrievalError::Embedding)?;
        let hits = index
            .top_k(&query, self.k)
            .into_iter()
            .map(|(p, score)| ScoredPassage {
                text: p.text.clone(),
                source: p.source.clone(),
                score,
            })
            .collect::<Vec<_>>();
        tracing::debug!(
            target: "abit::retrieval",
            level = level.as_str(),
            hits = hits.len(),
            "retrieval complete"
        );
        Ok(hits)
    }

    fn index_for(&self, level: Level) -> Result<Arc<KnowledgeIndex>, RetrievalError> {
        if let Some(cached) = self.indices.get(&level) {
            return Ok(Arc::clone(&cached));
        }
        let path = self.index_root.join(level.index_dir_name());
        let index = Arc::new(KnowledgeIndex::load(&path)?);
        self.indices.insert(level, Arc::clone(&index));
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::index::{IndexStore, PassageRecord};
    use std::path::Path;

    /// Embeds everything onto a fixed axis so retrieval is deterministic.
    struct AxisLlm {
        axis: Vec<f32>,
    }

    #[async_trait::async_trait]
    impl LlmClient for AxisLlm {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok("ДА".to_string())
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
            Ok(self.axis.clone())
        }
    }

    fn write_index(path: &Path, passages: &[(&str, Vec<f32>)]) {
        let store = IndexStore::open_path(path).unwrap();
        for (text, embedding) in passages {
            store
                .append(&PassageRecord::new(*text, "fixture", embedding.clone()))
                .unwrap();
        }
        store.flush().unwrap();
    }

    #[tokio::test]
    async fn missing_level_index_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let llm = Arc::new(AxisLlm { axis: vec![1.0, 0.0] });
        let retriever = Retriever::new(root.path(), 3, llm);
        let err = retriever.retrieve("вопрос", Level::Master).await.unwrap_err();
        assert!(matches!(err, RetrievalError::IndexUnavailable(_)));
    }

    #[tokio::test]
    async fn retrieval_is_level_scoped() {
        let root = tempfile::tempdir().unwrap();
        write_index(
            &root.path().join(Level::Bachelor.index_dir_name()),
            &[("бакалавриат: приём с 20 июня", vec![1.0, 0.0])],
        );
        write_index(
            &root.path().join(Level::Master.index_dir_name()),
            &[("магистратура: приём с 1 июля", vec![1.0, 0.0])],
        );
        let llm = Arc::new(AxisLlm { axis: vec![1.0, 0.0] });
        let retriever = Retriever::new(root.path(), 3, llm);

        let bachelor = retriever.retrieve("сроки", Level::Bachelor).await.unwrap();
        let master = retriever.retrieve("сроки", Level::Master).await.unwrap();
        assert_eq!(bachelor[0].text, "бакалавриат: приём с 20 июня");
        assert_eq!(master[0].text, "магистратура: приём с 1 июля");
    }

    #[tokio::test]
    async fn index_is_cached_after_first_load() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(Level::Default.index_dir_name());
        write_index(&dir, &[("общий ответ", vec![1.0])]);
        let llm = Arc::new(AxisLlm { axis: vec![1.0] });
        let retriever = Retriever::new(root.path(), 1, llm);

        assert_eq!(retriever.retrieve("q", Level::Default).await.unwrap().len(), 1);
        // Removing the artifact does not affect the cached index.
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(retriever.retrieve("q", Level::Default).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn returns_at_most_k_passages() {
        let root = tempfile::tempdir().unwrap();
        write_index(
            &root.path().join(Level::Default.index_dir_name()),
            &[
                ("a", vec![1.0, 0.0]),
                ("b", vec![0.9, 0.1]),
                ("c", vec![0.0, 1.0]),
            ],
        );
        let llm = Arc::new(AxisLlm { axis: vec![1.0, 0.0] });
        let retriever = Retriever::new(root.path(), 2, llm);
        let hits = retriever.retrieve("q", Level::Default).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "a");
    }
}
