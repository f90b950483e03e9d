//! Language model client seam: single-prompt completion and text embedding.

mod openai;

pub use openai::OpenAiClient;

use crate::config::LlmConfig;
use crate::error::LlmError;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Mode for LLM invocation: mock (deterministic local generation) or live
/// (OpenAI-compatible API).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LlmMode {
    #[default]
    Mock,
    Live,
}

impl LlmMode {
    pub fn from_config(cfg: &LlmConfig) -> Self {
        match cfg.mode.as_str() {
            "live" => LlmMode::Live,
            _ => LlmMode::Mock,
        }
    }
}

/// Single-prompt request/response client. No multi-turn state, no streaming.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// One text completion for one prompt.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Embedding vector for a text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}

/// Builds a client according to `llm.mode`.
pub fn client_from_config(cfg: &LlmConfig) -> Arc<dyn LlmClient> {
    match LlmMode::from_config(cfg) {
        LlmMode::Mock => Arc::new(MockLlm::default()),
        LlmMode::Live => Arc::new(OpenAiClient::new(cfg)),
    }
}

/// Deterministic local stand-in so the stack runs without API keys.
///
/// Completions answer the topic-check prompt affirmatively and echo a preview
/// of any other prompt; embeddings hash tokens into a fixed-size normalized
/// vector. Not semantic, but stable across calls.
pub struct MockLlm {
    dimensions: usize,
}

impl Default for MockLlm {
    fn default() -> Self {
        Self { dimensions: 256 }
    }
}

impl MockLlm {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.clamp(8, 4096),
        }
    }

    fn hash_embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let tokens = text
            .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .filter(|t| !t.is_empty());
        for token in tokens {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            let idx = (hasher.finish() as usize) % self.dimensions;
            vector[idx] += 1.0;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if prompt.starts_with("Определи, связан ли вопрос") {
            return Ok("ДА".to_string());
        }
        let preview: String = prompt
            .chars()
            .take(80)
            .chain(if prompt.chars().count() > 80 { "…" } else { "" }.chars())
            .collect();
        Ok(format!(
            "[Сгенерировано mock-моделью]\n\nОтвет на основе предоставленного контекста ({}): информация по вашему вопросу приведена в приёмных материалах.",
            preview.trim()
        ))
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        Ok(self.hash_embed(text))
    }
}
