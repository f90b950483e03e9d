//! Application configuration. Load from TOML or env.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global application configuration (gateway + pipeline). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity for logs.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Base directory holding the per-level knowledge index directories.
    pub index_root: String,
    pub llm: LlmConfig,
    pub pipeline: PipelineConfig,
}

/// Language model API settings (OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "mock" or "live".
    pub mode: String,
    pub api_base: String,
    /// API key; normally injected via `ABIT_LLM__API_KEY`.
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub embedding_model: String,
    pub temperature: f32,
}

/// Tunables for the answer pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Passages returned per retrieval.
    pub retriever_k: usize,
    /// Maximum question length in characters (checked on the raw input).
    pub max_question_len: usize,
    /// Minimum question length in characters (checked after trimming).
    pub min_question_len: usize,
    /// Generated answers shorter than this are treated as "no information".
    pub min_answer_len: usize,
    /// Verdict when the topic-classification call fails. `true` = fail-open:
    /// transient errors never block a legitimate question, at the cost of
    /// occasionally letting an off-topic one through to retrieval.
    pub classifier_fail_open: bool,
    /// Capacity of the topic-verdict LRU cache.
    pub topic_cache_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retriever_k: 7,
            max_question_len: 500,
            min_question_len: 3,
            min_answer_len: 10,
            classifier_fail_open: true,
            topic_cache_capacity: 128,
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `ABIT_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("ABIT_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Admission Assistant")?
            .set_default("port", 8001_i64)?
            .set_default("index_root", "./data")?
            .set_default("llm.mode", "mock")?
            .set_default("llm.api_base", "https://api.openai.com/v1")?
            .set_default("llm.api_key", "")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.embedding_model", "text-embedding-ada-002")?
            .set_default("llm.temperature", 0.0_f64)?
            .set_default("pipeline.retriever_k", 7_i64)?
            .set_default("pipeline.max_question_len", 500_i64)?
            .set_default("pipeline.min_question_len", 3_i64)?
            .set_default("pipeline.min_answer_len", 10_i64)?
            .set_default("pipeline.classifier_fail_open", true)?
            .set_default("pipeline.topic_cache_capacity", 128_i64)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("ABIT").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment_values() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.retriever_k, 7);
        assert_eq!(cfg.max_question_len, 500);
        assert_eq!(cfg.min_question_len, 3);
        assert_eq!(cfg.min_answer_len, 10);
        assert!(cfg.classifier_fail_open);
        assert_eq!(cfg.topic_cache_capacity, 128);
    }
}
