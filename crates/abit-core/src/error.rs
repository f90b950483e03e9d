//! Error types for the pipeline's external calls.
//!
//! None of these ever reach the end user: the orchestrator folds every
//! variant into a fixed fallback message.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a language model call (classification, embedding, or completion).
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("llm request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("llm api returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed llm response: {0}")]
    MalformedResponse(String),
}

/// Failure during level-scoped knowledge retrieval.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The expected index artifact is missing on disk. The one retrieval
    /// failure that must surface as a user-visible (but friendly) error:
    /// answering from the wrong or absent knowledge base is worse than
    /// refusing.
    #[error("knowledge index not found: {0}")]
    IndexUnavailable(PathBuf),
    #[error("index storage error: {0}")]
    Storage(#[from] sled::Error),
    /// The query-embedding call failed. Same bucket as a generation failure,
    /// not a missing index.
    #[error("query embedding failed: {0}")]
    Embedding(#[source] LlmError),
}
