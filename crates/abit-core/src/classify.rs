//! Topic classifier: asks the language model for a binary on-topic verdict.

use crate::llm::LlmClient;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Bounded LRU map from exact question text to on-topic verdict.
///
/// A performance optimization, not a correctness store: entries are never
/// invalidated because topic relevance is treated as a pure function of the
/// text. Owned by the classifier instance so tests can inject and clear it.
pub struct VerdictCache {
    capacity: usize,
    map: HashMap<String, bool>,
    order: VecDeque<String>,
}

impl VerdictCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&mut self, question: &str) -> Option<bool> {
        let verdict = self.map.get(question).copied()?;
        // Refresh recency.
        if let Some(pos) = self.order.iter().position(|q| q == question) {
            let key = self.order.remove(pos).unwrap_or_else(|| question.to_string());
            self.order.push_back(key);
        }
        Some(verdict)
    }

    pub fn put(&mut self, question: String, verdict: bool) {
        if self.map.insert(question.clone(), verdict).is_none() {
            self.order.push_back(question);
            if self.map.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.map.remove(&oldest);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

/// Classifies questions as admission-related or not, with an LRU verdict
/// cache keyed by exact question text.
pub struct TopicClassifier {
    llm: Arc<dyn LlmClient>,
    cache: Mutex<VerdictCache>,
    /// Verdict substituted when the model call fails. `true` keeps transient
    /// errors from blocking legitimate questions (documented policy choice,
    /// flip via config for fail-closed).
    fail_open: bool,
}

impl TopicClassifier {
    pub fn new(llm: Arc<dyn LlmClient>, cache_capacity: usize, fail_open: bool) -> Self {
        Self {
            llm,
            cache: Mutex::new(VerdictCache::new(cache_capacity)),
            fail_open,
        }
    }

    /// True if the question is about university admission. Identical input
    /// text yields a cache hit and must not re-invoke the model.
    pub async fn is_on_topic(&self, question: &str) -> bool {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(verdict) = cache.get(question) {
                return verdict;
            }
        }

        let verdict = match self.llm.complete(&check_prompt(question)).await {
            Ok(reply) => reply.to_uppercase().contains("ДА"),
            Err(e) => {
                tracing::warn!(
                    target: "abit::classify",
                    error = %e,
                    fail_open = self.fail_open,
                    "topic classification call failed, using default verdict"
                );
                self.fail_open
            }
        };

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(question.to_string(), verdict);
        }
        verdict
    }
}

/// Fixed binary-verdict instruction prompt.
fn check_prompt(question: &str) -> String {
    format!(
        "Определи, связан ли вопрос с поступлением в университет.\n\n\
Вопрос: \"{}\"\n\n\
Ответь \"ДА\" если о: поступлении, документах, экзаменах, программах, сроках, олимпиадах, общежитии.\n\
Ответь \"НЕТ\" если о погоде, развлечениях, общих темах.\n\n\
Ответ:",
        question
    )
}
