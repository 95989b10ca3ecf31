//! Request and response bodies for the archive backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ContextMode;
use crate::model::Hit;

/// Body of `POST /lookup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupRequest {
    /// Free-text query.
    pub query: String,
    /// Maximum number of hits; backend default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Minimum score percentage; backend default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
}

impl LookupRequest {
    /// Creates a lookup for `query` with backend-default limits.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: None,
            min_score: None,
        }
    }

    /// Sets optional result limits.
    #[must_use]
    pub fn with_limits(mut self, top_k: Option<u32>, min_score: Option<f64>) -> Self {
        self.top_k = top_k;
        self.min_score = min_score;
        self
    }
}

/// Body of `POST /ask`, a plain pass-through to the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    /// Prompt text.
    pub user_input: String,
    /// Model identifier understood by the backend.
    pub model_name: String,
    /// Chat endpoint when true, single-shot generation when false.
    pub use_chat: bool,
}

/// Body of `POST /ask-with-rag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RagAskRequest {
    /// The question as the user typed it.
    pub user_input: String,
    /// Query used for retrieval.
    pub query: String,
    /// How much email content the backend feeds the model.
    pub context_mode: ContextMode,
}

/// Answer from `POST /ask-with-rag`.
#[derive(Debug, Clone, PartialEq)]
pub struct RagAnswer {
    /// Generated answer text.
    pub answer: String,
    /// Query the backend actually retrieved with.
    pub used_query: String,
    /// Retrieved hits, malformed entries removed.
    pub sources: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AskResponse {
    #[serde(default)]
    pub(crate) answer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RagAskResponse {
    #[serde(default)]
    pub(crate) answer: Option<String>,
    #[serde(default)]
    pub(crate) used_query: Option<String>,
    #[serde(default)]
    pub(crate) sources: Option<Value>,
}

impl RagAskResponse {
    pub(crate) fn into_answer(self, query: &str) -> RagAnswer {
        RagAnswer {
            answer: self.answer.unwrap_or_default(),
            used_query: self.used_query.unwrap_or_else(|| query.to_string()),
            sources: Hit::list_from_value(self.sources.as_ref()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndexStatusResponse {
    #[serde(default)]
    pub(crate) last_updated: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RebuildResponse {
    #[serde(default)]
    pub(crate) message: Option<String>,
}
