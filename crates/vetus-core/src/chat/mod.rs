//! Assistant question flow.
//!
//! Each question takes two backend calls in sequence: the question is first
//! rewritten into a search query by a plain model call, then answered with
//! retrieval over that query. A failed or empty rewrite is not an error; the
//! question itself is used as the query.

mod turn;

pub use turn::{ChatTurn, TurnId, TurnState};

use tracing::{info, warn};

use crate::api::{ApiClient, AskRequest, RagAskRequest};
use crate::card::HitCard;
use crate::config::ContextMode;
use crate::display::paragraphs;
use crate::error::Result;
use crate::staging::StagingStore;

const REWRITE_TEMPLATE: &str = "Rewrite the question below as a short search query for an \
archive of emails and documents. Keep names, dates and key terms. Reply with the query only, \
without any explanation.\n\nQuestion: ";

/// Wraps a question in the rewrite instructions.
#[must_use]
pub fn rewrite_prompt(input: &str) -> String {
    format!("{REWRITE_TEMPLATE}{input}")
}

/// Removes one layer of matching `"`, `'` or `` ` `` quotes.
#[must_use]
pub fn strip_quotes(text: &str) -> &str {
    let text = text.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Rewrites a question into a search query, falling back to the question.
pub async fn rewrite_query(client: &ApiClient, input: &str, model: &str) -> String {
    let request = AskRequest {
        user_input: rewrite_prompt(input),
        model_name: model.to_string(),
        use_chat: false,
    };

    match client.ask(&request).await {
        Ok(answer) => {
            let query = strip_quotes(&answer);
            if query.is_empty() {
                warn!("Query rewrite was empty, using the question as query");
                input.to_string()
            } else {
                info!("Rewrote question into query {:?}", query);
                query.to_string()
            }
        }
        Err(e) => {
            warn!("Query rewrite failed, using the question as query: {}", e);
            input.to_string()
        }
    }
}

/// A rendered assistant answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    /// Answer paragraphs, each a list of lines.
    pub paragraphs: Vec<Vec<String>>,
    /// Query the backend retrieved with.
    pub used_query: String,
    /// Source cards.
    pub sources: Vec<HitCard>,
}

/// Answers `input` with retrieval over `query`.
///
/// # Errors
///
/// Returns an error if the answer call fails.
pub async fn answer(
    client: &ApiClient,
    store: &StagingStore,
    input: &str,
    query: &str,
    context_mode: ContextMode,
) -> Result<AssistantReply> {
    let request = RagAskRequest {
        user_input: input.to_string(),
        query: query.to_string(),
        context_mode,
    };
    let response = client.ask_with_rag(&request).await?;
    let sources = HitCard::build_all(&response.sources, store).await;

    Ok(AssistantReply {
        paragraphs: paragraphs(&response.answer),
        used_query: response.used_query,
        sources,
    })
}
