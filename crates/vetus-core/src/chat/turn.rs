//! Per-question state.

use super::AssistantReply;

/// Identifies a turn within a transcript.
pub type TurnId = u64;

/// Where a turn is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for the query rewrite.
    AwaitingRewrite,
    /// Waiting for the answer to the resolved query.
    AwaitingAnswer,
    /// Answer shown.
    Rendered(AssistantReply),
    /// The answer call failed.
    Errored(String),
}

/// One user question and the assistant bubble answering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Turn identifier.
    pub id: TurnId,
    /// The question as typed.
    pub question: String,
    /// Query used for retrieval, once resolved.
    pub query: Option<String>,
    /// Current state.
    pub state: TurnState,
}

impl ChatTurn {
    /// Starts a turn waiting on its rewrite.
    #[must_use]
    pub fn new(id: TurnId, question: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            query: None,
            state: TurnState::AwaitingRewrite,
        }
    }

    /// Whether the bubble still shows the thinking indicator.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(
            self.state,
            TurnState::AwaitingRewrite | TurnState::AwaitingAnswer
        )
    }

    /// Records the resolved query. Only valid while awaiting the rewrite.
    pub fn query_resolved(&mut self, query: impl Into<String>) -> bool {
        if self.state != TurnState::AwaitingRewrite {
            return false;
        }
        self.query = Some(query.into());
        self.state = TurnState::AwaitingAnswer;
        true
    }

    /// Records the answer. Only valid while awaiting it.
    pub fn answered(&mut self, reply: AssistantReply) -> bool {
        if self.state != TurnState::AwaitingAnswer {
            return false;
        }
        self.state = TurnState::Rendered(reply);
        true
    }

    /// Records a failure from either awaiting state.
    pub fn failed(&mut self, error: impl std::fmt::Display) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.state = TurnState::Errored(format!("Sorry, something went wrong: {error}"));
        true
    }
}
