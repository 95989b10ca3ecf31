//! Assistant pane state.

use vetus_core::{ChatTurn, TurnId};

/// Transcript and input of the assistant pane. Cleared when the window closes.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    /// Current input text.
    pub input: String,
    /// Turns, oldest first.
    pub turns: Vec<ChatTurn>,
    next_id: TurnId,
}

impl ChatState {
    /// Starts a turn for the current input and clears it.
    ///
    /// Returns the new turn's id and question, or `None` for blank input.
    pub fn submit(&mut self) -> Option<(TurnId, String)> {
        let question = self.input.trim().to_string();
        if question.is_empty() {
            return None;
        }
        self.input.clear();

        let id = self.next_id;
        self.next_id += 1;
        self.turns.push(ChatTurn::new(id, question.clone()));
        Some((id, question))
    }

    /// Looks up a turn by id.
    pub fn turn_mut(&mut self, id: TurnId) -> Option<&mut ChatTurn> {
        self.turns.iter_mut().find(|turn| turn.id == id)
    }
}
