//! Results page state.

use vetus_core::HitCard;
use vetus_core::display::summary_line;

/// Progress of the current lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsStatus {
    /// Lookup in flight.
    #[default]
    Searching,
    /// Lookup finished.
    Loaded,
    /// Lookup failed with this message.
    Failed(String),
}

/// State for the results page.
#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    /// Query the page shows results for.
    pub query: String,
    /// Lookup progress.
    pub status: ResultsStatus,
    /// Cards, in rank order.
    pub cards: Vec<HitCard>,
}

impl ResultsState {
    /// Resets the page for a new lookup.
    pub fn start(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.status = ResultsStatus::Searching;
        self.cards.clear();
    }

    /// Applies a lookup outcome. Outcomes for another query are discarded.
    pub fn apply(&mut self, query: &str, result: Result<Vec<HitCard>, String>) -> bool {
        if query != self.query {
            return false;
        }
        match result {
            Ok(cards) => {
                self.cards = cards;
                self.status = ResultsStatus::Loaded;
            }
            Err(e) => self.status = ResultsStatus::Failed(e),
        }
        true
    }

    /// Summary line above the list.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.status {
            ResultsStatus::Searching => "Searching\u{2026}".to_string(),
            ResultsStatus::Loaded => summary_line(self.cards.len()),
            ResultsStatus::Failed(e) => format!("Error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetus_core::{CardKind, Route};

    fn card(title: &str) -> HitCard {
        HitCard {
            kind: CardKind::Thread,
            title: title.to_string(),
            score: None,
            snippet: String::new(),
            meta: Vec::new(),
            link: Some(Route::thread(title)),
        }
    }

    #[test]
    fn start_shows_searching_with_empty_list() {
        let mut state = ResultsState::default();
        state.apply("", Ok(vec![card("old")]));
        state.start("budget");
        assert_eq!(state.summary(), "Searching\u{2026}");
        assert!(state.cards.is_empty());
    }

    #[test]
    fn summary_counts_results() {
        let mut state = ResultsState::default();
        state.start("budget");
        assert!(state.apply("budget", Ok(Vec::new())));
        assert_eq!(state.summary(), "No matching results found.");

        state.start("budget");
        state.apply("budget", Ok(vec![card("a")]));
        assert_eq!(state.summary(), "1 matching result");

        state.start("budget");
        state.apply("budget", Ok(vec![card("a"), card("b")]));
        assert_eq!(state.summary(), "2 matching results");
    }

    #[test]
    fn failure_keeps_list_empty() {
        let mut state = ResultsState::default();
        state.start("budget");
        state.apply("budget", Err("Request failed: 500".to_string()));
        assert_eq!(state.summary(), "Error: Request failed: 500");
        assert!(state.cards.is_empty());
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut state = ResultsState::default();
        state.start("first");
        state.start("second");
        assert!(!state.apply("first", Ok(vec![card("a")])));
        assert_eq!(state.status, ResultsStatus::Searching);
    }
}
