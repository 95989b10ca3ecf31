//! Per-window navigation history.

/// Ordered list of visited locations with a cursor.
///
/// Pushing discards any forward entries, like a browser tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    /// Creates a history holding a single location.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    /// Current location.
    #[must_use]
    pub fn current(&self) -> &str {
        self.entries
            .get(self.cursor)
            .map_or("", String::as_str)
    }

    /// Pushes a new location and makes it current.
    pub fn push(&mut self, location: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location.into());
        self.cursor = self.entries.len() - 1;
    }

    /// Moves one entry back. Returns the new current location.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Moves one entry forward. Returns the new current location.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Whether [`History::back`] would move.
    #[must_use]
    pub const fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`History::forward`] would move.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_and_forward_move_the_cursor() {
        let mut history = History::new("");
        history.push("?mode=results&q=budget");
        history.push("?mode=thread&id=T1");

        assert_eq!(history.back(), Some("?mode=results&q=budget"));
        assert_eq!(history.back(), Some(""));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("?mode=results&q=budget"));
        assert!(history.can_go_forward());
    }

    #[test]
    fn push_discards_forward_entries() {
        let mut history = History::new("");
        history.push("?mode=results&q=a");
        history.push("?mode=results&q=b");
        history.back();

        history.push("?mode=thread&id=T9");
        assert!(!history.can_go_forward());
        assert_eq!(history.current(), "?mode=thread&id=T9");
        assert_eq!(history.back(), Some("?mode=results&q=a"));
    }
}
