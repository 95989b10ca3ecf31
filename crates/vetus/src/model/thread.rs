//! Thread page state.
//!
//! Every email loads on its own; a slow or failing email only affects its own
//! item.

use vetus_core::display::format_date;
use vetus_core::{EmailDetail, ThreadDetail};

/// Thread metadata progress.
#[derive(Debug, Clone, Default)]
pub enum ThreadStatus {
    /// Metadata in flight.
    #[default]
    Loading,
    /// The thread could not be loaded.
    NotFound,
    /// Metadata loaded.
    Loaded(ThreadDetail),
}

/// Load progress of one email.
#[derive(Debug, Clone, Default)]
pub enum EmailLoad {
    /// Detail in flight.
    #[default]
    Loading,
    /// Detail loaded.
    Loaded(EmailDetail),
    /// Detail could not be loaded.
    Failed,
}

/// One email in the thread list.
#[derive(Debug, Clone)]
pub struct EmailItem {
    /// Email identifier.
    pub id: String,
    /// Whether the item is expanded.
    pub open: bool,
    /// Load progress.
    pub load: EmailLoad,
}

impl EmailItem {
    /// Date text for the item header. A failed load keeps the placeholder.
    #[must_use]
    pub fn date_label(&self) -> String {
        match &self.load {
            EmailLoad::Loaded(email) => format_date(email.date.as_deref()),
            EmailLoad::Loading | EmailLoad::Failed => "Loading date\u{2026}".to_string(),
        }
    }
}

/// State for the thread page.
#[derive(Debug, Clone, Default)]
pub struct ThreadState {
    /// Thread being shown.
    pub id: String,
    /// Metadata progress.
    pub status: ThreadStatus,
    /// Emails in thread order.
    pub emails: Vec<EmailItem>,
}

impl ThreadState {
    /// Resets the page for a new thread.
    pub fn start(&mut self, id: impl Into<String>) {
        self.id = id.into();
        self.status = ThreadStatus::Loading;
        self.emails.clear();
    }

    /// Applies thread metadata. Returns the email ids to fetch, or `None`
    /// when the outcome belongs to a thread no longer shown.
    pub fn apply_thread(
        &mut self,
        id: &str,
        result: Result<ThreadDetail, String>,
    ) -> Option<Vec<String>> {
        if id != self.id || !matches!(self.status, ThreadStatus::Loading) {
            return None;
        }
        match result {
            Ok(detail) => {
                self.emails = detail
                    .email_ids
                    .iter()
                    .map(|email_id| EmailItem {
                        id: email_id.clone(),
                        open: false,
                        load: EmailLoad::Loading,
                    })
                    .collect();
                let ids = detail.email_ids.clone();
                self.status = ThreadStatus::Loaded(detail);
                Some(ids)
            }
            Err(_) => {
                self.status = ThreadStatus::NotFound;
                Some(Vec::new())
            }
        }
    }

    /// Applies one email outcome. Outcomes for another thread are discarded.
    pub fn apply_email(
        &mut self,
        thread_id: &str,
        index: usize,
        email_id: &str,
        result: Result<EmailDetail, String>,
    ) -> bool {
        if thread_id != self.id {
            return false;
        }
        let Some(item) = self.emails.get_mut(index).filter(|item| item.id == email_id) else {
            return false;
        };
        item.load = match result {
            Ok(email) => EmailLoad::Loaded(email),
            Err(_) => EmailLoad::Failed,
        };
        true
    }

    /// Opens or closes every item at once, loaded or not.
    pub fn set_all_open(&mut self, open: bool) {
        for item in &mut self.emails {
            item.open = open;
        }
    }

    /// Flips one item.
    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.emails.get_mut(index) {
            item.open = !item.open;
        }
    }

    /// Page title.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.status {
            ThreadStatus::Loading => "Loading\u{2026}".to_string(),
            ThreadStatus::NotFound => "Thread not found".to_string(),
            ThreadStatus::Loaded(detail) => detail.title(&self.id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn detail(ids: &[&str]) -> ThreadDetail {
        ThreadDetail {
            subject: "Re: budget".to_string(),
            email_ids: ids.iter().map(ToString::to_string).collect(),
            ..ThreadDetail::default()
        }
    }

    #[test]
    fn failure_shows_not_found() {
        let mut state = ThreadState::default();
        state.start("T1");
        assert_eq!(state.title(), "Loading\u{2026}");
        let ids = state.apply_thread("T1", Err("Thread not found".to_string()));
        assert_eq!(ids, Some(Vec::new()));
        assert_eq!(state.title(), "Thread not found");
    }

    #[test]
    fn emails_start_collapsed_and_loading() {
        let mut state = ThreadState::default();
        state.start("T1");
        let ids = state.apply_thread("T1", Ok(detail(&["e1", "e2"]))).unwrap();
        assert_eq!(ids, ["e1", "e2"]);
        assert_eq!(state.title(), "Re: budget");
        assert!(state.emails.iter().all(|item| !item.open));
        assert_eq!(state.emails[0].date_label(), "Loading date\u{2026}");
    }

    #[test]
    fn one_failed_email_leaves_others_alone() {
        let mut state = ThreadState::default();
        state.start("T1");
        state.apply_thread("T1", Ok(detail(&["e1", "e2"])));

        assert!(state.apply_email("T1", 1, "e2", Err("boom".to_string())));
        assert!(matches!(state.emails[0].load, EmailLoad::Loading));
        assert!(matches!(state.emails[1].load, EmailLoad::Failed));
        assert_eq!(state.emails[1].id, "e2");
        assert_eq!(state.emails[1].date_label(), "Loading date\u{2026}");
    }

    #[test]
    fn late_outcomes_for_other_threads_are_dropped() {
        let mut state = ThreadState::default();
        state.start("T1");
        state.start("T2");
        assert_eq!(state.apply_thread("T1", Ok(detail(&["e1"]))), None);
        assert!(!state.apply_email("T1", 0, "e1", Ok(EmailDetail::default())));
    }

    #[test]
    fn expand_and_collapse_all() {
        let mut state = ThreadState::default();
        state.start("T1");
        state.apply_thread("T1", Ok(detail(&["e1", "e2", "e3"])));
        state.apply_email("T1", 0, "e1", Ok(EmailDetail::default()));

        state.set_all_open(true);
        assert!(state.emails.iter().all(|item| item.open));
        state.toggle(1);
        assert!(!state.emails[1].open);
        state.set_all_open(false);
        assert!(state.emails.iter().all(|item| !item.open));
    }

    #[test]
    fn loaded_email_without_date_reads_no_date() {
        let item = EmailItem {
            id: "e1".to_string(),
            open: false,
            load: EmailLoad::Loaded(EmailDetail::default()),
        };
        assert_eq!(item.date_label(), "No date");
    }
}
