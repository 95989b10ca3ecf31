//! Document page state.

use vetus_core::DocumentRecord;

/// Staged record progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Reading the staged record.
    #[default]
    Loading,
    /// No such record, or it could not be read.
    Missing,
    /// Record loaded.
    Loaded(DocumentRecord),
}

/// State for the document page.
#[derive(Debug, Clone, Default)]
pub struct DocumentState {
    /// Staging id being shown.
    pub id: String,
    /// Record progress.
    pub status: DocumentStatus,
    /// Outcome of the last "open location" request.
    pub open_status: Option<Result<(), String>>,
}

impl DocumentState {
    /// Resets the page for a new record.
    pub fn start(&mut self, id: impl Into<String>) {
        self.id = id.into();
        self.status = DocumentStatus::Loading;
        self.open_status = None;
    }

    /// Applies a staging read. Outcomes for another record are discarded.
    pub fn apply(&mut self, id: &str, result: Result<Option<DocumentRecord>, String>) -> bool {
        if id != self.id {
            return false;
        }
        self.status = match result {
            Ok(Some(record)) => DocumentStatus::Loaded(record),
            Ok(None) | Err(_) => DocumentStatus::Missing,
        };
        true
    }

    /// Source path of the loaded record.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match &self.status {
            DocumentStatus::Loaded(record) => Some(&record.source),
            _ => None,
        }
    }
}
