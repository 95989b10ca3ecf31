//! Message types for application events.
//!
//! In the Elm architecture, Messages are events that trigger state changes.

use vetus_core::{
    AssistantReply, DocumentRecord, EmailDetail, HitCard, Route, ThreadDetail, TurnId,
};

use crate::model::AppSettings;

/// Which pane fills the window below the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Home, results, thread and document pages.
    #[default]
    Browse,
    /// The assistant chat.
    Assistant,
}

/// Application messages (events).
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    /// Push a location for this route and show it.
    Navigate(Route),
    /// Move back in history.
    Back,
    /// Move forward in history.
    Forward,
    /// Open a route in a new window.
    OpenInNewWindow(Route),
    /// A new window was (or was not) launched.
    WindowOpened(Result<(), String>),
    /// Switch panes.
    ShowPane(Pane),

    // Search
    /// Query field edited.
    QueryChanged(String),
    /// Query field submitted.
    SubmitQuery,
    /// Lookup finished for `query`.
    ResultsLoaded {
        /// Query the lookup ran for.
        query: String,
        /// Cards or error text.
        result: Result<Vec<HitCard>, String>,
    },

    // Thread
    /// Thread metadata arrived.
    ThreadLoaded {
        /// Thread id.
        id: String,
        /// Metadata or error text.
        result: Result<ThreadDetail, String>,
    },
    /// One email arrived.
    EmailLoaded {
        /// Thread the email was fetched for.
        thread_id: String,
        /// Position in the thread.
        index: usize,
        /// Email id.
        email_id: String,
        /// Email or error text.
        result: Result<EmailDetail, String>,
    },
    /// Expand or collapse one email.
    ToggleEmail(usize),
    /// Expand every email.
    ExpandAll,
    /// Collapse every email.
    CollapseAll,

    // Document
    /// Staged record read.
    DocumentLoaded {
        /// Staging id.
        id: String,
        /// Record, absence, or error text.
        result: Result<Option<DocumentRecord>, String>,
    },
    /// Ask the backend host to reveal the document.
    OpenLocation,
    /// Reveal request finished.
    LocationOpened(Result<(), String>),

    // Assistant
    /// Chat input edited.
    ChatInputChanged(String),
    /// Chat input submitted.
    ChatSubmit,
    /// Phase one finished for a turn.
    QueryRewritten {
        /// Turn id.
        turn: TurnId,
        /// Resolved query.
        query: String,
    },
    /// Phase two finished for a turn.
    AnswerReceived {
        /// Turn id.
        turn: TurnId,
        /// Reply or error text.
        result: Result<AssistantReply, String>,
    },

    // Index
    /// Index freshness fetched.
    IndexStatusLoaded(Result<String, String>),
    /// Rebuild the backend index.
    RebuildIndex,
    /// Rebuild finished.
    IndexRebuilt(Result<String, String>),

    // Settings
    /// Flip between light and dark.
    ToggleTheme,
    /// Settings loaded.
    SettingsLoaded(Result<AppSettings, String>),
    /// Settings saved.
    SettingsSaved(Result<(), String>),

    // Keyboard Events
    /// Keyboard shortcut pressed.
    KeyPressed(KeyboardAction),
    /// Key event without a binding.
    KeyIgnored,
}

/// Keyboard actions that can be triggered by shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// History back (Alt+Left).
    Back,
    /// History forward (Alt+Right).
    Forward,
    /// Toggle the assistant pane (Ctrl+J).
    ToggleAssistant,
}
