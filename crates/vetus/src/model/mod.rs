//! Data models for the archive browser.

mod chat;
mod document;
mod results;
mod settings;
mod thread;

pub use chat::ChatState;
pub use document::{DocumentState, DocumentStatus};
pub use results::{ResultsState, ResultsStatus};
pub use settings::AppSettings;
pub use thread::{EmailItem, EmailLoad, ThreadState, ThreadStatus};
