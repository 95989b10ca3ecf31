//! Display cards for search hits.
//!
//! The results list and the assistant's source list render hits the same
//! way, so both go through [`HitCard::build`]. Card text is carried verbatim;
//! it is only ever shown through text widgets and never interpreted as markup.

use tracing::warn;

use crate::display::{pluralize, score_label, truncate_words};
use crate::error::Result;
use crate::model::{DocumentHit, Hit, ThreadHit};
use crate::route::Route;
use crate::staging::{DocumentRecord, StagingStore};

/// Words kept from a thread topic.
pub const THREAD_SNIPPET_WORDS: usize = 60;
/// Words kept from a document paragraph.
pub const DOCUMENT_SNIPPET_WORDS: usize = 80;

/// Which kind of hit a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// Email thread.
    Thread,
    /// Document paragraph.
    Document,
}

/// A hit prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitCard {
    /// Hit kind.
    pub kind: CardKind,
    /// Card title.
    pub title: String,
    /// Score pill text, when the hit carries a score.
    pub score: Option<String>,
    /// Truncated snippet.
    pub snippet: String,
    /// Secondary facts (email count, page, path).
    pub meta: Vec<String>,
    /// Where the card leads. `None` when a document could not be staged.
    pub link: Option<Route>,
}

impl HitCard {
    /// Builds a card, staging document hits so their link can be resolved.
    pub async fn build(hit: &Hit, store: &StagingStore) -> Self {
        match hit {
            Hit::Thread(hit) => Self::thread(hit),
            Hit::Document(hit) => {
                let staged = store.stage(&DocumentRecord::from(hit)).await;
                Self::document(hit, Some(staged))
            }
        }
    }

    /// Builds cards for `hits`, in order.
    ///
    /// Document hits are staged as one batch, so capacity eviction never
    /// removes a record another card of the same list links to.
    pub async fn build_all(hits: &[Hit], store: &StagingStore) -> Vec<Self> {
        let records: Vec<DocumentRecord> = hits
            .iter()
            .filter_map(|hit| match hit {
                Hit::Document(hit) => Some(DocumentRecord::from(hit)),
                Hit::Thread(_) => None,
            })
            .collect();
        let mut staged = store.stage_all(&records).await.into_iter();

        hits.iter()
            .map(|hit| match hit {
                Hit::Thread(hit) => Self::thread(hit),
                Hit::Document(hit) => Self::document(hit, staged.next()),
            })
            .collect()
    }

    fn thread(hit: &ThreadHit) -> Self {
        let title = [&hit.subject, &hit.topic]
            .into_iter()
            .find(|value| !value.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Thread {}", hit.thread_id));

        let meta = hit
            .emails_count
            .and_then(|count| usize::try_from(count).ok())
            .map(|count| pluralize(count, "email"))
            .into_iter()
            .collect();

        Self {
            kind: CardKind::Thread,
            title,
            score: hit.score.map(score_label),
            snippet: truncate_words(&hit.topic, THREAD_SNIPPET_WORDS),
            meta,
            link: Some(Route::thread(hit.thread_id.clone())),
        }
    }

    fn document(hit: &DocumentHit, staged: Option<Result<String>>) -> Self {
        let link = match staged {
            Some(Ok(id)) => Some(Route::document(id)),
            Some(Err(e)) => {
                warn!("Failed to stage {:?}: {}", hit.doc_path, e);
                None
            }
            None => None,
        };

        let mut meta = Vec::new();
        if let Some(page) = hit.page {
            meta.push(format!("Page {page}"));
        }
        if let Some(index) = hit.paragraph_index {
            meta.push(format!("Paragraph {index}"));
        }
        meta.push(hit.doc_path.clone());

        Self {
            kind: CardKind::Document,
            title: hit.display_name(),
            score: hit.score.map(score_label),
            snippet: truncate_words(&hit.paragraph, DOCUMENT_SNIPPET_WORDS),
            meta,
            link,
        }
    }
}
