//! Search hits returned by lookup and retrieval-augmented answers.

use serde::Deserialize;
use serde_json::Value;

/// A hit that points at an email thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadHit {
    /// Thread identifier.
    pub thread_id: String,
    /// Thread subject (may be empty).
    pub subject: String,
    /// Summarized topic (may be empty).
    pub topic: String,
    /// Longer summary (may be empty).
    pub detail1: String,
    /// Relevance score as a percentage.
    pub score: Option<f64>,
    /// Number of emails in the thread, when the backend reports it.
    pub emails_count: Option<u64>,
}

/// A hit that points at a paragraph inside a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHit {
    /// Path of the document on the backend host.
    pub doc_path: String,
    /// Display name, when the backend provided one.
    pub doc_name: Option<String>,
    /// Page number.
    pub page: Option<i64>,
    /// Paragraph position within the page or document.
    pub paragraph_index: Option<i64>,
    /// Paragraph text.
    pub paragraph: String,
    /// Relevance score as a percentage.
    pub score: Option<f64>,
}

impl DocumentHit {
    /// Name to show for the document: `doc_name`, else the last path segment.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.doc_name.as_deref()
            && !name.trim().is_empty()
        {
            return name.to_string();
        }
        file_name(&self.doc_path).to_string()
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    /// Email thread hit.
    Thread(ThreadHit),
    /// Document paragraph hit.
    Document(DocumentHit),
}

impl Hit {
    /// Classifies a raw hit.
    ///
    /// A non-empty `thread_id` wins over `doc_path`; a hit with neither is
    /// malformed and yields `None` so callers drop it without rendering.
    fn from_raw(raw: RawHit) -> Option<Self> {
        let thread_id = raw.thread_id.filter(|id| !id.is_empty());
        if let Some(thread_id) = thread_id {
            return Some(Self::Thread(ThreadHit {
                thread_id,
                subject: raw.subject.unwrap_or_default(),
                topic: raw.topic.unwrap_or_default(),
                detail1: raw.detail1.unwrap_or_default(),
                score: raw.score,
                emails_count: raw.emails_count,
            }));
        }

        let doc_path = raw.doc_path.filter(|path| !path.is_empty())?;
        Some(Self::Document(DocumentHit {
            doc_path,
            doc_name: raw.doc_name,
            page: raw.page,
            paragraph_index: raw.paragraph_index,
            paragraph: raw.paragraph.unwrap_or_default(),
            score: raw.score,
        }))
    }

    /// Parses a JSON array of hits, dropping anything malformed.
    ///
    /// Anything that is not an array yields an empty list.
    #[must_use]
    pub fn list_from_value(value: Option<&Value>) -> Vec<Self> {
        let Some(items) = value.and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| RawHit::deserialize(item).ok())
            .filter_map(Self::from_raw)
            .collect()
    }
}

/// Hit as it appears on the wire, before classification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawHit {
    /// Thread identifier (thread hits).
    thread_id: Option<String>,
    /// Thread subject.
    subject: Option<String>,
    /// Thread topic.
    topic: Option<String>,
    /// Thread summary.
    detail1: Option<String>,
    /// Relevance score.
    score: Option<f64>,
    /// Email count.
    emails_count: Option<u64>,
    /// Document path (document hits).
    doc_path: Option<String>,
    /// Document display name.
    doc_name: Option<String>,
    /// Page number.
    page: Option<i64>,
    /// Paragraph index.
    paragraph_index: Option<i64>,
    /// Paragraph text.
    paragraph: Option<String>,
}

/// Final segment of a `/` or `\` separated path.
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn thread_id_selects_thread_variant() {
        let hits = Hit::list_from_value(Some(&json!([
            {"thread_id": "T1", "subject": "Re: budget", "score": 87.6, "emails_count": 3}
        ])));
        assert_eq!(hits.len(), 1);
        let Hit::Thread(hit) = &hits[0] else {
            panic!("expected thread hit");
        };
        assert_eq!(hit.thread_id, "T1");
        assert_eq!(hit.subject, "Re: budget");
        assert_eq!(hit.emails_count, Some(3));
    }

    #[test]
    fn doc_path_selects_document_variant() {
        let hits = Hit::list_from_value(Some(&json!([
            {"kind": "doc", "doc_path": "/docs/a.pdf", "page": 2, "paragraph": "lorem"}
        ])));
        let Hit::Document(hit) = &hits[0] else {
            panic!("expected document hit");
        };
        assert_eq!(hit.page, Some(2));
        assert_eq!(hit.display_name(), "a.pdf");
    }

    #[test]
    fn malformed_hits_are_dropped() {
        let hits = Hit::list_from_value(Some(&json!([
            {"subject": "orphan"},
            {"thread_id": "", "doc_path": ""},
            "not an object",
            {"thread_id": "T2"}
        ])));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn non_array_results_are_empty() {
        assert!(Hit::list_from_value(None).is_empty());
        assert!(Hit::list_from_value(Some(&json!({"thread_id": "T1"}))).is_empty());
        assert!(Hit::list_from_value(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn null_fields_are_tolerated() {
        let hits = Hit::list_from_value(Some(&json!([
            {"thread_id": "T1", "score": null, "subject": null}
        ])));
        let Hit::Thread(hit) = &hits[0] else {
            panic!("expected thread hit");
        };
        assert_eq!(hit.score, None);
        assert!(hit.subject.is_empty());
    }

    #[test]
    fn doc_name_wins_over_path() {
        let hit = DocumentHit {
            doc_path: "/docs/a.pdf".into(),
            doc_name: Some("Annual report".into()),
            page: None,
            paragraph_index: None,
            paragraph: String::new(),
            score: None,
        };
        assert_eq!(hit.display_name(), "Annual report");
    }

    #[test]
    fn file_name_handles_separators() {
        assert_eq!(file_name("/docs/a.pdf"), "a.pdf");
        assert_eq!(file_name("C:\\share\\b.docx"), "b.docx");
        assert_eq!(file_name("plain.txt"), "plain.txt");
        assert_eq!(file_name("/docs/dir/"), "dir");
    }
}
