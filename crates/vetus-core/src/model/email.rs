//! Email detail as served by `GET /emails/:id`.
//!
//! The archive stores emails from several ingestion paths, so the same field
//! can arrive under different names (`from` or `sender`, `date` or
//! `sent_at`, ...). Each display field resolves to the first synonym that
//! carries a non-empty value.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A normalized email ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailDetail {
    /// Subject line.
    pub subject: Option<String>,
    /// Sender.
    pub from: Option<String>,
    /// Recipients, joined with `", "`.
    pub to: Option<String>,
    /// Carbon-copy recipients, joined with `", "`.
    pub cc: Option<String>,
    /// Raw date string as stored.
    pub date: Option<String>,
    /// Plain text body.
    pub body: Option<String>,
    /// Attachment file names, in order.
    pub attachments: Vec<String>,
}

/// Envelope returned by the email endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct EmailEnvelope {
    #[serde(default)]
    pub(crate) data: Option<Map<String, Value>>,
}

impl EmailDetail {
    /// Normalizes the `data` object of an email response.
    #[must_use]
    pub fn from_data(data: &Map<String, Value>) -> Self {
        let attachments = data
            .get("attachments")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Object(fields) => first_text(fields, &["filename", "name"]),
                        Value::String(name) if !name.trim().is_empty() => Some(name.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            subject: first_text(data, &["subject"]),
            from: first_text(data, &["from", "sender"]),
            to: first_text(data, &["to", "receiver"]),
            cc: first_text(data, &["cc", "ccs"]),
            date: first_text(data, &["date", "sent_at"]),
            body: first_text(data, &["text_body", "body", "snippet"]),
            attachments,
        }
    }

    /// Labeled header fields that have a value, in display order.
    #[must_use]
    pub fn header_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Subject", self.subject.as_deref()),
            ("From", self.from.as_deref()),
            ("To", self.to.as_deref()),
            ("Cc", self.cc.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|value| (label, value)))
        .collect()
    }
}

/// Returns the first key whose value renders to non-empty text.
fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .map(value_text)
        .find(|text| !text.trim().is_empty())
}

/// Renders a scalar or list value as display text.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(fields) => first_text(fields, &["email", "address", "name"]).unwrap_or_default(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn email(value: serde_json::Value) -> EmailDetail {
        let Value::Object(data) = value else {
            panic!("test data must be an object");
        };
        EmailDetail::from_data(&data)
    }

    #[test]
    fn synonyms_resolve_in_order() {
        let detail = email(json!({
            "sender": "alice@example.com",
            "receiver": "bob@example.com",
            "sent_at": "2024-01-05T15:04:05Z",
            "body": "hello",
            "snippet": "hel"
        }));
        assert_eq!(detail.from.as_deref(), Some("alice@example.com"));
        assert_eq!(detail.to.as_deref(), Some("bob@example.com"));
        assert_eq!(detail.date.as_deref(), Some("2024-01-05T15:04:05Z"));
        assert_eq!(detail.body.as_deref(), Some("hello"));
    }

    #[test]
    fn empty_primary_falls_through_to_synonym() {
        let detail = email(json!({"from": "", "sender": "carol@example.com", "text_body": "  "}));
        assert_eq!(detail.from.as_deref(), Some("carol@example.com"));
        assert_eq!(detail.body, None);
    }

    #[test]
    fn recipient_lists_are_joined() {
        let detail = email(json!({
            "to": ["a@example.com", "b@example.com"],
            "ccs": ["c@example.com", ""]
        }));
        assert_eq!(detail.to.as_deref(), Some("a@example.com, b@example.com"));
        assert_eq!(detail.cc.as_deref(), Some("c@example.com"));
    }

    #[test]
    fn attachments_use_filename_or_name() {
        let detail = email(json!({
            "attachments": [{"filename": "a.pdf"}, {"name": "b.png"}, {"size": 3}]
        }));
        assert_eq!(detail.attachments, ["a.pdf", "b.png"]);
    }

    #[test]
    fn header_fields_skip_missing_values() {
        let detail = email(json!({"subject": "Budget", "to": "bob@example.com"}));
        assert_eq!(
            detail.header_fields(),
            [("Subject", "Budget"), ("To", "bob@example.com")]
        );
    }

    #[test]
    fn envelope_without_data_is_accepted() {
        let envelope: EmailEnvelope = serde_json::from_value(json!({"email_id": "e1"})).unwrap();
        assert!(envelope.data.is_none());
    }
}
