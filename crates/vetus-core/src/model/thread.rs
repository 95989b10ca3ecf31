//! Thread metadata as served by `GET /threads/:id`.

use serde::Deserialize;

/// Thread metadata and the ordered ids of its emails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThreadDetail {
    /// Thread identifier echoed by the backend.
    pub thread_id: Option<String>,
    /// Summarized topic.
    #[serde(deserialize_with = "null_as_empty")]
    pub topic: String,
    /// Summary paragraph.
    #[serde(deserialize_with = "null_as_empty")]
    pub detail1: String,
    /// Secondary detail. Retained but no longer displayed.
    #[serde(deserialize_with = "null_as_empty")]
    pub detail2: String,
    /// Email ids in thread order.
    #[serde(deserialize_with = "null_as_empty")]
    pub email_ids: Vec<String>,
    /// Subject line.
    #[serde(deserialize_with = "null_as_empty")]
    pub subject: String,
}

impl ThreadDetail {
    /// Title to show: subject, else topic, else `Thread <id>`.
    #[must_use]
    pub fn title(&self, id: &str) -> String {
        [&self.subject, &self.topic]
            .into_iter()
            .find(|value| !value.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Thread {id}"))
    }

    /// Topic block contents, when there is anything to show.
    #[must_use]
    pub fn topic_block(&self) -> Option<&str> {
        non_blank(&self.topic)
    }

    /// Summary block contents, when there is anything to show.
    #[must_use]
    pub fn summary_block(&self) -> Option<&str> {
        non_blank(&self.detail1)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(value: serde_json::Value) -> ThreadDetail {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn title_prefers_subject() {
        let thread = detail(json!({"subject": "Re: budget", "topic": "Budget review"}));
        assert_eq!(thread.title("T1"), "Re: budget");
    }

    #[test]
    fn title_falls_back_to_topic_then_id() {
        let thread = detail(json!({"subject": "", "topic": "Budget review"}));
        assert_eq!(thread.title("T1"), "Budget review");

        let thread = detail(json!({"subject": null, "email_ids": ["e1"]}));
        assert_eq!(thread.title("T1"), "Thread T1");
    }

    #[test]
    fn empty_blocks_render_nothing() {
        let thread = detail(json!({"topic": "  ", "detail1": "Quarterly numbers"}));
        assert_eq!(thread.topic_block(), None);
        assert_eq!(thread.summary_block(), Some("Quarterly numbers"));
    }

    #[test]
    fn email_order_is_preserved() {
        let thread = detail(json!({"email_ids": ["e3", "e1", "e2"], "detail2": "legacy"}));
        assert_eq!(thread.email_ids, ["e3", "e1", "e2"]);
        assert_eq!(thread.detail2, "legacy");
    }
}
