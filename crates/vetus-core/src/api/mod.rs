//! HTTP client for the archive backend.
//!
//! Every call goes through one wrapper that turns a non-success status into
//! [`Error::Server`] carrying the response body (or `Request failed: <status>`
//! when the body is empty). There are no retries and no timeouts; a call
//! that never answers keeps its caller waiting.

mod types;

pub use types::{AskRequest, LookupRequest, RagAnswer, RagAskRequest};

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::model::{EmailDetail, EmailEnvelope, Hit, ThreadDetail};
use types::{AskResponse, IndexStatusResponse, RagAskResponse, RebuildResponse};

/// Client for the archive backend's JSON endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http_client: Client,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL that can carry a path.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("{base_url} cannot be used as a base URL")));
        }
        Ok(Self {
            base_url,
            http_client: Client::new(),
        })
    }

    /// Backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Searches threads and documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<Vec<Hit>> {
        let url = self.endpoint(&["lookup"])?;
        debug!("POST {} query={:?}", url, request.query);
        let body: Value = Self::send(self.http_client.post(url).json(request)).await?;
        Ok(Hit::list_from_value(body.get("results")))
    }

    /// Fetches thread metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the thread does not exist.
    pub async fn thread(&self, thread_id: &str) -> Result<ThreadDetail> {
        let url = self.endpoint(&["threads", thread_id])?;
        debug!("GET {}", url);
        Self::send(self.http_client.get(url)).await
    }

    /// Fetches one email and normalizes its fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the email does not exist.
    pub async fn email(&self, email_id: &str) -> Result<EmailDetail> {
        let url = self.endpoint(&["emails", email_id])?;
        debug!("GET {}", url);
        let envelope: EmailEnvelope = Self::send(self.http_client.get(url)).await?;
        Ok(envelope
            .data
            .map(|data| EmailDetail::from_data(&data))
            .unwrap_or_default())
    }

    /// Sends a prompt straight to the language model.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the model call fails upstream.
    pub async fn ask(&self, request: &AskRequest) -> Result<String> {
        let url = self.endpoint(&["ask"])?;
        debug!("POST {} model={}", url, request.model_name);
        let response: AskResponse = Self::send(self.http_client.post(url).json(request)).await?;
        Ok(response.answer.unwrap_or_default())
    }

    /// Retrieves context for `request.query` and answers `request.user_input`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn ask_with_rag(&self, request: &RagAskRequest) -> Result<RagAnswer> {
        let url = self.endpoint(&["ask-with-rag"])?;
        debug!(
            "POST {} query={:?} context_mode={}",
            url,
            request.query,
            request.context_mode.as_str()
        );
        let response: RagAskResponse = Self::send(self.http_client.post(url).json(request)).await?;
        Ok(response.into_answer(&request.query))
    }

    /// Reports when the search index was last rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn index_status(&self) -> Result<String> {
        let url = self.endpoint(&["vectors-check"])?;
        let response: IndexStatusResponse = Self::send(self.http_client.get(url)).await?;
        Ok(response.last_updated.unwrap_or_else(|| "Never".to_string()))
    }

    /// Asks the backend to rebuild its search index.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the rebuild fails upstream.
    pub async fn rebuild_index(&self) -> Result<String> {
        let url = self.endpoint(&["vectors-rebuild"])?;
        debug!("POST {}", url);
        let response: RebuildResponse = Self::send(self.http_client.post(url)).await?;
        Ok(response
            .message
            .unwrap_or_else(|| "Index rebuilt.".to_string()))
    }

    /// Asks the backend host to reveal `path` in its file explorer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the path does not exist on the host.
    pub async fn open_location(&self, path: &str) -> Result<()> {
        let url = self.endpoint(&["open-location"])?;
        debug!("GET {} path={:?}", url, path);
        Self::checked(self.http_client.get(url).query(&[("path", path)])).await?;
        Ok(())
    }

    /// Builds an endpoint URL, encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                Error::Config(format!("{} cannot be used as a base URL", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Sends a request and decodes a JSON body.
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = Self::checked(request).await?;
        Ok(response.json().await?)
    }

    /// Sends a request, converting non-success statuses into errors.
    async fn checked(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // A body that cannot be read is treated as empty.
        let body = response.text().await.unwrap_or_default();
        Err(Error::server(status.as_u16(), &body))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ContextMode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri()).unwrap()
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(ApiClient::new("mailto:someone@example.com").is_err());
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = ApiClient::new("http://localhost:8000/api/").unwrap();
        let url = client.endpoint(&["threads", "T 1/2"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/threads/T%201%2F2");
    }

    #[tokio::test]
    async fn lookup_posts_query_and_parses_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/lookup"))
            .and(body_json(json!({"query": "budget"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"thread_id": "T1", "subject": "Re: budget", "score": 87.6},
                    {"doc_path": "/docs/a.pdf", "paragraph": "lorem ipsum"},
                    {"score": 12.0}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hits = client(&server)
            .await
            .lookup(&LookupRequest::new("budget"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert!(matches!(hits[0], Hit::Thread(_)));
        assert!(matches!(hits[1], Hit::Document(_)));
    }

    #[tokio::test]
    async fn lookup_without_results_array_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": null})))
            .mount(&server)
            .await;

        let hits = client(&server)
            .await
            .lookup(&LookupRequest::new("nothing"))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn server_error_carries_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Thread not found"))
            .mount(&server)
            .await;

        let err = client(&server).await.thread("missing").await.unwrap_err();
        assert!(matches!(err, Error::Server { status: 404, .. }));
        assert_eq!(err.to_string(), "Thread not found");
    }

    #[tokio::test]
    async fn server_error_without_body_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .ask(&AskRequest {
                user_input: "hi".into(),
                model_name: "m".into(),
                use_chat: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed: 500");
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        // Nothing listens on the discard port.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.thread("T1").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn thread_fetch_is_issued_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "thread_id": "T1",
                "topic": "Budget review",
                "detail1": "",
                "detail2": "",
                "email_ids": ["e1", "e2"],
                "subject": "Re: budget"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let thread = client(&server).await.thread("T1").await.unwrap();
        assert_eq!(thread.email_ids, ["e1", "e2"]);
        assert_eq!(thread.title("T1"), "Re: budget");
    }

    #[tokio::test]
    async fn email_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/emails/e1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email_id": "e1",
                "data": {"sender": "alice@example.com", "receiver": ["bob@example.com"], "body": "hi"}
            })))
            .mount(&server)
            .await;

        let email = client(&server).await.email("e1").await.unwrap();
        assert_eq!(email.from.as_deref(), Some("alice@example.com"));
        assert_eq!(email.to.as_deref(), Some("bob@example.com"));
        assert_eq!(email.body.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn ask_with_rag_sends_context_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask-with-rag"))
            .and(body_json(json!({
                "user_input": "What is our refund policy?",
                "query": "refund policy",
                "context_mode": "full"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": "Thirty days.",
                "used_query": "refund policy",
                "sources": [{"thread_id": "T9"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = client(&server)
            .await
            .ask_with_rag(&RagAskRequest {
                user_input: "What is our refund policy?".into(),
                query: "refund policy".into(),
                context_mode: ContextMode::Full,
            })
            .await
            .unwrap();
        assert_eq!(answer.answer, "Thirty days.");
        assert_eq!(answer.sources.len(), 1);
    }

    #[tokio::test]
    async fn index_status_reads_last_updated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vectors-check"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"last_updated": "2026-01-02 03:04:05"})),
            )
            .mount(&server)
            .await;

        let status = client(&server).await.index_status().await.unwrap();
        assert_eq!(status, "2026-01-02 03:04:05");
    }

    #[tokio::test]
    async fn open_location_passes_path_and_ignores_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-location"))
            .and(query_param("path", "/docs/a.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .open_location("/docs/a.pdf")
            .await
            .unwrap();
    }
}
