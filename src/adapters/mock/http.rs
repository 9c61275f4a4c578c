//! Configurable mock HTTP client.
//!
//! Returns canned responses per URL and records every request so tests
//! can verify outbound traffic without a network.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, HttpResponse};

/// A request captured by the mock for later assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// "GET", "POST" or "POST_STREAM"
    pub method: String,
    /// Full request URL
    pub url: String,
    /// Headers as sent
    pub headers: Headers,
    /// Body for POST variants
    pub body: Option<String>,
}

/// What the mock should answer for a given URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A buffered response
    Buffered(HttpResponse),
    /// An immediate transport error
    Error(HttpError),
    /// A streaming body delivered as these exact chunks
    Chunks(Vec<Bytes>),
    /// A streaming body that yields these chunks then fails
    ChunksThenError(Vec<Bytes>, HttpError),
}

/// Mock [`HttpClient`] keyed by URL.
///
/// Unconfigured URLs answer 404 (buffered) or a status error (streaming)
/// so misdirected requests fail loudly in tests.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the answer for `url`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .expect("mock response table poisoned")
            .insert(url.to_string(), response);
    }

    /// Everything the client has been asked so far.
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.recorded
            .lock()
            .expect("mock request log poisoned")
            .clone()
    }

    fn record(&self, method: &str, url: &str, headers: &Headers, body: Option<&str>) {
        self.recorded
            .lock()
            .expect("mock request log poisoned")
            .push(RecordedRequest {
                method: method.to_string(),
                url: url.to_string(),
                headers: headers.clone(),
                body: body.map(str::to_string),
            });
    }

    fn lookup(&self, url: &str) -> Option<MockResponse> {
        self.responses
            .lock()
            .expect("mock response table poisoned")
            .get(url)
            .cloned()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, HttpError> {
        self.record("GET", url, headers, None);
        match self.lookup(url) {
            Some(MockResponse::Buffered(resp)) => Ok(resp),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other("stream response for buffered get".into())),
            None => Ok(HttpResponse::new(404, Bytes::new())),
        }
    }

    async fn post(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<HttpResponse, HttpError> {
        self.record("POST", url, headers, Some(body));
        match self.lookup(url) {
            Some(MockResponse::Buffered(resp)) => Ok(resp),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other("stream response for buffered post".into())),
            None => Ok(HttpResponse::new(404, Bytes::new())),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record("POST_STREAM", url, headers, Some(body));
        match self.lookup(url) {
            Some(MockResponse::Chunks(chunks)) => {
                let items: Vec<Result<Bytes, HttpError>> = chunks.into_iter().map(Ok).collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::ChunksThenError(chunks, err)) => {
                let mut items: Vec<Result<Bytes, HttpError>> =
                    chunks.into_iter().map(Ok).collect();
                items.push(Err(err));
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Buffered(resp)) if !resp.is_success() => Err(HttpError::Status {
                status: resp.status,
                message: resp.text().unwrap_or_default(),
            }),
            Some(MockResponse::Buffered(resp)) => {
                Ok(Box::pin(futures::stream::iter(vec![Ok(resp.body)])))
            }
            None => Err(HttpError::Status {
                status: 404,
                message: format!("no mock response for {}", url),
            }),
        }
    }
}
