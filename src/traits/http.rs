//! HTTP client trait abstraction.
//!
//! Abstracts the HTTP operations the client needs (plain GET/POST plus a
//! streaming POST for the chat completion endpoint) so adapters can be
//! swapped for mocks in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// Request/response headers as a key-value map.
pub type Headers = HashMap<String, String>;

/// A buffered (non-streaming) HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Full response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level HTTP errors.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Could not reach the server
    ConnectionFailed(String),
    /// The request or body read timed out
    Timeout(String),
    /// The server answered with a non-success status
    Status { status: u16, message: String },
    /// The body stream failed mid-read
    Io(String),
    /// Anything else
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Status { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// A lazily-yielded body: raw byte chunks as they arrive on the wire.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Trait for HTTP operations.
///
/// Implemented by the production reqwest adapter and by the mock client
/// used in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and buffer the response.
    async fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, HttpError>;

    /// Perform a POST request and buffer the response.
    async fn post(&self, url: &str, body: &str, headers: &Headers)
        -> Result<HttpResponse, HttpError>;

    /// Perform a POST request and return the response body as a stream
    /// of raw chunks.
    ///
    /// A non-success status must surface as [`HttpError::Status`] carrying
    /// the exact status code; the chat layer distinguishes 429 and 402.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
