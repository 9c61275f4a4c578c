//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use wiremock::MockServer;

use zenalyze::adapters::ReqwestHttpClient;
use zenalyze::chat::{ChatClient, ChatSession};
use zenalyze::config::BackendConfig;
use zenalyze::store::StoreClient;

pub const TEST_KEY: &str = "pk-test-key";

/// One `data:` line carrying a content fragment, in the completion
/// endpoint's wire shape.
pub fn content_line(text: &str) -> String {
    format!(
        "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n\n",
        text
    )
}

/// A full streamed body: one line per fragment, optionally terminated.
pub fn sse_body(fragments: &[&str], done: bool) -> String {
    let mut body = String::new();
    for fragment in fragments {
        body.push_str(&content_line(fragment));
    }
    if done {
        body.push_str("data: [DONE]\n\n");
    }
    body
}

/// A chat session talking to `server` over real HTTP.
pub fn chat_session(server: &MockServer) -> ChatSession {
    let http = Arc::new(ReqwestHttpClient::new());
    let client = ChatClient::new(http, format!("{}/functions/v1/ai-chat", server.uri()));
    ChatSession::new(client, TEST_KEY)
}

/// A store client talking to `server` over real HTTP.
pub fn store_client(server: &MockServer) -> StoreClient {
    let http = Arc::new(ReqwestHttpClient::new());
    let config = BackendConfig {
        base_url: server.uri(),
        publishable_key: TEST_KEY.to_string(),
    };
    StoreClient::new(http, &config)
}
