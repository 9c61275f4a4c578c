//! Row-store integration tests against a wiremock server.

mod common;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{store_client, TEST_KEY};
use zenalyze::error::StoreError;
use zenalyze::models::{ChatMessage, NewMoodEntry};

#[tokio::test]
async fn mood_entries_query_and_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/mood_entries"))
        .and(query_param("select", "*"))
        .and(query_param("user_id", "eq.u1"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", TEST_KEY))
        .and(header("Authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "m1",
                "user_id": "u1",
                "mood_score": 4,
                "mood_label": "Calm",
                "notes": "took a walk",
                "created_at": "2026-08-20T09:30:00Z"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_client(&server);
    let rows = store.mood_entries("u1", Some("user-token")).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].mood_score, 4);
    assert_eq!(rows[0].notes.as_deref(), Some("took a walk"));
}

#[tokio::test]
async fn anonymous_reads_use_the_publishable_key_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/crisis_resources"))
        .and(query_param("order", "country.asc"))
        .and(header("Authorization", format!("Bearer {}", TEST_KEY)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_client(&server);
    assert!(store.crisis_resources().await.unwrap().is_empty());
}

#[tokio::test]
async fn mood_insert_posts_minimal_return() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/mood_entries"))
        .and(header("Prefer", "return=minimal"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_client(&server);
    let entry = NewMoodEntry::from_score("u1", 2, Some("rough night".into()));
    store.log_mood(&entry, Some("user-token")).await.unwrap();
}

#[tokio::test]
async fn rejected_insert_surfaces_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/mood_entries"))
        .respond_with(ResponseTemplate::new(403).set_body_string("row-level security"))
        .mount(&server)
        .await;

    let store = store_client(&server);
    let entry = NewMoodEntry::from_score("u1", 3, None);
    let err = store.log_mood(&entry, None).await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 403, .. }));
}

#[tokio::test]
async fn malformed_rows_are_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/therapists"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"rows": "nope"})),
        )
        .mount(&server)
        .await;

    let store = store_client(&server);
    let err = store.therapists().await.unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
}

#[tokio::test]
async fn chat_transcript_upsert() {
    let server = MockServer::start().await;
    // The Prefer value is comma-joined; match the raw header string, since
    // the stock header matcher treats the comma as a value separator.
    let prefer_is_merge_upsert = |request: &wiremock::Request| {
        request
            .headers
            .get("Prefer")
            .and_then(|value| value.to_str().ok())
            == Some("return=minimal,resolution=merge-duplicates")
    };
    Mock::given(method("POST"))
        .and(path("/rest/v1/ai_chat_sessions"))
        .and(query_param("on_conflict", "id"))
        .and(prefer_is_merge_upsert)
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let store = store_client(&server);
    let id = uuid::Uuid::new_v4();
    let mut messages = vec![ChatMessage::user("hello")];

    // Same id twice: the second save replaces the first row.
    store
        .save_chat_session(id, "u1", &messages, Some("user-token"))
        .await
        .unwrap();
    messages.push(ChatMessage::user("again"));
    store
        .save_chat_session(id, "u1", &messages, Some("user-token"))
        .await
        .unwrap();
}
