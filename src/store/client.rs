//! Generic and typed row operations.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::error::StoreError;
use crate::models::{
    ChatMessage, CrisisResource, Exercise, MoodEntry, NewExerciseSession, NewMoodEntry, Therapist,
};
use crate::traits::{Headers, HttpClient};

/// Client for the backend's row interface.
#[derive(Clone)]
pub struct StoreClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    publishable_key: String,
}

impl StoreClient {
    pub fn new(http: Arc<dyn HttpClient>, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            publishable_key: config.publishable_key.clone(),
        }
    }

    fn collection_url(&self, collection: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, collection)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, collection, query)
        }
    }

    /// Standard headers: the publishable key identifies the project, the
    /// bearer (user token if signed in, else the key again) decides what
    /// row-level security lets through.
    fn headers(&self, bearer: Option<&str>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("apikey".to_string(), self.publishable_key.clone());
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", bearer.unwrap_or(&self.publishable_key)),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    /// Read all rows matching `query` from `collection`.
    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &str,
        bearer: Option<&str>,
    ) -> Result<Vec<T>, StoreError> {
        let url = self.collection_url(collection, query);
        let response = self.http.get(&url, &self.headers(bearer)).await?;

        if !response.is_success() {
            return Err(StoreError::Status {
                status: response.status,
                message: response.text().unwrap_or_default(),
            });
        }

        response.json().map_err(|e| StoreError::Decode {
            collection: collection.to_string(),
            message: e.to_string(),
        })
    }

    /// Insert one row into `collection`.
    pub async fn insert<T: Serialize>(
        &self,
        collection: &str,
        row: &T,
        bearer: Option<&str>,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(row).map_err(|e| StoreError::Decode {
            collection: collection.to_string(),
            message: e.to_string(),
        })?;

        let url = self.collection_url(collection, "");
        let mut headers = self.headers(bearer);
        headers.insert("Prefer".to_string(), "return=minimal".to_string());

        let response = self.http.post(&url, &body, &headers).await?;
        if !response.is_success() {
            return Err(StoreError::Status {
                status: response.status,
                message: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }

    // Typed calls, one per screen.

    /// The signed-in user's mood journal, newest first.
    pub async fn mood_entries(
        &self,
        user_id: &str,
        bearer: Option<&str>,
    ) -> Result<Vec<MoodEntry>, StoreError> {
        let query = format!("select=*&user_id=eq.{}&order=created_at.desc", user_id);
        self.list("mood_entries", &query, bearer).await
    }

    /// Record a mood entry.
    pub async fn log_mood(
        &self,
        entry: &NewMoodEntry,
        bearer: Option<&str>,
    ) -> Result<(), StoreError> {
        self.insert("mood_entries", entry, bearer).await
    }

    /// The guided-exercise catalog in catalog order.
    pub async fn exercises(&self, bearer: Option<&str>) -> Result<Vec<Exercise>, StoreError> {
        self.list("exercises", "select=*&order=created_at.asc", bearer)
            .await
    }

    /// Record a completed exercise session.
    pub async fn record_exercise_session(
        &self,
        session: &NewExerciseSession,
        bearer: Option<&str>,
    ) -> Result<(), StoreError> {
        self.insert("user_exercise_sessions", session, bearer).await
    }

    /// Crisis resources grouped by country.
    pub async fn crisis_resources(&self) -> Result<Vec<CrisisResource>, StoreError> {
        self.list("crisis_resources", "select=*&order=country.asc", None)
            .await
    }

    /// The therapist directory, alphabetical.
    pub async fn therapists(&self) -> Result<Vec<Therapist>, StoreError> {
        self.list("therapists", "select=*&order=name.asc", None)
            .await
    }

    /// Upsert the full message list of a chat session, keyed by the
    /// client-generated session id.
    pub async fn save_chat_session(
        &self,
        session_id: Uuid,
        user_id: &str,
        messages: &[ChatMessage],
        bearer: Option<&str>,
    ) -> Result<(), StoreError> {
        let row = serde_json::json!({
            "id": session_id,
            "user_id": user_id,
            "messages": messages,
        });
        let body = serde_json::to_string(&row).map_err(|e| StoreError::Decode {
            collection: "ai_chat_sessions".to_string(),
            message: e.to_string(),
        })?;

        let url = self.collection_url("ai_chat_sessions", "on_conflict=id");
        let mut headers = self.headers(bearer);
        headers.insert(
            "Prefer".to_string(),
            "return=minimal,resolution=merge-duplicates".to_string(),
        );

        let response = self.http.post(&url, &body, &headers).await?;
        if !response.is_success() {
            return Err(StoreError::Status {
                status: response.status,
                message: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpResponse;
    use bytes::Bytes;

    fn config() -> BackendConfig {
        BackendConfig {
            base_url: "http://backend.test".to_string(),
            publishable_key: "pk-test".to_string(),
        }
    }

    fn store_with(mock: &MockHttpClient) -> StoreClient {
        StoreClient::new(Arc::new(mock.clone()), &config())
    }

    #[tokio::test]
    async fn list_builds_query_and_headers() {
        let mock = MockHttpClient::new();
        let url =
            "http://backend.test/rest/v1/mood_entries?select=*&user_id=eq.u1&order=created_at.desc";
        mock.set_response(
            url,
            MockResponse::Buffered(HttpResponse::new(200, Bytes::from("[]"))),
        );

        let store = store_with(&mock);
        let rows = store.mood_entries("u1", Some("user-tok")).await.unwrap();
        assert!(rows.is_empty());

        let recorded = mock.recorded_requests();
        assert_eq!(recorded[0].url, url);
        assert_eq!(
            recorded[0].headers.get("apikey").map(String::as_str),
            Some("pk-test")
        );
        assert_eq!(
            recorded[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer user-tok")
        );
    }

    #[tokio::test]
    async fn anonymous_requests_fall_back_to_publishable_key() {
        let mock = MockHttpClient::new();
        let url = "http://backend.test/rest/v1/crisis_resources?select=*&order=country.asc";
        mock.set_response(
            url,
            MockResponse::Buffered(HttpResponse::new(200, Bytes::from("[]"))),
        );

        let store = store_with(&mock);
        store.crisis_resources().await.unwrap();

        let recorded = mock.recorded_requests();
        assert_eq!(
            recorded[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer pk-test")
        );
    }

    #[tokio::test]
    async fn insert_sends_minimal_prefer_header() {
        let mock = MockHttpClient::new();
        let url = "http://backend.test/rest/v1/mood_entries";
        mock.set_response(
            url,
            MockResponse::Buffered(HttpResponse::new(201, Bytes::new())),
        );

        let store = store_with(&mock);
        let entry = NewMoodEntry::from_score("u1", 4, Some("fine".into()));
        store.log_mood(&entry, Some("tok")).await.unwrap();

        let recorded = mock.recorded_requests();
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(
            recorded[0].headers.get("Prefer").map(String::as_str),
            Some("return=minimal")
        );
        let body: serde_json::Value =
            serde_json::from_str(recorded[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["mood_score"], 4);
        assert_eq!(body["mood_label"], "Calm");
    }

    #[tokio::test]
    async fn error_status_surfaces() {
        let mock = MockHttpClient::new();
        let url = "http://backend.test/rest/v1/exercises?select=*&order=created_at.asc";
        mock.set_response(
            url,
            MockResponse::Buffered(HttpResponse::new(403, Bytes::from("denied"))),
        );

        let store = store_with(&mock);
        let err = store.exercises(None).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 403, .. }));
    }

    #[tokio::test]
    async fn bad_rows_are_decode_errors() {
        let mock = MockHttpClient::new();
        let url = "http://backend.test/rest/v1/therapists?select=*&order=name.asc";
        mock.set_response(
            url,
            MockResponse::Buffered(HttpResponse::new(200, Bytes::from("{\"not\":\"rows\"}"))),
        );

        let store = store_with(&mock);
        let err = store.therapists().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn chat_session_upsert_uses_merge_resolution() {
        let mock = MockHttpClient::new();
        let url = "http://backend.test/rest/v1/ai_chat_sessions?on_conflict=id";
        mock.set_response(
            url,
            MockResponse::Buffered(HttpResponse::new(201, Bytes::new())),
        );

        let store = store_with(&mock);
        let id = Uuid::new_v4();
        let messages = vec![ChatMessage::user("hi")];
        store
            .save_chat_session(id, "u1", &messages, Some("tok"))
            .await
            .unwrap();

        let recorded = mock.recorded_requests();
        assert!(recorded[0]
            .headers
            .get("Prefer")
            .unwrap()
            .contains("merge-duplicates"));
        let body: serde_json::Value =
            serde_json::from_str(recorded[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["messages"][0]["content"], "hi");
    }
}
