//! Background tasks: the chat worker and the store fetch/insert spawns.

use tokio::sync::mpsc;

use super::messages::AppMessage;
use crate::auth::Session;
use crate::chat::{ChatClient, ChatSession};
use crate::models::{NewExerciseSession, NewMoodEntry};
use crate::store::StoreClient;
use crate::traits::SessionProvider;

/// Spawn the long-lived chat worker and return its submit channel.
///
/// The worker owns the [`ChatSession`] for the process lifetime; the UI
/// never touches the conversation buffer directly. Every buffer change is
/// forwarded as [`AppMessage::Conversation`], and after each successful
/// turn the transcript is persisted in the background for signed-in users.
pub fn spawn_chat_worker(
    client: ChatClient,
    bearer: String,
    store: StoreClient,
    session: Session,
    msg_tx: mpsc::UnboundedSender<AppMessage>,
) -> mpsc::UnboundedSender<String> {
    let (submit_tx, mut submit_rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        let mut chat = ChatSession::new(client, bearer);

        let events = msg_tx.clone();
        chat.conversation_mut().subscribe(move |event| {
            let _ = events.send(AppMessage::Conversation(event.clone()));
        });

        while let Some(text) = submit_rx.recv().await {
            match chat.send(&text).await {
                Ok(()) => {
                    let _ = msg_tx.send(AppMessage::TurnFinished);
                    persist_transcript(&chat, &store, &session);
                }
                Err(err) => {
                    let _ = msg_tx.send(AppMessage::TurnFailed {
                        message: err.user_message(),
                        retryable: err.is_retryable(),
                    });
                }
            }
        }
    });

    submit_tx
}

/// Fire-and-forget transcript save; failures are logged, never surfaced.
fn persist_transcript(chat: &ChatSession, store: &StoreClient, session: &Session) {
    let Some(user_id) = session.user_id() else {
        return;
    };
    let bearer = session.bearer_token();
    let store = store.clone();
    let session_id = chat.session_id();
    let messages = chat.conversation().messages().to_vec();

    tokio::spawn(async move {
        if let Err(err) = store
            .save_chat_session(session_id, &user_id, &messages, bearer.as_deref())
            .await
        {
            tracing::warn!(error = %err, "failed to persist chat transcript");
        }
    });
}

pub fn fetch_mood_entries(
    store: StoreClient,
    session: Session,
    user_id: String,
    msg_tx: mpsc::UnboundedSender<AppMessage>,
) {
    tokio::spawn(async move {
        let bearer = session.bearer_token();
        let message = match store.mood_entries(&user_id, bearer.as_deref()).await {
            Ok(rows) => AppMessage::MoodEntriesLoaded(rows),
            Err(err) => {
                tracing::warn!(error = %err, "mood entries fetch failed");
                AppMessage::StoreFailed(err.user_message())
            }
        };
        let _ = msg_tx.send(message);
    });
}

pub fn save_mood(
    store: StoreClient,
    session: Session,
    entry: NewMoodEntry,
    msg_tx: mpsc::UnboundedSender<AppMessage>,
) {
    tokio::spawn(async move {
        let bearer = session.bearer_token();
        let message = match store.log_mood(&entry, bearer.as_deref()).await {
            Ok(()) => AppMessage::MoodSaved,
            Err(err) => {
                tracing::warn!(error = %err, "mood insert failed");
                AppMessage::StoreFailed(err.user_message())
            }
        };
        let _ = msg_tx.send(message);
    });
}

pub fn fetch_exercises(
    store: StoreClient,
    session: Session,
    msg_tx: mpsc::UnboundedSender<AppMessage>,
) {
    tokio::spawn(async move {
        let bearer = session.bearer_token();
        let message = match store.exercises(bearer.as_deref()).await {
            Ok(rows) => AppMessage::ExercisesLoaded(rows),
            Err(err) => {
                tracing::warn!(error = %err, "exercise catalog fetch failed");
                AppMessage::StoreFailed(err.user_message())
            }
        };
        let _ = msg_tx.send(message);
    });
}

pub fn log_exercise(
    store: StoreClient,
    session: Session,
    row: NewExerciseSession,
    title: String,
    msg_tx: mpsc::UnboundedSender<AppMessage>,
) {
    tokio::spawn(async move {
        let bearer = session.bearer_token();
        let message = match store.record_exercise_session(&row, bearer.as_deref()).await {
            Ok(()) => AppMessage::ExerciseLogged { title },
            Err(err) => {
                tracing::warn!(error = %err, "exercise session insert failed");
                AppMessage::StoreFailed(err.user_message())
            }
        };
        let _ = msg_tx.send(message);
    });
}

pub fn fetch_crisis_resources(store: StoreClient, msg_tx: mpsc::UnboundedSender<AppMessage>) {
    tokio::spawn(async move {
        let message = match store.crisis_resources().await {
            Ok(rows) => AppMessage::CrisisResourcesLoaded(rows),
            Err(err) => {
                tracing::warn!(error = %err, "crisis resources fetch failed");
                AppMessage::StoreFailed(err.user_message())
            }
        };
        let _ = msg_tx.send(message);
    });
}

pub fn fetch_therapists(store: StoreClient, msg_tx: mpsc::UnboundedSender<AppMessage>) {
    tokio::spawn(async move {
        let message = match store.therapists().await {
            Ok(rows) => AppMessage::TherapistsLoaded(rows),
            Err(err) => {
                tracing::warn!(error = %err, "therapist directory fetch failed");
                AppMessage::StoreFailed(err.user_message())
            }
        };
        let _ = msg_tx.send(message);
    });
}
