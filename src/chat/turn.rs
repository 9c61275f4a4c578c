//! Turn orchestrator: one user send, start to finish.
//!
//! `Idle → Sending → Streaming → Idle`, with error exits back to `Idle`.
//! Exactly one turn can be in flight: `send` takes `&mut self` and is a
//! no-op unless the state is `Idle`, which is the whole of the concurrency
//! control. All buffer mutations happen synchronously between awaits.

use futures_util::StreamExt;
use uuid::Uuid;

use super::client::ChatClient;
use super::conversation::Conversation;
use super::decoder::FrameDecoder;
use crate::error::ChatError;
use crate::models::ChatMessage;
use crate::traits::ByteStream;

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// No turn in flight; `send` is accepted.
    Idle,
    /// Request issued, waiting on response status.
    Sending,
    /// Response accepted, fragments accumulating.
    Streaming,
}

/// A chat session: conversation buffer plus the state machine that feeds
/// it from the completion endpoint.
pub struct ChatSession {
    conversation: Conversation,
    client: ChatClient,
    bearer: String,
    state: TurnState,
    /// Client-generated id used to key the persisted copy of this session.
    session_id: Uuid,
}

impl ChatSession {
    /// `bearer` is the opaque credential attached to every turn's request.
    pub fn new(client: ChatClient, bearer: impl Into<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            client,
            bearer: bearer.into(),
            state: TurnState::Idle,
            session_id: Uuid::new_v4(),
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Mutable access, used to register observers before the first send.
    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    /// Run one full turn: append the user message, open the stream, and
    /// accumulate assistant fragments until the sentinel or end of body.
    ///
    /// Empty or whitespace-only input is a no-op, as is calling while a
    /// turn is already in flight. On failure the state returns to `Idle`
    /// and whatever partial assistant content arrived is kept.
    pub async fn send(&mut self, user_text: &str) -> Result<(), ChatError> {
        if self.state != TurnState::Idle {
            return Ok(());
        }
        let text = user_text.trim();
        if text.is_empty() {
            return Ok(());
        }

        self.state = TurnState::Sending;
        self.conversation.append(ChatMessage::user(text));

        let stream = match self
            .client
            .open_stream(self.conversation.messages(), &self.bearer)
            .await
        {
            Ok(stream) => stream,
            Err(err) => {
                // No assistant turn was started, so nothing dangles.
                self.state = TurnState::Idle;
                tracing::warn!(error = %err, "chat turn failed before streaming");
                return Err(err);
            }
        };

        self.state = TurnState::Streaming;
        self.conversation.start_assistant_turn();

        let result = self.drain(stream).await;

        self.conversation.end_turn();
        self.state = TurnState::Idle;
        result
    }

    /// Drive the decoder over the chunk stream. End of transport without a
    /// sentinel is normal completion.
    async fn drain(&mut self, mut stream: ByteStream) -> Result<(), ChatError> {
        let mut decoder = FrameDecoder::new();

        while let Some(item) = stream.next().await {
            match item {
                Ok(bytes) => {
                    for fragment in decoder.feed_bytes(&bytes) {
                        self.conversation.append_to_in_progress(&fragment)?;
                    }
                    if decoder.is_finished() {
                        return Ok(());
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "chat stream dropped mid-turn");
                    return Err(ChatError::Transport {
                        message: err.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
