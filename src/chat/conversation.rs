//! In-memory conversation buffer.
//!
//! Holds the ordered message sequence for the lifetime of the chat view.
//! Mutations go through the methods here so every change is announced to
//! subscribers; the TUI keeps its own render copy in sync from the event
//! feed instead of sharing the buffer across tasks.

use crate::error::ChatError;
use crate::models::{ChatMessage, MessageRole};

/// A change to the conversation, emitted to subscribers as it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationEvent {
    /// A completed message was appended (user messages, restored history).
    MessageAppended(ChatMessage),
    /// An empty assistant message was appended and is now in progress.
    AssistantTurnStarted,
    /// A content fragment was appended to the in-progress message.
    FragmentAppended(String),
}

/// Ordered sequence of [`ChatMessage`]s with at most one in-progress
/// assistant message, always the last element while a turn streams.
#[derive(Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    turn_in_progress: bool,
    observers: Vec<Box<dyn Fn(&ConversationEvent) + Send>>,
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("messages", &self.messages)
            .field("turn_in_progress", &self.turn_in_progress)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full ordered message sequence.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether an assistant turn is currently accumulating.
    pub fn turn_in_progress(&self) -> bool {
        self.turn_in_progress
    }

    /// Register a change observer. Observers are called synchronously,
    /// after the mutation has been applied.
    pub fn subscribe(&mut self, observer: impl Fn(&ConversationEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self, event: ConversationEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }

    /// Append a completed message to the end of the sequence.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message.clone());
        self.notify(ConversationEvent::MessageAppended(message));
    }

    /// Append an empty assistant message and mark it in progress.
    pub fn start_assistant_turn(&mut self) {
        self.messages.push(ChatMessage::assistant_placeholder());
        self.turn_in_progress = true;
        self.notify(ConversationEvent::AssistantTurnStarted);
    }

    /// Concatenate `fragment` onto the in-progress assistant message.
    ///
    /// Fails with [`ChatError::Protocol`] if no turn is in progress or the
    /// tail of the sequence is not an assistant message.
    pub fn append_to_in_progress(&mut self, fragment: &str) -> Result<(), ChatError> {
        if !self.turn_in_progress {
            return Err(ChatError::Protocol {
                message: "fragment appended with no assistant turn in progress".to_string(),
            });
        }
        match self.messages.last_mut() {
            Some(last) if last.role == MessageRole::Assistant => {
                last.content.push_str(fragment);
            }
            _ => {
                return Err(ChatError::Protocol {
                    message: "in-progress turn is not the last message".to_string(),
                });
            }
        }
        self.notify(ConversationEvent::FragmentAppended(fragment.to_string()));
        Ok(())
    }

    /// Close the in-progress turn. The accumulated content stays as-is;
    /// an empty assistant message is left in place (deliberately not
    /// rolled back).
    pub fn end_turn(&mut self) {
        self.turn_in_progress = false;
    }
}
