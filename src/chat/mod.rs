//! The streamed-chat pipeline.
//!
//! Four pieces, wired together by [`ChatSession`]:
//!
//! - [`Conversation`] — the ordered message buffer with an observer feed
//! - [`FrameDecoder`] — turns raw transport chunks into content fragments
//! - [`ChatClient`] — issues the streaming POST and classifies failures
//! - [`ChatSession`] — the turn state machine driving the three above

mod client;
mod conversation;
mod decoder;
mod turn;

pub use client::ChatClient;
pub use conversation::{Conversation, ConversationEvent};
pub use decoder::FrameDecoder;
pub use turn::{ChatSession, TurnState};
