//! Chat pipeline errors.

use crate::traits::HttpError;

/// Failure conditions of a chat turn.
///
/// The first three are user-facing conditions named by the backend
/// contract; `Protocol` is an internal invariant violation (a programming
/// fault, not a server condition) and should never occur in correct use.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatError {
    /// The completion endpoint answered 429. Do not retry automatically.
    RateLimited,
    /// The completion endpoint answered 402.
    PaymentRequired,
    /// Any other non-success status, missing body, or mid-stream failure.
    Transport { message: String },
    /// Conversation invariant violated, e.g. appending a fragment with no
    /// assistant turn in progress.
    Protocol { message: String },
}

impl ChatError {
    /// Short text for the toast line.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::RateLimited => {
                "Rate limited. Please wait a moment before sending another message.".to_string()
            }
            ChatError::PaymentRequired => {
                "Credits needed. Please add credits to continue using AI chat.".to_string()
            }
            ChatError::Transport { .. } => "Something went wrong. Please try again.".to_string(),
            ChatError::Protocol { message } => format!("Internal error: {}", message),
        }
    }

    /// Whether a manual retry of the same send is reasonable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChatError::Transport { .. })
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::RateLimited => write!(f, "Rate limited by completion endpoint"),
            ChatError::PaymentRequired => write!(f, "Payment required by completion endpoint"),
            ChatError::Transport { message } => write!(f, "Transport failure: {}", message),
            ChatError::Protocol { message } => write!(f, "Protocol error: {}", message),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<HttpError> for ChatError {
    /// Status codes are meaningful here: 429 and 402 are distinct
    /// conditions, everything else collapses into `Transport`.
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status: 429, .. } => ChatError::RateLimited,
            HttpError::Status { status: 402, .. } => ChatError::PaymentRequired,
            other => ChatError::Transport {
                message: other.to_string(),
            },
        }
    }
}
