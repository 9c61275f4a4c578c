//! Row-store errors.

use crate::traits::HttpError;

/// Failures reading or writing rows in a backend collection.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// The request never completed.
    Transport { message: String },
    /// The store answered with a non-success status.
    Status { status: u16, message: String },
    /// The response body did not match the expected row shape.
    Decode { collection: String, message: String },
}

impl StoreError {
    /// Short text for the toast line.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Transport { .. } => {
                "Could not reach the server. Please try again.".to_string()
            }
            StoreError::Status { status, .. } => {
                format!("The server rejected the request ({}).", status)
            }
            StoreError::Decode { collection, .. } => {
                format!("Received unexpected data for {}.", collection)
            }
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Transport { message } => write!(f, "Store transport failure: {}", message),
            StoreError::Status { status, message } => {
                write!(f, "Store error ({}): {}", status, message)
            }
            StoreError::Decode {
                collection,
                message,
            } => write!(f, "Failed to decode rows from {}: {}", collection, message),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<HttpError> for StoreError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, message } => StoreError::Status { status, message },
            other => StoreError::Transport {
                message: other.to_string(),
            },
        }
    }
}
