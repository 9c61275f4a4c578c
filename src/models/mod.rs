//! Data types exchanged with the backend.
//!
//! Chat types mirror the completion endpoint's wire contract; the row
//! types mirror the columns of the hosted collections.

mod exercise;
mod message;
mod mood;
mod support;

pub use exercise::{Exercise, NewExerciseSession};
pub use message::{ChatMessage, ChatRequest, MessageRole};
pub use mood::{mood_glyph, mood_label, MoodEntry, NewMoodEntry};
pub use support::{CrisisResource, Therapist};
