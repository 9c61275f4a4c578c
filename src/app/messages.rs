//! Messages from async tasks back to the TUI loop.

use crate::chat::ConversationEvent;
use crate::models::{CrisisResource, Exercise, MoodEntry, Therapist};

/// Everything a background task can tell the UI.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The conversation buffer changed (user message, turn start, fragment).
    Conversation(ConversationEvent),
    /// The in-flight chat turn completed normally.
    TurnFinished,
    /// The in-flight chat turn failed; `message` is already user-facing.
    TurnFailed { message: String, retryable: bool },
    /// Mood journal rows arrived.
    MoodEntriesLoaded(Vec<MoodEntry>),
    /// A mood entry was written.
    MoodSaved,
    /// Exercise catalog rows arrived.
    ExercisesLoaded(Vec<Exercise>),
    /// An exercise completion was recorded.
    ExerciseLogged { title: String },
    /// Crisis resource rows arrived.
    CrisisResourcesLoaded(Vec<CrisisResource>),
    /// Therapist directory rows arrived.
    TherapistsLoaded(Vec<Therapist>),
    /// A fetch or insert failed; `message` is already user-facing.
    StoreFailed(String),
}
