//! Guided exercise rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row in the `exercises` catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub duration_minutes: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `user_exercise_sessions`, written when the user
/// marks an exercise complete.
#[derive(Debug, Clone, Serialize)]
pub struct NewExerciseSession {
    pub user_id: String,
    pub exercise_id: String,
    pub duration_seconds: i32,
}

impl NewExerciseSession {
    /// Record a completion of `exercise` at its catalog duration.
    pub fn completed(user_id: &str, exercise: &Exercise) -> Self {
        Self {
            user_id: user_id.to_string(),
            exercise_id: exercise.id.clone(),
            duration_seconds: exercise.duration_minutes * 60,
        }
    }
}
