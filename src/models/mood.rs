//! Mood journal rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row in the `mood_entries` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    /// 1 (anxious) through 5 (happy)
    pub mood_score: i32,
    pub mood_label: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `mood_entries`; the store assigns id/created_at.
#[derive(Debug, Clone, Serialize)]
pub struct NewMoodEntry {
    pub user_id: String,
    pub mood_score: i32,
    pub mood_label: String,
    pub notes: Option<String>,
}

impl NewMoodEntry {
    /// Build an entry for a 1-5 score, deriving the label. Scores are
    /// clamped into range first.
    pub fn from_score(user_id: &str, score: i32, notes: Option<String>) -> Self {
        let score = score.clamp(1, 5);
        Self {
            user_id: user_id.to_string(),
            mood_score: score,
            mood_label: mood_label(score).to_string(),
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Canonical label for a mood score.
pub fn mood_label(score: i32) -> &'static str {
    match score {
        1 => "Anxious",
        2 => "Low",
        3 => "Neutral",
        4 => "Calm",
        _ => "Happy",
    }
}

/// Display glyph for a mood score.
pub fn mood_glyph(score: i32) -> &'static str {
    match score {
        1 => "😰",
        2 => "😔",
        3 => "😐",
        4 => "😌",
        _ => "😊",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_all_scores() {
        assert_eq!(mood_label(1), "Anxious");
        assert_eq!(mood_label(3), "Neutral");
        assert_eq!(mood_label(5), "Happy");
    }

    #[test]
    fn from_score_clamps_and_labels() {
        let entry = NewMoodEntry::from_score("u1", 9, None);
        assert_eq!(entry.mood_score, 5);
        assert_eq!(entry.mood_label, "Happy");

        let entry = NewMoodEntry::from_score("u1", 0, None);
        assert_eq!(entry.mood_score, 1);
        assert_eq!(entry.mood_label, "Anxious");
    }

    #[test]
    fn blank_notes_become_none() {
        let entry = NewMoodEntry::from_score("u1", 3, Some("   ".into()));
        assert!(entry.notes.is_none());

        let entry = NewMoodEntry::from_score("u1", 3, Some("slept badly".into()));
        assert_eq!(entry.notes.as_deref(), Some("slept badly"));
    }

    #[test]
    fn row_deserializes_without_notes() {
        let json = r#"{
            "id": "e1",
            "user_id": "u1",
            "mood_score": 4,
            "mood_label": "Calm",
            "created_at": "2026-08-01T10:00:00Z"
        }"#;
        let entry: MoodEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.mood_score, 4);
        assert!(entry.notes.is_none());
    }
}
