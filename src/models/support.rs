//! Crisis resource and therapist directory rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row in the `crisis_resources` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrisisResource {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub available_24_7: bool,
    pub created_at: DateTime<Utc>,
}

/// A row in the `therapists` directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Therapist {
    pub id: String,
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub available_slots: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
