use serde::{Deserialize, Serialize};

use super::mood::Mood;

/// One mood + note record for a single calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: String,
    /// ISO-8601 timestamp. Its `YYYY-MM-DD` prefix is the day key.
    pub date: String,
    pub mood: Mood,
    #[serde(default)]
    pub note: String,
}

impl MoodEntry {
    pub fn new(id: impl Into<String>, date: impl Into<String>, mood: Mood, note: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            mood,
            note: note.into(),
        }
    }

    /// The leading `YYYY-MM-DD` segment of `date`.
    pub fn day_key(&self) -> &str {
        self.date.split('T').next().unwrap_or_default()
    }

    /// Numeric id assigned by the CMS, if this entry came from there.
    pub fn remote_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}
