use serde::{Deserialize, Serialize};

use super::mood::BackendMood;

/// A user record as the CMS returns it from `users/me` and the auth routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Only present when the request asked for entries to be populated.
    #[serde(default, rename = "mood_entries")]
    pub mood_entries: Option<Vec<RemoteMoodEntry>>,
}

impl RemoteUser {
    pub fn entries(&self) -> &[RemoteMoodEntry] {
        self.mood_entries.as_deref().unwrap_or_default()
    }
}

/// A mood entry in the CMS's shape: numeric id, keyword mood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMoodEntry {
    pub id: u64,
    #[serde(default)]
    pub note: Option<String>,
    pub date: String,
    pub mood: BackendMood,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Session returned by a successful register or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub jwt: String,
    pub user: RemoteUser,
}
