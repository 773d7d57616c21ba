#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("Invalid mood: {0}")]
    InvalidMood(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Stored entries are not valid JSON: {0}")]
    StorageParse(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl JournalError {
    /// True for failures reported by the remote service itself (non-success
    /// status), as opposed to local or transport failures.
    pub fn is_remote_rejection(&self) -> bool {
        matches!(
            self,
            JournalError::RegistrationFailed(_)
                | JournalError::LoginFailed(_)
                | JournalError::RequestFailed(_)
        )
    }
}

pub type JournalResult<T> = Result<T, JournalError>;
