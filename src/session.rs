use std::sync::Arc;

use crate::error::JournalResult;
use crate::storage::{KeyValueStore, TOKEN_KEY};

/// Session token held in a key-value store. A stored token means
/// authenticated; no token means anonymous, local-only mode.
///
/// Passed to the remote client explicitly so separate sessions (or test
/// stores) can live side by side.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token. A store read failure counts as no token.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) -> JournalResult<()> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn clear(&self) -> JournalResult<()> {
        self.store.remove(TOKEN_KEY)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
