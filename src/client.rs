use reqwest::{Client, Response};

use crate::config::Config;
use crate::dto::{self, DataEnvelope, EntryPayload, LoginRequest, RegisterRequest};
use crate::error::{JournalError, JournalResult};
use crate::models::{AuthSession, Mood, MoodEntry, RemoteMoodEntry, RemoteUser};
use crate::session::Session;

/// REST client for the Strapi CMS that stores mood entries per user.
///
/// Authentication state lives in the [`Session`] handed to [`CmsClient::new`]:
/// register and login store the returned token there, logout and any failed
/// `current_user` probe clear it. Every entry operation requires a token and
/// fails with [`JournalError::NotAuthenticated`] before touching the network
/// when there is none. Nothing is retried.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl CmsClient {
    pub fn new(config: &Config, session: Session) -> JournalResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.backend_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> JournalResult<String> {
        self.session.token().ok_or(JournalError::NotAuthenticated)
    }

    // ── Auth ────────────────────────────────────────────────────────────

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> JournalResult<AuthSession> {
        let response = self
            .http
            .post(self.url("auth/local/register"))
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let message = rejection_message(response, "Registration failed").await;
            return Err(JournalError::RegistrationFailed(message));
        }

        let auth: AuthSession = response.json().await?;
        self.session.set_token(&auth.jwt)?;
        tracing::info!(user_id = auth.user.id, username = %auth.user.username, "Registered and signed in");
        Ok(auth)
    }

    pub async fn login(&self, identifier: &str, password: &str) -> JournalResult<AuthSession> {
        let response = self
            .http
            .post(self.url("auth/local"))
            .json(&LoginRequest {
                identifier,
                password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let message = rejection_message(response, "Login failed").await;
            return Err(JournalError::LoginFailed(message));
        }

        let auth: AuthSession = response.json().await?;
        self.session.set_token(&auth.jwt)?;
        tracing::info!(user_id = auth.user.id, username = %auth.user.username, "Signed in");
        Ok(auth)
    }

    /// Drops the stored token. No remote call is made.
    pub fn logout(&self) -> JournalResult<()> {
        self.session.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// The signed-in user, or None. Never fails: any transport or auth
    /// failure clears the stored token and reports no user.
    pub async fn current_user(&self, with_entries: bool) -> Option<RemoteUser> {
        let token = self.session.token()?;

        match self.fetch_current_user(&token, with_entries).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Current user lookup failed, clearing session");
                if let Err(e) = self.session.clear() {
                    tracing::warn!(error = %e, "Failed to clear session token");
                }
                None
            }
        }
    }

    async fn fetch_current_user(&self, token: &str, with_entries: bool) -> JournalResult<RemoteUser> {
        let mut request = self.http.get(self.url("users/me")).bearer_auth(token);
        if with_entries {
            request = request.query(&[("populate", "mood_entries")]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let message = rejection_message(response, "Failed to fetch current user").await;
            return Err(JournalError::RequestFailed(message));
        }

        Ok(response.json().await?)
    }

    // ── Mood entries ────────────────────────────────────────────────────

    /// All entries of the signed-in user, in local shape. Empty when the
    /// user lookup comes back empty.
    pub async fn list_entries(&self) -> JournalResult<Vec<MoodEntry>> {
        self.bearer()?;

        let entries = match self.current_user(true).await {
            Some(user) => translate_remote_to_local(user.entries()),
            None => Vec::new(),
        };
        tracing::debug!(count = entries.len(), "Fetched remote entries");
        Ok(entries)
    }

    pub async fn create_entry(&self, note: &str, mood: Mood, date: &str) -> JournalResult<MoodEntry> {
        let token = self.bearer()?;

        let response = self
            .http
            .post(self.url("mood-entries"))
            .bearer_auth(token)
            .json(&DataEnvelope {
                data: EntryPayload {
                    note,
                    mood: mood.to_backend(),
                    date,
                },
            })
            .send()
            .await?;

        let entry = entry_from_response(response, "Failed to create mood entry").await?;
        tracing::info!(entry_id = entry.id, mood = %entry.mood, "Created remote entry");
        Ok(to_local(&entry))
    }

    pub async fn update_entry(
        &self,
        id: u64,
        note: &str,
        mood: Mood,
        date: &str,
    ) -> JournalResult<MoodEntry> {
        let token = self.bearer()?;

        let response = self
            .http
            .put(self.url(&format!("mood-entries/{}", id)))
            .bearer_auth(token)
            .json(&DataEnvelope {
                data: EntryPayload {
                    note,
                    mood: mood.to_backend(),
                    date,
                },
            })
            .send()
            .await?;

        let entry = entry_from_response(response, "Failed to update mood entry").await?;
        tracing::info!(entry_id = entry.id, mood = %entry.mood, "Updated remote entry");
        Ok(to_local(&entry))
    }

    pub async fn delete_entry(&self, id: u64) -> JournalResult<()> {
        let token = self.bearer()?;

        let response = self
            .http
            .delete(self.url(&format!("mood-entries/{}", id)))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = rejection_message(response, "Failed to delete mood entry").await;
            return Err(JournalError::RequestFailed(message));
        }

        tracing::info!(entry_id = id, "Deleted remote entry");
        Ok(())
    }
}

async fn entry_from_response(response: Response, fallback: &str) -> JournalResult<RemoteMoodEntry> {
    if !response.status().is_success() {
        let message = rejection_message(response, fallback).await;
        return Err(JournalError::RequestFailed(message));
    }

    let envelope: DataEnvelope<RemoteMoodEntry> = response.json().await?;
    Ok(envelope.data)
}

async fn rejection_message(response: Response, fallback: &str) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = dto::error_message(&body, fallback);
    tracing::warn!(status = %status, message = %message, "CMS rejected request");
    message
}

/// Maps CMS records (numeric id, keyword mood) to local entries (string id,
/// emoji mood). Pure and total.
pub fn translate_remote_to_local(remote: &[RemoteMoodEntry]) -> Vec<MoodEntry> {
    remote.iter().map(to_local).collect()
}

fn to_local(entry: &RemoteMoodEntry) -> MoodEntry {
    MoodEntry::new(
        entry.id.to_string(),
        entry.date.clone(),
        entry.mood.to_presentation(),
        entry.note.clone().unwrap_or_default(),
    )
}
