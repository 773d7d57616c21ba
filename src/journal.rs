use std::sync::Arc;

use chrono::NaiveDate;

use crate::calendar::MonthView;
use crate::client::CmsClient;
use crate::dates;
use crate::entries;
use crate::error::{JournalError, JournalResult};
use crate::models::{AuthSession, Mood, MoodEntry};
use crate::storage::{self, KeyValueStore};

/// The journal a front-end drives: the in-memory entry collection, its local
/// cache, and the CMS account when signed in.
///
/// Methods take `&mut self`, so submissions are applied one at a time; the
/// local cache keeps whichever collection was saved last.
pub struct Journal {
    store: Arc<dyn KeyValueStore>,
    client: CmsClient,
    entries: Vec<MoodEntry>,
}

impl Journal {
    /// Opens the journal over `store` and loads its cached entries.
    pub fn open(store: Arc<dyn KeyValueStore>, client: CmsClient) -> JournalResult<Self> {
        let entries = storage::load_entries(store.as_ref())?;
        tracing::debug!(count = entries.len(), "Opened journal");
        Ok(Self {
            store,
            client,
            entries,
        })
    }

    pub fn client(&self) -> &CmsClient {
        &self.client
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Newest first.
    pub fn history(&self) -> Vec<MoodEntry> {
        entries::sort_by_date(&self.entries, false)
    }

    pub fn today_entry(&self) -> Option<&MoodEntry> {
        entries::today_entry(&self.entries)
    }

    pub fn entry_for_date(&self, date: NaiveDate) -> Option<&MoodEntry> {
        entries::entry_for_date(&self.entries, date)
    }

    pub fn month(&self, year: i32, month0: i32) -> Vec<&MoodEntry> {
        entries::entries_for_month(&self.entries, year, month0)
    }

    pub fn calendar(&self, year: i32, month0: i32, today: NaiveDate) -> MonthView<'_> {
        MonthView::build(&self.entries, year, month0, today)
    }

    /// Re-reads entries from the account when signed in, otherwise from the
    /// local cache. Account entries are laid over the device-only ones, so
    /// entries recorded while signed out survive signing in. A signed-in
    /// refresh whose user lookup fails drops to local-only mode (the session
    /// is already cleared by then).
    pub async fn refresh(&mut self) -> JournalResult<()> {
        if !self.client.is_authenticated() {
            self.entries = storage::load_entries(self.store.as_ref())?;
            return Ok(());
        }

        match self.client.current_user(true).await {
            Some(user) => {
                let cached = storage::load_entries(self.store.as_ref())?;
                let account = crate::client::translate_remote_to_local(user.entries());
                self.entries = entries::merge_account_entries(&cached, account);
                self.save()?;
                tracing::info!(user_id = user.id, count = self.entries.len(), "Synced entries from account");
            }
            None => {
                tracing::warn!("Session no longer valid, continuing with local entries");
                self.entries = storage::load_entries(self.store.as_ref())?;
            }
        }
        Ok(())
    }

    /// Records today's mood. A second submission on the same day replaces
    /// the first. Signed in, the account is written first and a remote
    /// failure leaves local state untouched.
    pub async fn record_mood(&mut self, mood: Mood, note: &str) -> JournalResult<MoodEntry> {
        let entry = if self.client.is_authenticated() {
            let now = dates::now_timestamp();
            let existing = self.today_entry().and_then(MoodEntry::remote_id);
            match existing {
                Some(id) => self.client.update_entry(id, note, mood, &now).await?,
                None => self.client.create_entry(note, mood, &now).await?,
            }
        } else {
            entries::new_entry(mood, note, None)
        };

        self.entries = entries::upsert_by_date(&self.entries, entry.clone());
        self.save()?;
        tracing::info!(entry_id = %entry.id, mood = %entry.mood, "Recorded mood");
        Ok(entry)
    }

    /// Deletes an account entry and forgets it locally.
    pub async fn delete(&mut self, id: &str) -> JournalResult<()> {
        let remote_id = id
            .parse::<u64>()
            .map_err(|_| JournalError::RequestFailed(format!("Entry {} is not stored remotely", id)))?;
        self.client.delete_entry(remote_id).await?;

        self.entries.retain(|entry| entry.id != id);
        self.save()
    }

    pub async fn login(&mut self, identifier: &str, password: &str) -> JournalResult<AuthSession> {
        let auth = self.client.login(identifier, password).await?;
        self.refresh().await?;
        Ok(auth)
    }

    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> JournalResult<AuthSession> {
        let auth = self.client.register(username, email, password).await?;
        self.refresh().await?;
        Ok(auth)
    }

    /// Signs out and forgets the account's entries, in memory and in the
    /// local cache. Entries that only ever lived on this device are kept.
    pub fn logout(&mut self) -> JournalResult<()> {
        self.client.logout()?;
        let before = self.entries.len();
        self.entries = entries::local_only(&self.entries);
        tracing::info!(forgotten = before - self.entries.len(), "Signed out");
        self.save()
    }

    fn save(&self) -> JournalResult<()> {
        storage::save_entries(self.store.as_ref(), &self.entries)
    }
}
