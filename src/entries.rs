use chrono::NaiveDate;
use uuid::Uuid;

use crate::dates;
use crate::error::JournalResult;
use crate::models::{Mood, MoodEntry};

/// Builds an entry stamped with the current instant. `mood` must be one of
/// the presentation emoji; a fresh id is generated unless one is supplied.
pub fn create_entry(mood: &str, note: &str, id: Option<String>) -> JournalResult<MoodEntry> {
    let mood: Mood = mood.parse()?;
    Ok(new_entry(mood, note, id))
}

/// Infallible variant of [`create_entry`] for an already-typed mood.
pub fn new_entry(mood: Mood, note: &str, id: Option<String>) -> MoodEntry {
    let id = id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    MoodEntry::new(id, dates::now_timestamp(), mood, note)
}

pub fn has_entry_for_date(entries: &[MoodEntry], date: NaiveDate) -> bool {
    entry_for_date(entries, date).is_some()
}

pub fn entry_for_date(entries: &[MoodEntry], date: NaiveDate) -> Option<&MoodEntry> {
    let key = dates::format_date(&date);
    entries.iter().find(|entry| entry.day_key() == key)
}

/// Returns a new collection where `new_entry` replaces the entry sharing its
/// calendar day, in place, or is appended when that day has none.
pub fn upsert_by_date(entries: &[MoodEntry], new_entry: MoodEntry) -> Vec<MoodEntry> {
    let key = dates::utc_day_key(&new_entry.date);
    let mut updated = entries.to_vec();
    match updated.iter().position(|entry| entry.day_key() == key) {
        Some(index) => updated[index] = new_entry,
        None => updated.push(new_entry),
    }
    updated
}

/// Entries whose date starts with `YYYY-MM` for the given 0-based month, in
/// their original order. `month0` may overflow into neighbouring years.
pub fn entries_for_month(entries: &[MoodEntry], year: i32, month0: i32) -> Vec<&MoodEntry> {
    let (year, month) = dates::normalize_month(year, month0);
    let prefix = format!("{:04}-{:02}-", year, month);
    entries
        .iter()
        .filter(|entry| entry.date.starts_with(&prefix))
        .collect()
}

/// Stable sort by parsed timestamp, newest first unless `ascending`.
/// Dates that do not parse order before every valid one.
pub fn sort_by_date(entries: &[MoodEntry], ascending: bool) -> Vec<MoodEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        let a = dates::parse_timestamp(&a.date);
        let b = dates::parse_timestamp(&b.date);
        if ascending {
            a.cmp(&b)
        } else {
            b.cmp(&a)
        }
    });
    sorted
}

/// Entries that only exist on this device (no CMS id).
pub fn local_only(entries: &[MoodEntry]) -> Vec<MoodEntry> {
    entries
        .iter()
        .filter(|entry| entry.remote_id().is_none())
        .cloned()
        .collect()
}

/// Lays the account's entries over the device-only ones in `local`. An
/// account entry replaces a local one recorded on the same day; entries
/// from an earlier account are dropped.
pub fn merge_account_entries(local: &[MoodEntry], account: Vec<MoodEntry>) -> Vec<MoodEntry> {
    account
        .into_iter()
        .fold(local_only(local), |merged, entry| upsert_by_date(&merged, entry))
}

/// Entry recorded for the current UTC day, if any.
pub fn today_entry(entries: &[MoodEntry]) -> Option<&MoodEntry> {
    let today = chrono::Utc::now().date_naive();
    entry_for_date(entries, today)
}

/// Count of entries per mood, in [`Mood::ALL`] order.
pub fn mood_counts<'a>(entries: impl IntoIterator<Item = &'a MoodEntry>) -> [(Mood, usize); 3] {
    let mut counts = Mood::ALL.map(|mood| (mood, 0usize));
    for entry in entries {
        if let Some(slot) = counts.iter_mut().find(|(mood, _)| *mood == entry.mood) {
            slot.1 += 1;
        }
    }
    counts
}
