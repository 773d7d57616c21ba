//! Data layer of the mood journal: calendar helpers, the mood entry model and
//! its collection operations, local persistence, and a client for the Strapi
//! CMS that stores entries per account.

pub mod calendar;
pub mod client;
pub mod config;
pub mod dates;
pub mod dto;
pub mod entries;
pub mod error;
pub mod journal;
pub mod models;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{translate_remote_to_local, CmsClient};
pub use config::Config;
pub use error::{JournalError, JournalResult};
pub use journal::Journal;
pub use models::{BackendMood, Mood, MoodEntry};
pub use session::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
