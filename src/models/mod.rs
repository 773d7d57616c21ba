pub mod entry;
pub mod mood;
pub mod user;

pub use entry::MoodEntry;
pub use mood::{BackendMood, Mood};
pub use user::{AuthSession, RemoteMoodEntry, RemoteUser};
