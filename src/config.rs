use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:1337/api/";
pub const DEFAULT_DATA_DIR: &str = ".moodjournal";

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub data_dir: PathBuf,
    /// None = wait for the remote indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: normalize_base_url(backend_url.into()),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request_timeout: None,
        }
    }

    pub fn from_env() -> Self {
        Self {
            backend_url: normalize_base_url(
                env::var("MOODJOURNAL_BACKEND_URL")
                    .ok()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| DEFAULT_BACKEND_URL.into()),
            ),
            data_dir: env::var("MOODJOURNAL_DATA_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            request_timeout: env::var("MOODJOURNAL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

/// Endpoint paths are joined onto the base, so it must end with `/`.
fn normalize_base_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
