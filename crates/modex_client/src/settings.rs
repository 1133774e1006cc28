use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Route exposed by the web front end's proxy. The service itself answers
/// on `/extract`.
pub const DEFAULT_EXTRACT_PATH: &str = "/api/extract";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub extract_path: String,
    pub connect_timeout: Option<Duration>,
    /// `None` waits for the service indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            extract_path: DEFAULT_EXTRACT_PATH.to_string(),
            connect_timeout: Some(Duration::from_secs(10)),
            request_timeout: None,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
