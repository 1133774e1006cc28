use std::io;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid backend url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("could not connect to extraction service: {0}")]
    Connect(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl TransportError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout(err.to_string());
        }
        if err.is_connect() {
            return TransportError::Connect(err.to_string());
        }
        if err.is_body() || err.is_decode() {
            return TransportError::Body(err.to_string());
        }
        TransportError::Network(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize modules: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("extraction engine stopped")]
    Disconnected,
}
