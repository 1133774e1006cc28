use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use modex_client::{ClientSettings, DEFAULT_BACKEND_URL, DEFAULT_EXTRACT_PATH};
use modex_logging::LogDestination;
use serde::{Deserialize, Serialize};

use super::cli::Cli;

const DEFAULT_CONFIG_FILENAME: &str = "modex.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    /// Appended to `backend_url`. The default `/api/extract` assumes the
    /// service sits behind the web front end's `/api` proxy; point
    /// `backend_url` straight at the service with `extract_path: "/extract"`.
    pub extract_path: String,
    pub export_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
    pub log_file: PathBuf,
    pub connect_timeout_secs: Option<u64>,
    /// Unset means wait for the service as long as it takes.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            extract_path: DEFAULT_EXTRACT_PATH.to_string(),
            export_dir: PathBuf::from("."),
            log_destination: LogDestination::File,
            log_level: LogLevel::Info,
            log_file: PathBuf::from("modex.log"),
            connect_timeout_secs: Some(10),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(backend) = &cli.backend {
            self.backend_url = backend.clone();
        }
        if let Some(dir) = &cli.export_dir {
            self.export_dir = dir.clone();
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
            self.log_destination = LogDestination::Both;
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.backend_url.clone(),
            extract_path: self.extract_path.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// File the values came from; `None` when built-in defaults were used.
    pub source: Option<PathBuf>,
}

/// Loads the config file. An explicit path must exist; the default
/// `./modex.ron` is optional and falls back to built-in defaults.
///
/// Runs before the logger exists, so it does not log.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(LoadedConfig {
                config: AppConfig::default(),
                source: None,
            });
        }
        Err(source) => return Err(ConfigError::Io { path, source }),
    };

    let config = parse(&content).map_err(|message| ConfigError::Parse {
        path: path.clone(),
        message,
    })?;
    Ok(LoadedConfig {
        config,
        source: Some(path),
    })
}

fn parse(content: &str) -> Result<AppConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}
