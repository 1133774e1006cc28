use crate::{is_quota_exhausted, BackendStatus, Module};

pub const SUBMIT_LABEL: &str = "Extract Modules";
pub const LOADING_LABEL: &str = "Extracting...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub rows: Vec<RowView>,
    pub can_remove: bool,
    pub loading: bool,
    pub submit_label: &'static str,
    /// Present only for a non-empty successful extraction.
    pub modules: Option<Vec<Module>>,
    pub error: Option<ErrorView>,
    pub backend: Option<BackendStatus>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub text: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
    /// Hint for rendering quota remediation; does not change behaviour.
    pub quota_exhausted: bool,
}

impl ErrorView {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            quota_exhausted: is_quota_exhausted(message),
        }
    }
}
