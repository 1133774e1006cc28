use modex_logging::{modex_debug, modex_warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Module;

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to extract modules";
pub const NO_MODULES_MESSAGE: &str =
    "No modules found in the documentation. The URLs may not contain extractable module information.";

/// Lifecycle of the extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtractionPhase {
    #[default]
    Idle,
    Loading,
    Success(Vec<Module>),
    Failure(String),
}

impl ExtractionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, ExtractionPhase::Loading)
    }

    pub fn modules(&self) -> Option<&[Module]> {
        match self {
            ExtractionPhase::Success(modules) => Some(modules),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ExtractionPhase::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Body of `POST /api/extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
}

/// Raw HTTP response as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// What the transport hands back: a response, or the message of a
/// transport-level failure (connection refused, reset, ...).
pub type TransportOutcome = Result<TransportResponse, String>;

/// Accepted success bodies. The service answers `{"modules": [...]}`; older
/// deployments answer with the bare array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SuccessPayload {
    Bare(Vec<Module>),
    Wrapped {
        #[serde(default)]
        modules: Option<Vec<Module>>,
    },
}

impl SuccessPayload {
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// A wrapped payload without `modules` counts as empty.
    pub fn into_modules(self) -> Vec<Module> {
        match self {
            SuccessPayload::Bare(modules) => modules,
            SuccessPayload::Wrapped { modules } => modules.unwrap_or_default(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("an extraction request is already in flight")]
    InFlight,
    #[error("at least one URL is required")]
    NoUrls,
}

/// Owns the extraction phase and performs every phase transition.
///
/// `begin` and `finish` bracket exactly one request; the transport itself
/// lives outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionOrchestrator {
    phase: ExtractionPhase,
}

impl ExtractionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ExtractionPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Moves to `Loading`, discarding any previous result, and returns the
    /// request to send. Rejected while another request is in flight.
    pub fn begin(&mut self, urls: Vec<String>) -> Result<ExtractRequest, ExtractError> {
        if self.is_loading() {
            return Err(ExtractError::InFlight);
        }
        if urls.is_empty() {
            return Err(ExtractError::NoUrls);
        }
        modex_debug!("Extraction started for {} url(s)", urls.len());
        self.phase = ExtractionPhase::Loading;
        Ok(ExtractRequest { urls })
    }

    /// Settles the in-flight request. Always leaves a terminal phase; an
    /// outcome arriving while idle is ignored.
    pub fn finish(&mut self, outcome: TransportOutcome) -> &ExtractionPhase {
        if !self.is_loading() {
            modex_warn!("Ignoring extraction outcome received outside Loading");
            return &self.phase;
        }
        self.phase = interpret_outcome(outcome);
        match &self.phase {
            ExtractionPhase::Success(modules) => {
                modex_debug!("Extraction succeeded with {} module(s)", modules.len())
            }
            ExtractionPhase::Failure(message) => {
                modex_debug!("Extraction failed: {}", message)
            }
            ExtractionPhase::Idle | ExtractionPhase::Loading => {}
        }
        &self.phase
    }
}

/// Maps a transport outcome onto a terminal phase.
pub fn interpret_outcome(outcome: TransportOutcome) -> ExtractionPhase {
    let response = match outcome {
        Ok(response) => response,
        Err(message) if message.trim().is_empty() => {
            return ExtractionPhase::Failure(GENERIC_FAILURE_MESSAGE.to_string())
        }
        Err(message) => return ExtractionPhase::Failure(message),
    };

    if !response.is_success() {
        let message =
            failure_detail(&response.body).unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        return ExtractionPhase::Failure(message);
    }

    match SuccessPayload::decode(&response.body) {
        Ok(payload) => {
            let modules = payload.into_modules();
            if modules.is_empty() {
                ExtractionPhase::Failure(NO_MODULES_MESSAGE.to_string())
            } else {
                ExtractionPhase::Success(modules)
            }
        }
        Err(err) => ExtractionPhase::Failure(format!(
            "Malformed response from extraction service: {err}"
        )),
    }
}

/// Reads `{"detail": "..."}` from an error body. Non-string or empty details
/// are treated as absent.
fn failure_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        _ => None,
    }
}

/// True when a failure message looks like quota or rate-limit exhaustion.
///
/// Plain substring match on the human-readable message; the service exposes
/// no error code for this, so it only drives the remediation hint.
pub fn is_quota_exhausted(message: &str) -> bool {
    message.contains("quota") || message.contains("429")
}
