//! Modex core: URL collection, extraction lifecycle and the pure state machine
//! that drives them.
mod collector;
mod effect;
mod module;
mod msg;
mod orchestrator;
mod state;
mod update;
mod view_model;

pub use collector::{
    is_absolute_url, UrlCollector, UrlEntry, ValidationErrors, INVALID_URL_MESSAGE,
    MISSING_URL_MESSAGE,
};
pub use effect::Effect;
pub use module::{modules_to_pretty_json, Module};
pub use msg::Msg;
pub use orchestrator::{
    interpret_outcome, is_quota_exhausted, ExtractError, ExtractRequest, ExtractionOrchestrator,
    ExtractionPhase, SuccessPayload, TransportOutcome, TransportResponse,
    GENERIC_FAILURE_MESSAGE, NO_MODULES_MESSAGE,
};
pub use state::{AppState, BackendStatus};
pub use update::update;
pub use view_model::{AppViewModel, ErrorView, RowView, LOADING_LABEL, SUBMIT_LABEL};
