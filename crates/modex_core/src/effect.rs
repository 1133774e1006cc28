use crate::{ExtractRequest, Module};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `POST /api/extract` and report back with `Msg::ExtractionFinished`.
    RequestExtraction { request: ExtractRequest },
    /// Hand formatted JSON to the clipboard (or its stand-in).
    CopyJson { json: String },
    ExportJson { modules: Vec<Module> },
    /// Probe the backend and report back with `Msg::HealthChecked`.
    CheckBackend,
}
