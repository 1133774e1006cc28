use crate::view_model::{AppViewModel, ErrorView, RowView, LOADING_LABEL, SUBMIT_LABEL};
use crate::{ExtractionOrchestrator, ExtractionPhase, UrlCollector};

/// Last known reachability of the extraction backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    /// Backend answered its root endpoint.
    Online { status: String, message: String },
    /// Backend answered with a non-success HTTP status.
    HttpError(u16),
    /// Backend could not be reached.
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    collector: UrlCollector,
    orchestrator: ExtractionOrchestrator,
    backend: Option<BackendStatus>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collector(&self) -> &UrlCollector {
        &self.collector
    }

    pub fn phase(&self) -> &ExtractionPhase {
        self.orchestrator.phase()
    }

    /// Row edits and submission are disabled while a request is in flight.
    pub fn inputs_locked(&self) -> bool {
        self.orchestrator.is_loading()
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .collector
            .entries()
            .into_iter()
            .map(|entry| RowView {
                error: self.collector.error_for(entry.index).map(ToOwned::to_owned),
                index: entry.index,
                text: entry.text,
            })
            .collect();

        let phase = self.orchestrator.phase();
        AppViewModel {
            rows,
            can_remove: self.collector.can_remove(),
            loading: phase.is_loading(),
            submit_label: if phase.is_loading() {
                LOADING_LABEL
            } else {
                SUBMIT_LABEL
            },
            modules: phase.modules().map(<[_]>::to_vec),
            error: phase.failure().map(ErrorView::new),
            backend: self.backend.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn collector_mut(&mut self) -> &mut UrlCollector {
        &mut self.collector
    }

    pub(crate) fn orchestrator_mut(&mut self) -> &mut ExtractionOrchestrator {
        &mut self.orchestrator
    }

    pub(crate) fn set_backend(&mut self, status: BackendStatus) {
        self.backend = Some(status);
    }
}
