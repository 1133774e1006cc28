use modex_logging::{modex_debug, modex_error, modex_warn};

use crate::{modules_to_pretty_json, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::EntryEdited { index, text } => {
            if !state.inputs_locked() && state.collector_mut().update_entry(index, text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EntryAdded => {
            if !state.inputs_locked() {
                state.collector_mut().add_entry();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EntryRemoved { index } => {
            if !state.inputs_locked() && state.collector_mut().remove_entry(index) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LinesPasted { index, raw } => {
            if !state.inputs_locked() && state.collector_mut().paste_lines(index, &raw) > 0 {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.inputs_locked() {
                return (state, Vec::new());
            }
            // Errors are published (or cleared) either way.
            state.mark_dirty();
            let urls = match state.collector_mut().submit() {
                Ok(urls) => urls,
                Err(errors) => {
                    modex_debug!("Submit blocked by {} row error(s)", errors.len());
                    return (state, Vec::new());
                }
            };
            match state.orchestrator_mut().begin(urls) {
                Ok(request) => vec![Effect::RequestExtraction { request }],
                Err(err) => {
                    modex_warn!("Extraction not started: {}", err);
                    Vec::new()
                }
            }
        }
        Msg::ExtractionFinished(outcome) => {
            if state.inputs_locked() {
                state.orchestrator_mut().finish(outcome);
                state.mark_dirty();
            } else {
                modex_warn!("Dropping extraction result with no request in flight");
            }
            Vec::new()
        }
        Msg::CopyJsonClicked => match state.phase().modules() {
            Some(modules) => match modules_to_pretty_json(modules) {
                Ok(json) => vec![Effect::CopyJson { json }],
                Err(err) => {
                    modex_error!("Failed to format modules as JSON: {}", err);
                    Vec::new()
                }
            },
            None => Vec::new(),
        },
        Msg::ExportClicked => match state.phase().modules() {
            Some(modules) => vec![Effect::ExportJson {
                modules: modules.to_vec(),
            }],
            None => Vec::new(),
        },
        Msg::HealthCheckClicked => vec![Effect::CheckBackend],
        Msg::HealthChecked(status) => {
            state.set_backend(status);
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}
