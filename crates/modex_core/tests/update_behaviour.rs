use std::sync::Once;

use modex_core::{
    update, AppState, BackendStatus, Effect, ExtractRequest, ExtractionPhase, Module, Msg,
    TransportResponse, INVALID_URL_MESSAGE, LOADING_LABEL, MISSING_URL_MESSAGE,
    NO_MODULES_MESSAGE, SUBMIT_LABEL,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(modex_logging::initialize_for_tests);
}

fn fill_rows(mut state: AppState, urls: &[&str]) -> AppState {
    for (index, url) in urls.iter().enumerate() {
        if index > 0 {
            state = update(state, Msg::EntryAdded).0;
        }
        state = update(
            state,
            Msg::EntryEdited {
                index,
                text: url.to_string(),
            },
        )
        .0;
    }
    state
}

fn submitted(urls: &[&str]) -> (AppState, Vec<Effect>) {
    let state = fill_rows(AppState::new(), urls);
    update(state, Msg::SubmitClicked)
}

fn finished(state: AppState, status: u16, body: &str) -> AppState {
    update(
        state,
        Msg::ExtractionFinished(Ok(TransportResponse::new(status, body))),
    )
    .0
}

#[test]
fn valid_submit_starts_request() {
    init_logging();
    let (mut state, effects) = submitted(&["https://a.example.com ", "", "https://b.example.com"]);

    assert_eq!(
        effects,
        vec![Effect::RequestExtraction {
            request: ExtractRequest {
                urls: vec![
                    "https://a.example.com".to_string(),
                    "https://b.example.com".to_string(),
                ],
            },
        }]
    );
    let view = state.view();
    assert!(view.loading);
    assert_eq!(view.submit_label, LOADING_LABEL);
    assert_eq!(view.modules, None);
    assert_eq!(view.error, None);
    assert!(state.consume_dirty());
}

#[test]
fn invalid_submit_publishes_row_errors_without_effects() {
    init_logging();
    let (state, effects) = submitted(&["https://a.com", "not-a-url"]);

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.rows[0].error, None);
    assert_eq!(view.rows[1].error.as_deref(), Some(INVALID_URL_MESSAGE));
    assert_eq!(state.phase(), &ExtractionPhase::Idle);
}

#[test]
fn empty_form_asks_for_a_url() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.view().rows[0].error.as_deref(),
        Some(MISSING_URL_MESSAGE)
    );
}

#[test]
fn inputs_are_ignored_while_loading() {
    init_logging();
    let (mut state, _) = submitted(&["https://a.com"]);
    assert!(state.consume_dirty());
    let before = state.view();

    let (state, effects) = update(state, Msg::EntryAdded);
    assert!(effects.is_empty());
    let (state, _) = update(
        state,
        Msg::EntryEdited {
            index: 0,
            text: "https://changed.com".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::LinesPasted {
            index: 0,
            raw: "https://x.com\nhttps://y.com".to_string(),
        },
    );
    let (mut state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
    assert!(!state.consume_dirty());
}

#[test]
fn successful_response_shows_modules() {
    init_logging();
    let (state, _) = submitted(&["https://a.com"]);
    let state = finished(
        state,
        200,
        r#"{"modules":[{"module":"Search","description":"Full text","submodules":{"Filters":null}}]}"#,
    );

    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.submit_label, SUBMIT_LABEL);
    assert_eq!(
        view.modules,
        Some(vec![Module::new("Search")
            .with_description("Full text")
            .with_submodule("Filters", None)])
    );
    assert_eq!(view.error, None);
}

#[test]
fn empty_result_is_shown_as_error() {
    init_logging();
    let (state, _) = submitted(&["https://a.com"]);
    let state = finished(state, 200, r#"{"modules":[]}"#);

    let view = state.view();
    assert_eq!(view.modules, None);
    let error = view.error.expect("error view");
    assert_eq!(error.message, NO_MODULES_MESSAGE);
    assert!(!error.quota_exhausted);
}

#[test]
fn rate_limit_failure_sets_quota_hint() {
    init_logging();
    let (state, _) = submitted(&["https://a.com"]);
    let state = finished(state, 429, r#"{"detail":"Rate limit exceeded, 429"}"#);

    let error = state.view().error.expect("error view");
    assert_eq!(error.message, "Rate limit exceeded, 429");
    assert!(error.quota_exhausted);
}

#[test]
fn resubmit_after_failure_clears_error_while_loading() {
    init_logging();
    let (state, _) = submitted(&["https://a.com"]);
    let state = update(
        state,
        Msg::ExtractionFinished(Err("connection refused".to_string())),
    )
    .0;
    assert!(state.view().error.is_some());

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    let view = state.view();
    assert!(view.loading);
    assert_eq!(view.error, None);
}

#[test]
fn stray_result_without_request_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (mut next, effects) = update(
        state.clone(),
        Msg::ExtractionFinished(Ok(TransportResponse::new(200, "[]"))),
    );

    assert!(effects.is_empty());
    assert_eq!(next.phase(), &ExtractionPhase::Idle);
    assert!(!next.consume_dirty());
}

#[test]
fn copy_and_export_need_modules() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CopyJsonClicked);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::ExportClicked);
    assert!(effects.is_empty());

    let state = fill_rows(state, &["https://a.com"]);
    let (state, _) = update(state, Msg::SubmitClicked);
    let state = finished(state, 200, r#"[{"module":"Auth"}]"#);

    let (state, effects) = update(state, Msg::CopyJsonClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyJson {
            json: "[\n  {\n    \"module\": \"Auth\",\n    \"submodules\": {}\n  }\n]".to_string(),
        }]
    );
    let (_state, effects) = update(state, Msg::ExportClicked);
    assert_eq!(
        effects,
        vec![Effect::ExportJson {
            modules: vec![Module::new("Auth")],
        }]
    );
}

#[test]
fn remove_row_through_update_keeps_errors_attached() {
    init_logging();
    let (state, _) = submitted(&["bad-0", "", "bad-2"]);
    assert_eq!(state.view().rows[2].error.as_deref(), Some(INVALID_URL_MESSAGE));

    let (state, _) = update(state, Msg::EntryRemoved { index: 1 });
    let view = state.view();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[1].text, "bad-2");
    assert_eq!(view.rows[1].error.as_deref(), Some(INVALID_URL_MESSAGE));
    assert!(view.can_remove);
}

#[test]
fn health_check_round_trip() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::HealthCheckClicked);
    assert_eq!(effects, vec![Effect::CheckBackend]);

    let status = BackendStatus::Online {
        status: "running".to_string(),
        message: "Module Extraction API".to_string(),
    };
    let (mut state, effects) = update(state, Msg::HealthChecked(status.clone()));
    assert!(effects.is_empty());
    assert_eq!(state.view().backend, Some(status));
    assert!(state.consume_dirty());
}
