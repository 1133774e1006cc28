use std::sync::Arc;
use std::time::{Duration, Instant};

use modex_client::{ClientSettings, EngineEvent, EngineHandle, ExtractionTransport, TransportError};
use modex_core::{BackendStatus, ExtractRequest, TransportResponse};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

struct PanickingTransport;

#[async_trait::async_trait]
impl ExtractionTransport for PanickingTransport {
    async fn post_extract(
        &self,
        _request: &ExtractRequest,
    ) -> Result<TransportResponse, TransportError> {
        panic!("transport exploded");
    }

    async fn check_health(&self) -> Result<TransportResponse, TransportError> {
        Err(TransportError::Connect("refused".to_string()))
    }
}

fn wait_for_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)).unwrap() {
            return event;
        }
    }
    panic!("no engine event within {WAIT:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_reports_extraction_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/extract"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"module":"A"}]"#))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(&ClientSettings::with_base_url(server.uri())).unwrap();
    engine.request_extraction(ExtractRequest {
        urls: vec!["https://a.com".to_string()],
    });

    let event = tokio::task::spawn_blocking(move || wait_for_event(&engine))
        .await
        .unwrap();
    assert_eq!(
        event,
        EngineEvent::ExtractionFinished(Ok(TransportResponse::new(200, r#"[{"module":"A"}]"#)))
    );
}

#[test]
fn panicking_transport_still_settles_request() {
    let engine = EngineHandle::with_transport(Arc::new(PanickingTransport)).unwrap();
    engine.request_extraction(ExtractRequest {
        urls: vec!["https://a.com".to_string()],
    });

    match wait_for_event(&engine) {
        EngineEvent::ExtractionFinished(Err(message)) => {
            assert!(message.starts_with("Extraction task aborted"), "{message}")
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn health_check_reports_unreachable() {
    let engine = EngineHandle::with_transport(Arc::new(PanickingTransport)).unwrap();
    engine.check_health();

    assert_eq!(
        wait_for_event(&engine),
        EngineEvent::HealthChecked(BackendStatus::Unreachable(
            "could not connect to extraction service: refused".to_string()
        ))
    );
}
