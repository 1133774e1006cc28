use modex_core::{
    ExtractError, ExtractRequest, ExtractionOrchestrator, ExtractionPhase, TransportOutcome,
};
use modex_logging::{modex_info, modex_warn};

use crate::ExtractionTransport;

/// Runs one extraction round trip against `transport`.
///
/// Rejected without touching the network if a request is already in flight
/// or `urls` is empty. Otherwise the returned phase is always `Success` or
/// `Failure`.
pub async fn extract<'a>(
    orchestrator: &'a mut ExtractionOrchestrator,
    transport: &dyn ExtractionTransport,
    urls: Vec<String>,
) -> Result<&'a ExtractionPhase, ExtractError> {
    let request = orchestrator.begin(urls)?;
    let outcome = send_request(transport, &request).await;
    Ok(orchestrator.finish(outcome))
}

/// Sends the request and flattens transport errors into their message.
pub async fn send_request(
    transport: &dyn ExtractionTransport,
    request: &ExtractRequest,
) -> TransportOutcome {
    modex_info!("Requesting extraction for {} url(s)", request.urls.len());
    match transport.post_extract(request).await {
        Ok(response) => {
            modex_info!(
                "Extraction service answered status={} body_len={}",
                response.status,
                response.body.len()
            );
            Ok(response)
        }
        Err(err) => {
            modex_warn!("Extraction request failed: {}", err);
            Err(err.to_string())
        }
    }
}
