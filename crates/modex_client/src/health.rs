use modex_core::{BackendStatus, TransportResponse};
use serde::Deserialize;

use crate::TransportError;

#[derive(Debug, Deserialize, Default)]
struct RootBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Turns the answer of `GET /` into a status for display.
pub fn interpret_health(result: Result<TransportResponse, TransportError>) -> BackendStatus {
    match result {
        Ok(response) if response.is_success() => {
            let body: RootBody = serde_json::from_slice(&response.body).unwrap_or_default();
            BackendStatus::Online {
                status: if body.status.is_empty() {
                    "running".to_string()
                } else {
                    body.status
                },
                message: body.message,
            }
        }
        Ok(response) => BackendStatus::HttpError(response.status),
        Err(err) => BackendStatus::Unreachable(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_status_and_message() {
        let status = interpret_health(Ok(TransportResponse::new(
            200,
            r#"{"message":"Module Extraction API","status":"running"}"#,
        )));
        assert_eq!(
            status,
            BackendStatus::Online {
                status: "running".to_string(),
                message: "Module Extraction API".to_string(),
            }
        );
    }

    #[test]
    fn non_json_root_still_counts_as_online() {
        let status = interpret_health(Ok(TransportResponse::new(200, "<html></html>")));
        assert!(matches!(status, BackendStatus::Online { .. }));
    }

    #[test]
    fn error_status_and_transport_failure() {
        assert_eq!(
            interpret_health(Ok(TransportResponse::new(503, ""))),
            BackendStatus::HttpError(503)
        );
        let status = interpret_health(Err(TransportError::Connect("refused".to_string())));
        assert_eq!(
            status,
            BackendStatus::Unreachable("could not connect to extraction service: refused".to_string())
        );
    }
}
