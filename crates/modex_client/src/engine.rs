use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use modex_core::{BackendStatus, ExtractRequest, TransportOutcome};
use modex_logging::{modex_debug, modex_error};

use crate::extract::send_request;
use crate::{interpret_health, ClientSettings, EngineError, ExtractionTransport, ReqwestTransport};

enum EngineCommand {
    Extract(ExtractRequest),
    CheckHealth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ExtractionFinished(TransportOutcome),
    HealthChecked(BackendStatus),
}

/// Runs transport calls on a background tokio runtime and hands results
/// back over a channel, so the state owner never blocks on the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: &ClientSettings) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn ExtractionTransport>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport, command, event_tx).await;
                });
            }
            modex_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn request_extraction(&self, request: ExtractRequest) {
        if self.cmd_tx.send(EngineCommand::Extract(request)).is_err() {
            modex_error!("Engine thread is gone; extraction request dropped");
        }
    }

    pub fn check_health(&self) {
        if self.cmd_tx.send(EngineCommand::CheckHealth).is_err() {
            modex_error!("Engine thread is gone; health check dropped");
        }
    }

    /// Waits up to `timeout` for the next event. Fails once the engine
    /// thread is gone and no further events can arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }
}

async fn handle_command(
    transport: Arc<dyn ExtractionTransport>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Extract(request) => {
            // A panicking transport must still settle the request.
            let task = tokio::spawn(async move { send_request(transport.as_ref(), &request).await });
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    modex_error!("Extraction task aborted: {}", err);
                    Err(format!("Extraction task aborted: {err}"))
                }
            };
            EngineEvent::ExtractionFinished(outcome)
        }
        EngineCommand::CheckHealth => {
            EngineEvent::HealthChecked(interpret_health(transport.check_health().await))
        }
    };
    let _ = event_tx.send(event);
}
