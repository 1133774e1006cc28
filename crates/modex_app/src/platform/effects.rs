use std::time::Duration;

use modex_client::{EngineError, EngineEvent, EngineHandle, JsonExporter};
use modex_core::{Effect, Msg};
use modex_logging::{modex_error, modex_info};

use super::config::AppConfig;

/// Executes effects emitted by `update` and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
    exporter: JsonExporter,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(&config.client_settings())?;
        Ok(Self {
            engine,
            exporter: JsonExporter::new(config.export_dir.clone()),
            in_flight: 0,
        })
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestExtraction { request } => {
                    modex_info!("RequestExtraction url_count={}", request.urls.len());
                    self.engine.request_extraction(request);
                    self.in_flight += 1;
                }
                Effect::CheckBackend => {
                    self.engine.check_health();
                    self.in_flight += 1;
                }
                Effect::CopyJson { json } => {
                    // No clipboard in a terminal; stdout is the copy target.
                    println!("{json}");
                }
                Effect::ExportJson { modules } => match self.exporter.export(&modules) {
                    Ok(path) => {
                        eprintln!("Exported {} module(s) to {}", modules.len(), path.display())
                    }
                    Err(err) => {
                        modex_error!("Export failed: {}", err);
                        eprintln!("Export failed: {err}");
                    }
                },
            }
        }
    }

    /// True while an engine call has not reported back yet.
    pub fn has_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Waits up to `timeout` for the next engine result.
    pub fn next_msg(&mut self, timeout: Duration) -> Result<Option<Msg>, EngineError> {
        match self.engine.recv_timeout(timeout) {
            Ok(Some(event)) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Ok(Some(to_msg(event)))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                self.in_flight = 0;
                Err(err)
            }
        }
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionFinished(outcome) => Msg::ExtractionFinished(outcome),
        EngineEvent::HealthChecked(status) => Msg::HealthChecked(status),
    }
}
