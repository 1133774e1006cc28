//! Modex client: HTTP transport, extraction driver and effect execution.
mod engine;
mod export;
mod extract;
mod health;
mod settings;
mod transport;
mod types;

pub use engine::{EngineEvent, EngineHandle};
pub use export::{ensure_output_dir, JsonExporter, EXPORT_FILENAME};
pub use extract::{extract, send_request};
pub use health::interpret_health;
pub use settings::{ClientSettings, DEFAULT_BACKEND_URL, DEFAULT_EXTRACT_PATH};
pub use transport::{ExtractionTransport, ReqwestTransport};
pub use types::{EngineError, ExportError, TransportError};
