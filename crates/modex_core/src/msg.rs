use crate::{BackendStatus, TransportOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the text of a URL row.
    EntryEdited { index: usize, text: String },
    /// User clicked "Add another URL".
    EntryAdded,
    /// User removed a URL row.
    EntryRemoved { index: usize },
    /// User pasted one or more lines into a row.
    LinesPasted { index: usize, raw: String },
    /// User submitted the form.
    SubmitClicked,
    /// Transport finished the in-flight extraction request.
    ExtractionFinished(TransportOutcome),
    /// User asked for the current modules as JSON text.
    CopyJsonClicked,
    /// User asked to write the current modules to disk.
    ExportClicked,
    /// User asked whether the backend is reachable.
    HealthCheckClicked,
    /// Result of a backend health check.
    HealthChecked(BackendStatus),
}
