use std::sync::Arc;

use crate::export::PdfExporter;
use crate::session::SessionStore;
use crate::tailoring::SectionTailor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable tailoring backend. Default: LlmSectionTailor.
    pub tailor: Arc<dyn SectionTailor>,
    pub exporter: PdfExporter,
}
