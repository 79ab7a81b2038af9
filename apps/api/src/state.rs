use std::sync::Arc;

use crate::analysis::generator::CareerAnalyzer;
use crate::storage::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record storage. Default: PgAnalysisStore.
    pub store: Arc<dyn AnalysisStore>,
    /// Analysis pipeline with its generation backend fixed at startup.
    pub analyzer: CareerAnalyzer,
}
