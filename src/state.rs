use crate::service::CompletionService;
use crate::settings::Settings;
use std::sync::Arc;

/// State shared across all HTTP handlers.
pub struct AppState {
    pub settings: Arc<Settings>,
    pub service: CompletionService,
}
