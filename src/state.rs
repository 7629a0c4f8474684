//! Shared application state.

use std::sync::Arc;

use crate::application::services::ConversionService;
use crate::domain::renderer::PageRenderer;

/// State injected into every handler.
///
/// Holds only immutable services; each request launches and owns its own
/// browser session.
#[derive(Clone)]
pub struct AppState {
    pub conversion_service: Arc<ConversionService>,
}

impl AppState {
    pub fn new(renderer: Arc<dyn PageRenderer>, max_batch_urls: usize) -> Self {
        Self {
            conversion_service: Arc::new(ConversionService::new(renderer, max_batch_urls)),
        }
    }
}
