use crate::config::Config;
use crate::pipeline::TransformPipeline;
use crate::storage::FontStore;
use std::sync::Arc;

/// Shared application state accessible to all handlers.
///
/// Everything in here is immutable after startup; the only state that changes
/// between requests is the font directory on disk.
#[derive(Clone)]
pub struct AppState {
    /// XML + XSLT -> PDF sequence
    pub pipeline: Arc<TransformPipeline>,

    /// Uploaded fonts
    pub font_store: Arc<dyn FontStore>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pipeline: TransformPipeline, font_store: Arc<dyn FontStore>, config: Config) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            font_store,
            config: Arc::new(config),
        }
    }
}
