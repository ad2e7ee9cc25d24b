//! Application state shared by every handler.

use crate::services::{RenderPipeline, UploadPipeline};
use std::sync::Arc;
use stillcut_core::Config;
use stillcut_storage::BlobStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlobStore>,
    pub upload: UploadPipeline,
    pub render: RenderPipeline,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn BlobStore>) -> Self {
        Self {
            upload: UploadPipeline::new(store.clone(), config),
            render: RenderPipeline::new(store.clone()),
            store,
        }
    }
}
