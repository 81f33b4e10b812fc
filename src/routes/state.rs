use std::sync::Arc;

use crate::services::{providers::PosterProvider, CatalogIndex};

/// Shared application state.
///
/// The catalog index is immutable after startup, so handlers read it without
/// any locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<CatalogIndex>,
    pub poster_provider: Arc<dyn PosterProvider>,
}

impl AppState {
    pub fn new(index: CatalogIndex, poster_provider: Arc<dyn PosterProvider>) -> Self {
        Self {
            index: Arc::new(index),
            poster_provider,
        }
    }
}
