use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::CatalogStats, routes::AppState};

/// Handler for catalog statistics
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(CatalogStats {
        items: state.index.len(),
        vocabulary_size: state.index.vocabulary_size(),
        built_at: state.index.built_at(),
    })
}
