use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::TitleMatch,
    routes::{recommendations::validate_query, AppState},
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Handler for title search endpoint. Returns the first matching title, or
/// `null` when nothing matches.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Option<TitleMatch>>> {
    validate_query(&params.q)?;

    let matched = state.index.resolve(&params.q).and_then(|index| {
        state.index.item(index).map(|item| TitleMatch {
            index,
            title: item.title.clone(),
        })
    });

    Ok(Json(matched))
}
