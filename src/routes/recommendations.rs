use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationResponse, RecommendedTitle},
    routes::AppState,
    services::providers::fetch_posters,
};

const MAX_QUERY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    q: String,
}

pub(crate) fn validate_query(query: &str) -> AppResult<()> {
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(AppError::InvalidInput(format!(
            "Query must be at most {} characters",
            MAX_QUERY_CHARS
        )));
    }
    Ok(())
}

/// Handler for recommendations endpoint
///
/// Ranking is computed from the catalog index alone; posters are looked up
/// afterwards and a failed lookup only leaves `poster_url` empty.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    validate_query(&params.q)?;

    let matched = state.index.resolve(&params.q);
    let Some(index) = matched else {
        tracing::info!(request_id = %request_id, query = %params.q, "Query matched no title");
        return Ok(Json(RecommendationResponse {
            query: params.q,
            matched_title: None,
            recommendations: vec![],
        }));
    };

    let recommendations = state.index.recommend_for(index);
    let matched_title = state.index.item(index).map(|item| item.title.clone());

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        matched = ?matched_title,
        results = recommendations.len(),
        "Recommendations ranked"
    );

    let titles = recommendations.iter().map(|r| r.title.clone()).collect();
    let posters = fetch_posters(state.poster_provider.clone(), titles).await;

    let recommendations = recommendations
        .into_iter()
        .zip(posters)
        .map(|(rec, poster_url)| RecommendedTitle {
            title: rec.title,
            score: rec.score,
            poster_url,
        })
        .collect();

    Ok(Json(RecommendationResponse {
        query: params.q,
        matched_title,
        recommendations,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query_length() {
        assert!(validate_query("").is_ok());
        assert!(validate_query(&"a".repeat(MAX_QUERY_CHARS)).is_ok());
        assert!(matches!(
            validate_query(&"a".repeat(MAX_QUERY_CHARS + 1)),
            Err(AppError::InvalidInput(_))
        ));
    }
}
