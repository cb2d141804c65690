use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::RecommendationResponse,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub k: Option<usize>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Query(params) = query?;

    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".to_string()));
    }

    let k = params.k.unwrap_or(state.default_k);
    if k > state.max_k {
        return Err(AppError::InvalidInput(format!(
            "k must be at most {}",
            state.max_k
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        k,
        "Processing recommendation request"
    );

    let selected = state.recommender.find(&params.title)?.clone();
    let ranked = state.recommender.recommend(&params.title, k)?;
    let recommendations = state.enricher.enrich(ranked).await;

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        selected,
        recommendations,
    }))
}
